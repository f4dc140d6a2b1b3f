// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pulling an element back inside the viewport by translation.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use core::fmt;

use kurbo::{Rect, Vec2};
use plumbers_core::{
    CallbackArgs, Controller, Detail, Element, ElementOf, Environment, EventInit, Listener,
    Observer, Plumber, PlumberOptions,
};
use plumbers_geometry::{
    Adjustment, Direction, GeometryError, Overflow, edge_distance, parse_translation,
};
use smallvec::{SmallVec, smallvec};

use crate::MotionGuard;

/// Boundary sides checked by a shifter.
pub type Boundaries = SmallVec<[Direction; 4]>;

/// Parse a boundary list such as `"top left right"` or `"top,left"`.
///
/// Unknown names are an error.
pub fn parse_boundaries(value: &str) -> Result<Boundaries, GeometryError> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

/// Compute the per-side overflow of `inner` against `outer`.
///
/// For each boundary, a non-negative edge distance records
/// [`Adjustment::Inside`]. A negative distance records
/// [`Adjustment::Overflow`] only when moving back by that amount still leaves
/// the opposite edge inside `outer` and the opposite side has no correction
/// yet; otherwise the side is left unset.
#[must_use]
pub fn compute_overflow(inner: Rect, outer: Rect, boundaries: &[Direction]) -> Overflow {
    let mut overflow = Overflow::new();
    for &direction in boundaries {
        let distance = edge_distance(inner, direction, outer);
        if distance >= 0.0 {
            overflow.set(direction, Adjustment::Inside);
            continue;
        }
        let opposite = direction.opposite();
        let room = edge_distance(inner, opposite, outer) + distance >= 0.0;
        if room && overflow.distance(opposite).is_none() {
            overflow.set(direction, Adjustment::Overflow(distance));
        }
    }
    overflow
}

/// The element's bounding rect with its current transform translation removed.
///
/// An unreadable transform is treated as no translation.
pub fn untranslated_rect<E: Element>(element: &E) -> Rect {
    let transform = element.computed_style("transform");
    let translation = parse_translation(&transform).unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring unreadable transform");
        Vec2::ZERO
    });
    element.bounding_client_rect() - translation
}

/// Options for [`Shifter`].
#[derive(Debug)]
pub struct ShiftOptions<E> {
    /// Shared behavior options.
    pub plumber: PlumberOptions<E>,
    /// Global event kinds that trigger a shift.
    pub events: SmallVec<[String; 2]>,
    /// Viewport sides to keep the element inside of.
    pub boundaries: Boundaries,
    /// Callback invoked after shifting.
    pub on_shifted: String,
    /// Suppress transitions while shifting when reduced motion is requested.
    pub respect_reduced_motion: bool,
}

impl<E> Default for ShiftOptions<E> {
    fn default() -> Self {
        Self {
            plumber: PlumberOptions::default(),
            events: smallvec!["resize".into()],
            boundaries: smallvec![Direction::Top, Direction::Left, Direction::Right],
            on_shifted: "shifted".into(),
            respect_reduced_motion: true,
        }
    }
}

impl<E> ShiftOptions<E> {
    /// Use `plumber` as the shared behavior options.
    #[must_use]
    pub fn with_plumber(mut self, plumber: PlumberOptions<E>) -> Self {
        self.plumber = plumber;
        self
    }

    /// Listen for these event kinds instead of `resize`.
    #[must_use]
    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Check these viewport sides.
    #[must_use]
    pub fn with_boundaries(mut self, boundaries: impl IntoIterator<Item = Direction>) -> Self {
        self.boundaries = boundaries.into_iter().collect();
        self
    }

    /// Whether to honor the reduced-motion preference.
    #[must_use]
    pub fn with_respect_reduced_motion(mut self, respect: bool) -> Self {
        self.respect_reduced_motion = respect;
        self
    }
}

/// Keeps a positioned element inside the viewport.
///
/// On each triggering event (and on direct calls to [`shift`](Self::shift))
/// the shifter measures the element without its current translation, computes
/// the overflow against the configured boundaries, and writes a
/// `translate(Xpx, Ypx)` transform that pulls it back in.
pub struct Shifter<H: Controller> {
    plumber: Plumber<H>,
    boundaries: Boundaries,
    on_shifted: String,
    respect_reduced_motion: bool,
    observer: Rc<Observer<H::Env>>,
}

impl<H: Controller> fmt::Debug for Shifter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shifter")
            .field("plumber", &self.plumber)
            .field("boundaries", &self.boundaries)
            .field("on_shifted", &self.on_shifted)
            .field("respect_reduced_motion", &self.respect_reduced_motion)
            .field("observer", &self.observer)
            .finish()
    }
}

impl<H: Controller> Shifter<H> {
    /// Attach to `host` and start listening.
    pub fn attach(host: &Rc<H>, options: ShiftOptions<ElementOf<H>>) -> Rc<Self> {
        let this = Rc::new_cyclic(|weak: &Weak<Self>| {
            let plumber = Plumber::new(host, options.plumber);
            let weak = weak.clone();
            let listener: Listener<ElementOf<H>> = Rc::new(move |_| {
                let this = weak.upgrade();
                Box::pin(async move {
                    if let Some(this) = this {
                        this.shift().await;
                    }
                })
            });
            let observer = Observer::observe(plumber.env(), options.events.as_slice(), listener);
            Self {
                plumber,
                boundaries: options.boundaries,
                on_shifted: options.on_shifted,
                respect_reduced_motion: options.respect_reduced_motion,
                observer,
            }
        });
        this.observer.bind(host.teardown());
        this
    }

    /// The underlying behavior state.
    pub fn plumber(&self) -> &Plumber<H> {
        &self.plumber
    }

    /// The overflow the element currently has, without applying anything.
    pub fn overflow(&self) -> Option<Overflow> {
        let element = self.plumber.element()?;
        Some(compute_overflow(
            untranslated_rect(element),
            self.plumber.env().viewport(),
            &self.boundaries,
        ))
    }

    /// Measure and correct the element's position.
    ///
    /// Does nothing unless the element is visible. Dispatches `shift` before
    /// writing the transform, then awaits the shifted callback and dispatches
    /// `shifted`, both with the overflow map.
    pub async fn shift(&self) {
        if !self.plumber.visible() {
            tracing::debug!(prefix = self.plumber.prefix(), "shift skipped, element not visible");
            return;
        }
        let Some(element) = self.plumber.element().cloned() else {
            return;
        };

        self.plumber.dispatch("shift", EventInit::default());
        let overflow = {
            let _motion = MotionGuard::for_env(
                &**self.plumber.env(),
                &element,
                self.respect_reduced_motion,
            );
            let overflow = compute_overflow(
                untranslated_rect(&element),
                self.plumber.env().viewport(),
                &self.boundaries,
            );
            let translation = overflow.translation();
            element.set_style(
                "transform",
                &format!("translate({}px, {}px)", translation.x, translation.y),
            );
            overflow
        };

        self.plumber
            .await_callback(
                &self.on_shifted,
                CallbackArgs {
                    target: Some(element),
                    detail: Detail::Overflow(overflow),
                },
            )
            .await;
        self.plumber
            .dispatch("shifted", EventInit::detail(Detail::Overflow(overflow)));
    }

    /// Stop listening. Also happens on host teardown.
    pub fn unobserve(&self) {
        self.observer.unobserve();
    }
}
