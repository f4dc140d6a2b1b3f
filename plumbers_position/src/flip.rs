// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placing a floating element next to an anchor.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use core::fmt;

use kurbo::Rect;
use plumbers_core::{
    CallbackArgs, Controller, Detail, Element, ElementOf, Environment, EventInit, Listener,
    Observer, Plumber, PlumberOptions,
};
use plumbers_geometry::{
    Alignment, Direction, Placement, RectEdges, define_rect, fits_within, quadrant_rects,
};
use smallvec::{SmallVec, smallvec};

use crate::MotionGuard;

/// The side the floating element goes on: `placement` if its quadrant can
/// hold `reference`, else the opposite side if that one can, else `None`.
#[must_use]
pub fn flip_side(
    anchor: Rect,
    reference: Rect,
    viewport: Rect,
    placement: Direction,
) -> Option<Direction> {
    let quadrants = quadrant_rects(anchor, viewport);
    [placement, placement.opposite()]
        .into_iter()
        .find(|side| fits_within(quadrants.get(*side), reference))
}

/// Position `reference` flush against `anchor` on `side`, keeping its size.
///
/// The cross-axis origin is left as `reference`'s own.
#[must_use]
pub fn place_against(anchor: Rect, side: Direction, reference: Rect) -> Rect {
    let (width, height) = (reference.width(), reference.height());
    match side {
        Direction::Top => define_rect(reference.left(), anchor.top() - height, width, height),
        Direction::Bottom => define_rect(reference.left(), anchor.bottom(), width, height),
        Direction::Left => define_rect(anchor.left() - width, reference.top(), width, height),
        Direction::Right => define_rect(anchor.right(), reference.top(), width, height),
    }
}

/// Align `placed` along the cross-axis of `side` relative to `anchor`.
#[must_use]
pub fn align_to(anchor: Rect, side: Direction, placed: Rect, alignment: Alignment) -> Rect {
    let (width, height) = (placed.width(), placed.height());
    if side.is_vertical() {
        let x = match alignment {
            Alignment::Start => anchor.left(),
            Alignment::Center => anchor.left() + anchor.width() / 2.0 - width / 2.0,
            Alignment::End => anchor.left() + anchor.width() - width,
        };
        define_rect(x, placed.top(), width, height)
    } else {
        let y = match alignment {
            Alignment::Start => anchor.top(),
            Alignment::Center => anchor.top() + anchor.height() / 2.0 - height / 2.0,
            Alignment::End => anchor.top() + anchor.height() - height,
        };
        define_rect(placed.left(), y, width, height)
    }
}

/// Compute where `reference` goes around `anchor`, in viewport coordinates.
///
/// Returns `None` when neither the configured side nor its opposite has room.
///
/// ```
/// use plumbers_geometry::{Alignment, Direction, RectEdges, define_rect};
/// use plumbers_position::flipped_rect;
///
/// let viewport = define_rect(0.0, 0.0, 1200.0, 800.0);
/// let anchor = define_rect(100.0, 100.0, 100.0, 50.0);
/// let floating = define_rect(0.0, 0.0, 80.0, 100.0);
///
/// let rect = flipped_rect(anchor, floating, viewport, Direction::Bottom, Alignment::Start).unwrap();
/// assert_eq!((rect.top(), rect.left()), (150.0, 100.0));
/// ```
#[must_use]
pub fn flipped_rect(
    anchor: Rect,
    reference: Rect,
    viewport: Rect,
    placement: Direction,
    alignment: Alignment,
) -> Option<Rect> {
    let side = flip_side(anchor, reference, viewport, placement)?;
    let placed = place_against(anchor, side, reference);
    Some(align_to(anchor, side, placed, alignment))
}

/// Options for [`Flipper`].
#[derive(Debug)]
pub struct FlipOptions<E> {
    /// Shared behavior options.
    pub plumber: PlumberOptions<E>,
    /// Element to place the floating element against. Required.
    pub anchor: Option<E>,
    /// Global event kinds that trigger a flip.
    pub events: SmallVec<[String; 2]>,
    /// Preferred side of the anchor.
    pub placement: Direction,
    /// Cross-axis alignment.
    pub alignment: Alignment,
    /// Callback invoked after flipping.
    pub on_flipped: String,
    /// Suppress transitions while flipping when reduced motion is requested.
    pub respect_reduced_motion: bool,
}

impl<E> Default for FlipOptions<E> {
    fn default() -> Self {
        Self {
            plumber: PlumberOptions::default(),
            anchor: None,
            events: smallvec!["click".into()],
            placement: Direction::Bottom,
            alignment: Alignment::Start,
            on_flipped: "flipped".into(),
            respect_reduced_motion: true,
        }
    }
}

impl<E> FlipOptions<E> {
    /// Use `plumber` as the shared behavior options.
    #[must_use]
    pub fn with_plumber(mut self, plumber: PlumberOptions<E>) -> Self {
        self.plumber = plumber;
        self
    }

    /// Place against `anchor`.
    #[must_use]
    pub fn with_anchor(mut self, anchor: E) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Listen for these event kinds instead of `click`.
    #[must_use]
    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Prefer `placement`.
    #[must_use]
    pub fn with_placement(mut self, placement: Direction) -> Self {
        self.placement = placement;
        self
    }

    /// Align with `alignment`.
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Whether to honor the reduced-motion preference.
    #[must_use]
    pub fn with_respect_reduced_motion(mut self, respect: bool) -> Self {
        self.respect_reduced_motion = respect;
        self
    }
}

/// Positions a floating element against an anchor, flipping sides when the
/// preferred side lacks room.
pub struct Flipper<H: Controller> {
    plumber: Plumber<H>,
    anchor: ElementOf<H>,
    placement: Direction,
    alignment: Alignment,
    on_flipped: String,
    respect_reduced_motion: bool,
    observer: Rc<Observer<H::Env>>,
}

impl<H: Controller> fmt::Debug for Flipper<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flipper")
            .field("plumber", &self.plumber)
            .field("anchor", &self.anchor)
            .field("placement", &self.placement)
            .field("alignment", &self.alignment)
            .field("on_flipped", &self.on_flipped)
            .field("respect_reduced_motion", &self.respect_reduced_motion)
            .field("observer", &self.observer)
            .finish()
    }
}

impl<H: Controller> Flipper<H> {
    /// Attach to `host` and start listening.
    ///
    /// Returns `None`, and logs an error, when no anchor is given.
    pub fn attach(host: &Rc<H>, options: FlipOptions<ElementOf<H>>) -> Option<Rc<Self>> {
        let Some(anchor) = options.anchor else {
            tracing::error!(host = host.identifier(), "flip requires an anchor element");
            return None;
        };
        let this = Rc::new_cyclic(|weak: &Weak<Self>| {
            let plumber = Plumber::new(host, options.plumber);
            let weak = weak.clone();
            let listener: Listener<ElementOf<H>> = Rc::new(move |_| {
                let this = weak.upgrade();
                Box::pin(async move {
                    if let Some(this) = this {
                        this.flip().await;
                    }
                })
            });
            let observer = Observer::observe(plumber.env(), options.events.as_slice(), listener);
            Self {
                plumber,
                anchor,
                placement: options.placement,
                alignment: options.alignment,
                on_flipped: options.on_flipped,
                respect_reduced_motion: options.respect_reduced_motion,
                observer,
            }
        });
        this.observer.bind(host.teardown());
        Some(this)
    }

    /// The underlying behavior state.
    pub fn plumber(&self) -> &Plumber<H> {
        &self.plumber
    }

    /// The anchor element.
    pub fn anchor(&self) -> &ElementOf<H> {
        &self.anchor
    }

    /// Where the element would go right now, in page coordinates.
    pub fn placement(&self) -> Option<Placement> {
        let element = self.plumber.element()?;
        let env = self.plumber.env();
        let rect = flipped_rect(
            self.anchor.bounding_client_rect(),
            element.bounding_client_rect(),
            env.viewport(),
            self.placement,
            self.alignment,
        )?;
        let scroll = env.scroll_offset();
        Some(Placement {
            top: rect.top() + scroll.y,
            left: rect.left() + scroll.x,
        })
    }

    /// Place the element.
    ///
    /// Does nothing unless the element is visible. Dispatches `flip`, makes
    /// the element absolutely positioned, writes `top`/`left` (cleared when no
    /// side has room), then awaits the flipped callback and dispatches
    /// `flipped` with the placement.
    pub async fn flip(&self) {
        if !self.plumber.visible() {
            tracing::debug!(prefix = self.plumber.prefix(), "flip skipped, element not visible");
            return;
        }
        let Some(element) = self.plumber.element().cloned() else {
            return;
        };

        self.plumber.dispatch("flip", EventInit::default());
        let placement = {
            let _motion = MotionGuard::for_env(
                &**self.plumber.env(),
                &element,
                self.respect_reduced_motion,
            );
            if element.computed_style("position") != "absolute" {
                element.set_style("position", "absolute");
            }
            let placement = self.placement();
            match placement {
                Some(p) => {
                    element.set_style("top", &format!("{}px", p.top));
                    element.set_style("left", &format!("{}px", p.left));
                }
                None => {
                    element.set_style("top", "");
                    element.set_style("left", "");
                }
            }
            placement
        };

        self.plumber
            .await_callback(
                &self.on_flipped,
                CallbackArgs {
                    target: Some(element),
                    detail: Detail::Placement(placement),
                },
            )
            .await;
        self.plumber
            .dispatch("flipped", EventInit::detail(Detail::Placement(placement)));
    }

    /// Stop listening. Also happens on host teardown.
    pub fn unobserve(&self) {
        self.observer.unobserve();
    }
}
