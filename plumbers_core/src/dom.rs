// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts for the document the behaviors act on.
//!
//! Behaviors never talk to a concrete DOM. They read geometry and styles through
//! [`Element`], and reach the window (viewport, scroll, motion preference, clock,
//! and global listeners) through [`Environment`]. A browser binding implements
//! these over real nodes; the [`testing`](crate::testing) module implements them
//! in memory.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use futures::future::LocalBoxFuture;
use kurbo::{Rect, Vec2};
use plumbers_geometry::{ViewportMetrics, viewport_rect};

/// A handle to an element in the host document.
///
/// Handles are cheap to clone and compare by identity. Mutating methods take
/// `&self` because the underlying node is shared with the document.
pub trait Element: Clone + PartialEq + fmt::Debug + 'static {
    /// Border box relative to the viewport, after transforms.
    fn bounding_client_rect(&self) -> Rect;

    /// Returns `true` if `other` is this element or one of its descendants.
    fn contains(&self, other: &Self) -> bool;

    /// Returns `true` if the attribute is present, whatever its value.
    fn has_attribute(&self, name: &str) -> bool;

    /// Set an attribute.
    fn set_attribute(&self, name: &str, value: &str);

    /// Remove an attribute if present.
    fn remove_attribute(&self, name: &str);

    /// Returns `true` if the class list contains `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Add a class to the class list.
    fn add_class(&self, class: &str);

    /// Remove a class from the class list.
    fn remove_class(&self, class: &str);

    /// Inline style property value, or an empty string when unset.
    fn style(&self, property: &str) -> String;

    /// Set an inline style property. An empty value clears it.
    fn set_style(&self, property: &str, value: &str);

    /// Resolved style property value, or an empty string when unavailable.
    fn computed_style(&self, property: &str) -> String;
}

/// Identifier returned when registering a listener, used to remove it again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// A document event as seen by a global listener.
#[derive(Clone, Debug)]
pub struct DomEvent<E> {
    /// Event type, for example `click` or `resize`.
    pub kind: String,
    /// The element the event was dispatched to, or `None` when the target is
    /// not an element (the window, the document, a text node).
    pub target: Option<E>,
}

impl<E> DomEvent<E> {
    /// An event of `kind` targeting `target`.
    pub fn new(kind: impl Into<String>, target: Option<E>) -> Self {
        Self {
            kind: kind.into(),
            target,
        }
    }
}

/// A global event listener.
///
/// The returned future is driven by the environment's event loop; listeners do
/// not block dispatch of the event itself.
pub type Listener<E> = Rc<dyn Fn(DomEvent<E>) -> LocalBoxFuture<'static, ()>>;

/// The window-level environment: viewport, scrolling, preferences, time, and
/// global event listeners.
pub trait Environment: 'static {
    /// The element handle type of this document.
    type Element: Element;

    /// Raw viewport measurements.
    fn viewport_metrics(&self) -> ViewportMetrics;

    /// The viewport rect, resolved through the window → document-root fallback.
    fn viewport(&self) -> Rect {
        viewport_rect(self.viewport_metrics())
    }

    /// Current page scroll offset.
    fn scroll_offset(&self) -> Vec2;

    /// Returns `true` when the user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool;

    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;

    /// Register a listener for events of `kind` on the global scope.
    fn add_listener(
        &self,
        kind: &str,
        capture: bool,
        listener: Listener<Self::Element>,
    ) -> ListenerId;

    /// Remove a previously registered listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}
