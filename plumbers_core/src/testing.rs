// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory document fakes for tests and demos.
//!
//! [`TestElement`] keeps attributes, classes, and styles in memory and resolves
//! a `translate(Xpx, Ypx)` inline transform the way a layout engine would: the
//! bounding rect moves and the computed transform reports the matrix.
//! [`TestEnv`] is a window with settable viewport, scroll, clock, and motion
//! preference, and [`TestEnv::emit`] drives registered listeners.
//! [`TestHost`] records dispatched events and serves registered callbacks.

use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::future::Future;

use hashbrown::HashMap;
use kurbo::{Rect, Vec2};
use plumbers_geometry::ViewportMetrics;

use crate::callback::{Callbacks, Handler};
use crate::controller::{Controller, Teardown};
use crate::dom::{DomEvent, Element, Environment, Listener, ListenerId};
use crate::event::PlumberEvent;

#[derive(Default)]
struct Node {
    name: String,
    rect: Rect,
    attributes: HashMap<String, String>,
    classes: Vec<String>,
    style: HashMap<String, String>,
    computed: HashMap<String, String>,
    parent: Option<Weak<RefCell<Node>>>,
}

/// An element handle backed by shared in-memory state.
///
/// Clones refer to the same element; equality is identity.
#[derive(Clone)]
pub struct TestElement(Rc<RefCell<Node>>);

impl PartialEq for TestElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TestElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_tuple("TestElement").field(&node.name).finish()
    }
}

impl TestElement {
    /// A detached element with an empty rect.
    pub fn new(name: &str) -> Self {
        Self(Rc::new(RefCell::new(Node {
            name: name.to_string(),
            ..Node::default()
        })))
    }

    /// Builder form of [`set_rect`](Self::set_rect).
    #[must_use]
    pub fn with_rect(self, rect: Rect) -> Self {
        self.set_rect(rect);
        self
    }

    /// Set the layout rect, before any inline translation.
    pub fn set_rect(&self, rect: Rect) {
        self.0.borrow_mut().rect = rect;
    }

    /// Make `child` a descendant of this element.
    pub fn append(&self, child: &Self) {
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
    }

    /// Override a computed style property.
    pub fn set_computed_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .computed
            .insert(property.to_string(), value.to_string());
    }

    /// The name given at construction.
    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    fn parent(&self) -> Option<Self> {
        let parent = self.0.borrow().parent.clone()?;
        parent.upgrade().map(Self)
    }

    fn inline_translation(&self) -> Option<Vec2> {
        let node = self.0.borrow();
        let value = node.style.get("transform")?;
        let inner = value.trim().strip_prefix("translate(")?.strip_suffix(')')?;
        let (x, y) = inner.split_once(',')?;
        let px = |s: &str| s.trim().trim_end_matches("px").parse::<f64>().ok();
        Some(Vec2::new(px(x)?, px(y)?))
    }
}

impl Element for TestElement {
    fn bounding_client_rect(&self) -> Rect {
        let rect = self.0.borrow().rect;
        rect + self.inline_translation().unwrap_or(Vec2::ZERO)
    }

    fn contains(&self, other: &Self) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node == *self {
                return true;
            }
            current = node.parent();
        }
        false
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.0.borrow().attributes.contains_key(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attributes.remove(name);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn style(&self, property: &str) -> String {
        self.0
            .borrow()
            .style
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut node = self.0.borrow_mut();
        if value.is_empty() {
            node.style.remove(property);
        } else {
            node.style.insert(property.to_string(), value.to_string());
        }
    }

    fn computed_style(&self, property: &str) -> String {
        if let Some(value) = self.0.borrow().computed.get(property) {
            return value.clone();
        }
        if property == "transform" {
            return match self.inline_translation() {
                Some(t) => format!("matrix(1, 0, 0, 1, {}, {})", t.x, t.y),
                None => "none".to_string(),
            };
        }
        self.style(property)
    }
}

/// An in-memory window.
pub struct TestEnv {
    metrics: Cell<ViewportMetrics>,
    scroll: Cell<Vec2>,
    reduced_motion: Cell<bool>,
    now: Cell<u64>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, String, Listener<TestElement>)>>,
}

impl fmt::Debug for TestEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestEnv")
            .field("metrics", &self.metrics.get())
            .field("scroll", &self.scroll.get())
            .field("now", &self.now.get())
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

impl TestEnv {
    /// A window of the given size at time zero, unscrolled.
    pub fn new(width: f64, height: f64) -> Rc<Self> {
        Rc::new(Self {
            metrics: Cell::new(ViewportMetrics::from_window(width, height)),
            scroll: Cell::new(Vec2::ZERO),
            reduced_motion: Cell::new(false),
            now: Cell::new(0),
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Replace the viewport measurements.
    pub fn set_metrics(&self, metrics: ViewportMetrics) {
        self.metrics.set(metrics);
    }

    /// Set the page scroll offset.
    pub fn set_scroll(&self, offset: Vec2) {
        self.scroll.set(offset);
    }

    /// Set the reduced-motion preference.
    pub fn set_reduced_motion(&self, reduced: bool) {
        self.reduced_motion.set(reduced);
    }

    /// Set the clock, in milliseconds since the epoch.
    pub fn set_now(&self, millis: u64) {
        self.now.set(millis);
    }

    /// Move the clock forward.
    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get() + millis);
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| k == kind)
            .count()
    }

    /// Deliver an event of `kind` to every listener registered for it.
    ///
    /// Listener futures are created immediately and driven concurrently by
    /// the returned future.
    pub fn emit(
        &self,
        kind: &str,
        target: Option<&TestElement>,
    ) -> impl Future<Output = ()> + 'static {
        let listeners = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| k == kind)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect::<Vec<_>>();
        let pending = listeners
            .iter()
            .map(|listener| listener(DomEvent::new(kind, target.cloned())))
            .collect::<Vec<_>>();
        async move {
            futures::future::join_all(pending).await;
        }
    }
}

impl Environment for TestEnv {
    type Element = TestElement;

    fn viewport_metrics(&self) -> ViewportMetrics {
        self.metrics.get()
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll.get()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion.get()
    }

    fn now_millis(&self) -> u64 {
        self.now.get()
    }

    fn add_listener(
        &self,
        kind: &str,
        _capture: bool,
        listener: Listener<TestElement>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .push((id, kind.to_string(), listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(i, _, _)| *i != id);
    }
}

/// A host that records dispatched events and serves registered callbacks.
pub struct TestHost {
    identifier: String,
    element: Option<TestElement>,
    env: Rc<TestEnv>,
    callbacks: RefCell<Callbacks<TestElement>>,
    events: RefCell<Vec<PlumberEvent<TestElement>>>,
    teardown: Teardown,
}

impl fmt::Debug for TestHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestHost")
            .field("identifier", &self.identifier)
            .field("element", &self.element)
            .field("events", &self.events.borrow().len())
            .finish_non_exhaustive()
    }
}

impl TestHost {
    /// A host named `identifier` owning `element`.
    pub fn new(identifier: &str, element: Option<TestElement>, env: Rc<TestEnv>) -> Rc<Self> {
        Rc::new(Self {
            identifier: identifier.to_string(),
            element,
            env,
            callbacks: RefCell::new(Callbacks::new()),
            events: RefCell::new(Vec::new()),
            teardown: Teardown::new(),
        })
    }

    /// Expose `handler` at a dotted `path`.
    pub fn register(&self, path: &str, handler: impl Into<Handler<TestElement>>) {
        self.callbacks.borrow_mut().insert(path, handler);
    }

    /// Everything dispatched so far.
    pub fn events(&self) -> Vec<PlumberEvent<TestElement>> {
        self.events.borrow().clone()
    }

    /// `{prefix}:{name}` of everything dispatched so far.
    pub fn event_types(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(PlumberEvent::event_type)
            .collect()
    }

    /// Forget recorded events.
    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    /// Run teardown hooks.
    pub fn disconnect(&self) {
        self.teardown.run();
    }
}

impl Controller for TestHost {
    type Env = TestEnv;

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn element(&self) -> Option<TestElement> {
        self.element.clone()
    }

    fn env(&self) -> &Rc<TestEnv> {
        &self.env
    }

    fn dispatch(&self, event: PlumberEvent<TestElement>) -> bool {
        self.events.borrow_mut().push(event);
        true
    }

    fn find_callback(&self, path: &str) -> Option<Handler<TestElement>> {
        self.callbacks.borrow().find(path)
    }

    fn teardown(&self) -> &Teardown {
        &self.teardown
    }
}
