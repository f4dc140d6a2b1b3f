// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared base every behavior builds on.

use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use core::fmt;

use plumbers_geometry::is_within_viewport;

use crate::callback::{Callback, CallbackArgs, Callbacks, Handler, Predicate, Reply};
use crate::controller::{Controller, ElementOf};
use crate::dom::{Element, Environment};
use crate::event::{EventInit, PlumberEvent};

/// How a behavior decides whether its element is visible.
///
/// Every policy except [`Always`](Self::Always) also requires the element to
/// intersect the viewport.
pub enum VisiblePolicy<E> {
    /// Visible unless the element carries the `hidden` attribute.
    Default,
    /// Always visible, without a viewport check.
    Always,
    /// Delegate to the predicate registered at this callback path.
    Named(String),
    /// Delegate to this predicate.
    Predicate(Predicate<E>),
}

impl<E> Default for VisiblePolicy<E> {
    fn default() -> Self {
        Self::Default
    }
}

impl<E> Clone for VisiblePolicy<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Default => Self::Default,
            Self::Always => Self::Always,
            Self::Named(path) => Self::Named(path.clone()),
            Self::Predicate(predicate) => Self::Predicate(Rc::clone(predicate)),
        }
    }
}

impl<E> fmt::Debug for VisiblePolicy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Always => f.write_str("Always"),
            Self::Named(path) => f.debug_tuple("Named").field(path).finish(),
            Self::Predicate(_) => f.write_str("Predicate"),
        }
    }
}

/// Options shared by every behavior.
#[derive(Debug)]
pub struct PlumberOptions<E> {
    /// Element to act on; defaults to the host's element.
    pub element: Option<E>,
    /// Visibility policy.
    pub visible: VisiblePolicy<E>,
    /// Whether lifecycle events are dispatched at all.
    pub dispatch: bool,
    /// Event prefix; defaults to the host's identifier.
    pub prefix: Option<String>,
    /// Callbacks consulted before the host's own.
    pub callbacks: Callbacks<E>,
}

impl<E> Default for PlumberOptions<E> {
    fn default() -> Self {
        Self {
            element: None,
            visible: VisiblePolicy::Default,
            dispatch: true,
            prefix: None,
            callbacks: Callbacks::new(),
        }
    }
}

impl<E> PlumberOptions<E> {
    /// Act on `element` instead of the host's element.
    #[must_use]
    pub fn with_element(mut self, element: E) -> Self {
        self.element = Some(element);
        self
    }

    /// Use `visible` to decide visibility.
    #[must_use]
    pub fn with_visible(mut self, visible: VisiblePolicy<E>) -> Self {
        self.visible = visible;
        self
    }

    /// Enable or disable event dispatch.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: bool) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Prefix events with `prefix` instead of the host's identifier.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Register a callback that takes precedence over the host's.
    #[must_use]
    pub fn with_callback(mut self, path: &str, handler: impl Into<Handler<E>>) -> Self {
        self.callbacks.insert(path, handler);
        self
    }
}

/// A callback given by name or directly.
#[derive(Debug)]
pub enum CallbackRef<'a, E> {
    /// Resolve through [`Plumber::find_callback`].
    Name(&'a str),
    /// Use this handler.
    Handler(Handler<E>),
}

impl<'a, E> From<&'a str> for CallbackRef<'a, E> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a, E> From<&'a String> for CallbackRef<'a, E> {
    fn from(name: &'a String) -> Self {
        Self::Name(name.as_str())
    }
}

impl<E> From<Handler<E>> for CallbackRef<'_, E> {
    fn from(handler: Handler<E>) -> Self {
        Self::Handler(handler)
    }
}

impl<E> From<Callback<E>> for CallbackRef<'_, E> {
    fn from(callback: Callback<E>) -> Self {
        Self::Handler(Handler::Callback(callback))
    }
}

/// Common state for a behavior attached to a host.
///
/// Resolves the element, the event prefix, and the visibility policy once at
/// construction, then offers namespaced dispatch and callback resolution.
pub struct Plumber<H: Controller> {
    host: Weak<H>,
    env: Rc<H::Env>,
    element: Option<ElementOf<H>>,
    visible: VisiblePolicy<ElementOf<H>>,
    notify: bool,
    prefix: String,
    callbacks: Callbacks<ElementOf<H>>,
}

impl<H: Controller> fmt::Debug for Plumber<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plumber")
            .field("element", &self.element)
            .field("visible", &self.visible)
            .field("dispatch", &self.notify)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl<H: Controller> Plumber<H> {
    /// Bind to `host` with the given options.
    pub fn new(host: &Rc<H>, options: PlumberOptions<ElementOf<H>>) -> Self {
        let element = options.element.or_else(|| host.element());
        if element.is_none() {
            tracing::debug!(host = host.identifier(), "behavior attached without element");
        }
        let prefix = options
            .prefix
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or_else(|| host.identifier().to_string());
        Self {
            host: Rc::downgrade(host),
            env: Rc::clone(host.env()),
            element,
            visible: options.visible,
            notify: options.dispatch,
            prefix,
            callbacks: options.callbacks,
        }
    }

    /// The host, unless it has been dropped.
    pub fn host(&self) -> Option<Rc<H>> {
        self.host.upgrade()
    }

    /// The document environment.
    pub fn env(&self) -> &Rc<H::Env> {
        &self.env
    }

    /// The element this behavior acts on.
    pub fn element(&self) -> Option<&ElementOf<H>> {
        self.element.as_ref()
    }

    /// The event prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns `true` if the element is present, intersects the viewport,
    /// and passes the visibility policy.
    ///
    /// [`VisiblePolicy::Always`] skips every check except element presence.
    pub fn visible(&self) -> bool {
        let Some(element) = &self.element else {
            return false;
        };
        if matches!(self.visible, VisiblePolicy::Always) {
            return true;
        }
        is_within_viewport(element.bounding_client_rect(), self.env.viewport())
            && self.is_visible(element)
    }

    /// Apply the visibility policy to `target`, ignoring the viewport.
    ///
    /// A named predicate that cannot be resolved falls back to the `hidden`
    /// attribute check.
    pub fn is_visible(&self, target: &ElementOf<H>) -> bool {
        let delegate = match &self.visible {
            VisiblePolicy::Predicate(predicate) => Some(Rc::clone(predicate)),
            VisiblePolicy::Named(path) => match self.find_callback(path) {
                Some(Handler::Predicate(predicate)) => Some(predicate),
                _ => {
                    tracing::debug!(path = path.as_str(), "visibility predicate not found");
                    None
                }
            },
            VisiblePolicy::Default | VisiblePolicy::Always => None,
        };
        match delegate {
            Some(predicate) => predicate(target),
            None => !target.has_attribute("hidden"),
        }
    }

    /// Dispatch `{prefix}:{name}` on the host.
    ///
    /// Returns `None` when dispatch is disabled or the host is gone, otherwise
    /// whether the event went through uncancelled.
    pub fn dispatch(&self, name: &str, init: EventInit<ElementOf<H>>) -> Option<bool> {
        if !self.notify {
            return None;
        }
        let host = self.host.upgrade()?;
        let event = PlumberEvent {
            name: name.to_string(),
            prefix: init
                .prefix
                .filter(|prefix| !prefix.is_empty())
                .unwrap_or_else(|| self.prefix.clone()),
            target: init.target.or_else(|| self.element.clone()),
            detail: init.detail,
        };
        tracing::trace!(event = %event.event_type(), "dispatch");
        Some(host.dispatch(event))
    }

    /// Resolve a callback, checking this behavior's own callbacks before the
    /// host's.
    pub fn find_callback(&self, path: &str) -> Option<Handler<ElementOf<H>>> {
        self.callbacks
            .find(path)
            .or_else(|| self.host.upgrade()?.find_callback(path))
    }

    /// Invoke a callback and wait for its reply.
    ///
    /// Returns `None` when a name does not resolve. A predicate handler is
    /// applied to `args.target` (false without one).
    pub async fn await_callback<'a>(
        &self,
        callback: impl Into<CallbackRef<'a, ElementOf<H>>>,
        args: CallbackArgs<ElementOf<H>>,
    ) -> Option<Reply> {
        let handler = match callback.into() {
            CallbackRef::Name(name) => self.find_callback(name)?,
            CallbackRef::Handler(handler) => handler,
        };
        match handler {
            Handler::Callback(callback) => Some(callback.invoke(args).await),
            Handler::Predicate(predicate) => {
                Some(Reply::Bool(args.target.as_ref().is_some_and(|t| predicate(t))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Detail;
    use crate::testing::{TestElement, TestEnv, TestHost};
    use kurbo::Rect;

    fn host() -> (Rc<TestHost>, TestElement) {
        let env = TestEnv::new(800.0, 600.0);
        let element = TestElement::new("popover").with_rect(Rect::new(10.0, 10.0, 110.0, 60.0));
        (TestHost::new("popover", Some(element.clone()), env), element)
    }

    #[test]
    fn prefix_defaults_to_identifier() {
        let (host, _) = host();
        let plumber = Plumber::new(&host, PlumberOptions::default());
        assert_eq!(plumber.prefix(), "popover");

        let plumber = Plumber::new(&host, PlumberOptions::default().with_prefix(""));
        assert_eq!(plumber.prefix(), "popover");

        let plumber = Plumber::new(&host, PlumberOptions::default().with_prefix("menu"));
        assert_eq!(plumber.prefix(), "menu");
    }

    #[test]
    fn dispatch_targets_element_by_default() {
        let (host, element) = host();
        let plumber = Plumber::new(&host, PlumberOptions::default());
        assert_eq!(plumber.dispatch("opened", EventInit::default()), Some(true));

        let events = host.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "popover:opened");
        assert_eq!(events[0].target.as_ref(), Some(&element));
    }

    #[test]
    fn disabled_dispatch_is_silent() {
        let (host, _) = host();
        let plumber = Plumber::new(&host, PlumberOptions::default().with_dispatch(false));
        assert_eq!(plumber.dispatch("opened", EventInit::default()), None);
        assert!(host.events().is_empty());
    }

    #[test]
    fn dispatch_overrides() {
        let (host, _) = host();
        let other = TestElement::new("other");
        let plumber = Plumber::new(&host, PlumberOptions::default());
        plumber.dispatch(
            "loaded",
            EventInit {
                target: Some(other.clone()),
                prefix: Some("content".into()),
                detail: Detail::Url { url: "/a".into() },
            },
        );
        let event = &host.events()[0];
        assert_eq!(event.event_type(), "content:loaded");
        assert_eq!(event.target.as_ref(), Some(&other));
        assert_eq!(event.detail, Detail::Url { url: "/a".into() });
    }

    #[test]
    fn visible_requires_viewport_and_policy() {
        let (host, element) = host();
        let plumber = Plumber::new(&host, PlumberOptions::default());
        assert!(plumber.visible());

        element.set_attribute("hidden", "");
        assert!(!plumber.visible());
        element.remove_attribute("hidden");

        element.set_rect(Rect::new(-200.0, 10.0, -100.0, 60.0));
        assert!(!plumber.visible());

        let always = Plumber::new(&host, PlumberOptions::default().with_visible(VisiblePolicy::Always));
        assert!(always.visible());
    }

    #[test]
    fn no_element_is_never_visible() {
        let env = TestEnv::new(800.0, 600.0);
        let host = TestHost::new("bare", None, env);
        let plumber = Plumber::new(&host, PlumberOptions::default().with_visible(VisiblePolicy::Always));
        assert!(plumber.element().is_none());
        assert!(!plumber.visible());
    }

    #[test]
    fn named_predicate_resolves_through_host() {
        let (host, element) = host();
        host.register("visibility.isVisible", Handler::predicate(|e: &TestElement| e.has_class("open")));
        let plumber = Plumber::new(
            &host,
            PlumberOptions::default().with_visible(VisiblePolicy::Named("visibility.isVisible".into())),
        );
        assert!(!plumber.visible());
        element.add_class("open");
        assert!(plumber.visible());
    }

    #[test]
    fn unresolved_named_predicate_falls_back_to_hidden() {
        let (host, element) = host();
        let plumber = Plumber::new(
            &host,
            PlumberOptions::default().with_visible(VisiblePolicy::Named("nope.isVisible".into())),
        );
        assert!(plumber.visible());
        element.set_attribute("hidden", "");
        assert!(!plumber.visible());
    }

    #[test]
    fn own_callbacks_take_precedence() {
        let (host, _) = host();
        host.register("dismissed", Callback::sync(|_| "host"));
        let plumber = Plumber::new(
            &host,
            PlumberOptions::default().with_callback("dismissed", Callback::sync(|_| "own")),
        );
        let reply = pollster::block_on(plumber.await_callback("dismissed", CallbackArgs::default()));
        assert_eq!(reply, Some(Reply::Content("own".into())));

        let plumber = Plumber::new(&host, PlumberOptions::default());
        let reply = pollster::block_on(plumber.await_callback("dismissed", CallbackArgs::default()));
        assert_eq!(reply, Some(Reply::Content("host".into())));
    }

    #[test]
    fn missing_callback_is_none() {
        let (host, _) = host();
        let plumber = Plumber::new(&host, PlumberOptions::default());
        let reply = pollster::block_on(plumber.await_callback("missing", CallbackArgs::default()));
        assert_eq!(reply, None);
    }

    #[test]
    fn direct_and_async_callbacks() {
        let (host, element) = host();
        let plumber = Plumber::new(&host, PlumberOptions::default());
        let callback = Callback::future(|args: CallbackArgs<TestElement>| async move { args.target.is_some() });
        let reply = pollster::block_on(plumber.await_callback(callback, CallbackArgs::target(Some(element.clone()))));
        assert_eq!(reply, Some(Reply::Bool(true)));

        let predicate = Handler::predicate(|e: &TestElement| e.name() == "popover");
        let reply = pollster::block_on(plumber.await_callback(predicate, CallbackArgs::target(Some(element))));
        assert_eq!(reply, Some(Reply::Bool(true)));
    }

    #[test]
    fn dropped_host_stops_dispatch() {
        let (host, _) = host();
        let plumber = Plumber::new(&host, PlumberOptions::default());
        drop(host);
        assert!(plumber.host().is_none());
        assert_eq!(plumber.dispatch("opened", EventInit::default()), None);
    }
}
