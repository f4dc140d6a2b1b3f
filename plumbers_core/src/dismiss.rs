// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismissal on interaction outside an element.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use core::fmt;

use smallvec::{SmallVec, smallvec};

use crate::callback::CallbackArgs;
use crate::controller::{Controller, ElementOf};
use crate::dom::{DomEvent, Element, Listener};
use crate::event::EventInit;
use crate::observer::Observer;
use crate::plumber::{Plumber, PlumberOptions};

/// Options for [`Dismisser`].
#[derive(Debug)]
pub struct DismissOptions<E> {
    /// Shared behavior options.
    pub plumber: PlumberOptions<E>,
    /// Element passed to the dismissal callback; defaults to the element.
    pub trigger: Option<E>,
    /// Global event kinds that count as an interaction.
    pub events: SmallVec<[String; 2]>,
    /// Callback invoked on dismissal.
    pub on_dismissed: String,
}

impl<E> Default for DismissOptions<E> {
    fn default() -> Self {
        Self {
            plumber: PlumberOptions::default(),
            trigger: None,
            events: smallvec!["click".into()],
            on_dismissed: "dismissed".into(),
        }
    }
}

impl<E> DismissOptions<E> {
    /// Use `plumber` as the shared behavior options.
    #[must_use]
    pub fn with_plumber(mut self, plumber: PlumberOptions<E>) -> Self {
        self.plumber = plumber;
        self
    }

    /// Pass `trigger` to the dismissal callback.
    #[must_use]
    pub fn with_trigger(mut self, trigger: E) -> Self {
        self.trigger = Some(trigger);
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
}

/// Dismisses a visible element when the user interacts outside of it.
///
/// Listens in the capture phase for the configured event kinds. An event whose
/// target is not an element, lies inside the element, or arrives while the
/// element is not visible is ignored. Otherwise the dismisser dispatches
/// `dismiss`, awaits the dismissal callback with the trigger, and dispatches
/// `dismissed`.
///
/// Listeners are removed when the host's [`Teardown`](crate::Teardown) runs.
pub struct Dismisser<H: Controller> {
    plumber: Plumber<H>,
    trigger: Option<ElementOf<H>>,
    on_dismissed: String,
    observer: Rc<Observer<H::Env>>,
}

impl<H: Controller> fmt::Debug for Dismisser<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dismisser")
            .field("plumber", &self.plumber)
            .field("trigger", &self.trigger)
            .field("on_dismissed", &self.on_dismissed)
            .field("observer", &self.observer)
            .finish()
    }
}

impl<H: Controller> Dismisser<H> {
    /// Attach to `host` and start listening.
    pub fn attach(host: &Rc<H>, options: DismissOptions<ElementOf<H>>) -> Rc<Self> {
        let this = Rc::new_cyclic(|weak: &Weak<Self>| {
            let plumber = Plumber::new(host, options.plumber);
            let trigger = options.trigger.or_else(|| plumber.element().cloned());
            let weak = weak.clone();
            let listener: Listener<ElementOf<H>> = Rc::new(move |event| {
                let this = weak.upgrade();
                Box::pin(async move {
                    if let Some(this) = this {
                        this.dismiss(event).await;
                    }
                })
            });
            let observer = Observer::observe(plumber.env(), options.events.as_slice(), listener);
            Self {
                plumber,
                trigger,
                on_dismissed: options.on_dismissed,
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

    /// Handle one captured interaction.
    pub async fn dismiss(&self, event: DomEvent<ElementOf<H>>) {
        let Some(target) = event.target.as_ref() else {
            return;
        };
        let Some(element) = self.plumber.element() else {
            return;
        };
        if element.contains(target) {
            return;
        }
        if !self.plumber.visible() {
            tracing::debug!(kind = event.kind.as_str(), "dismiss skipped, element not visible");
            return;
        }

        self.plumber.dispatch("dismiss", EventInit::default());
        self.plumber
            .await_callback(
                &self.on_dismissed,
                CallbackArgs::target(self.trigger.clone()),
            )
            .await;
        self.plumber.dispatch("dismissed", EventInit::default());
    }

    /// Stop listening. Also happens on host teardown.
    pub fn unobserve(&self) {
        self.observer.unobserve();
    }

    /// Returns `true` while listeners are registered.
    pub fn is_observing(&self) -> bool {
        self.observer.is_observing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::{Callback, Handler};
    use crate::plumber::VisiblePolicy;
    use crate::testing::{TestElement, TestEnv, TestHost};
    use alloc::vec;
    use core::cell::RefCell;
    use kurbo::Rect;

    struct Fixture {
        env: Rc<TestEnv>,
        host: Rc<TestHost>,
        element: TestElement,
        inner: TestElement,
        outside: TestElement,
    }

    fn fixture() -> Fixture {
        let env = TestEnv::new(800.0, 600.0);
        let element = TestElement::new("menu").with_rect(Rect::new(0.0, 0.0, 200.0, 100.0));
        let inner = TestElement::new("item");
        element.append(&inner);
        let outside = TestElement::new("body");
        let host = TestHost::new("menu", Some(element.clone()), env.clone());
        Fixture {
            env,
            host,
            element,
            inner,
            outside,
        }
    }

    #[test]
    fn outside_click_dismisses() {
        let f = fixture();
        let seen = Rc::new(RefCell::new(None));
        let s = seen.clone();
        f.host.register(
            "dismissed",
            Callback::sync(move |args: CallbackArgs<TestElement>| {
                *s.borrow_mut() = args.target;
            }),
        );
        let _dismisser = Dismisser::attach(&f.host, DismissOptions::default());

        pollster::block_on(f.env.emit("click", Some(&f.outside)));
        assert_eq!(f.host.event_types(), vec!["menu:dismiss", "menu:dismissed"]);
        assert_eq!(seen.borrow().as_ref(), Some(&f.element));
    }

    #[test]
    fn inside_click_is_ignored() {
        let f = fixture();
        let _dismisser = Dismisser::attach(&f.host, DismissOptions::default());
        pollster::block_on(f.env.emit("click", Some(&f.inner)));
        pollster::block_on(f.env.emit("click", Some(&f.element)));
        assert!(f.host.events().is_empty());
    }

    #[test]
    fn non_element_target_is_ignored() {
        let f = fixture();
        let _dismisser = Dismisser::attach(&f.host, DismissOptions::default());
        pollster::block_on(f.env.emit("click", None));
        assert!(f.host.events().is_empty());
    }

    #[test]
    fn hidden_element_is_not_dismissed() {
        let f = fixture();
        let _dismisser = Dismisser::attach(&f.host, DismissOptions::default());
        f.element.set_attribute("hidden", "");
        pollster::block_on(f.env.emit("click", Some(&f.outside)));
        assert!(f.host.events().is_empty());
    }

    #[test]
    fn named_visibility_predicate_gates_dismissal() {
        let f = fixture();
        f.host.register(
            "visibility.isVisible",
            Handler::predicate(|e: &TestElement| e.has_class("open")),
        );
        let options = DismissOptions::default().with_plumber(
            PlumberOptions::default()
                .with_visible(VisiblePolicy::Named("visibility.isVisible".into())),
        );
        let _dismisser = Dismisser::attach(&f.host, options);

        pollster::block_on(f.env.emit("click", Some(&f.outside)));
        assert!(f.host.events().is_empty());

        f.element.add_class("open");
        pollster::block_on(f.env.emit("click", Some(&f.outside)));
        assert_eq!(f.host.events().len(), 2);
    }

    #[test]
    fn custom_trigger_and_events() {
        let f = fixture();
        let button = TestElement::new("button");
        let seen = Rc::new(RefCell::new(None));
        let s = seen.clone();
        f.host.register(
            "dismissed",
            Callback::sync(move |args: CallbackArgs<TestElement>| {
                *s.borrow_mut() = args.target;
            }),
        );
        let options = DismissOptions::default()
            .with_trigger(button.clone())
            .with_events(["click", "touchend"]);
        let _dismisser = Dismisser::attach(&f.host, options);
        assert_eq!(f.env.listener_count("touchend"), 1);

        pollster::block_on(f.env.emit("touchend", Some(&f.outside)));
        assert_eq!(seen.borrow().as_ref(), Some(&button));
    }

    #[test]
    fn disconnect_removes_listeners() {
        let f = fixture();
        let dismisser = Dismisser::attach(&f.host, DismissOptions::default());
        assert!(dismisser.is_observing());
        assert_eq!(f.env.listener_count("click"), 1);

        f.host.disconnect();
        assert!(!dismisser.is_observing());
        assert_eq!(f.env.listener_count("click"), 0);

        pollster::block_on(f.env.emit("click", Some(&f.outside)));
        assert!(f.host.events().is_empty());
    }
}
