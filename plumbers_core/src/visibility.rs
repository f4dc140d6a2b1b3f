// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Showing and hiding elements.
//!
//! Hidden state is either a class on the element, when one is configured, or
//! the `hidden` attribute. [`Visibility`] wraps the toggle in a show/hide
//! lifecycle and can publish its predicate under a callback path so other
//! behaviors consult it.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use crate::callback::{CallbackArgs, Callbacks, Predicate};
use crate::controller::{Controller, ElementOf};
use crate::dom::Element;
use crate::event::EventInit;
use crate::plumber::{Plumber, PlumberOptions, VisiblePolicy};

/// How hidden state is represented on an element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityConfig {
    /// Class marking the element hidden. `None` uses the `hidden` attribute.
    pub hidden_class: Option<String>,
}

impl VisibilityConfig {
    /// Mark hidden elements with `class`. An empty class keeps the attribute.
    #[must_use]
    pub fn with_hidden_class(mut self, class: impl Into<String>) -> Self {
        self.hidden_class = Some(class.into()).filter(|c: &String| !c.is_empty());
        self
    }

    /// Returns `true` if `target` is hidden under this configuration.
    pub fn is_hidden<E: Element>(&self, target: &E) -> bool {
        match &self.hidden_class {
            Some(class) => target.has_class(class),
            None => target.has_attribute("hidden"),
        }
    }
}

/// Show or hide `target`.
///
/// Uses the configured hidden class when there is one, the `hidden` attribute
/// otherwise.
pub fn toggle_visibility<E: Element>(target: &E, visible: bool, config: &VisibilityConfig) {
    match (&config.hidden_class, visible) {
        (Some(class), true) => target.remove_class(class),
        (Some(class), false) => target.add_class(class),
        (None, true) => target.remove_attribute("hidden"),
        (None, false) => target.set_attribute("hidden", ""),
    }
}

/// Options for [`Visibility`].
#[derive(Debug)]
pub struct VisibilityOptions<E> {
    /// Shared behavior options.
    pub plumber: PlumberOptions<E>,
    /// Hidden state representation.
    pub config: VisibilityConfig,
    /// Callback namespace the predicate is published under.
    pub namespace: String,
    /// Name of the predicate within the namespace.
    pub resolver: String,
    /// Callback invoked after showing.
    pub on_shown: String,
    /// Callback invoked after hiding.
    pub on_hidden: String,
}

impl<E> Default for VisibilityOptions<E> {
    fn default() -> Self {
        Self {
            plumber: PlumberOptions::default(),
            config: VisibilityConfig::default(),
            namespace: "visibility".into(),
            resolver: "isVisible".into(),
            on_shown: "shown".into(),
            on_hidden: "hidden".into(),
        }
    }
}

impl<E> VisibilityOptions<E> {
    /// Use `plumber` as the shared behavior options.
    #[must_use]
    pub fn with_plumber(mut self, plumber: PlumberOptions<E>) -> Self {
        self.plumber = plumber;
        self
    }

    /// Use `config` for the hidden state.
    #[must_use]
    pub fn with_config(mut self, config: VisibilityConfig) -> Self {
        self.config = config;
        self
    }

    /// Publish the predicate under `namespace`.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

/// Show/hide lifecycle for a host's element.
pub struct Visibility<H: Controller> {
    plumber: Plumber<H>,
    config: Rc<VisibilityConfig>,
    namespace: String,
    resolver: String,
    on_shown: String,
    on_hidden: String,
}

impl<H: Controller> fmt::Debug for Visibility<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visibility")
            .field("plumber", &self.plumber)
            .field("config", &self.config)
            .field("path", &self.path())
            .finish_non_exhaustive()
    }
}

impl<H: Controller> Visibility<H> {
    /// Attach to `host`.
    ///
    /// Unless the options force [`VisiblePolicy::Always`], the behavior's own
    /// visibility uses the configured hidden state.
    pub fn attach(host: &Rc<H>, options: VisibilityOptions<ElementOf<H>>) -> Rc<Self> {
        let config = Rc::new(options.config);
        let mut plumber = options.plumber;
        if !matches!(plumber.visible, VisiblePolicy::Always) {
            plumber.visible = VisiblePolicy::Predicate(hidden_predicate(&config));
        }
        Rc::new(Self {
            plumber: Plumber::new(host, plumber),
            config,
            namespace: options.namespace,
            resolver: options.resolver,
            on_shown: options.on_shown,
            on_hidden: options.on_hidden,
        })
    }

    /// The underlying behavior state.
    pub fn plumber(&self) -> &Plumber<H> {
        &self.plumber
    }

    /// Callback path the predicate is published under, `{namespace}.{resolver}`.
    pub fn path(&self) -> String {
        format!("{}.{}", self.namespace, self.resolver)
    }

    /// A predicate other behaviors can use to test visibility.
    pub fn predicate(&self) -> Predicate<ElementOf<H>> {
        hidden_predicate(&self.config)
    }

    /// Publish the predicate in `callbacks` at [`path`](Self::path).
    pub fn register(&self, callbacks: &mut Callbacks<ElementOf<H>>) {
        callbacks.insert(&self.path(), self.predicate());
    }

    /// Returns `true` if `target` is not hidden.
    pub fn is_visible(&self, target: &ElementOf<H>) -> bool {
        !self.config.is_hidden(target)
    }

    /// Returns `true` if the behavior's element exists and is not hidden.
    pub fn visible(&self) -> bool {
        self.plumber.element().is_some_and(|e| self.is_visible(e))
    }

    /// Reveal the element.
    ///
    /// Dispatches `show`, toggles, calls the shown callback, then dispatches
    /// `shown`. Does nothing without an element or when already visible.
    pub async fn show(&self) {
        self.transition(true).await;
    }

    /// Hide the element.
    ///
    /// Dispatches `hide`, toggles, calls the hidden callback, then dispatches
    /// `hidden`. Does nothing without an element or when already hidden.
    pub async fn hide(&self) {
        self.transition(false).await;
    }

    async fn transition(&self, visible: bool) {
        let Some(element) = self.plumber.element().cloned() else {
            return;
        };
        if self.is_visible(&element) == visible {
            return;
        }
        let (before, after, callback) = if visible {
            ("show", "shown", &self.on_shown)
        } else {
            ("hide", "hidden", &self.on_hidden)
        };
        self.plumber.dispatch(before, EventInit::default());
        toggle_visibility(&element, visible, &self.config);
        self.plumber
            .await_callback(callback, CallbackArgs::target(Some(element)))
            .await;
        self.plumber.dispatch(after, EventInit::default());
    }
}

fn hidden_predicate<E: Element>(config: &Rc<VisibilityConfig>) -> Predicate<E> {
    let config = Rc::clone(config);
    Rc::new(move |target: &E| !config.is_hidden(target))
}
