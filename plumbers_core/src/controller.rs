// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host a behavior is attached to.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::callback::Handler;
use crate::dom::Environment;
use crate::event::PlumberEvent;

/// Element type of a host's environment.
pub type ElementOf<H> = <<H as Controller>::Env as Environment>::Element;

/// A component host that owns an element, dispatches events, and exposes
/// named callbacks.
///
/// Behaviors keep only a weak reference to their host, so a host can own the
/// behaviors attached to it without forming a cycle.
pub trait Controller: 'static {
    /// The document environment the host lives in.
    type Env: Environment;

    /// Stable identifier, used as the default event prefix.
    fn identifier(&self) -> &str;

    /// The host's own element, if it is connected.
    fn element(&self) -> Option<<Self::Env as Environment>::Element>;

    /// The shared environment.
    fn env(&self) -> &Rc<Self::Env>;

    /// Deliver a behavior event. Returns `false` if a listener cancelled it.
    fn dispatch(&self, event: PlumberEvent<<Self::Env as Environment>::Element>) -> bool;

    /// Resolve a callback by dotted path. The default host exposes none.
    fn find_callback(&self, path: &str) -> Option<Handler<<Self::Env as Environment>::Element>> {
        let _ = path;
        None
    }

    /// Hooks run when the host disconnects.
    fn teardown(&self) -> &Teardown;
}

/// A list of cleanup hooks run once when the host disconnects.
///
/// Hooks run in reverse registration order. A hook pushed after the list has
/// run executes immediately.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use plumbers_core::Teardown;
///
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let teardown = Teardown::new();
/// for n in 0..3 {
///     let log = log.clone();
///     teardown.push(move || log.borrow_mut().push(n));
/// }
/// teardown.run();
/// teardown.run();
/// assert_eq!(*log.borrow(), [2, 1, 0]);
/// ```
#[derive(Default)]
pub struct Teardown {
    hooks: RefCell<Vec<Box<dyn FnOnce()>>>,
    done: Cell<bool>,
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Teardown")
            .field("pending", &self.hooks.borrow().len())
            .field("done", &self.done.get())
            .finish()
    }
}

impl Teardown {
    /// An empty hook list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cleanup hook.
    pub fn push(&self, hook: impl FnOnce() + 'static) {
        if self.done.get() {
            hook();
            return;
        }
        self.hooks.borrow_mut().push(Box::new(hook));
    }

    /// Run every registered hook. Later calls do nothing.
    pub fn run(&self) {
        if self.done.replace(true) {
            return;
        }
        let hooks = core::mem::take(&mut *self.hooks.borrow_mut());
        tracing::debug!(hooks = hooks.len(), "running teardown");
        for hook in hooks.into_iter().rev() {
            hook();
        }
    }

    /// Returns `true` once [`run`](Self::run) has been called.
    pub fn is_done(&self) -> bool {
        self.done.get()
    }
}
