// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global listener registration with exactly-once removal.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use smallvec::SmallVec;

use crate::controller::Teardown;
use crate::dom::{Environment, Listener, ListenerId};

/// A set of capture-phase global listeners that share one handler.
///
/// Registration happens on [`observe`](Self::observe); removal happens once,
/// either explicitly through [`unobserve`](Self::unobserve) or when the bound
/// [`Teardown`] runs.
pub struct Observer<Env: Environment> {
    env: Rc<Env>,
    ids: RefCell<SmallVec<[ListenerId; 2]>>,
}

impl<Env: Environment> fmt::Debug for Observer<Env> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("ids", &self.ids.borrow())
            .finish_non_exhaustive()
    }
}

impl<Env: Environment> Observer<Env> {
    /// Register `listener` for every event kind in `kinds`.
    pub fn observe<S: AsRef<str>>(
        env: &Rc<Env>,
        kinds: &[S],
        listener: Listener<Env::Element>,
    ) -> Rc<Self> {
        let ids = kinds
            .iter()
            .map(|kind| env.add_listener(kind.as_ref(), true, Rc::clone(&listener)))
            .collect::<SmallVec<_>>();
        tracing::debug!(listeners = ids.len(), "observing global events");
        Rc::new(Self {
            env: Rc::clone(env),
            ids: RefCell::new(ids),
        })
    }

    /// Remove every listener. Later calls do nothing.
    pub fn unobserve(&self) {
        let ids = core::mem::take(&mut *self.ids.borrow_mut());
        if ids.is_empty() {
            return;
        }
        tracing::debug!(listeners = ids.len(), "unobserving global events");
        for id in ids {
            self.env.remove_listener(id);
        }
    }

    /// Returns `true` while listeners are registered.
    pub fn is_observing(&self) -> bool {
        !self.ids.borrow().is_empty()
    }

    /// Unobserve when `teardown` runs.
    pub fn bind(self: &Rc<Self>, teardown: &Teardown) {
        let this = Rc::clone(self);
        teardown.push(move || this.unobserve());
    }
}
