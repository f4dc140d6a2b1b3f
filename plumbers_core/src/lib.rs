// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plumbers Core: the substrate behaviors attach to a UI host with.
//!
//! ## Overview
//!
//! A host ([`Controller`]) owns an element, a dispatch channel, and a set of
//! named callbacks. Behaviors bind to it through a [`Plumber`], which resolves
//! the element, the event prefix, and the visibility policy once, then offers:
//!
//! - [`Plumber::visible`]: element present, inside the viewport, and passing
//!   the configured [`VisiblePolicy`].
//! - [`Plumber::dispatch`]: emits `{prefix}:{name}` as a [`PlumberEvent`].
//! - [`Plumber::find_callback`] and [`Plumber::await_callback`]: resolve a
//!   hook by dotted path and await it, whether it answers synchronously or
//!   with a future.
//!
//! The document itself is reached only through the [`Element`] and
//! [`Environment`] traits, so the same behaviors run against a browser binding
//! or the in-memory fakes of the `testing` module (feature `testing`).
//!
//! Two behaviors live here:
//!
//! - [`Visibility`] toggles a hidden state and publishes its predicate so
//!   other behaviors can use it as their visibility policy.
//! - [`Dismisser`] runs a dismissal callback when the user interacts outside a
//!   visible element.
//!
//! Behaviors hold their host weakly. Global listeners are removed through the
//! host's [`Teardown`] hook list, exactly once.
//!
//! ## Callbacks
//!
//! ```rust
//! use plumbers_core::{Callback, CallbackArgs, Callbacks, Detail, Handler, Reply};
//!
//! let mut callbacks: Callbacks<u32> = Callbacks::new();
//! callbacks.insert(
//!     "contentLoading",
//!     Callback::future(|args: CallbackArgs<u32>| async move {
//!         match args.detail {
//!             Detail::Url { url } => format!("<p>{url}</p>"),
//!             _ => String::new(),
//!         }
//!     }),
//! );
//!
//! let Some(Handler::Callback(loading)) = callbacks.find("contentLoading") else {
//!     unreachable!();
//! };
//! let reply = pollster::block_on(loading.invoke(CallbackArgs::detail(Detail::Url {
//!     url: "/menu".into(),
//! })));
//! assert_eq!(reply, Reply::Content("<p>/menu</p>".into()));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod callback;
mod controller;
mod dismiss;
mod dom;
mod event;
mod observer;
mod plumber;
mod visibility;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use callback::{Callback, CallbackArgs, Callbacks, Handler, Predicate, Reply};
pub use controller::{Controller, ElementOf, Teardown};
pub use dismiss::{DismissOptions, Dismisser};
pub use dom::{DomEvent, Element, Environment, Listener, ListenerId};
pub use event::{Detail, EventInit, PlumberEvent};
pub use observer::Observer;
pub use plumber::{CallbackRef, Plumber, PlumberOptions, VisiblePolicy};
pub use visibility::{Visibility, VisibilityConfig, VisibilityOptions, toggle_visibility};
