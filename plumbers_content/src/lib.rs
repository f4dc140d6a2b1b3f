// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plumbers Content: lazy content loading for UI hosts.
//!
//! [`ContentLoader`] fetches a fragment the first time it is asked to, caches
//! it, and decides on later calls whether to fetch again according to its
//! [`ReloadPolicy`]:
//!
//! - `never`: load once.
//! - `always`: load on every call.
//! - `stale`: load again once the content is older than the stale interval
//!   (an hour by default), measured with the environment clock.
//!
//! Transport is injected through the [`Fetcher`] trait; hosts can bypass it
//! with a `contentLoading` callback or serve static content through a
//! `contentLoader` callback when no URL is set.
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use futures::future::LocalBoxFuture;
//! use plumbers_content::{ContentLoader, ContentOptions, FetchError, Fetcher, LoadOutcome};
//! use plumbers_core::testing::{TestEnv, TestHost};
//!
//! struct Canned;
//!
//! impl Fetcher for Canned {
//!     fn fetch<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, FetchError>> {
//!         Box::pin(async move { Ok(format!("<ul data-src=\"{url}\"></ul>")) })
//!     }
//! }
//!
//! let host = TestHost::new("menu", None, TestEnv::new(1024.0, 768.0));
//! let loader = ContentLoader::attach(
//!     &host,
//!     ContentOptions::default()
//!         .with_url("/menu")
//!         .with_fetcher(Rc::new(Canned)),
//! );
//!
//! assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Loaded));
//! assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Fresh));
//! assert_eq!(loader.content().as_deref(), Some("<ul data-src=\"/menu\"></ul>"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod loader;

pub use error::{FetchError, LoadError, UnknownReloadPolicy};
pub use loader::{ContentLoader, ContentOptions, Fetcher, LoadOutcome, ReloadPolicy};
