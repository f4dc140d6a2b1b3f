// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Failure reported by a [`Fetcher`](crate::Fetcher).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request could not be completed.
    #[error("request to `{url}` failed: {reason}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport-specific description.
        reason: String,
    },
    /// The server answered with a non-success status.
    #[error("`{url}` answered with status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
}

/// Failure of [`ContentLoader::load`](crate::ContentLoader::load).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The fetcher failed; nothing was recorded as loaded.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// A reload policy name that is not `never`, `always`, or `stale`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown reload policy `{0}`")]
pub struct UnknownReloadPolicy(pub String);
