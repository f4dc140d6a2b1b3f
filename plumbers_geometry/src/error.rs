// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Errors raised at the string boundary of the geometry helpers.
///
/// These indicate a programming mistake in host configuration rather than a
/// runtime condition, so callers are expected to surface them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// A direction name other than `top`, `bottom`, `left`, or `right`.
    #[error("invalid direction `{0}`")]
    UnknownDirection(String),
    /// An alignment name other than `start`, `center`, or `end`.
    #[error("invalid alignment `{0}`")]
    UnknownAlignment(String),
    /// A transform value that is neither `none` nor a `matrix(...)` form.
    #[error("malformed transform `{0}`")]
    MalformedTransform(String),
}
