// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport resolution.

use kurbo::Rect;

use crate::{RectEdges, define_rect};

/// Raw viewport measurements as reported by the host environment.
///
/// Window metrics take precedence; when they are absent or zero the document
/// root's client metrics are used instead.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ViewportMetrics {
    /// Window inner width, if the environment reports one.
    pub inner_width: Option<f64>,
    /// Window inner height, if the environment reports one.
    pub inner_height: Option<f64>,
    /// Document root client width.
    pub client_width: f64,
    /// Document root client height.
    pub client_height: f64,
}

impl ViewportMetrics {
    /// Metrics for an environment that reports window dimensions directly.
    #[must_use]
    pub const fn from_window(width: f64, height: f64) -> Self {
        Self {
            inner_width: Some(width),
            inner_height: Some(height),
            client_width: 0.0,
            client_height: 0.0,
        }
    }
}

fn first_nonzero(primary: Option<f64>, fallback: f64) -> f64 {
    match primary {
        Some(value) if value != 0.0 => value,
        _ => fallback,
    }
}

/// The current viewport as a rect anchored at the origin.
#[must_use]
pub fn viewport_rect(metrics: ViewportMetrics) -> Rect {
    define_rect(
        0.0,
        0.0,
        first_nonzero(metrics.inner_width, metrics.client_width),
        first_nonzero(metrics.inner_height, metrics.client_height),
    )
}

/// Returns `true` if any part of `inner` lies inside `viewport` on both axes.
///
/// An element whose top edge sits exactly on the viewport's bottom edge still
/// counts as within, while one that ends exactly at zero does not.
#[must_use]
pub fn is_within_viewport(inner: Rect, viewport: Rect) -> bool {
    let vertical = inner.top() <= viewport.height() && inner.top() + inner.height() > 0.0;
    let horizontal = inner.left() <= viewport.width() && inner.left() + inner.width() > 0.0;
    vertical && horizontal
}
