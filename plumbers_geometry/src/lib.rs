// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plumbers Geometry: the leaf geometry used by the positioning behaviors.
//!
//! ## Overview
//!
//! Everything here is a pure function or a small value type. Rectangles are
//! [`kurbo::Rect`] throughout; [`define_rect`] builds one from an origin and a
//! size without normalizing negative extents, and [`RectEdges`] exposes the
//! `left`/`right`/`top`/`bottom` edges by [`Direction`].
//!
//! - [`Direction`] and [`Alignment`] are closed enums. Strings coming from host
//!   configuration convert through [`FromStr`](core::str::FromStr), which rejects
//!   unknown names with a [`GeometryError`].
//! - [`viewport_rect`] resolves the viewport from [`ViewportMetrics`], falling back
//!   from window metrics to the document root's client metrics.
//! - [`quadrant_rects`] computes the free space on each side of an anchor.
//! - [`parse_translation`] reads the translation out of a computed CSS transform.
//! - [`Placement`] and [`Overflow`] are the results reported by the flip and
//!   shift engines.
//!
//! ## Minimal example
//!
//! ```rust
//! use plumbers_geometry::{Direction, RectEdges, define_rect, fits_within, quadrant_rects};
//!
//! let viewport = define_rect(0.0, 0.0, 1200.0, 800.0);
//! let anchor = define_rect(100.0, 100.0, 100.0, 50.0);
//! let floating = define_rect(0.0, 0.0, 80.0, 120.0);
//!
//! let quadrants = quadrant_rects(anchor, viewport);
//! assert!(fits_within(quadrants.get(Direction::Bottom), floating));
//! assert!(!fits_within(quadrants.get(Direction::Top), floating));
//! assert_eq!(quadrants.get(Direction::Bottom).top(), anchor.bottom());
//! assert_eq!(Direction::Top.opposite(), Direction::Bottom);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod direction;
mod error;
mod placement;
mod quadrant;
mod rect;
mod transform;
mod viewport;

pub use direction::{Alignment, Direction};
pub use error::GeometryError;
pub use placement::{Adjustment, Overflow, Placement};
pub use quadrant::{Quadrants, fits_within, quadrant_rects};
pub use rect::{RectEdges, define_rect, edge_distance};
pub use transform::parse_translation;
pub use viewport::{ViewportMetrics, is_within_viewport, viewport_rect};
