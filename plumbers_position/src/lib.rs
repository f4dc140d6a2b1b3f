// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plumbers Position: keep floating elements on screen.
//!
//! ## Overview
//!
//! Two behaviors, each split into a pure engine and a [`Controller`] binding:
//!
//! - **Shift** nudges an element that is already positioned back inside the
//!   viewport with a `translate(...)` transform. [`compute_overflow`] measures
//!   the per-side overflow; [`Shifter`] listens for `resize` by default and
//!   writes the correction. A side is corrected only when there is room on the
//!   opposite side, so an element larger than the viewport is left alone.
//! - **Flip** places a floating element flush against an anchor on a preferred
//!   side, falling back to the opposite side, then aligns it on the cross axis.
//!   [`flipped_rect`] is the engine; [`Flipper`] listens for `click` by default
//!   and writes absolute `top`/`left` in page coordinates.
//!
//! Both dispatch a before event (`shift`, `flip`) ahead of any mutation and an
//! after event (`shifted`, `flipped`) once the host callback has resolved.
//! When the environment asks for reduced motion, a [`MotionGuard`] disables
//! transitions while the styles are written and restores them afterwards.
//!
//! ## Minimal example
//!
//! ```rust
//! use plumbers_geometry::{Direction, define_rect};
//! use plumbers_position::compute_overflow;
//!
//! let viewport = define_rect(0.0, 0.0, 1024.0, 768.0);
//! let tooltip = define_rect(848.0, 100.0, 200.0, 100.0);
//!
//! let overflow = compute_overflow(tooltip, viewport, &[Direction::Left, Direction::Right]);
//! assert_eq!(overflow.distance(Direction::Right), Some(-24.0));
//! assert_eq!(overflow.translation().x, -24.0);
//! ```
//!
//! [`Controller`]: plumbers_core::Controller
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod flip;
mod motion;
mod shift;

pub use flip::{FlipOptions, Flipper, align_to, flip_side, flipped_rect, place_against};
pub use motion::MotionGuard;
pub use shift::{
    Boundaries, ShiftOptions, Shifter, compute_overflow, parse_boundaries, untranslated_rect,
};
