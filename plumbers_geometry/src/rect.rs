// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

use crate::Direction;

/// Build a rect from an origin and a size.
///
/// Unlike [`Rect::from_origin_size`], negative extents are kept as-is so that a
/// quadrant with no room reports a negative width or height instead of being
/// flipped into a positive one.
#[must_use]
pub fn define_rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(x, y, x + width, y + height)
}

/// Edge accessors named the way CSS boxes name them.
pub trait RectEdges {
    /// `x`.
    fn left(&self) -> f64;
    /// `x + width`.
    fn right(&self) -> f64;
    /// `y`.
    fn top(&self) -> f64;
    /// `y + height`.
    fn bottom(&self) -> f64;

    /// The edge on the given side.
    fn edge(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Top => self.top(),
            Direction::Bottom => self.bottom(),
            Direction::Left => self.left(),
            Direction::Right => self.right(),
        }
    }
}

impl RectEdges for Rect {
    fn left(&self) -> f64 {
        self.x0
    }

    fn right(&self) -> f64 {
        self.x1
    }

    fn top(&self) -> f64 {
        self.y0
    }

    fn bottom(&self) -> f64 {
        self.y1
    }
}

/// Signed distance from `inner`'s edge to `outer`'s edge on one side.
///
/// Positive means `inner` is inside `outer` on that side; negative means it
/// overflows by that magnitude.
///
/// - `top`/`left`: `inner.edge - outer.edge`
/// - `bottom`/`right`: `outer.edge - inner.edge`
#[must_use]
pub fn edge_distance(inner: Rect, direction: Direction, outer: Rect) -> f64 {
    match direction {
        Direction::Top | Direction::Left => inner.edge(direction) - outer.edge(direction),
        Direction::Bottom | Direction::Right => outer.edge(direction) - inner.edge(direction),
    }
}
