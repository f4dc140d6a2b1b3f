// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free space around an anchor.

use kurbo::Rect;

use crate::{Direction, RectEdges, define_rect};

/// The available rectangle on each side of an anchor within a boundary.
///
/// Each quadrant spans the full cross-axis extent of the boundary. A quadrant
/// may have a negative extent when the anchor itself lies outside the boundary.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quadrants {
    rects: [Rect; 4],
}

impl Quadrants {
    /// The quadrant on the given side of the anchor.
    #[must_use]
    pub fn get(&self, direction: Direction) -> Rect {
        self.rects[direction.index()]
    }
}

/// Compute the four quadrant rects between `anchor` and `outer`.
///
/// - `left`: x in `[outer.left, anchor.left]`
/// - `right`: x in `[anchor.right, outer.right]`
/// - `top`: y in `[outer.top, anchor.top]`
/// - `bottom`: y in `[anchor.bottom, outer.bottom]`
#[must_use]
pub fn quadrant_rects(anchor: Rect, outer: Rect) -> Quadrants {
    let mut rects = [Rect::ZERO; 4];
    for direction in Direction::ALL {
        rects[direction.index()] = match direction {
            Direction::Left => define_rect(
                outer.left(),
                outer.top(),
                anchor.left() - outer.left(),
                outer.height(),
            ),
            Direction::Right => define_rect(
                anchor.right(),
                outer.top(),
                outer.right() - anchor.right(),
                outer.height(),
            ),
            Direction::Top => define_rect(
                outer.left(),
                outer.top(),
                outer.width(),
                anchor.top() - outer.top(),
            ),
            Direction::Bottom => define_rect(
                outer.left(),
                anchor.bottom(),
                outer.width(),
                outer.bottom() - anchor.bottom(),
            ),
        };
    }
    Quadrants { rects }
}

/// Returns `true` if `big` is at least as wide and as tall as `small`.
#[must_use]
pub fn fits_within(big: Rect, small: Rect) -> bool {
    big.height() >= small.height() && big.width() >= small.width()
}
