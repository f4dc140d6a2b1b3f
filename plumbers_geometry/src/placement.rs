// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Results produced by the positioning engines.

use kurbo::Vec2;

use crate::Direction;

/// Absolute position for a floating element, in page coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Placement {
    /// Distance from the top of the page, scroll offset included.
    pub top: f64,
    /// Distance from the left of the page, scroll offset included.
    pub left: f64,
}

/// Outcome of checking one boundary side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Adjustment {
    /// The element is inside the boundary on this side; nothing to correct.
    Inside,
    /// The element overflows by this signed (negative) distance and there is
    /// room to pull it back.
    Overflow(f64),
}

/// Per-side overflow map produced by the shift engine.
///
/// A side is absent when it was not checked, or when it overflows but the
/// correction was refused (no room on the opposite side, or the opposite side
/// was already corrected).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Overflow {
    entries: [Option<Adjustment>; 4],
}

impl Overflow {
    /// An empty map with no side recorded.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: [None; 4] }
    }

    /// The recorded adjustment for one side, if any.
    #[must_use]
    pub fn get(&self, direction: Direction) -> Option<Adjustment> {
        self.entries[direction.index()]
    }

    /// Record the adjustment for one side.
    pub fn set(&mut self, direction: Direction, adjustment: Adjustment) {
        self.entries[direction.index()] = Some(adjustment);
    }

    /// The signed overflow distance recorded for one side, if a correction applies.
    #[must_use]
    pub fn distance(&self, direction: Direction) -> Option<f64> {
        match self.get(direction) {
            Some(Adjustment::Overflow(distance)) => Some(distance),
            _ => None,
        }
    }

    /// Returns `true` if no side carries a correction.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        Direction::ALL.iter().all(|d| self.distance(*d).is_none())
    }

    /// Recorded sides in [`Direction::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Adjustment)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.get(d).map(|adjustment| (d, adjustment)))
    }

    /// The translation that pulls the element back inside.
    ///
    /// Horizontal comes from the `left` correction if set, else `right`;
    /// vertical from `top`, else `bottom`. Overflow past the leading edge
    /// moves the element forward and overflow past the trailing edge moves it
    /// back, each by the overflow magnitude.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        let x = self
            .distance(Direction::Left)
            .map(|d| -d)
            .or_else(|| self.distance(Direction::Right))
            .unwrap_or(0.0);
        let y = self
            .distance(Direction::Top)
            .map(|d| -d)
            .or_else(|| self.distance(Direction::Bottom))
            .unwrap_or(0.0);
        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_translates_nowhere() {
        let overflow = Overflow::new();
        assert!(overflow.is_settled());
        assert_eq!(overflow.translation(), Vec2::ZERO);
        assert_eq!(overflow.iter().count(), 0);
    }

    #[test]
    fn inside_sides_do_not_translate() {
        let mut overflow = Overflow::new();
        overflow.set(Direction::Top, Adjustment::Inside);
        overflow.set(Direction::Left, Adjustment::Inside);
        assert!(overflow.is_settled());
        assert_eq!(overflow.translation(), Vec2::ZERO);
        assert_eq!(overflow.iter().count(), 2);
    }

    #[test]
    fn trailing_overflow_moves_back() {
        let mut overflow = Overflow::new();
        overflow.set(Direction::Right, Adjustment::Overflow(-24.0));
        overflow.set(Direction::Bottom, Adjustment::Overflow(-8.0));
        assert_eq!(overflow.translation(), Vec2::new(-24.0, -8.0));
    }

    #[test]
    fn leading_overflow_moves_forward() {
        let mut overflow = Overflow::new();
        overflow.set(Direction::Left, Adjustment::Overflow(-30.0));
        overflow.set(Direction::Top, Adjustment::Overflow(-5.0));
        assert_eq!(overflow.translation(), Vec2::new(30.0, 5.0));
        assert!(!overflow.is_settled());
    }
}
