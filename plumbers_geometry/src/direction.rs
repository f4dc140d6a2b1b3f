// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement sides and cross-axis alignment.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::GeometryError;

/// One side of a rectangle.
///
/// Used both for boundary checks (which viewport edge an element may overflow)
/// and for placement (which side of an anchor a floating element sits on).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The upper edge.
    Top,
    /// The lower edge.
    Bottom,
    /// The left edge.
    Left,
    /// The right edge.
    Right,
}

impl Direction {
    /// All four directions, in `top`, `bottom`, `left`, `right` order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// The direction on the other side of the same axis.
    ///
    /// The map is symmetric: `d.opposite().opposite() == d`.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns `true` for `top` and `bottom`.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Stable index in `0..4`, matching [`Direction::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    /// The CSS-style name of this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(GeometryError::UnknownDirection(other.to_string())),
        }
    }
}

/// Cross-axis alignment of a placed element relative to its anchor.
///
/// For `top`/`bottom` placement this aligns along x; for `left`/`right` along y.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Align the leading edges.
    #[default]
    Start,
    /// Center the element on the anchor.
    Center,
    /// Align the trailing edges.
    End,
}

impl Alignment {
    /// The CSS-style name of this alignment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            other => Err(GeometryError::UnknownAlignment(other.to_string())),
        }
    }
}
