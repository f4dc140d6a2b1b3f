// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the positioning engines.

use kurbo::Rect;
use plumbers_geometry::{
    Alignment, Direction, RectEdges, define_rect, edge_distance, fits_within, quadrant_rects,
};
use plumbers_position::{compute_overflow, flip_side, flipped_rect};
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn alignment() -> impl Strategy<Value = Alignment> {
    prop::sample::select(vec![Alignment::Start, Alignment::Center, Alignment::End])
}

fn rect_in(extent: f64) -> impl Strategy<Value = Rect> {
    (-100.0..extent, -100.0..extent, 0.0..extent, 0.0..extent)
        .prop_map(|(x, y, w, h)| define_rect(x, y, w, h))
}

proptest! {
    #[test]
    fn flip_never_picks_an_undersized_side(
        anchor in rect_in(1000.0),
        size in (1.0..600.0f64, 1.0..600.0f64),
        viewport in (200.0..1600.0f64, 200.0..1200.0f64),
        placement in direction(),
        alignment in alignment(),
    ) {
        let viewport = define_rect(0.0, 0.0, viewport.0, viewport.1);
        let reference = define_rect(0.0, 0.0, size.0, size.1);
        let quadrants = quadrant_rects(anchor, viewport);

        match flip_side(anchor, reference, viewport, placement) {
            Some(side) => {
                prop_assert!(side == placement || side == placement.opposite());
                prop_assert!(fits_within(quadrants.get(side), reference));
                let rect = flipped_rect(anchor, reference, viewport, placement, alignment);
                prop_assert!(rect.is_some());
                let rect = rect.unwrap();
                prop_assert!((rect.width() - reference.width()).abs() < 1e-9);
                prop_assert!((rect.height() - reference.height()).abs() < 1e-9);
            }
            None => {
                prop_assert!(!fits_within(quadrants.get(placement), reference));
                prop_assert!(!fits_within(quadrants.get(placement.opposite()), reference));
                prop_assert!(flipped_rect(anchor, reference, viewport, placement, alignment).is_none());
            }
        }
    }

    #[test]
    fn shift_corrects_only_with_room(
        inner in rect_in(1400.0),
        boundaries in prop::collection::vec(direction(), 0..4),
    ) {
        let viewport = define_rect(0.0, 0.0, 1024.0, 768.0);
        let overflow = compute_overflow(inner, viewport, &boundaries);
        for (side, _) in overflow.iter() {
            prop_assert!(boundaries.contains(&side));
        }
        for side in Direction::ALL {
            if let Some(distance) = overflow.distance(side) {
                prop_assert!(distance < 0.0);
                prop_assert_eq!(distance, edge_distance(inner, side, viewport));
                prop_assert!(edge_distance(inner, side.opposite(), viewport) + distance >= 0.0);
            }
        }
    }

    #[test]
    fn contained_rects_need_no_shift(
        x in 0.0..500.0f64,
        y in 0.0..300.0f64,
        w in 0.0..500.0f64,
        h in 0.0..400.0f64,
    ) {
        let viewport = define_rect(0.0, 0.0, 1024.0, 768.0);
        let inner = define_rect(x, y, w, h);
        prop_assume!(inner.right() <= viewport.right() && inner.bottom() <= viewport.bottom());
        let overflow = compute_overflow(inner, viewport, &Direction::ALL);
        prop_assert!(overflow.is_settled());
        prop_assert_eq!(overflow.translation(), kurbo::Vec2::ZERO);
    }

    #[test]
    fn applying_the_translation_settles_the_element(
        x in -200.0..1200.0f64,
        y in -200.0..900.0f64,
        w in 1.0..400.0f64,
        h in 1.0..300.0f64,
    ) {
        let viewport = define_rect(0.0, 0.0, 1024.0, 768.0);
        let inner = define_rect(x, y, w, h);
        let overflow = compute_overflow(inner, viewport, &Direction::ALL);
        let moved = inner + overflow.translation();
        let again = compute_overflow(moved, viewport, &Direction::ALL);
        // Sides that were corrected now touch the viewport edge.
        for side in Direction::ALL {
            if overflow.distance(side).is_some() {
                prop_assert!(again.distance(side).is_none());
                prop_assert!(edge_distance(moved, side, viewport).abs() < 1e-6);
            }
        }
    }
}
