// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for month grids and date stepping.

use plumbers_calendar::{StepUnit, days_in_month, month_grid, step_date};
use proptest::prelude::*;
use time::{Date, Month};

fn month() -> impl Strategy<Value = Month> {
    (1..=12_u8).prop_map(|m| Month::try_from(m).unwrap())
}

proptest! {
    #[test]
    fn grid_is_whole_weeks(year in 1600..2400_i32, month in month(), first in 0..7_u8) {
        let grid = month_grid(year, month, first);
        prop_assert_eq!(grid.len() % 7, 0);
        prop_assert!(grid.len() >= 28 && grid.len() <= 42);
        prop_assert_eq!(grid[0].date.weekday().number_days_from_sunday(), first);

        let current: Vec<_> = grid.iter().filter(|d| d.current).collect();
        prop_assert_eq!(current.len(), usize::from(days_in_month(year, month)));
        prop_assert_eq!(current[0].value(), 1);

        let leading = grid.iter().take_while(|d| !d.current).count();
        let trailing = grid.iter().rev().take_while(|d| !d.current).count();
        prop_assert!(leading < 7);
        prop_assert!(trailing < 7);

        for pair in grid.windows(2) {
            prop_assert_eq!(pair[0].date.next_day(), Some(pair[1].date));
        }
    }

    #[test]
    fn day_steps_are_reversible(
        julian in 2_300_000..2_500_000_i32,
        delta in -1000..1000_i32,
    ) {
        let start = Date::from_julian_day(julian).unwrap();
        let moved = step_date(start, StepUnit::Day, delta).unwrap();
        prop_assert_eq!(step_date(moved, StepUnit::Day, -delta), Some(start));
    }

    #[test]
    fn month_steps_keep_short_days(
        year in 1600..2400_i32,
        month in month(),
        day in 1..=28_u8,
        delta in -36..36_i32,
    ) {
        let start = Date::from_calendar_date(year, month, day).unwrap();
        let moved = step_date(start, StepUnit::Month, delta).unwrap();
        prop_assert_eq!(moved.day(), day);
        let months = |d: Date| d.year() * 12 + i32::from(u8::from(d.month()));
        prop_assert_eq!(months(moved) - months(start), delta);
    }
}
