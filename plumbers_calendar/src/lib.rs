// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plumbers Calendar: month grids and date navigation for calendar widgets.
//!
//! ## Overview
//!
//! [`month_grid`] lays out a month as whole weeks starting on a configurable
//! first day of the week, padding with days of the neighboring months only as
//! far as needed. [`Calendar`] binds that engine to a [`Controller`]: it keeps
//! an anchor date, rebuilds the weekday headers, the grid, and the months of
//! the year whenever the anchor moves, and reports each move as
//! `navigate`/`navigated` events carrying `{from, to}`.
//!
//! Dates are [`time::Date`] values and cross string boundaries as
//! `YYYY-MM-DD`. Stepping by months or years keeps the day of month and rolls
//! a day the target month lacks forward, so January 31 plus one month lands
//! in March.
//!
//! [`DisabledRules`] refuse dates by exact date, weekday, day of month, month,
//! or year; weekdays and months may be named by number or by label, with
//! labels supplied by a [`LabelFormatter`] ([`EnglishLabels`] by default).
//!
//! ## Minimal example
//!
//! ```rust
//! use plumbers_calendar::{StepUnit, month_grid, step_date};
//! use time::Month;
//! use time::macros::date;
//!
//! // February 2015 starts on a Sunday and fills exactly four weeks.
//! let grid = month_grid(2015, Month::February, 0);
//! assert_eq!(grid.len(), 28);
//!
//! // With Monday first it needs padding on both sides.
//! let grid = month_grid(2015, Month::February, 1);
//! assert_eq!(grid.len(), 35);
//! assert!(!grid[0].current);
//!
//! assert_eq!(
//!     step_date(date!(2015-01-31), StepUnit::Month, 1),
//!     Some(date!(2015-03-03))
//! );
//! ```
//!
//! [`Controller`]: plumbers_core::Controller
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod calendar;
mod date;
mod error;
mod labels;
mod rules;

pub use calendar::{
    Calendar, CalendarDay, CalendarOptions, MonthLabel, WeekdayLabel, month_grid,
};
pub use date::{StepUnit, date_from_millis, days_in_month, iso_date, parse_date, step_date};
pub use error::CalendarError;
pub use labels::{EnglishLabels, LabelFormatter};
pub use rules::{DisabledRules, RuleValue};
