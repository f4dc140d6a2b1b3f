// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Date parsing, formatting, and stepping helpers.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Month};

use crate::CalendarError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const MILLIS_PER_DAY: u64 = 86_400_000;
const UNIX_EPOCH_JULIAN_DAY: i32 = 2_440_588;

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<Date, CalendarError> {
    Date::parse(input.trim(), ISO_DATE).map_err(|_| CalendarError::InvalidDate(input.to_string()))
}

/// Format `date` as `YYYY-MM-DD`.
pub fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: Month) -> u8 {
    (28..=31)
        .rev()
        .find(|&day| Date::from_calendar_date(year, month, day).is_ok())
        .unwrap_or(28)
}

/// The UTC calendar date of a Unix timestamp in milliseconds.
pub fn date_from_millis(millis: u64) -> Option<Date> {
    let days = i32::try_from(millis / MILLIS_PER_DAY).ok()?;
    Date::from_julian_day(UNIX_EPOCH_JULIAN_DAY.checked_add(days)?).ok()
}

/// Unit of a calendar step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StepUnit {
    /// One calendar day.
    Day,
    /// One calendar month.
    Month,
    /// One calendar year.
    Year,
}

impl StepUnit {
    /// The unit name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for StepUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepUnit {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(CalendarError::UnknownStepUnit(other.to_string())),
        }
    }
}

/// Move `date` by `delta` units.
///
/// Month and year steps keep the day of month; a day that does not exist in
/// the target month rolls forward into the next one, so January 31 plus one
/// month is March 3 (March 2 in a leap year). Returns `None` when the result
/// leaves the supported date range.
pub fn step_date(date: Date, unit: StepUnit, delta: i32) -> Option<Date> {
    match unit {
        StepUnit::Day => date.checked_add(Duration::days(i64::from(delta))),
        StepUnit::Month => {
            let index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 + delta;
            let year = index.div_euclid(12);
            let month = Month::try_from(u8::try_from(index.rem_euclid(12) + 1).ok()?).ok()?;
            roll_forward(year, month, date.day())
        }
        StepUnit::Year => roll_forward(date.year().checked_add(delta)?, date.month(), date.day()),
    }
}

fn roll_forward(year: i32, month: Month, day: u8) -> Option<Date> {
    let first = Date::from_calendar_date(year, month, 1).ok()?;
    first.checked_add(Duration::days(i64::from(day) - 1))
}
