// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use core::fmt::Debug;

use time::{Month, Weekday};

/// Produces display names for weekdays and months.
///
/// Hosts plug in a locale-aware implementation; [`EnglishLabels`] is the
/// default.
pub trait LabelFormatter: Debug {
    /// Full weekday name, such as "Monday".
    fn weekday_long(&self, weekday: Weekday) -> String;
    /// Abbreviated weekday name, such as "Mon".
    fn weekday_short(&self, weekday: Weekday) -> String;
    /// Full month name, such as "February".
    fn month_long(&self, month: Month) -> String;
    /// Abbreviated month name, such as "Feb".
    fn month_short(&self, month: Month) -> String;
    /// Numeric month label. Defaults to the 1-based month number.
    fn month_numeric(&self, month: Month) -> String {
        u8::from(month).to_string()
    }
}

/// English labels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EnglishLabels;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAYS[usize::from(weekday.number_days_from_sunday())]
}

fn month_name(month: Month) -> &'static str {
    MONTHS[usize::from(u8::from(month)) - 1]
}

impl LabelFormatter for EnglishLabels {
    fn weekday_long(&self, weekday: Weekday) -> String {
        weekday_name(weekday).to_string()
    }

    fn weekday_short(&self, weekday: Weekday) -> String {
        weekday_name(weekday)[..3].to_string()
    }

    fn month_long(&self, month: Month) -> String {
        month_name(month).to_string()
    }

    fn month_short(&self, month: Month) -> String {
        month_name(month)[..3].to_string()
    }
}
