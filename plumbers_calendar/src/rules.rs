// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disabled-date rules.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;
use time::{Date, Month, Weekday};

use crate::date::parse_date;
use crate::labels::LabelFormatter;

/// A weekday or month named by number or by label.
///
/// Weekday numbers count from Sunday = 0; month numbers from January = 1.
/// Labels are compared against the long and short names of the calendar's
/// [`LabelFormatter`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleValue {
    /// Numeric value.
    Number(u8),
    /// Display name.
    Label(String),
}

impl RuleValue {
    fn matches(&self, number: u8, long: &str, short: &str) -> bool {
        match self {
            Self::Number(n) => *n == number,
            Self::Label(label) => label == long || label == short,
        }
    }
}

impl From<u8> for RuleValue {
    fn from(value: u8) -> Self {
        Self::Number(value)
    }
}

impl From<Weekday> for RuleValue {
    fn from(value: Weekday) -> Self {
        Self::Number(value.number_days_from_sunday())
    }
}

impl From<Month> for RuleValue {
    fn from(value: Month) -> Self {
        Self::Number(value.into())
    }
}

/// Text that parses as a number is treated as one.
impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        value
            .trim()
            .parse()
            .map_or_else(|_| Self::Label(value.into()), Self::Number)
    }
}

/// Sets of dates a calendar refuses.
///
/// A date is disabled when it matches any rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisabledRules {
    dates: HashSet<Date>,
    weekdays: Vec<RuleValue>,
    days: HashSet<u8>,
    months: Vec<RuleValue>,
    years: HashSet<i32>,
}

impl DisabledRules {
    /// No rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no rule is configured.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
            && self.weekdays.is_empty()
            && self.days.is_empty()
            && self.months.is_empty()
            && self.years.is_empty()
    }

    /// Disable one exact date.
    #[must_use]
    pub fn with_date(mut self, date: Date) -> Self {
        self.dates.insert(date);
        self
    }

    /// Disable dates given as `YYYY-MM-DD` text. Unparseable entries are
    /// skipped with a warning.
    #[must_use]
    pub fn with_dates_from<S: AsRef<str>>(mut self, dates: impl IntoIterator<Item = S>) -> Self {
        for text in dates {
            match parse_date(text.as_ref()) {
                Ok(date) => {
                    self.dates.insert(date);
                }
                Err(err) => tracing::warn!(%err, "ignoring disabled date"),
            }
        }
        self
    }

    /// Disable a weekday.
    #[must_use]
    pub fn with_weekday(mut self, weekday: impl Into<RuleValue>) -> Self {
        self.weekdays.push(weekday.into());
        self
    }

    /// Disable a day of the month, in every month.
    #[must_use]
    pub fn with_day(mut self, day: u8) -> Self {
        self.days.insert(day);
        self
    }

    /// Disable a month, in every year.
    #[must_use]
    pub fn with_month(mut self, month: impl Into<RuleValue>) -> Self {
        self.months.push(month.into());
        self
    }

    /// Disable a whole year.
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.years.insert(year);
        self
    }

    /// Returns `true` if `date` matches any rule.
    pub fn matches(&self, date: Date, labels: &dyn LabelFormatter) -> bool {
        if self.dates.contains(&date) || self.days.contains(&date.day()) {
            return true;
        }
        if self.years.contains(&date.year()) {
            return true;
        }
        if !self.weekdays.is_empty() {
            let weekday = date.weekday();
            let (long, short) = (labels.weekday_long(weekday), labels.weekday_short(weekday));
            let number = weekday.number_days_from_sunday();
            if self.weekdays.iter().any(|r| r.matches(number, &long, &short)) {
                return true;
            }
        }
        if !self.months.is_empty() {
            let month = date.month();
            let (long, short) = (labels.month_long(month), labels.month_short(month));
            if self.months.iter().any(|r| r.matches(month.into(), &long, &short)) {
                return true;
            }
        }
        false
    }
}
