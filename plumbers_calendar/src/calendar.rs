// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use plumbers_core::{
    CallbackArgs, Controller, Detail, ElementOf, Environment, EventInit, Plumber, PlumberOptions,
};
use time::macros::date;
use time::{Date, Duration, Month, Weekday};

use crate::date::{date_from_millis, days_in_month, iso_date, parse_date, step_date};
use crate::labels::{EnglishLabels, LabelFormatter};
use crate::rules::DisabledRules;
use crate::{CalendarError, StepUnit};

const DAYS_OF_WEEK: usize = 7;

/// A Sunday; weekday headers carry the dates of the week that follows it.
const REFERENCE_SUNDAY: Date = date!(2024-10-06);

/// One cell of a month grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CalendarDay {
    /// The date shown in the cell.
    pub date: Date,
    /// `true` for days of the displayed month, `false` for padding days.
    pub current: bool,
}

impl CalendarDay {
    /// Day of the month.
    pub fn value(&self) -> u8 {
        self.date.day()
    }

    /// Month of the date, which differs from the grid's month on padding days.
    pub fn month(&self) -> Month {
        self.date.month()
    }

    /// Year of the date.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// `YYYY-MM-DD` form of the date.
    pub fn iso(&self) -> String {
        iso_date(self.date)
    }
}

/// A weekday column header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekdayLabel {
    /// A date falling on this weekday, from a fixed reference week.
    pub date: Date,
    /// The weekday.
    pub weekday: Weekday,
    /// Days from Sunday, `0..7`.
    pub value: u8,
    /// Full name.
    pub long: String,
    /// Abbreviated name.
    pub short: String,
}

/// A month entry of the year view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthLabel {
    /// First day of the month in the anchor year.
    pub date: Date,
    /// The month.
    pub month: Month,
    /// Month number, January = 1.
    pub value: u8,
    /// Full name.
    pub long: String,
    /// Abbreviated name.
    pub short: String,
    /// Numeric label.
    pub numeric: String,
}

/// Build the grid for `month` of `year`.
///
/// The grid runs from the first of the month through its last day, preceded
/// by days of the previous month back to `first_day_of_week` (days from
/// Sunday) and followed by days of the next month up to a whole number of
/// weeks. A month that already fills whole weeks gets no padding.
pub fn month_grid(year: i32, month: Month, first_day_of_week: u8) -> Vec<CalendarDay> {
    let Ok(first) = Date::from_calendar_date(year, month, 1) else {
        return Vec::new();
    };
    let weekday = first.weekday().number_days_from_sunday();
    let leading = (i64::from(weekday) + 7 - i64::from(first_day_of_week % 7)) % 7;
    let length = usize::from(days_in_month(year, month));
    let total = (usize::try_from(leading).unwrap_or(0) + length).next_multiple_of(DAYS_OF_WEEK);

    let mut days = Vec::with_capacity(total);
    let mut date = first.checked_sub(Duration::days(leading));
    while let Some(day) = date {
        if days.len() == total {
            break;
        }
        days.push(CalendarDay {
            date: day,
            current: day.month() == month && day.year() == year,
        });
        date = day.next_day();
    }
    days
}

/// Options for [`Calendar`].
pub struct CalendarOptions<E> {
    /// Shared behavior options.
    pub plumber: PlumberOptions<E>,
    /// Reference date for "today". Derived from the environment clock when
    /// unset.
    pub today: Option<Date>,
    /// Initial anchor date. Defaults to today.
    pub date: Option<Date>,
    /// Earliest date in range.
    pub since: Option<Date>,
    /// Latest date in range.
    pub till: Option<Date>,
    /// Disabled-date rules.
    pub disabled: DisabledRules,
    /// First column of the grid, in days from Sunday. Values outside `0..7`
    /// fall back to Sunday.
    pub first_day_of_week: u8,
    /// Weekday and month names.
    pub labels: Rc<dyn LabelFormatter>,
    /// Callback awaited after navigating.
    pub on_navigated: String,
}

impl<E> Default for CalendarOptions<E> {
    fn default() -> Self {
        Self {
            plumber: PlumberOptions::default(),
            today: None,
            date: None,
            since: None,
            till: None,
            disabled: DisabledRules::default(),
            first_day_of_week: 0,
            labels: Rc::new(EnglishLabels),
            on_navigated: "navigated".into(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for CalendarOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarOptions")
            .field("plumber", &self.plumber)
            .field("today", &self.today)
            .field("date", &self.date)
            .field("since", &self.since)
            .field("till", &self.till)
            .field("disabled", &self.disabled)
            .field("first_day_of_week", &self.first_day_of_week)
            .field("labels", &self.labels)
            .field("on_navigated", &self.on_navigated)
            .finish()
    }
}

impl<E> CalendarOptions<E> {
    /// Use `plumber` as the shared behavior options.
    #[must_use]
    pub fn with_plumber(mut self, plumber: PlumberOptions<E>) -> Self {
        self.plumber = plumber;
        self
    }

    /// Use `today` as the reference date.
    #[must_use]
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// Start at `date`.
    #[must_use]
    pub fn with_date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    /// Start at `day` of `month` in `year`. An invalid combination is ignored
    /// with a warning.
    #[must_use]
    pub fn with_day_month_year(mut self, day: u8, month: Month, year: i32) -> Self {
        match Date::from_calendar_date(year, month, day) {
            Ok(date) => self.date = Some(date),
            Err(err) => tracing::warn!(%err, "ignoring initial date"),
        }
        self
    }

    /// Limit the range to `since..=till`; either end may be open.
    #[must_use]
    pub fn with_range(mut self, since: Option<Date>, till: Option<Date>) -> Self {
        self.since = since;
        self.till = till;
        self
    }

    /// Limit the range with `YYYY-MM-DD` bounds. Empty text leaves that end
    /// open; unparseable text does too, with a warning.
    #[must_use]
    pub fn with_range_str(mut self, since: &str, till: &str) -> Self {
        self.since = optional_date(since);
        self.till = optional_date(till);
        self
    }

    /// Use `disabled` as the disabled-date rules.
    #[must_use]
    pub fn with_disabled(mut self, disabled: DisabledRules) -> Self {
        self.disabled = disabled;
        self
    }

    /// Start weeks on `day` (days from Sunday).
    #[must_use]
    pub fn with_first_day_of_week(mut self, day: u8) -> Self {
        self.first_day_of_week = day;
        self
    }

    /// Use `labels` for weekday and month names.
    #[must_use]
    pub fn with_labels(mut self, labels: Rc<dyn LabelFormatter>) -> Self {
        self.labels = labels;
        self
    }
}

fn optional_date(text: &str) -> Option<Date> {
    if text.trim().is_empty() {
        return None;
    }
    parse_date(text)
        .map_err(|err| tracing::warn!(%err, "ignoring range bound"))
        .ok()
}

#[derive(Debug, Default)]
struct Views {
    days_of_week: Vec<WeekdayLabel>,
    days_of_month: Vec<CalendarDay>,
    months_of_year: Vec<MonthLabel>,
}

/// Month-view calendar state with navigation.
///
/// The calendar keeps an anchor date and derives three views from it: the
/// weekday headers starting at the configured first day of the week, the
/// month grid, and the months of the anchor's year. Navigating moves the
/// anchor, rebuilds the views, and reports `navigate`/`navigated` with the
/// old and new dates.
pub struct Calendar<H: Controller> {
    plumber: Plumber<H>,
    today: Date,
    current: Cell<Date>,
    since: Option<Date>,
    till: Option<Date>,
    disabled: DisabledRules,
    first_day_of_week: u8,
    labels: Rc<dyn LabelFormatter>,
    on_navigated: String,
    views: RefCell<Views>,
}

impl<H: Controller> fmt::Debug for Calendar<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar")
            .field("plumber", &self.plumber)
            .field("today", &self.today)
            .field("current", &self.current.get())
            .field("since", &self.since)
            .field("till", &self.till)
            .field("disabled", &self.disabled)
            .field("first_day_of_week", &self.first_day_of_week)
            .field("labels", &self.labels)
            .field("on_navigated", &self.on_navigated)
            .field("views", &self.views)
            .finish()
    }
}

impl<H: Controller> Calendar<H> {
    /// Attach to `host` and build the initial views.
    pub fn attach(host: &Rc<H>, options: CalendarOptions<ElementOf<H>>) -> Rc<Self> {
        let plumber = Plumber::new(host, options.plumber);
        let today = options
            .today
            .or_else(|| date_from_millis(plumber.env().now_millis()))
            .unwrap_or(Date::MIN);
        let first_day_of_week = if options.first_day_of_week < 7 {
            options.first_day_of_week
        } else {
            tracing::warn!(
                first_day_of_week = options.first_day_of_week,
                "first day of week out of range, using Sunday"
            );
            0
        };
        let calendar = Rc::new(Self {
            plumber,
            today,
            current: Cell::new(options.date.unwrap_or(today)),
            since: options.since,
            till: options.till,
            disabled: options.disabled,
            first_day_of_week,
            labels: options.labels,
            on_navigated: options.on_navigated,
            views: RefCell::default(),
        });
        calendar.build();
        calendar
    }

    /// The underlying behavior state.
    pub fn plumber(&self) -> &Plumber<H> {
        &self.plumber
    }

    /// Reference date for "today".
    pub fn today(&self) -> Date {
        self.today
    }

    /// Anchor date.
    pub fn current(&self) -> Date {
        self.current.get()
    }

    /// Day of the anchor date.
    pub fn day(&self) -> u8 {
        self.current.get().day()
    }

    /// Month of the anchor date.
    pub fn month(&self) -> Month {
        self.current.get().month()
    }

    /// Year of the anchor date.
    pub fn year(&self) -> i32 {
        self.current.get().year()
    }

    /// Earliest date in range.
    pub fn since(&self) -> Option<Date> {
        self.since
    }

    /// Latest date in range.
    pub fn till(&self) -> Option<Date> {
        self.till
    }

    /// First column of the grid, in days from Sunday.
    pub fn first_day_of_week(&self) -> u8 {
        self.first_day_of_week
    }

    /// Disabled-date rules.
    pub fn disabled(&self) -> &DisabledRules {
        &self.disabled
    }

    /// Weekday headers, starting at the first day of the week.
    pub fn days_of_week(&self) -> Vec<WeekdayLabel> {
        self.views.borrow().days_of_week.clone()
    }

    /// Grid of the anchor month.
    pub fn days_of_month(&self) -> Vec<CalendarDay> {
        self.views.borrow().days_of_month.clone()
    }

    /// Months of the anchor year.
    pub fn months_of_year(&self) -> Vec<MonthLabel> {
        self.views.borrow().months_of_year.clone()
    }

    /// Rebuild the derived views from the anchor date.
    pub fn build(&self) {
        let current = self.current.get();
        let labels = &*self.labels;
        let days_of_week = (0..7)
            .map(|offset| {
                let shift = self.first_day_of_week + offset;
                let weekday = Weekday::Sunday.nth_next(shift);
                WeekdayLabel {
                    date: REFERENCE_SUNDAY
                        .checked_add(Duration::days(i64::from(shift)))
                        .unwrap_or(REFERENCE_SUNDAY),
                    weekday,
                    value: weekday.number_days_from_sunday(),
                    long: labels.weekday_long(weekday),
                    short: labels.weekday_short(weekday),
                }
            })
            .collect();
        let months_of_year = (0..12)
            .map(|offset| {
                let month = Month::January.nth_next(offset);
                MonthLabel {
                    date: Date::from_calendar_date(current.year(), month, 1).unwrap_or(current),
                    month,
                    value: month.into(),
                    long: labels.month_long(month),
                    short: labels.month_short(month),
                    numeric: labels.month_numeric(month),
                }
            })
            .collect();
        *self.views.borrow_mut() = Views {
            days_of_week,
            days_of_month: month_grid(current.year(), current.month(), self.first_day_of_week),
            months_of_year,
        };
    }

    /// Move the anchor to `to`.
    ///
    /// Dispatches `navigate`, updates the anchor and views, awaits the
    /// navigated callback, then dispatches `navigated`. Every step carries
    /// `{from, to}` as `YYYY-MM-DD`.
    pub async fn navigate(&self, to: Date) {
        let detail = Detail::Navigation {
            from: iso_date(self.current.get()),
            to: iso_date(to),
        };
        self.plumber.dispatch("navigate", EventInit::detail(detail.clone()));
        self.current.set(to);
        self.build();
        self.plumber
            .await_callback(&self.on_navigated, CallbackArgs::detail(detail.clone()))
            .await;
        self.plumber.dispatch("navigated", EventInit::detail(detail));
    }

    /// Navigate to a `YYYY-MM-DD` date.
    pub async fn navigate_str(&self, to: &str) -> Result<(), CalendarError> {
        let to = parse_date(to)?;
        self.navigate(to).await;
        Ok(())
    }

    /// Move the anchor by `delta` units.
    ///
    /// A zero delta does nothing, as does a step that leaves the supported
    /// date range.
    pub async fn step(&self, unit: StepUnit, delta: i32) {
        if delta == 0 {
            return;
        }
        match step_date(self.current.get(), unit, delta) {
            Some(to) => self.navigate(to).await,
            None => tracing::debug!(%unit, delta, "step leaves the date range"),
        }
    }

    /// [`step`](Self::step) with the unit given by name.
    pub async fn step_str(&self, unit: &str, delta: i32) -> Result<(), CalendarError> {
        let unit = unit.parse()?;
        self.step(unit, delta).await;
        Ok(())
    }

    /// Returns `true` if `date` matches a disabled-date rule.
    pub fn is_disabled(&self, date: Date) -> bool {
        self.disabled.matches(date, &*self.labels)
    }

    /// Returns `true` if `date` is within `since..=till`.
    pub fn is_within_range(&self, date: Date) -> bool {
        self.since.is_none_or(|since| date >= since) && self.till.is_none_or(|till| date <= till)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use plumbers_core::Callback;
    use plumbers_core::testing::{TestElement, TestEnv, TestHost};
    use time::macros::date;

    fn host() -> Rc<TestHost> {
        TestHost::new("calendar", None, TestEnv::new(1024.0, 768.0))
    }

    fn attach(options: CalendarOptions<TestElement>) -> Rc<Calendar<TestHost>> {
        Calendar::attach(&host(), options)
    }

    #[test]
    fn february_2015_fills_four_weeks() {
        let grid = month_grid(2015, Month::February, 0);
        assert_eq!(grid.len(), 28);
        assert!(grid.iter().all(|d| d.current));
        assert_eq!(grid[0].date, date!(2015-02-01));
    }

    #[test]
    fn grid_pads_to_first_day_of_week() {
        // March 2015 starts on a Sunday and has 31 days.
        let grid = month_grid(2015, Month::March, 1);
        assert_eq!(grid.len(), 42);
        assert_eq!(grid[0].date, date!(2015-02-23));
        assert!(!grid[0].current);
        assert_eq!(grid[6].date, date!(2015-03-01));
        assert!(grid[6].current);
        assert_eq!(grid.iter().filter(|d| d.current).count(), 31);
        assert_eq!(grid[41].date, date!(2015-04-05));
        assert_eq!(grid[41].iso(), "2015-04-05");
        assert_eq!((grid[0].month(), grid[0].year()), (Month::February, 2015));
        assert_eq!((grid[41].month(), grid[41].year()), (Month::April, 2015));
    }

    #[test]
    fn no_trailing_week_when_already_whole() {
        // February 2015 with Monday first: 6 leading days + 28 = 34, so 1 trailing.
        let grid = month_grid(2015, Month::February, 1);
        assert_eq!(grid.len(), 35);
        assert_eq!(grid.last().map(CalendarDay::value), Some(1));
        let sunday_start = month_grid(2015, Month::February, 0);
        assert!(sunday_start.iter().all(|d| d.current));
    }

    #[test]
    fn today_comes_from_the_clock() {
        let env = TestEnv::new(1024.0, 768.0);
        env.set_now(1_423_000_000_000);
        let host = TestHost::new("calendar", None, env);
        let calendar = Calendar::attach(&host, CalendarOptions::default());
        assert_eq!(calendar.today(), date!(2015-02-03));
        assert_eq!(calendar.current(), date!(2015-02-03));
        assert_eq!(
            (calendar.day(), calendar.month(), calendar.year()),
            (3, Month::February, 2015)
        );
    }

    #[test]
    fn initial_date_and_views() {
        let calendar = attach(
            CalendarOptions::default()
                .with_today(date!(2024-10-06))
                .with_day_month_year(15, Month::February, 2015)
                .with_first_day_of_week(1),
        );
        assert_eq!(calendar.today(), date!(2024-10-06));
        assert_eq!(calendar.current(), date!(2015-02-15));

        let weekdays = calendar.days_of_week();
        assert_eq!(weekdays.len(), 7);
        assert_eq!(weekdays[0].weekday, Weekday::Monday);
        assert_eq!(weekdays[0].value, 1);
        assert_eq!(weekdays[6].short, "Sun");
        for label in &weekdays {
            assert_eq!(label.date.weekday(), label.weekday);
        }

        let months = calendar.months_of_year();
        assert_eq!(months.len(), 12);
        assert_eq!(months[1].long, "February");
        assert_eq!(months[1].date, date!(2015-02-01));
        assert_eq!(months[11].numeric, "12");

        assert_eq!(calendar.days_of_month().len(), 35);
    }

    #[test]
    fn invalid_settings_fall_back() {
        let calendar = attach(
            CalendarOptions::default()
                .with_today(date!(2015-02-03))
                .with_day_month_year(30, Month::February, 2015)
                .with_first_day_of_week(9),
        );
        assert_eq!(calendar.first_day_of_week(), 0);
        assert_eq!(calendar.current(), date!(2015-02-03));
    }

    #[test]
    fn navigate_reports_from_and_to() {
        let host = host();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        host.register(
            "navigated",
            Callback::sync(move |args: CallbackArgs<TestElement>| s.borrow_mut().push(args.detail)),
        );
        let calendar = Calendar::attach(
            &host,
            CalendarOptions::default().with_date(date!(2015-01-31)),
        );

        pollster::block_on(calendar.step(StepUnit::Month, 1));

        let detail = Detail::Navigation {
            from: "2015-01-31".into(),
            to: "2015-03-03".into(),
        };
        assert_eq!(calendar.current(), date!(2015-03-03));
        assert_eq!(
            host.event_types(),
            vec!["calendar:navigate", "calendar:navigated"]
        );
        assert_eq!(host.events()[0].detail, detail);
        assert_eq!(*seen.borrow(), vec![detail]);
        assert_eq!(calendar.days_of_month()[0].date, date!(2015-03-01));
    }

    #[test]
    fn zero_and_unknown_steps_do_nothing() {
        let host = host();
        let calendar = Calendar::attach(
            &host,
            CalendarOptions::default().with_date(date!(2015-02-01)),
        );
        pollster::block_on(calendar.step(StepUnit::Day, 0));
        assert_eq!(
            pollster::block_on(calendar.step_str("week", 1)),
            Err(CalendarError::UnknownStepUnit("week".into()))
        );
        assert!(pollster::block_on(calendar.navigate_str("2015-13-01")).is_err());
        assert!(host.events().is_empty());
        assert_eq!(calendar.current(), date!(2015-02-01));

        assert_eq!(pollster::block_on(calendar.step_str("year", -1)), Ok(()));
        assert_eq!(calendar.current(), date!(2014-02-01));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let calendar = attach(CalendarOptions::default().with_range_str("2015-02-01", "2015-02-28"));
        assert!(calendar.is_within_range(date!(2015-02-01)));
        assert!(calendar.is_within_range(date!(2015-02-28)));
        assert!(!calendar.is_within_range(date!(2015-01-31)));
        assert!(!calendar.is_within_range(date!(2015-03-01)));

        let open = attach(CalendarOptions::default().with_range_str("", "garbage"));
        assert_eq!((open.since(), open.till()), (None, None));
        assert!(open.is_within_range(date!(1900-01-01)));
    }

    #[test]
    fn disabled_rules_use_calendar_labels() {
        let calendar = attach(
            CalendarOptions::default().with_disabled(DisabledRules::new().with_weekday("Sunday")),
        );
        assert!(calendar.is_disabled(date!(2015-02-01)));
        assert!(!calendar.is_disabled(date!(2015-02-02)));
    }
}
