// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Print a month grid, then step through a few months.
//!
//! Run:
//! - `cargo run -p plumbers_demos --example calendar`

use plumbers_calendar::{Calendar, CalendarOptions, DisabledRules, StepUnit};
use plumbers_core::testing::{TestEnv, TestHost};
use time::Weekday;
use time::macros::date;

fn print_month<H: plumbers_core::Controller>(calendar: &Calendar<H>) {
    println!("\n{} {}", calendar.month(), calendar.year());
    let header: Vec<_> = calendar
        .days_of_week()
        .into_iter()
        .map(|w| format!("{:>4}", w.short))
        .collect();
    println!("{}", header.concat());
    for week in calendar.days_of_month().chunks(7) {
        let row: Vec<_> = week
            .iter()
            .map(|day| {
                let mark = if !day.current {
                    ' '
                } else if calendar.is_disabled(day.date) {
                    'x'
                } else if !calendar.is_within_range(day.date) {
                    '-'
                } else {
                    ' '
                };
                format!("{:>3}{mark}", day.value())
            })
            .collect();
        println!("{}", row.concat());
    }
}

fn main() {
    let host = TestHost::new("calendar", None, TestEnv::new(1024.0, 768.0));
    let calendar = Calendar::attach(
        &host,
        CalendarOptions::default()
            .with_today(date!(2015-01-31))
            .with_first_day_of_week(1)
            .with_range(Some(date!(2015-01-05)), Some(date!(2015-04-20)))
            .with_disabled(
                DisabledRules::new()
                    .with_weekday(Weekday::Sunday)
                    .with_dates_from(["2015-02-14", "2015-03-17"]),
            ),
    );

    print_month(&calendar);
    for _ in 0..3 {
        pollster::block_on(calendar.step(StepUnit::Month, 1));
        for event in host.events() {
            println!("{} {:?}", event.event_type(), event.detail);
        }
        host.clear_events();
        print_month(&calendar);
    }
}
