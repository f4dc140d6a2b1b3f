// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Errors raised when calendar input arrives as strings.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A step unit other than `day`, `month`, or `year`.
    #[error("unknown step unit `{0}`")]
    UnknownStepUnit(String),
    /// Text that is not a valid `YYYY-MM-DD` date.
    #[error("invalid date `{0}`")]
    InvalidDate(String),
}
