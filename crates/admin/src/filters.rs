//! Custom Askama template filters and display formatting helpers.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::{DateTime, Datelike, Utc};

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(Utc::now().year())
}

/// Format a timestamp the way list pages show it: "March 3rd, 2024".
///
/// Used by view structs when they flatten records for templates, so the
/// templates themselves never touch raw timestamps.
#[must_use]
pub fn long_date(value: &DateTime<Utc>) -> String {
    let day = value.day();
    format!(
        "{} {}{}, {}",
        value.format("%B"),
        day,
        ordinal_suffix(day),
        value.year()
    )
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}
