// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
///
/// This is the form `start_date` takes in plan responses.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a UTC timestamp the way rule conditions see it.
///
/// Stored rules were written against `2024-01-15 10:30:00`: a space
/// separator, no offset, and microseconds only when there are any.
pub fn format_condition_datetime(date: DateTime<Utc>) -> String {
    let base = date.format("%Y-%m-%d %H:%M:%S").to_string();
    match date.nanosecond() / 1_000 {
        0 => base,
        micros => format!("{}.{:06}", base, micros),
    }
}
