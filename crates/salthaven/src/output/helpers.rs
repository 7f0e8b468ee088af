//! Common helper functions for output formatting.

use chrono::NaiveDate;
use owo_colors::OwoColorize;

/// Picks the singular or plural form for `count`.
pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// Formats a date as `March 5, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Formats a section header, bold when colors are enabled.
pub fn format_header(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Dims secondary text when colors are enabled.
pub fn format_dimmed(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}
