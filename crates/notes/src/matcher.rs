//! Comparison policies between a note date and a reference date.
//!
//! Policies form a closed set. Adding one means adding a variant here, which
//! keeps every matching rule visible in one place and testable on its own.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// How a note date is compared with the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateMatcher {
    /// Same year, month and day.
    ExactDate,
    /// Same month and day in any year.
    ///
    /// Notes dated February 29th only match a February 29th reference, so
    /// they never show up when the reference year is not a leap year.
    SameMonthDay,
}

impl DateMatcher {
    /// Returns true if `note` satisfies `reference` under this policy.
    pub fn matches(self, note: NaiveDate, reference: NaiveDate) -> bool {
        match self {
            DateMatcher::ExactDate => note == reference,
            DateMatcher::SameMonthDay => {
                note.month() == reference.month() && note.day() == reference.day()
            }
        }
    }

    /// Human-readable description of what `reference` selects, e.g.
    /// `"March 5, 2024"` or `"March 5 (any year)"`.
    pub fn describe(self, reference: NaiveDate) -> String {
        match self {
            DateMatcher::ExactDate => reference.format("%B %-d, %Y").to_string(),
            DateMatcher::SameMonthDay => format!("{} (any year)", reference.format("%B %-d")),
        }
    }

    /// Stable identifier used on the command line and in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            DateMatcher::ExactDate => "exact-date",
            DateMatcher::SameMonthDay => "same-month-day",
        }
    }
}

impl fmt::Display for DateMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown matcher name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown date matcher '{0}' (expected exact-date or same-month-day)")]
pub struct UnknownMatcher(pub String);

impl FromStr for DateMatcher {
    type Err = UnknownMatcher;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact-date" | "exact" => Ok(DateMatcher::ExactDate),
            "same-month-day" | "same-day" | "onthisday" => Ok(DateMatcher::SameMonthDay),
            _ => Err(UnknownMatcher(s.to_string())),
        }
    }
}
