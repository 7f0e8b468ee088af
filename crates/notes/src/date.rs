//! Date extraction from note front matter.
//!
//! The `date` value is tried against a fixed, ordered list of formats and the
//! first one that parses wins. The order matters: `03/04/2024` is read as
//! March 4th because `MM/DD/YYYY` comes before `DD/MM/YYYY`.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::frontmatter::Frontmatter;

/// Header key holding the note date.
pub const DATE_KEY: &str = "date";

/// Literal left behind by note templates whose placeholders were never filled in.
pub const TEMPLATE_PLACEHOLDER: &str = "{{date}}T{{time}}";

/// A specialized Result type for date extraction.
pub type DateResult<T> = Result<T, DateError>;

/// Why a note did not yield a date.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateError {
    /// The note does not start with a `---` header block.
    #[error("no front matter found")]
    NoFrontmatter,

    /// The header block has no non-empty `date` entry.
    #[error("no date property found in front matter")]
    NoDateKey,

    /// The `date` value matched none of the accepted formats.
    #[error("unable to parse date: {value}")]
    UnparseableFormat {
        /// The value as it appeared after quote stripping.
        value: String,
    },
}

impl DateError {
    /// Short stable tag for machine-readable output.
    pub fn tag(&self) -> &'static str {
        match self {
            DateError::NoFrontmatter => "no_frontmatter",
            DateError::NoDateKey => "no_date_key",
            DateError::UnparseableFormat { .. } => "unparseable_format",
        }
    }
}

/// The accepted textual date formats, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `2024-03-05`
    IsoDate,
    /// `2024-03-05T14:30`
    IsoDateTimeMinutes,
    /// `2024-03-05T14:30:00`
    IsoDateTimeSeconds,
    /// `2024-03-05 14:30:00`
    SpacedDateTime,
    /// `03/05/2024` (month first)
    MonthDayYear,
    /// `05/03/2024` (day first)
    DayMonthYear,
    /// `March 5, 2024`
    LongMonthName,
    /// `Mar 5, 2024`
    ShortMonthName,
    /// `{{date}}T{{time}}`
    TemplatePlaceholder,
}

impl DateFormat {
    /// Every format in trial order.
    pub const ALL: [DateFormat; 9] = [
        DateFormat::IsoDate,
        DateFormat::IsoDateTimeMinutes,
        DateFormat::IsoDateTimeSeconds,
        DateFormat::SpacedDateTime,
        DateFormat::MonthDayYear,
        DateFormat::DayMonthYear,
        DateFormat::LongMonthName,
        DateFormat::ShortMonthName,
        DateFormat::TemplatePlaceholder,
    ];

    /// The chrono pattern for this format, or the literal for the placeholder.
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::IsoDate => "%Y-%m-%d",
            DateFormat::IsoDateTimeMinutes => "%Y-%m-%dT%H:%M",
            DateFormat::IsoDateTimeSeconds => "%Y-%m-%dT%H:%M:%S",
            DateFormat::SpacedDateTime => "%Y-%m-%d %H:%M:%S",
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::DayMonthYear => "%d/%m/%Y",
            DateFormat::LongMonthName => "%B %d, %Y",
            DateFormat::ShortMonthName => "%b %d, %Y",
            DateFormat::TemplatePlaceholder => TEMPLATE_PLACEHOLDER,
        }
    }

    /// Attempts to parse `value` with this format alone.
    ///
    /// Time-of-day components are parsed for validation and then dropped.
    pub fn parse(self, value: &str) -> Option<NaiveDate> {
        match self {
            DateFormat::IsoDate
            | DateFormat::MonthDayYear
            | DateFormat::DayMonthYear
            | DateFormat::ShortMonthName => NaiveDate::parse_from_str(value, self.pattern()).ok(),
            // chrono's %B also accepts abbreviations, so require the full name.
            DateFormat::LongMonthName => NaiveDate::parse_from_str(value, self.pattern())
                .ok()
                .filter(|date| {
                    let month = value.split_whitespace().next().unwrap_or_default();
                    month.eq_ignore_ascii_case(&date.format("%B").to_string())
                }),
            DateFormat::IsoDateTimeMinutes
            | DateFormat::IsoDateTimeSeconds
            | DateFormat::SpacedDateTime => NaiveDateTime::parse_from_str(value, self.pattern())
                .ok()
                .map(|dt| dt.date()),
            // An unfilled template carries no date of its own; it resolves to
            // the first day of year 1 so it sorts before every real note.
            DateFormat::TemplatePlaceholder => {
                (value == TEMPLATE_PLACEHOLDER).then(placeholder_epoch).flatten()
            }
        }
    }
}

/// Date assigned to notes whose `date` is the raw template placeholder.
pub fn placeholder_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1, 1, 1)
}

/// Parses a bare date value against the ordered format list.
///
/// # Errors
///
/// Returns [`DateError::UnparseableFormat`] if no format accepts the value.
pub fn parse_date_value(value: &str) -> DateResult<NaiveDate> {
    parse_date_value_with_format(value).map(|(date, _)| date)
}

/// Like [`parse_date_value`], also reporting which format matched.
pub fn parse_date_value_with_format(value: &str) -> DateResult<(NaiveDate, DateFormat)> {
    DateFormat::ALL
        .iter()
        .find_map(|format| format.parse(value).map(|date| (date, *format)))
        .ok_or_else(|| DateError::UnparseableFormat {
            value: value.to_string(),
        })
}

/// Extracts and parses the `date` entry from a note's front matter.
///
/// # Errors
///
/// - [`DateError::NoFrontmatter`] if the text does not open with `---`
/// - [`DateError::NoDateKey`] if the header has no non-empty `date` line
/// - [`DateError::UnparseableFormat`] if the value matches no known format
pub fn parse_note_date(text: &str) -> DateResult<NaiveDate> {
    let header = Frontmatter::parse(text).ok_or(DateError::NoFrontmatter)?;
    let entry = header
        .first_non_empty(DATE_KEY)
        .ok_or(DateError::NoDateKey)?;
    parse_date_value(entry.value())
}
