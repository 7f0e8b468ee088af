//! Line-driven parser for Day One plain-text exports.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::entry::DayOneEntry;
use crate::error::{ImportError, Result};

/// Timestamp layouts Day One uses after the `Date:` label, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y at %H:%M:%S",
    "%B %d, %Y at %I:%M:%S %p",
    "%B %d, %Y at %H:%M",
];

/// A recoverable problem found while parsing an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportWarning {
    /// 1-based line number in the export.
    pub line: usize,
    /// The `Date:` value that could not be parsed.
    pub value: String,
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not parse date '{}' at line {}; entry skipped",
            self.value, self.line
        )
    }
}

/// Entries and warnings from one export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedExport {
    /// Entries in export order.
    pub entries: Vec<DayOneEntry>,
    /// Entries that were dropped and why.
    pub warnings: Vec<ImportWarning>,
}

/// Reads and parses the export at `path`.
///
/// # Errors
///
/// Returns [`ImportError::ExportNotFound`] if the file is missing and
/// [`ImportError::Read`] for other read failures.
pub fn read_export(path: &Path) -> Result<ParsedExport> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ImportError::ExportNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ImportError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let parsed = parse_export(&text);
    log::debug!(
        "parsed {}: {} entr(ies), {} warning(s)",
        path.display(),
        parsed.entries.len(),
        parsed.warnings.len()
    );
    Ok(parsed)
}

/// Parses export text into entries.
///
/// A `Date:` line starts a new entry. `Weather:` and `Location:` lines before
/// the first blank line fill in metadata; other metadata lines are ignored.
/// After the first blank line, the first non-blank line is the title and the
/// rest is the body. If a `Date:` value cannot be parsed, a warning is
/// recorded and every line up to the next `Date:` line is dropped.
pub fn parse_export(text: &str) -> ParsedExport {
    let mut parsed = ParsedExport::default();
    let mut current: Option<EntryBuilder> = None;

    for (index, line) in text.lines().enumerate() {
        if let Some(value) = field_value(line, "Date") {
            if let Some(builder) = current.take() {
                parsed.entries.push(builder.finish());
            }

            match parse_day_one_date(value) {
                Some((created, time_zone)) => {
                    current = Some(EntryBuilder::new(created, time_zone));
                }
                None => parsed.warnings.push(ImportWarning {
                    line: index + 1,
                    value: value.to_string(),
                }),
            }
            continue;
        }

        if let Some(builder) = current.as_mut() {
            builder.push_line(line);
        }
    }

    if let Some(builder) = current.take() {
        parsed.entries.push(builder.finish());
    }

    parsed
}

/// Parses a Day One timestamp such as `January 1, 2016 at 21:01:41 EST`.
///
/// Returns the local date-time and the trailing zone abbreviation, if any.
/// The zone is kept as text; times are not converted.
pub fn parse_day_one_date(value: &str) -> Option<(NaiveDateTime, Option<String>)> {
    let value = value.trim();

    if let Some(created) = parse_with_formats(value) {
        return Some((created, None));
    }

    let (rest, zone) = value.rsplit_once(' ')?;
    if !looks_like_zone(zone) {
        return None;
    }
    parse_with_formats(rest.trim_end()).map(|created| (created, Some(zone.to_string())))
}

fn parse_with_formats(value: &str) -> Option<NaiveDateTime> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Zone abbreviations (`EST`) and offsets (`GMT+2`, `UTC-05:00`).
fn looks_like_zone(token: &str) -> bool {
    !token.is_empty()
        && token.chars().any(|c| c.is_ascii_alphabetic())
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | ':'))
}

/// Returns the value of a `Label: value` line, allowing leading whitespace.
fn field_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.trim_start()
        .strip_prefix(label)?
        .trim_start()
        .strip_prefix(':')
        .map(str::trim)
}

#[derive(Debug)]
struct EntryBuilder {
    entry: DayOneEntry,
    in_content: bool,
    body: Vec<String>,
}

impl EntryBuilder {
    fn new(created: NaiveDateTime, time_zone: Option<String>) -> Self {
        let mut entry = DayOneEntry::new(created);
        entry.time_zone = time_zone;
        Self {
            entry,
            in_content: false,
            body: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        if !self.in_content {
            if let Some(weather) = field_value(line, "Weather") {
                self.entry.weather = Some(weather.to_string()).filter(|w| !w.is_empty());
            } else if let Some(location) = field_value(line, "Location") {
                self.entry.location = Some(location.to_string()).filter(|l| !l.is_empty());
            } else if line.trim().is_empty() {
                self.in_content = true;
            }
            return;
        }

        if self.entry.title.is_none() {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                self.entry.title = Some(trimmed.to_string());
            }
            return;
        }

        self.body.push(line.to_string());
    }

    fn finish(mut self) -> DayOneEntry {
        while self.body.last().is_some_and(|line| line.trim().is_empty()) {
            self.body.pop();
        }
        self.entry.body = self.body.join("\n");
        self.entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    const SAMPLE: &str = "\tDate:\tJanuary 1, 2016 at 21:01:41 EST
\tWeather:\t31°F Clear
\tLocation:\tHome, Portland, OR

New Year
First entry of the year.

Second paragraph.


\tDate:\tJanuary 2, 2016 at 08:15:00 PST

Morning pages
Coffee first.
";

    #[test]
    fn test_parse_day_one_date_with_zone() {
        let (created, zone) = parse_day_one_date("January 1, 2016 at 21:01:41 EST").unwrap();
        assert_eq!(created.date(), NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
        assert_eq!(created.hour(), 21);
        assert_eq!(zone.as_deref(), Some("EST"));
    }

    #[test]
    fn test_parse_day_one_date_various_zones() {
        for zone in ["MST", "CDT", "PDT", "GMT", "CEST", "GMT+2"] {
            let value = format!("June 30, 2020 at 23:59:59 {zone}");
            let (created, parsed_zone) = parse_day_one_date(&value).unwrap();
            assert_eq!(created.date(), NaiveDate::from_ymd_opt(2020, 6, 30).unwrap());
            assert_eq!(parsed_zone.as_deref(), Some(zone));
        }
    }

    #[test]
    fn test_parse_day_one_date_without_zone() {
        let (created, zone) = parse_day_one_date("March 5, 2024 at 07:00:00").unwrap();
        assert_eq!(created.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert!(zone.is_none());
    }

    #[test]
    fn test_parse_day_one_date_twelve_hour_clock() {
        let (created, zone) = parse_day_one_date("March 5, 2024 at 9:30:00 PM EST").unwrap();
        assert_eq!(created.hour(), 21);
        assert_eq!(zone.as_deref(), Some("EST"));
    }

    #[test]
    fn test_parse_day_one_date_rejects_garbage() {
        assert!(parse_day_one_date("yesterday").is_none());
        assert!(parse_day_one_date("2016-01-01").is_none());
        assert!(parse_day_one_date("").is_none());
    }

    #[test]
    fn test_field_value() {
        assert_eq!(field_value("\tDate:\tJanuary 1", "Date"), Some("January 1"));
        assert_eq!(field_value("Weather :  Sunny  ", "Weather"), Some("Sunny"));
        assert_eq!(field_value("Dated: x", "Date"), None);
        assert_eq!(field_value("The Date: x", "Date"), None);
    }

    #[test]
    fn test_parse_export_entries() {
        let parsed = parse_export(SAMPLE);

        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.entries.len(), 2);

        let first = &parsed.entries[0];
        assert_eq!(first.date(), NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
        assert_eq!(first.time_zone.as_deref(), Some("EST"));
        assert_eq!(first.weather.as_deref(), Some("31°F Clear"));
        assert_eq!(first.location.as_deref(), Some("Home, Portland, OR"));
        assert_eq!(first.title.as_deref(), Some("New Year"));
        assert_eq!(first.body, "First entry of the year.\n\nSecond paragraph.");

        let second = &parsed.entries[1];
        assert_eq!(second.date(), NaiveDate::from_ymd_opt(2016, 1, 2).unwrap());
        assert!(second.weather.is_none());
        assert_eq!(second.title.as_deref(), Some("Morning pages"));
        assert_eq!(second.body, "Coffee first.");
    }

    #[test]
    fn test_parse_export_bad_date_drops_entry() {
        let text = "Date: someday\n\nLost title\nLost body\nDate: May 1, 2021 at 10:00:00 EDT\n\nKept\n";
        let parsed = parse_export(text);

        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].title.as_deref(), Some("Kept"));
        assert_eq!(
            parsed.warnings,
            vec![ImportWarning {
                line: 1,
                value: "someday".to_string()
            }]
        );
        assert!(parsed.warnings[0].to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_export_ignores_preamble() {
        let text = "Exported from Day One\n\nDate: May 1, 2021 at 10:00:00 EDT\n\nTitle\n";
        let parsed = parse_export(text);
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].title.as_deref(), Some("Title"));
    }

    #[test]
    fn test_location_in_body_is_text() {
        let text = "Date: May 1, 2021 at 10:00:00 EDT\n\nTitle\nLocation: still body\n";
        let parsed = parse_export(text);
        assert!(parsed.entries[0].location.is_none());
        assert_eq!(parsed.entries[0].body, "Location: still body");
    }

    #[test]
    fn test_parse_export_empty() {
        assert_eq!(parse_export(""), ParsedExport::default());
    }
}
