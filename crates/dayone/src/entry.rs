//! A single Day One entry and its markdown rendering.

use std::fmt::Write as _;

use chrono::{NaiveDate, NaiveDateTime};

/// Value written to the `source` header key of imported notes.
pub const SOURCE_LABEL: &str = "Day One";

/// Suffix appended to the date in generated file names.
pub const FILE_SUFFIX: &str = "dayone";

/// One journal entry from a Day One export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOneEntry {
    /// Local date and time as written in the export.
    pub created: NaiveDateTime,
    /// Zone abbreviation that followed the time, e.g. `EST`.
    pub time_zone: Option<String>,
    /// Weather summary.
    pub weather: Option<String>,
    /// Location name.
    pub location: Option<String>,
    /// First non-blank line of the entry text.
    pub title: Option<String>,
    /// Entry text after the title.
    pub body: String,
}

impl DayOneEntry {
    /// Creates an entry with no metadata or text.
    pub fn new(created: NaiveDateTime) -> Self {
        Self {
            created,
            time_zone: None,
            weather: None,
            location: None,
            title: None,
            body: String::new(),
        }
    }

    /// Calendar date of the entry.
    pub fn date(&self) -> NaiveDate {
        self.created.date()
    }

    /// Default file name, e.g. `2016-01-01-dayone.md`.
    pub fn file_name(&self) -> String {
        format!("{}-{}.md", self.date().format("%Y-%m-%d"), FILE_SUFFIX)
    }

    /// Renders the entry as a markdown note.
    ///
    /// The header always carries `date: YYYY-MM-DD` and `source: Day One`;
    /// `weather` and `location` are written when present.
    pub fn to_note(&self) -> String {
        let mut out = String::new();

        out.push_str("---\n");
        let _ = writeln!(out, "date: {}", self.date().format("%Y-%m-%d"));
        if let Some(weather) = non_empty(&self.weather) {
            let _ = writeln!(out, "weather: {weather}");
        }
        if let Some(location) = non_empty(&self.location) {
            let _ = writeln!(out, "location: {location}");
        }
        let _ = writeln!(out, "source: {SOURCE_LABEL}");
        out.push_str("---\n\n");

        if let Some(title) = non_empty(&self.title) {
            let _ = writeln!(out, "# {title}\n");
        }

        out.push_str(&self.body);
        out.push('\n');
        out
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(21, 1, 41)
            .unwrap()
    }

    #[test]
    fn test_file_name() {
        let entry = DayOneEntry::new(created(2016, 1, 1));
        assert_eq!(entry.file_name(), "2016-01-01-dayone.md");
    }

    #[test]
    fn test_to_note_full() {
        let entry = DayOneEntry {
            created: created(2016, 1, 1),
            time_zone: Some("EST".to_string()),
            weather: Some("31°F Clear".to_string()),
            location: Some("Home, Portland, OR".to_string()),
            title: Some("New Year".to_string()),
            body: "First entry.\nSecond line.".to_string(),
        };

        assert_eq!(
            entry.to_note(),
            "---\n\
             date: 2016-01-01\n\
             weather: 31°F Clear\n\
             location: Home, Portland, OR\n\
             source: Day One\n\
             ---\n\
             \n\
             # New Year\n\
             \n\
             First entry.\n\
             Second line.\n"
        );
    }

    #[test]
    fn test_to_note_minimal() {
        let entry = DayOneEntry::new(created(2020, 2, 29));
        assert_eq!(
            entry.to_note(),
            "---\ndate: 2020-02-29\nsource: Day One\n---\n\n\n"
        );
    }

    #[test]
    fn test_to_note_skips_blank_metadata() {
        let mut entry = DayOneEntry::new(created(2020, 5, 1));
        entry.weather = Some("   ".to_string());
        entry.title = Some(String::new());

        let note = entry.to_note();
        assert!(!note.contains("weather:"));
        assert!(!note.contains("# "));
    }
}
