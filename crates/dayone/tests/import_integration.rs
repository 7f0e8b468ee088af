//! End-to-end import: export text in, notes the scanner can read out.

use std::fs;

use chrono::NaiveDate;
use salthaven_dayone::{import_entries, read_export, ImportError};
use salthaven_notes::{parse_note_date, scan, DateMatcher};
use tempfile::TempDir;

const EXPORT: &str = "\tDate:\tMarch 5, 2019 at 08:00:00 EST
\tWeather:\t40°F Rain
\tLocation:\tPortland

Rainy morning
Walked the dog anyway.

\tDate:\tMarch 5, 2019 at 21:30:00 EST

Evening
Long day.

\tDate:\tnot a date

Lost
This entry is skipped.

\tDate:\tMarch 5, 2021 at 12:00:00 PST

Two years on
Still raining.
";

fn write_export(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("Journal.txt");
    fs::write(&path, EXPORT).unwrap();
    path
}

#[test]
fn test_import_then_scan() {
    let input = TempDir::new().unwrap();
    let vault = TempDir::new().unwrap();
    let export = write_export(&input);

    let parsed = read_export(&export).unwrap();
    assert_eq!(parsed.entries.len(), 3);
    assert_eq!(parsed.warnings.len(), 1);

    let summary = import_entries(&parsed.entries, vault.path(), false).unwrap();
    assert!(summary.is_clean());

    let mut names: Vec<String> = summary
        .written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "2019-03-05-dayone-2.md",
            "2019-03-05-dayone.md",
            "2021-03-05-dayone.md",
        ]
    );

    for path in &summary.written {
        let content = fs::read_to_string(path).unwrap();
        assert!(parse_note_date(&content).is_ok(), "{}", path.display());
    }

    let reference = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let report = scan(vault.path(), DateMatcher::SameMonthDay, reference, false).unwrap();
    assert_eq!(report.matches.len(), 3);

    let exact = NaiveDate::from_ymd_opt(2019, 3, 5).unwrap();
    let report = scan(vault.path(), DateMatcher::ExactDate, exact, false).unwrap();
    assert_eq!(report.matches.len(), 2);
}

#[test]
fn test_imported_metadata() {
    let input = TempDir::new().unwrap();
    let vault = TempDir::new().unwrap();
    let parsed = read_export(&write_export(&input)).unwrap();

    import_entries(&parsed.entries, vault.path(), false).unwrap();

    let content = fs::read_to_string(vault.path().join("2019-03-05-dayone.md")).unwrap();
    assert!(content.starts_with("---\ndate: 2019-03-05\n"));
    assert!(content.contains("weather: 40°F Rain\n"));
    assert!(content.contains("location: Portland\n"));
    assert!(content.contains("source: Day One\n"));
    assert!(content.contains("# Rainy morning\n"));
    assert!(content.contains("Walked the dog anyway."));
}

#[test]
fn test_missing_export() {
    let input = TempDir::new().unwrap();
    let err = read_export(&input.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, ImportError::ExportNotFound { .. }));
}
