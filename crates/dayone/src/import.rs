//! Writing parsed entries into a notes folder.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::entry::{DayOneEntry, FILE_SUFFIX};
use crate::error::{ImportError, Result};

/// A note that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    /// Target path of the note.
    pub path: PathBuf,
    /// The write error, as displayed to the user.
    pub message: String,
}

/// Outcome of [`import_entries`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Files written, or that would be written in a dry run.
    pub written: Vec<PathBuf>,
    /// Files that failed to write. The import continues past these.
    pub failures: Vec<WriteFailure>,
}

impl ImportSummary {
    /// Returns true if every note was written.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Assigns a file name to each entry, in order.
///
/// The first entry on a date gets `YYYY-MM-DD-dayone.md`; later entries on
/// the same date get `-2`, `-3` and so on before the extension.
pub fn assign_file_names(entries: &[DayOneEntry]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    entries
        .iter()
        .map(|entry| {
            let day = entry.date().format("%Y-%m-%d").to_string();
            let count = seen.entry(day.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                entry.file_name()
            } else {
                format!("{day}-{FILE_SUFFIX}-{count}.md")
            }
        })
        .collect()
}

/// Checks that `out_dir` is an existing directory.
///
/// # Errors
///
/// Returns [`ImportError::OutputDirNotFound`] otherwise.
pub fn ensure_output_dir(out_dir: &Path) -> Result<()> {
    if out_dir.is_dir() {
        Ok(())
    } else {
        Err(ImportError::OutputDirNotFound {
            path: out_dir.to_path_buf(),
        })
    }
}

/// Writes each entry as a note in `out_dir`.
///
/// Existing files with the same name are overwritten. With `dry_run` set,
/// nothing is written but the summary lists the paths that would be.
///
/// # Errors
///
/// Returns [`ImportError::OutputDirNotFound`] if `out_dir` is not an existing
/// directory. Individual write failures are collected in the summary.
pub fn import_entries(
    entries: &[DayOneEntry],
    out_dir: &Path,
    dry_run: bool,
) -> Result<ImportSummary> {
    ensure_output_dir(out_dir)?;

    let mut summary = ImportSummary::default();

    for (entry, name) in entries.iter().zip(assign_file_names(entries)) {
        let path = out_dir.join(name);

        if dry_run {
            log::debug!("would write {}", path.display());
            summary.written.push(path);
            continue;
        }

        match fs::write(&path, entry.to_note()) {
            Ok(()) => {
                log::debug!("wrote {}", path.display());
                summary.written.push(path);
            }
            Err(e) => {
                log::warn!("failed to write {}: {}", path.display(), e);
                summary.failures.push(WriteFailure {
                    path,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn entry(y: i32, m: u32, d: u32, title: &str) -> DayOneEntry {
        let created = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut entry = DayOneEntry::new(created);
        entry.title = Some(title.to_string());
        entry
    }

    #[test]
    fn test_assign_file_names_unique_days() {
        let entries = vec![entry(2016, 1, 1, "a"), entry(2016, 1, 2, "b")];
        assert_eq!(
            assign_file_names(&entries),
            vec!["2016-01-01-dayone.md", "2016-01-02-dayone.md"]
        );
    }

    #[test]
    fn test_assign_file_names_same_day() {
        let entries = vec![
            entry(2016, 1, 1, "a"),
            entry(2016, 1, 2, "b"),
            entry(2016, 1, 1, "c"),
            entry(2016, 1, 1, "d"),
        ];
        assert_eq!(
            assign_file_names(&entries),
            vec![
                "2016-01-01-dayone.md",
                "2016-01-02-dayone.md",
                "2016-01-01-dayone-2.md",
                "2016-01-01-dayone-3.md",
            ]
        );
    }

    #[test]
    fn test_import_writes_notes() {
        let dir = TempDir::new().unwrap();
        let entries = vec![entry(2016, 1, 1, "First"), entry(2016, 1, 1, "Second")];

        let summary = import_entries(&entries, dir.path(), false).unwrap();

        assert!(summary.is_clean());
        assert_eq!(summary.written.len(), 2);
        let second = fs::read_to_string(dir.path().join("2016-01-01-dayone-2.md")).unwrap();
        assert!(second.contains("# Second"));
    }

    #[test]
    fn test_import_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let entries = vec![entry(2016, 1, 1, "First")];

        let summary = import_entries(&entries, dir.path(), true).unwrap();

        assert_eq!(summary.written, vec![dir.path().join("2016-01-01-dayone.md")]);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_import_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = import_entries(&[], &missing, false).unwrap_err();
        assert!(matches!(err, ImportError::OutputDirNotFound { .. }));
    }

    #[test]
    fn test_ensure_output_dir_rejects_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.md");
        fs::write(&file, "").unwrap();

        assert!(ensure_output_dir(dir.path()).is_ok());
        assert!(matches!(
            ensure_output_dir(&file),
            Err(ImportError::OutputDirNotFound { .. })
        ));
    }

    #[test]
    fn test_import_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("2016-01-01-dayone.md");
        fs::write(&target, "old").unwrap();

        import_entries(&[entry(2016, 1, 1, "New")], dir.path(), false).unwrap();

        assert!(fs::read_to_string(&target).unwrap().contains("# New"));
    }

    #[test]
    fn test_import_collects_write_failures() {
        let dir = TempDir::new().unwrap();
        // A directory occupying the target name makes the write fail.
        fs::create_dir(dir.path().join("2016-01-01-dayone.md")).unwrap();
        let entries = vec![entry(2016, 1, 1, "Blocked"), entry(2016, 1, 2, "Fine")];

        let summary = import_entries(&entries, dir.path(), false).unwrap();

        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.written, vec![dir.path().join("2016-01-02-dayone.md")]);
        assert!(!summary.is_clean());
    }
}
