//! Directory scanning for notes matching a reference date.
//!
//! The scanner walks a tree depth-first, reads every note candidate once,
//! parses its date, and keeps the paths accepted by the [`DateMatcher`].
//!
//! Two kinds of failure are kept apart:
//!
//! - Problems with a single file (unreadable, no header, bad date) are never
//!   fatal. The file is left out of the results and, when diagnostics are
//!   enabled, described in [`ScanReport::diagnostics`].
//! - Problems with the walk itself (missing root, unreadable directory) abort
//!   the scan with a [`ScanError`].

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use walkdir::WalkDir;

use crate::classify::EntryKind;
use crate::date::{parse_note_date, DateError};
use crate::matcher::DateMatcher;

/// Errors that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The root folder does not exist.
    #[error("folder does not exist: {}", .path.display())]
    RootNotFound {
        /// The requested root.
        path: PathBuf,
    },

    /// The root folder exists but its metadata could not be read.
    #[error("failed to access folder '{}': {source}", .path.display())]
    RootUnreadable {
        /// The requested root.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Walking the tree failed at some entry.
    #[error("error scanning '{}': {source}", .path.display())]
    Walk {
        /// The entry where the walk failed.
        path: PathBuf,
        /// The underlying walk error.
        #[source]
        source: walkdir::Error,
    },
}

/// Result type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Why a note candidate was left out of the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticReason {
    /// The file could not be read.
    Unreadable {
        /// The I/O error message.
        message: String,
    },
    /// The file was read but yielded no date.
    Date(DateError),
}

impl DiagnosticReason {
    /// Short stable tag for machine-readable output.
    pub fn tag(&self) -> &'static str {
        match self {
            DiagnosticReason::Unreadable { .. } => "unreadable",
            DiagnosticReason::Date(err) => err.tag(),
        }
    }
}

impl fmt::Display for DiagnosticReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticReason::Unreadable { message } => write!(f, "could not read file: {message}"),
            DiagnosticReason::Date(err) => write!(f, "could not parse date: {err}"),
        }
    }
}

/// A skipped note candidate and the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Path of the skipped file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: DiagnosticReason,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Outcome of a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Matching note paths in walk order.
    pub matches: Vec<PathBuf>,
    /// Skipped candidates; empty unless diagnostics were enabled.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of note candidates examined.
    pub notes_examined: usize,
}

impl ScanReport {
    /// Returns true if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Scans a folder for notes whose date satisfies a [`DateMatcher`].
///
/// The scanner has no idea of "today"; the reference date is always supplied
/// by the caller.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use salthaven_notes::{DateMatcher, Scanner};
///
/// let reference = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// let report = Scanner::new("notes", DateMatcher::ExactDate, reference).scan()?;
/// println!("{} match(es)", report.matches.len());
/// # Ok::<(), salthaven_notes::ScanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    matcher: DateMatcher,
    reference: NaiveDate,
    collect_diagnostics: bool,
}

impl Scanner {
    /// Creates a scanner over `root`. Diagnostics are off by default.
    pub fn new(root: impl Into<PathBuf>, matcher: DateMatcher, reference: NaiveDate) -> Self {
        Self {
            root: root.into(),
            matcher,
            reference,
            collect_diagnostics: false,
        }
    }

    /// Enables or disables collection of per-file diagnostics.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.collect_diagnostics = enabled;
        self
    }

    /// The folder being scanned.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The active matching policy.
    pub fn matcher(&self) -> DateMatcher {
        self.matcher
    }

    /// The date notes are compared against.
    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Runs the scan.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::RootNotFound`] before any traversal if the root is
    /// missing, and [`ScanError::Walk`] if any directory cannot be traversed.
    /// Per-file problems never produce an error.
    pub fn scan(&self) -> Result<ScanReport> {
        self.check_root()?;

        let mut report = ScanReport::default();

        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|source| ScanError::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                source,
            })?;

            if !EntryKind::of_entry(&entry).is_note() {
                continue;
            }

            self.visit(entry.path(), &mut report);
        }

        log::debug!(
            "scanned {}: {} note(s), {} match(es)",
            self.root.display(),
            report.notes_examined,
            report.matches.len()
        );

        Ok(report)
    }

    fn check_root(&self) -> Result<()> {
        match fs::metadata(&self.root) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ScanError::RootNotFound {
                path: self.root.clone(),
            }),
            Err(source) => Err(ScanError::RootUnreadable {
                path: self.root.clone(),
                source,
            }),
        }
    }

    fn visit(&self, path: &Path, report: &mut ScanReport) {
        report.notes_examined += 1;
        log::trace!("checking {}", path.display());

        let content = match read_note(path) {
            Ok(content) => content,
            Err(e) => {
                self.skip(
                    report,
                    path,
                    DiagnosticReason::Unreadable {
                        message: e.to_string(),
                    },
                );
                return;
            }
        };

        match parse_note_date(&content) {
            Ok(date) => {
                if self.matcher.matches(date, self.reference) {
                    report.matches.push(path.to_path_buf());
                }
            }
            Err(e) => self.skip(report, path, DiagnosticReason::Date(e)),
        }
    }

    fn skip(&self, report: &mut ScanReport, path: &Path, reason: DiagnosticReason) {
        log::debug!("skipping {}: {}", path.display(), reason);
        if self.collect_diagnostics {
            report.diagnostics.push(Diagnostic {
                path: path.to_path_buf(),
                reason,
            });
        }
    }
}

/// Scans `root` with `matcher` against `reference`.
///
/// Shorthand for [`Scanner::new`] + [`Scanner::with_diagnostics`] + [`Scanner::scan`].
pub fn scan(
    root: impl Into<PathBuf>,
    matcher: DateMatcher,
    reference: NaiveDate,
    verbose: bool,
) -> Result<ScanReport> {
    Scanner::new(root, matcher, reference)
        .with_diagnostics(verbose)
        .scan()
}

/// Reads a note in one call so the handle is closed before parsing.
///
/// Invalid UTF-8 is replaced rather than rejected; only the header needs to
/// be readable.
pub(crate) fn read_note(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
