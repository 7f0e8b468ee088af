//! Loading matched notes for display.
//!
//! The scanner only reports paths. Views that show note contents re-read each
//! match into a [`NoteDocument`], which carries the parsed date along with a
//! display title and the body without its header.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::date::{parse_note_date, DateError};
use crate::frontmatter::Frontmatter;
use crate::scanner::{read_note, Diagnostic, DiagnosticReason};

/// Header key holding an explicit note title.
pub const TITLE_KEY: &str = "title";

/// A note loaded for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDocument {
    /// Path the note was loaded from.
    pub path: PathBuf,
    /// Date from the note header.
    pub date: NaiveDate,
    /// Display title; empty if the note has none.
    pub title: String,
    /// Note text after the header block.
    pub body: String,
}

impl NoteDocument {
    /// Builds a document from already-read note text.
    ///
    /// # Errors
    ///
    /// Returns the [`DateError`] if the note has no usable date.
    pub fn from_content(path: impl Into<PathBuf>, content: &str) -> Result<Self, DateError> {
        let date = parse_note_date(content)?;
        Ok(Self {
            path: path.into(),
            date,
            title: extract_title(content),
            body: body_without_header(content)
                .trim_start_matches(|c| c == '\r' || c == '\n')
                .trim_end()
                .to_string(),
        })
    }

    /// Reads and parses the note at `path`.
    ///
    /// # Errors
    ///
    /// Returns the reason the note could not be loaded.
    pub fn load(path: &Path) -> Result<Self, DiagnosticReason> {
        let content = read_note(path).map_err(|e| DiagnosticReason::Unreadable {
            message: e.to_string(),
        })?;
        Self::from_content(path, &content).map_err(DiagnosticReason::Date)
    }

    /// Path relative to `root`, or the stored path if it is not under `root`.
    pub fn relative_path(&self, root: &Path) -> PathBuf {
        self.path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| self.path.clone())
    }

    /// Absolute path of the note, falling back to the stored path.
    pub fn absolute_path(&self) -> PathBuf {
        fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone())
    }
}

/// Loads every path and sorts the documents newest first.
///
/// Notes that fail to load are left out. Their diagnostics are returned when
/// `collect_diagnostics` is set. Notes sharing a date keep their input order.
pub fn collect_documents(
    paths: &[PathBuf],
    collect_diagnostics: bool,
) -> (Vec<NoteDocument>, Vec<Diagnostic>) {
    let mut documents = Vec::with_capacity(paths.len());
    let mut diagnostics = Vec::new();

    for path in paths {
        match NoteDocument::load(path) {
            Ok(document) => documents.push(document),
            Err(reason) => {
                log::debug!("skipping {}: {}", path.display(), reason);
                if collect_diagnostics {
                    diagnostics.push(Diagnostic {
                        path: path.clone(),
                        reason,
                    });
                }
            }
        }
    }

    documents.sort_by(|a, b| b.date.cmp(&a.date));
    (documents, diagnostics)
}

/// Finds a display title for a note.
///
/// Uses the header `title` entry if present and non-empty, otherwise the
/// first markdown heading after the header.
pub fn extract_title(content: &str) -> String {
    let body = match Frontmatter::parse(content) {
        Some(header) => {
            if let Some(title) = header.get(TITLE_KEY).filter(|t| !t.is_empty()) {
                return title.to_string();
            }
            match header.body() {
                Some(body) => body,
                None => return String::new(),
            }
        }
        None => content,
    };

    first_heading(body).unwrap_or_default().to_string()
}

/// Returns the text after the header block, or all of `content` if there is
/// no complete header.
pub fn body_without_header(content: &str) -> &str {
    Frontmatter::parse(content)
        .and_then(|header| header.body())
        .unwrap_or(content)
}

fn first_heading(body: &str) -> Option<&str> {
    body.lines().map(str::trim).find_map(|line| {
        let text = line.trim_start_matches('#');
        if text.len() == line.len() {
            return None;
        }
        if text.is_empty() {
            return Some(text);
        }
        text.strip_prefix(' ').map(str::trim)
    })
}
