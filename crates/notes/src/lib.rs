//! Note date extraction and matching.
//!
//! This crate finds markdown notes whose front matter `date` matches a
//! reference date. It is split into small pieces that can be used on their
//! own:
//!
//! - [`frontmatter`] - the `---` delimited header block
//! - [`date`] - parsing the `date` value out of a note
//! - [`classify`] - deciding which directory entries are notes
//! - [`matcher`] - comparison policies between a note date and a reference date
//! - [`scanner`] - walking a directory tree and collecting matches
//! - [`document`] - title/body extraction for displaying matched notes
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use salthaven_notes::{DateMatcher, Scanner};
//!
//! let reference = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
//! let report = Scanner::new("./notes", DateMatcher::SameMonthDay, reference)
//!     .with_diagnostics(true)
//!     .scan()?;
//!
//! for path in &report.matches {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), salthaven_notes::ScanError>(())
//! ```

pub mod classify;
pub mod date;
pub mod document;
pub mod frontmatter;
pub mod matcher;
pub mod scanner;

pub use classify::{is_note_file, EntryKind, NOTE_EXTENSION};
pub use date::{
    parse_date_value, parse_date_value_with_format, parse_note_date, DateError, DateFormat,
};
pub use document::{body_without_header, collect_documents, extract_title, NoteDocument};
pub use frontmatter::{Frontmatter, HEADER_MARKER};
pub use matcher::{DateMatcher, UnknownMatcher};
pub use scanner::{scan, Diagnostic, DiagnosticReason, ScanError, ScanReport, Scanner};
