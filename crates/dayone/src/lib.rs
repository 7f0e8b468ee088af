//! Day One journal export conversion.
//!
//! Day One's plain-text export (`Journal.txt`) is a sequence of entries, each
//! introduced by a `Date:` line:
//!
//! ```text
//! 	Date:	January 1, 2016 at 21:01:41 EST
//! 	Weather:	31°F Clear
//! 	Location:	Home, Portland, OR
//!
//! New Year
//! First entry of the year.
//! ```
//!
//! This crate parses that format into [`DayOneEntry`] values and renders each
//! one as a markdown note with a `date: YYYY-MM-DD` header, so imported
//! entries look exactly like hand-written notes to the rest of Salthaven.

pub mod entry;
pub mod error;
pub mod import;
pub mod parser;

pub use entry::DayOneEntry;
pub use error::{ImportError, Result};
pub use import::{assign_file_names, ensure_output_dir, import_entries, ImportSummary, WriteFailure};
pub use parser::{parse_day_one_date, parse_export, read_export, ImportWarning, ParsedExport};
