//! Output formatting utilities for the salthaven CLI.
//!
//! - [`notes`] - Scan result formatting (today, onthisday)
//! - [`import`] - Day One import summaries
//! - [`html`] - The web view page
//! - [`helpers`] - Common formatting utilities

pub mod helpers;
pub mod html;
mod import;
mod notes;

pub use import::{format_import_json, format_import_table};
pub use notes::{format_matches_json, format_matches_table};
