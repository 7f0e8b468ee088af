//! Today and on-this-day commands.
//!
//! Both scan the notes folder; they differ only in the date matcher.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use salthaven_notes::{scan, DateMatcher};

use super::config::load_config;
use super::{resolve_folder, CommandContext, Result};
use crate::output::{format_matches_json, format_matches_table};

/// Options for the today and onthisday commands.
#[derive(Debug)]
pub struct NotesOptions {
    /// Folder from the command line or `SALTHAVEN_FOLDER`.
    pub folder: Option<PathBuf>,
    /// Reference date; defaults to the local date.
    pub date: Option<NaiveDate>,
    /// How note dates are compared with the reference.
    pub matcher: DateMatcher,
}

/// Executes a scan and prints the matching notes.
///
/// # Errors
///
/// Returns an error if the folder is missing, cannot be walked, or the config
/// file is invalid.
pub fn execute(ctx: &CommandContext, opts: &NotesOptions) -> Result<()> {
    let config = load_config()?;
    let folder = resolve_folder(opts.folder.as_deref(), &config);
    let reference = opts.date.unwrap_or_else(|| Local::now().date_naive());

    if ctx.verbose && !ctx.json_output {
        eprintln!(
            "Scanning folder '{}' for markdown notes dated {}...",
            folder.display(),
            opts.matcher.describe(reference)
        );
    }

    let report = scan(&folder, opts.matcher, reference, ctx.verbose)?;
    log::info!(
        "{} of {} notes matched in {}",
        report.matches.len(),
        report.notes_examined,
        folder.display()
    );

    if ctx.json_output {
        println!("{}", format_matches_json(&report, opts.matcher, reference)?);
        return Ok(());
    }

    for diagnostic in &report.diagnostics {
        eprintln!("Warning: {diagnostic}");
    }

    if !ctx.quiet {
        print!(
            "{}",
            format_matches_table(&report, opts.matcher, reference, ctx.use_colors)
        );
    }

    Ok(())
}
