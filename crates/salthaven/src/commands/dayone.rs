//! Day One import command.

use std::path::PathBuf;

use salthaven_dayone::{ensure_output_dir, import_entries, read_export};

use super::config::load_config;
use super::{resolve_folder, CommandContext, CommandError, Result};
use crate::output::{format_import_json, format_import_table};

/// Options for the dayone-import command.
#[derive(Debug)]
pub struct DayOneImportOptions {
    /// Output folder from the command line or `SALTHAVEN_FOLDER`.
    pub folder: Option<PathBuf>,
    /// Export file from `--journal`.
    pub journal: Option<PathBuf>,
    /// Report what would be written without writing.
    pub dry_run: bool,
}

/// Executes the dayone-import command.
///
/// Unparseable entries and failed writes are reported as warnings; the
/// import carries on past them.
///
/// # Errors
///
/// Returns an error if no export is configured, the export or output folder
/// is missing, or the config file is invalid.
pub fn execute(ctx: &CommandContext, opts: &DayOneImportOptions) -> Result<()> {
    let config = load_config()?;
    let folder = resolve_folder(opts.folder.as_deref(), &config);
    let journal = opts
        .journal
        .clone()
        .or_else(|| config.dayone.journal.clone())
        .ok_or_else(|| {
            CommandError::Usage(
                "no Day One export given; pass --journal or set dayone.journal in config"
                    .to_string(),
            )
        })?;
    ensure_output_dir(&folder)?;

    if !ctx.quiet && !ctx.json_output {
        println!(
            "Importing Day One entries from {} to {}...\n",
            journal.display(),
            folder.display()
        );
    }

    let parsed = read_export(&journal)?;
    let summary = import_entries(&parsed.entries, &folder, opts.dry_run)?;

    if ctx.json_output {
        println!(
            "{}",
            format_import_json(&summary, &parsed.warnings, &folder, opts.dry_run)?
        );
        return Ok(());
    }

    if !ctx.quiet {
        for warning in &parsed.warnings {
            eprintln!("Warning: {warning}");
        }
        for failure in &summary.failures {
            eprintln!(
                "Warning: could not write {}: {}",
                failure.path.display(),
                failure.message
            );
        }
        print!(
            "{}",
            format_import_table(
                &summary,
                parsed.entries.len(),
                &folder,
                opts.dry_run,
                ctx.verbose,
                ctx.use_colors,
            )
        );
    }

    Ok(())
}
