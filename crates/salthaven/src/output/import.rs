//! Day One import summaries.

use std::fmt::Write as _;
use std::path::Path;

use salthaven_dayone::{ImportSummary, ImportWarning};
use serde::Serialize;

use super::helpers::{format_header, pluralize};

/// Formats an import summary for the terminal.
///
/// Lists every written file when `verbose` is set or on a dry run.
pub fn format_import_table(
    summary: &ImportSummary,
    entries_found: usize,
    folder: &Path,
    dry_run: bool,
    verbose: bool,
    use_colors: bool,
) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Found {} Day One {}",
        entries_found,
        pluralize(entries_found, "entry", "entries")
    );

    if dry_run || verbose {
        let verb = if dry_run { "Would write" } else { "Created" };
        for path in &summary.written {
            let _ = writeln!(output, "{}: {}", verb, path.display());
        }
    }

    let count = summary.written.len();
    let noun = pluralize(count, "entry", "entries");
    let footer = if dry_run {
        format!(
            "Dry run: {} {} would be imported to {}",
            count,
            noun,
            folder.display()
        )
    } else {
        format!(
            "Successfully imported {} {} to {}",
            count,
            noun,
            folder.display()
        )
    };
    let _ = writeln!(output, "\n{}", format_header(&footer, use_colors));

    output
}

/// Formats an import summary as JSON.
pub fn format_import_json(
    summary: &ImportSummary,
    warnings: &[ImportWarning],
    folder: &Path,
    dry_run: bool,
) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    struct ImportOutput {
        folder: String,
        dry_run: bool,
        count: usize,
        written: Vec<String>,
        failures: Vec<FailureOutput>,
        warnings: Vec<WarningOutput>,
    }

    #[derive(Serialize)]
    struct FailureOutput {
        path: String,
        message: String,
    }

    #[derive(Serialize)]
    struct WarningOutput {
        line: usize,
        value: String,
    }

    let output = ImportOutput {
        folder: folder.display().to_string(),
        dry_run,
        count: summary.written.len(),
        written: summary
            .written
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        failures: summary
            .failures
            .iter()
            .map(|f| FailureOutput {
                path: f.path.display().to_string(),
                message: f.message.clone(),
            })
            .collect(),
        warnings: warnings
            .iter()
            .map(|w| WarningOutput {
                line: w.line,
                value: w.value.clone(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output)
}
