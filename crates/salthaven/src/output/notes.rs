//! Scan result formatting.

use std::fmt::Write as _;
use std::path::Path;

use chrono::NaiveDate;
use salthaven_notes::{DateMatcher, ScanReport};
use serde::Serialize;

use super::helpers::{format_dimmed, format_header, pluralize};

/// Formats scan matches as a numbered list.
pub fn format_matches_table(
    report: &ScanReport,
    matcher: DateMatcher,
    reference: NaiveDate,
    use_colors: bool,
) -> String {
    let description = matcher.describe(reference);

    if report.is_empty() {
        return format!("No markdown notes dated {description} were found.\n");
    }

    let count = report.matches.len();
    let header = format!(
        "Found {} markdown {} dated {}:",
        count,
        pluralize(count, "note", "notes"),
        description
    );

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_header(&header, use_colors));
    for (i, path) in report.matches.iter().enumerate() {
        let _ = writeln!(
            output,
            "{}. {}",
            i + 1,
            format_path(path, use_colors)
        );
    }
    output
}

fn format_path(path: &Path, use_colors: bool) -> String {
    let display = path.display().to_string();
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if use_colors && !parent.as_os_str().is_empty() => {
            let sep = std::path::MAIN_SEPARATOR;
            format!(
                "{}{}{}",
                format_dimmed(&parent.display().to_string(), true),
                format_dimmed(&sep.to_string(), true),
                name.to_string_lossy()
            )
        }
        _ => display,
    }
}

/// Formats scan matches as JSON.
pub fn format_matches_json(
    report: &ScanReport,
    matcher: DateMatcher,
    reference: NaiveDate,
) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    struct MatchesOutput {
        reference_date: String,
        matcher: DateMatcher,
        count: usize,
        notes: Vec<String>,
        warnings: Vec<WarningOutput>,
    }

    #[derive(Serialize)]
    struct WarningOutput {
        path: String,
        kind: &'static str,
        message: String,
    }

    let output = MatchesOutput {
        reference_date: reference.format("%Y-%m-%d").to_string(),
        matcher,
        count: report.matches.len(),
        notes: report
            .matches
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        warnings: report
            .diagnostics
            .iter()
            .map(|d| WarningOutput {
                path: d.path.display().to_string(),
                kind: d.reason.tag(),
                message: d.reason.to_string(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output)
}
