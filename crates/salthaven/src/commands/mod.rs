//! Command implementations for the salthaven CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod dayone;
pub mod notes;
pub mod serve;

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use config::Config;

/// Folder used when neither the command line, environment, nor config name one.
const DEFAULT_FOLDER: &str = ".";

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Folder scan error.
    #[error("scan error: {0}")]
    Scan(#[from] salthaven_notes::ScanError),

    /// Day One import error.
    #[error("import error: {0}")]
    Import(#[from] salthaven_dayone::ImportError),

    /// Missing or malformed argument.
    #[error("{0}")]
    Usage(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP server error.
    #[error("server error: {0}")]
    Server(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}

/// Picks the notes folder: argument (which clap already fills from
/// `SALTHAVEN_FOLDER`), then the config `folder` key, then the current directory.
pub fn resolve_folder(arg: Option<&Path>, config: &Config) -> PathBuf {
    arg.map(Path::to_path_buf)
        .or_else(|| config.folder.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FOLDER))
}
