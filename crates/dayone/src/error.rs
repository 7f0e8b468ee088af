//! Error types for Day One imports.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The export file does not exist.
    #[error("Day One export file not found: {}", .path.display())]
    ExportNotFound {
        /// The requested export path.
        path: PathBuf,
    },

    /// The export file exists but could not be read.
    #[error("failed to read Day One export '{}': {source}", .path.display())]
    Read {
        /// The export path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The output folder does not exist.
    #[error("output folder does not exist: {}", .path.display())]
    OutputDirNotFound {
        /// The requested output folder.
        path: PathBuf,
    },
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;
