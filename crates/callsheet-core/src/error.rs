//! Error types for contact ingestion and note output.

use std::path::PathBuf;

/// Error type for core operations.
///
/// Lookup misses and repeat calls are not errors; they are reported through
/// [`crate::LookupResult`] and [`crate::Verdict`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The contact file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The header row lacks a required column.
    #[error("missing required column '{0}' in contact file header")]
    MissingColumn(String),

    /// The contact file could not be read or parsed.
    #[error("Error reading file '{path}': {message}")]
    Ingestion { path: String, message: String },

    /// The notes file could not be written.
    #[error("failed to write notes to '{path}': {source}")]
    WriteNotes {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
