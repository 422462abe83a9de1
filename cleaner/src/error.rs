//! Error types for the life expectancy cleaning pipeline.
//!
//! - [`InputError`] - Reading and decoding the raw TSV
//! - [`OutputError`] - Writing the cleaned CSV
//! - [`PipelineError`] - Top-level errors returned by [`crate::clean`]
//!
//! Per-row data quality problems (bad year labels, missing or flagged-only
//! values) are never errors: those rows are filtered out by the pipeline.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Input Errors
// =============================================================================

/// Errors while loading the raw wide table.
#[derive(Debug, Error)]
pub enum InputError {
    /// The raw file is missing or unreadable.
    #[error("Cannot read input file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file has no header line.
    #[error("Input file is empty")]
    EmptyFile,

    /// The header line has no columns.
    #[error("No headers found in input")]
    NoHeaders,

    /// A data row has more cells than the header.
    #[error("Line {line}: expected at most {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The TSV reader rejected the content.
    #[error("Invalid TSV format: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while writing the cleaned table.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Creating, writing or persisting the output file failed.
    #[error("Cannot write output file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors. Every variant is fatal: no output is written.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The composite key column did not split into `unit,sex,age,region`.
    #[error("Line {line}: malformed key '{key}' (expected 4 comma-separated parts, found {parts})")]
    MalformedKey {
        line: usize,
        key: String,
        parts: usize,
    },

    /// Input error.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Output error.
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for input operations.
pub type InputResult<T> = Result<T, InputError>;

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
