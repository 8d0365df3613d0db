//! Error types for the track conversion pipeline.
//!
//! This module defines a hierarchy of error types, one per stage:
//!
//! - [`CsvError`] - Reading and parsing track CSV files
//! - [`TransformError`] - Mirroring errors (numeric interpretation)
//! - [`PipelineError`] - Top-level per-file and per-run errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading a track CSV file.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// No content left once comments and blank lines are removed.
    #[error("CSV file is empty")]
    EmptyInput,

    /// Headerless row with the wrong number of fields.
    #[error("Line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Header row without one of the required track columns.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Record the CSV reader could not parse.
    #[error("Invalid CSV format: {0}")]
    Malformed(String),
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        CsvError::Malformed(err.to_string())
    }
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors while mirroring a track sequence.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A value expected to be numeric could not be parsed.
    #[error("Row {row}, column '{column}': cannot parse '{value}' as a number")]
    NumericParse {
        row: usize,
        column: String,
        value: String,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// Returned by [`crate::batch::process_file`] for a single input and by
/// [`crate::batch::run_batch`] for failures outside the per-file loop.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV reading error.
    #[error("{0}")]
    Csv(#[from] CsvError),

    /// Mirroring error.
    #[error("{0}")]
    Transform(#[from] TransformError),

    /// CSV serialization error.
    #[error("Failed to write CSV: {0}")]
    Write(#[from] csv::Error),

    /// Directory creation, listing or file output failure.
    #[error("Filesystem error at '{}': {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Batch report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

impl PipelineError {
    /// Wrap an I/O error with the path it happened on.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Classify this error into the reporting taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Csv(CsvError::EmptyInput) => ErrorKind::EmptyInput,
            PipelineError::Csv(CsvError::ColumnCount { .. }) => ErrorKind::ColumnCount,
            PipelineError::Csv(CsvError::Io(_)) => ErrorKind::Filesystem,
            PipelineError::Csv(CsvError::MissingColumn(_) | CsvError::Malformed(_)) => {
                ErrorKind::MalformedInput
            }
            PipelineError::Transform(TransformError::NumericParse { .. }) => {
                ErrorKind::NumericParse
            }
            PipelineError::Write(err) if err.is_io_error() => ErrorKind::Filesystem,
            PipelineError::Write(_) | PipelineError::Report(_) => ErrorKind::MalformedInput,
            PipelineError::Filesystem { .. } => ErrorKind::Filesystem,
        }
    }
}

/// Coarse error classification recorded in batch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    ColumnCount,
    NumericParse,
    Filesystem,
    MalformedInput,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV reading operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for mirroring operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
