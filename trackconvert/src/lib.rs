//! # Trackconvert - clean and mirror racetrack centerline CSV files
//!
//! Trackconvert reads centerline files made of `(x, y, right width, left width)`
//! samples, strips comments, normalizes headers and writes two files per
//! input: a clean copy and a mirrored copy of the track.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│   Parser    │────▶│  Transform  │────▶│   Writer    │
//! │ (# comments)│     │ (header inf)│     │ (mirror/id) │     │ (x,y,wide_*)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trackconvert::{run_batch, BatchConfig, ConsoleReporter};
//!
//! let report = run_batch(&BatchConfig::default(), &ConsoleReporter).unwrap();
//! println!("{} converted, {} failed", report.succeeded(), report.failed());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Track samples, sequences and output records
//! - [`parser`] - CSV reading with comment stripping and header inference
//! - [`transform`] - Passthrough and mirroring
//! - [`writer`] - Clean CSV output
//! - [`batch`] - Directory processing with per-file isolation
//! - [`logs`] - Injectable progress reporting

// Core modules
pub mod error;
pub mod models;

// Reading
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod writer;

// Orchestration
pub mod batch;
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, ErrorKind, PipelineError, TransformError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{HeaderDescriptor, OutputRecord, TrackSample, TrackSequence};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{parse_track_bytes, parse_track_file, parse_track_str, ParseResult};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{mirror_track, to_output_records, MirrorFormula, MirrorResult};

// =============================================================================
// Re-exports - Writer
// =============================================================================

pub use writer::{write_records, write_records_to_path};

// =============================================================================
// Re-exports - Batch
// =============================================================================

pub use batch::{process_file, run_batch, BatchConfig, BatchReport, FileResult, FileStatus};

pub use logs::{ConsoleReporter, LogEntry, LogLevel, MemoryReporter, Reporter, SilentReporter};
