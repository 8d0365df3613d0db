//! Batch driver: convert every track CSV of a directory.
//!
//! ```text
//! <input>/monza.csv ──▶ parse ──┬──▶ passthrough ──▶ <output>/monza.mirror.csv
//!                               └──▶ mirror ───────▶ <output>/monza.csv
//! ```
//!
//! Each file is handled independently: a failure is logged, recorded in
//! the [`BatchReport`] and the next file is processed. Only failures
//! outside the per-file loop (creating the output directory, listing the
//! input directory) abort the run.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, PipelineError, PipelineResult};
use crate::logs::{LogEntry, Reporter};
use crate::parser::parse_track_file;
use crate::transform::{mirror_track, to_output_records, MirrorFormula};
use crate::writer::write_records_to_path;

/// Default input directory
pub const DEFAULT_INPUT_DIR: &str = ".";

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Extension of files picked up from the input directory (case-sensitive).
pub const CSV_SUFFIX: &str = ".csv";

/// Suffix of the file holding the cleaned, unmirrored copy.
pub const ORIGINAL_SUFFIX: &str = ".mirror.csv";

/// Where to read tracks from and where to write results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl BatchConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// What a successfully converted file produced.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    /// Cleaned copy of the input (`<basename>.mirror.csv`)
    #[serde(serialize_with = "serialize_path")]
    pub original_output: PathBuf,
    /// Mirrored track (same file name as the input)
    #[serde(serialize_with = "serialize_path")]
    pub mirrored_output: PathBuf,
    pub row_count: usize,
    pub track_length: f64,
    pub formula: MirrorFormula,
}

/// Why a file failed.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&PipelineError> for FileFailure {
    fn from(err: &PipelineError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Per-file entry of a [`BatchReport`].
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    #[serde(serialize_with = "serialize_path")]
    pub file: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileStatus {
    Converted(FileOutcome),
    Failed(FileFailure),
}

impl FileResult {
    pub fn is_success(&self) -> bool {
        matches!(self.status, FileStatus::Converted(_))
    }
}

/// Aggregate result of one run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    #[serde(serialize_with = "serialize_path")]
    pub input_dir: PathBuf,
    #[serde(serialize_with = "serialize_path")]
    pub output_dir: PathBuf,
    /// Whether the output directory had to be created
    pub created_output_dir: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub files: Vec<FileResult>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.succeeded()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn to_json(&self) -> PipelineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Create `dir` if it does not exist. Returns true when it was created.
pub fn ensure_output_dir(dir: &Path) -> PipelineResult<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|e| PipelineError::filesystem(dir, e))?;
    Ok(true)
}

/// Regular files directly inside `dir` whose name ends in `.csv`.
///
/// Order is the directory listing order.
pub fn discover_csv_files(dir: &Path) -> PipelineResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| PipelineError::filesystem(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PipelineError::filesystem(dir, e))?;
        let path = entry.path();
        let is_csv = entry
            .file_name()
            .as_encoded_bytes()
            .ends_with(CSV_SUFFIX.as_bytes());

        if is_csv && path.is_file() {
            files.push(path);
        }
    }

    Ok(files)
}

/// Output paths for `input`: (cleaned original, mirrored).
///
/// Names are built from the raw file name, so non-UTF-8 names survive.
pub fn output_paths(input: &Path, output_dir: &Path) -> (PathBuf, PathBuf) {
    let file_name = input.file_name().unwrap_or_default();
    let base_name = match input.file_stem() {
        Some(stem) if stem != file_name => stem,
        _ => OsStr::new(""),
    };

    let mut original_name = base_name.to_os_string();
    original_name.push(ORIGINAL_SUFFIX);

    (output_dir.join(original_name), output_dir.join(file_name))
}

/// Convert one file. Nothing is written unless parsing and mirroring succeed.
pub fn process_file<R: Reporter>(
    input: &Path,
    output_dir: &Path,
    reporter: &R,
) -> PipelineResult<FileOutcome> {
    let parsed = parse_track_file(input)?;
    let original = to_output_records(&parsed.samples);
    let mirrored = mirror_track(&parsed.samples)?;

    reporter.log(
        LogEntry::info(format!("Track length (max_x - min_x): {:.2}", mirrored.track_length))
            .with_indent(1),
    );
    reporter.log(LogEntry::info(format!("Using formula: {}", mirrored.formula)).with_indent(1));

    let (original_path, mirrored_path) = output_paths(input, output_dir);

    write_records_to_path(&original_path, &original)?;
    reporter.log(
        LogEntry::success(format!("Saved original to: {}", original_path.display()))
            .with_indent(1),
    );

    write_records_to_path(&mirrored_path, &mirrored.records)?;
    reporter.log(
        LogEntry::success(format!("Saved mirrored to: {}", mirrored_path.display()))
            .with_indent(1),
    );

    Ok(FileOutcome {
        original_output: original_path,
        mirrored_output: mirrored_path,
        row_count: parsed.samples.len(),
        track_length: mirrored.track_length,
        formula: mirrored.formula,
    })
}

/// Convert every track CSV in `config.input_dir`.
///
/// Per-file failures end up in the report; the returned error is only for
/// failures that stop the whole run.
pub fn run_batch<R: Reporter>(config: &BatchConfig, reporter: &R) -> PipelineResult<BatchReport> {
    let started_at = Utc::now();

    let created_output_dir = ensure_output_dir(&config.output_dir)?;
    if created_output_dir {
        reporter.info(format!(
            "Created output directory: {}",
            config.output_dir.display()
        ));
    }

    let files = discover_csv_files(&config.input_dir)?;
    if files.is_empty() {
        reporter.warning("No CSV files found to process.");
    } else {
        reporter.info(format!("Found {} CSV file(s) to process", files.len()));
    }

    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let name = display_name(&file);
        reporter.info(format!("Processing: {}", name));

        let status = match process_file(&file, &config.output_dir, reporter) {
            Ok(outcome) => FileStatus::Converted(outcome),
            Err(err) => {
                reporter.log(
                    LogEntry::error(format!("Error processing {}: {}", name, err)).with_indent(1),
                );
                FileStatus::Failed(FileFailure::from(&err))
            }
        };

        results.push(FileResult { file, status });
    }

    Ok(BatchReport {
        input_dir: config.input_dir.clone(),
        output_dir: config.output_dir.clone(),
        created_output_dir,
        started_at,
        finished_at: Utc::now(),
        files: results,
    })
}

/// Paths are written lossily; file names need not be UTF-8.
fn serialize_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
