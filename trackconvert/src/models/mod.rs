//! Domain models for track centerline data.
//!
//! - [`TrackSample`]: one parsed row, values kept as trimmed strings
//! - [`TrackSequence`]: ordered, non-empty list of samples
//! - [`HeaderDescriptor`]: how the columns of a file were resolved
//! - [`OutputRecord`]: the canonical `x,y,wide_right,wide_left` schema

use serde::{Deserialize, Serialize};

use crate::error::{CsvError, TransformError};

/// Input column holding the longitudinal position.
pub const COLUMN_X: &str = "x_m";
/// Input column holding the lateral position.
pub const COLUMN_Y: &str = "y_m";
/// Input column holding the right half-width.
pub const COLUMN_WIDTH_RIGHT: &str = "w_tr_right_m";
/// Input column holding the left half-width.
pub const COLUMN_WIDTH_LEFT: &str = "w_tr_left_m";

/// Column order assumed for headerless files.
pub const HEADERLESS_COLUMNS: [&str; 4] =
    [COLUMN_X, COLUMN_Y, COLUMN_WIDTH_RIGHT, COLUMN_WIDTH_LEFT];

/// Header written to every output file.
pub const OUTPUT_HEADER: [&str; 4] = ["x", "y", "wide_right", "wide_left"];

// =============================================================================
// TrackSample
// =============================================================================

/// One centerline sample.
///
/// Values are kept exactly as they appeared in the input (trimmed), so the
/// unmirrored output reproduces the original formatting and precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSample {
    /// Longitudinal position (meters)
    pub x: String,
    /// Lateral position (meters)
    pub y: String,
    /// Right half-width (meters)
    pub width_right: String,
    /// Left half-width (meters)
    pub width_left: String,
}

impl TrackSample {
    pub fn new(
        x: impl Into<String>,
        y: impl Into<String>,
        width_right: impl Into<String>,
        width_left: impl Into<String>,
    ) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            width_right: width_right.into(),
            width_left: width_left.into(),
        }
    }

    /// Parse `x` as a float. `row` is only used for error context.
    pub fn x_value(&self, row: usize) -> Result<f64, TransformError> {
        self.x
            .trim()
            .parse::<f64>()
            .map_err(|_| TransformError::NumericParse {
                row,
                column: COLUMN_X.to_string(),
                value: self.x.clone(),
            })
    }
}

// =============================================================================
// TrackSequence
// =============================================================================

/// Ordered samples of one track. Order is the direction of travel.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSequence {
    samples: Vec<TrackSample>,
}

impl TrackSequence {
    pub fn new(samples: Vec<TrackSample>) -> Result<Self, CsvError> {
        if samples.is_empty() {
            return Err(CsvError::EmptyInput);
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[TrackSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackSample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a TrackSequence {
    type Item = &'a TrackSample;
    type IntoIter = std::slice::Iter<'a, TrackSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

// =============================================================================
// HeaderDescriptor
// =============================================================================

/// How the columns of a file were resolved. Decided once per file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HeaderDescriptor {
    /// First retained line named the columns.
    Headered { columns: Vec<String> },
    /// No header; columns are [`HEADERLESS_COLUMNS`].
    Headerless,
}

impl HeaderDescriptor {
    pub fn columns(&self) -> Vec<String> {
        match self {
            HeaderDescriptor::Headered { columns } => columns.clone(),
            HeaderDescriptor::Headerless => {
                HEADERLESS_COLUMNS.iter().map(|c| c.to_string()).collect()
            }
        }
    }

    pub fn is_headered(&self) -> bool {
        matches!(self, HeaderDescriptor::Headered { .. })
    }
}

// =============================================================================
// OutputRecord
// =============================================================================

/// One row of an output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub x: String,
    pub y: String,
    pub wide_right: String,
    pub wide_left: String,
}
