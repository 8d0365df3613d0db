//! Transformation module.
//!
//! - Passthrough: original rows renamed to the output schema
//! - Mirror: reversed, reflected rows with swapped widths

pub mod mirror;
pub mod passthrough;

pub use mirror::{
    format_decimal, mirror_track, track_length, MirrorFormula, MirrorResult, LENGTH_TOLERANCE,
    REFERENCE_TRACK_LENGTH, REFERENCE_TRACK_OFFSET,
};
pub use passthrough::to_output_records;
