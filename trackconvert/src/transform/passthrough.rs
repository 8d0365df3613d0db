//! Re-key original samples into the output schema without changing values.

use crate::models::{OutputRecord, TrackSample, TrackSequence};

impl From<&TrackSample> for OutputRecord {
    fn from(sample: &TrackSample) -> Self {
        OutputRecord {
            x: sample.x.clone(),
            y: sample.y.clone(),
            wide_right: sample.width_right.clone(),
            wide_left: sample.width_left.clone(),
        }
    }
}

/// Original rows, same order, renamed to `x,y,wide_right,wide_left`.
pub fn to_output_records(track: &TrackSequence) -> Vec<OutputRecord> {
    track.iter().map(OutputRecord::from).collect()
}
