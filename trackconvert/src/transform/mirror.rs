//! Mirror a track about its longitudinal axis.
//!
//! ```text
//! original (n samples)             mirrored
//! ┌──────────────────────┐         ┌──────────────────────────────┐
//! │ s[0]   x  y  R  L    │         │ s[n-1]  x'  y  L  R          │
//! │ s[1]   x  y  R  L    │   →     │ ...                          │
//! │ ...                  │         │ s[0]    x'  y  L  R          │
//! └──────────────────────┘         └──────────────────────────────┘
//! ```
//!
//! Rows are reversed, `x` is reflected, `y` is kept and the right/left
//! widths trade places because mirroring inverts handedness.

use serde::Serialize;

use crate::error::TransformResult;
use crate::models::{OutputRecord, TrackSequence};

/// Length of the one track that uses the offset formula.
///
/// NOTE: 1789 and [`REFERENCE_TRACK_OFFSET`] are tied to a single known
/// track layout and do not follow from any general rule. Do not derive
/// other tracks' behaviour from them.
pub const REFERENCE_TRACK_LENGTH: f64 = 1789.0;

/// Offset added for the reference track: `x' = 1789 + 50 - x`.
pub const REFERENCE_TRACK_OFFSET: f64 = 50.0;

/// Maximum distance from [`REFERENCE_TRACK_LENGTH`] still treated as a match.
pub const LENGTH_TOLERANCE: f64 = 0.1;

/// Reflection applied to every `x` of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorFormula {
    /// `x' = 1789 + 50 - x`
    ReferenceTrack,
    /// `x' = -x`
    Negate,
}

impl MirrorFormula {
    /// Pick the formula for a whole track from its length.
    pub fn for_length(track_length: f64) -> Self {
        if (track_length - REFERENCE_TRACK_LENGTH).abs() < LENGTH_TOLERANCE {
            MirrorFormula::ReferenceTrack
        } else {
            MirrorFormula::Negate
        }
    }

    pub fn apply(self, x: f64) -> f64 {
        match self {
            MirrorFormula::ReferenceTrack => REFERENCE_TRACK_LENGTH + REFERENCE_TRACK_OFFSET - x,
            MirrorFormula::Negate => -x,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            MirrorFormula::ReferenceTrack => "1789 + 50 - x",
            MirrorFormula::Negate => "-x",
        }
    }
}

impl std::fmt::Display for MirrorFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Output of [`mirror_track`].
#[derive(Debug, Clone)]
pub struct MirrorResult {
    /// Mirrored rows, in reversed order
    pub records: Vec<OutputRecord>,
    /// `max_x - min_x` of the input
    pub track_length: f64,
    /// Formula applied to every row
    pub formula: MirrorFormula,
}

/// `max(x) - min(x)` over all samples.
pub fn track_length(track: &TrackSequence) -> TransformResult<f64> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;

    for (row, sample) in track.iter().enumerate() {
        let x = sample.x_value(row + 1)?;
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }

    Ok(max_x - min_x)
}

/// Build the mirrored version of `track`. The input is left untouched.
pub fn mirror_track(track: &TrackSequence) -> TransformResult<MirrorResult> {
    let track_length = track_length(track)?;
    let formula = MirrorFormula::for_length(track_length);

    let records = track
        .samples()
        .iter()
        .enumerate()
        .rev()
        .map(|(idx, sample)| -> TransformResult<OutputRecord> {
            let x = sample.x_value(idx + 1)?;
            Ok(OutputRecord {
                x: format_decimal(formula.apply(x)),
                y: sample.y.clone(),
                wide_right: sample.width_left.clone(),
                wide_left: sample.width_right.clone(),
            })
        })
        .collect::<TransformResult<Vec<_>>>()?;

    Ok(MirrorResult {
        records,
        track_length,
        formula,
    })
}

/// Format a float so it always reads as a decimal number (`-20.0`, `50.0`).
pub fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrackSample;

    fn track(rows: &[(&str, &str, &str, &str)]) -> TrackSequence {
        TrackSequence::new(
            rows.iter()
                .map(|(x, y, r, l)| TrackSample::new(*x, *y, *r, *l))
                .collect(),
        )
        .unwrap()
    }

    fn xs(result: &MirrorResult) -> Vec<f64> {
        result.records.iter().map(|r| r.x.parse().unwrap()).collect()
    }

    #[test]
    fn test_negate_scenario() {
        let input = track(&[("0", "0", "3", "3"), ("10", "0", "3", "3"), ("20", "0", "3", "3")]);
        let result = mirror_track(&input).unwrap();

        assert_eq!(result.track_length, 20.0);
        assert_eq!(result.formula, MirrorFormula::Negate);
        assert_eq!(xs(&result), vec![-20.0, -10.0, 0.0]);
        for record in &result.records {
            assert_eq!(record.y, "0");
            assert_eq!(record.wide_right, "3");
            assert_eq!(record.wide_left, "3");
        }
    }

    #[test]
    fn test_reference_track_scenario() {
        let input = track(&[("0", "0", "3", "2"), ("1789", "0", "3", "2")]);
        let result = mirror_track(&input).unwrap();

        assert_eq!(result.formula, MirrorFormula::ReferenceTrack);
        assert_eq!(xs(&result), vec![50.0, 1839.0]);
        assert_eq!(result.records[0].x, "50.0");
        assert_eq!(result.records[1].x, "1839.0");
    }

    #[test]
    fn test_formula_tolerance_boundary() {
        assert_eq!(MirrorFormula::for_length(1789.05), MirrorFormula::ReferenceTrack);
        assert_eq!(MirrorFormula::for_length(1788.95), MirrorFormula::ReferenceTrack);
        assert_eq!(MirrorFormula::for_length(1789.2), MirrorFormula::Negate);
        assert_eq!(MirrorFormula::for_length(1788.8), MirrorFormula::Negate);
        assert_eq!(MirrorFormula::for_length(0.0), MirrorFormula::Negate);
    }

    #[test]
    fn test_formula_chosen_once_per_track() {
        // Length 1789.05 from the aggregate; every row uses the offset formula
        let input = track(&[
            ("100", "0", "1", "1"),
            ("1889.05", "0", "1", "1"),
            ("500", "0", "1", "1"),
        ]);
        let result = mirror_track(&input).unwrap();

        assert_eq!(result.formula, MirrorFormula::ReferenceTrack);
        let expected: Vec<f64> = [500.0, 1889.05, 100.0]
            .iter()
            .map(|x| 1839.0 - x)
            .collect();
        assert_eq!(xs(&result), expected);
    }

    #[test]
    fn test_formulas_are_self_inverse() {
        for formula in [MirrorFormula::Negate, MirrorFormula::ReferenceTrack] {
            for x in [0.0, 1.5, -42.25, 1789.0, 919.5] {
                assert_eq!(formula.apply(formula.apply(x)), x);
            }
        }
    }

    #[test]
    fn test_reversed_order_and_width_swap() {
        let input = track(&[
            ("1", "10", "2.0", "5.0"),
            ("2", "20", "2.5", "5.5"),
            ("3", "30", "3.0", "6.0"),
            ("4", "40", "3.5", "6.5"),
        ]);
        let result = mirror_track(&input).unwrap();
        let n = input.len();

        assert_eq!(result.records.len(), n);
        for (i, record) in result.records.iter().enumerate() {
            let original = &input.samples()[n - 1 - i];
            let x: f64 = original.x.parse().unwrap();
            assert_eq!(record.x, format_decimal(-x));
            assert_eq!(record.y, original.y);
            assert_eq!(record.wide_right, original.width_left);
            assert_eq!(record.wide_left, original.width_right);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let input = track(&[("0", "1", "2", "3"), ("5", "1", "2", "3")]);
        let before = input.clone();
        let _ = mirror_track(&input).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn test_non_numeric_x() {
        let input = track(&[("0", "0", "3", "3"), ("oops", "0", "3", "3")]);
        let err = mirror_track(&input).unwrap_err();
        assert!(err.to_string().contains("Row 2"));
        assert!(err.to_string().contains("oops"));
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(-20.0), "-20.0");
        assert_eq!(format_decimal(0.25), "0.25");
        assert_eq!(format_decimal(-0.0), "-0.0");
        assert_eq!(format_decimal(1839.0), "1839.0");
    }
}
