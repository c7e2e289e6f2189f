//! Edge-solidity scores.
//!
//! A goal is a hollow rectangular frame: cross-sections near the sides of its
//! bounding box are almost fully lit, cross-sections through the middle only
//! catch the two thin bars. The envelopes below encode that profile as
//! measured on the field; they are calibration data, not derived values.

use aiming_core::{BinaryMask, PixelRect};

use crate::clamp_score;

/// Piecewise expected-intensity band, indexed by normalized position.
///
/// The min and max tables may have different resolutions.
#[derive(Clone, Copy, Debug)]
pub struct EdgeEnvelope {
    pub min: &'static [f32],
    pub max: &'static [f32],
}

const X_MAX: [f32; 24] = [
    1.0, 1.0, 1.0, 1.0, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5,
    0.5, 1.0, 1.0, 1.0, 1.0,
];
const X_MIN: [f32; 24] = [
    0.4, 0.6, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1,
    0.1, 0.1, 0.1, 0.6, 0.0,
];
const Y_MAX: [f32; 24] = X_MAX;
const Y_MIN: [f32; 48] = [
    0.4, 0.6, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05,
    0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05,
    0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.6, 0.0,
];

impl EdgeEnvelope {
    /// Column profile (left to right).
    pub const X: EdgeEnvelope = EdgeEnvelope {
        min: &X_MIN,
        max: &X_MAX,
    };

    /// Row profile (top to bottom).
    pub const Y: EdgeEnvelope = EdgeEnvelope {
        min: &Y_MIN,
        max: &Y_MAX,
    };

    #[inline]
    fn lookup(table: &[f32], i: usize, n: usize) -> f32 {
        table[i * (table.len() - 1) / n]
    }

    /// Percentage of `averages` strictly inside the envelope.
    pub fn score(&self, averages: &[f32]) -> f64 {
        let n = averages.len();
        if n == 0 {
            return 0.0;
        }
        let inside = averages
            .iter()
            .enumerate()
            .filter(|&(i, &avg)| {
                Self::lookup(self.min, i, n) < avg && avg < Self::lookup(self.max, i, n)
            })
            .count();
        clamp_score(100.0 * inside as f64 / n as f64)
    }
}

/// Solidity of the vertical edges and hollowness between them.
pub fn score_x_edge(mask: &BinaryMask, rect: PixelRect) -> f64 {
    EdgeEnvelope::X.score(&mask.column_averages(rect))
}

/// Solidity of the horizontal edges and hollowness between them.
pub fn score_y_edge(mask: &BinaryMask, rect: PixelRect) -> f64 {
    EdgeEnvelope::Y.score(&mask.row_averages(rect))
}
