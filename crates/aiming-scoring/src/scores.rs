use aiming_core::{BinaryMask, TargetClass};
use aiming_vision::Particle;
use serde::{Deserialize, Serialize};

use crate::edges::{score_x_edge, score_y_edge};

/// Per-particle scores, each in `[0, 100]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub rectangularity: f64,
    pub aspect_high: f64,
    pub aspect_middle: f64,
    pub x_edge: f64,
    pub y_edge: f64,
}

impl ScoreSet {
    /// Aspect-ratio score against the template of `class`.
    #[inline]
    pub fn aspect(&self, class: TargetClass) -> f64 {
        match class {
            TargetClass::High => self.aspect_high,
            TargetClass::Middle => self.aspect_middle,
        }
    }

    pub fn as_array(&self) -> [f64; 5] {
        [
            self.rectangularity,
            self.aspect_high,
            self.aspect_middle,
            self.x_edge,
            self.y_edge,
        ]
    }
}

/// Clamp to `[0, 100]`; NaN maps to 0.
#[inline]
pub fn clamp_score(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

/// Fill ratio of the particle against its bounding rectangle.
pub fn score_rectangularity(particle: &Particle) -> f64 {
    let bbox = particle.bounding.area();
    if bbox == 0 {
        return 0.0;
    }
    clamp_score(100.0 * particle.area as f64 / bbox as f64)
}

/// Similarity of the equivalent-rectangle ratio to the template of `class`.
///
/// The measured ratio is long/short, so rotated particles score the same as
/// upright ones.
pub fn score_aspect_ratio(particle: &Particle, class: TargetClass) -> f64 {
    let Some(measured) = particle.equivalent_aspect_ratio() else {
        return 0.0;
    };
    let rel = measured / class.ideal_aspect_ratio();
    clamp_score(100.0 * (1.0 - (1.0 - rel).abs()))
}

/// All five scores. Both aspect templates are always evaluated.
///
/// `edge_mask` must be the thresholded mask from *before* the convex hull;
/// the hull would fill in the hollow frame the edge scores look for.
pub fn score_particle(particle: &Particle, edge_mask: &BinaryMask) -> ScoreSet {
    ScoreSet {
        rectangularity: score_rectangularity(particle),
        aspect_high: score_aspect_ratio(particle, TargetClass::High),
        aspect_middle: score_aspect_ratio(particle, TargetClass::Middle),
        x_edge: score_x_edge(edge_mask, particle.bounding),
        y_edge: score_y_edge(edge_mask, particle.bounding),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use aiming_core::PixelRect;
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    pub(crate) fn particle(
        width: usize,
        height: usize,
        area: u32,
        long: f64,
        short: f64,
    ) -> Particle {
        Particle {
            index: 0,
            bounding: PixelRect {
                top: 0,
                left: 0,
                height,
                width,
            },
            centroid: Point2::new(width as f64 / 2.0, height as f64 / 2.0),
            area,
            equivalent_rect_long: long,
            equivalent_rect_short: short,
        }
    }

    #[test]
    fn rectangularity_is_zero_for_empty_bounding_box() {
        let p = particle(0, 12, 0, 1.0, 1.0);
        assert_eq!(score_rectangularity(&p), 0.0);
    }

    #[test]
    fn rectangularity_of_half_filled_box() {
        let p = particle(10, 10, 50, 10.0, 5.0);
        assert_relative_eq!(score_rectangularity(&p), 50.0);
    }

    #[test]
    fn aspect_is_perfect_at_template_ratio() {
        for class in TargetClass::ALL {
            let ideal = class.ideal_aspect_ratio();
            let p = particle(62, 20, 1240, 20.0 * ideal, 20.0);
            assert_relative_eq!(score_aspect_ratio(&p, class), 100.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn aspect_falls_off_linearly_and_clamps() {
        // Half the template ratio: 100 * (1 - 0.5).
        let p = particle(31, 20, 620, 31.0, 20.0);
        assert_relative_eq!(
            score_aspect_ratio(&p, TargetClass::High),
            50.0,
            epsilon = 1e-9
        );

        // Three times the template ratio goes negative before clamping.
        let p = particle(100, 1, 100, 9.3, 1.0);
        assert_eq!(score_aspect_ratio(&p, TargetClass::High), 0.0);
    }

    #[test]
    fn aspect_with_zero_short_side_scores_zero() {
        let p = particle(10, 1, 10, 10.0, 0.0);
        assert_eq!(score_aspect_ratio(&p, TargetClass::Middle), 0.0);
    }

    #[test]
    fn clamp_handles_nan_and_bounds() {
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(-3.0), 0.0);
        assert_eq!(clamp_score(250.0), 100.0);
        assert_eq!(clamp_score(42.0), 42.0);
    }
}
