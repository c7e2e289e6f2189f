use aiming_core::TargetClass;
use serde::{Deserialize, Serialize};

use crate::ScoreSet;

/// Minimum scores (exclusive) a particle needs to count as a goal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationThresholds {
    pub rectangularity: f64,
    pub aspect_ratio: f64,
    pub x_edge: f64,
    pub y_edge: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            rectangularity: 60.0,
            aspect_ratio: 75.0,
            x_edge: 40.0,
            y_edge: 60.0,
        }
    }
}

impl ClassificationThresholds {
    /// Conjunctive gate for `class`.
    ///
    /// Every score must clear its own limit; a strong score on one axis never
    /// makes up for a weak one elsewhere.
    pub fn passes(&self, scores: &ScoreSet, class: TargetClass) -> bool {
        scores.rectangularity > self.rectangularity
            && scores.aspect(class) > self.aspect_ratio
            && scores.x_edge > self.x_edge
            && scores.y_edge > self.y_edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing() -> ScoreSet {
        ScoreSet {
            rectangularity: 90.0,
            aspect_high: 95.0,
            aspect_middle: 40.0,
            x_edge: 80.0,
            y_edge: 85.0,
        }
    }

    #[test]
    fn passes_when_every_gate_clears() {
        let t = ClassificationThresholds::default();
        assert!(t.passes(&passing(), TargetClass::High));
        assert!(!t.passes(&passing(), TargetClass::Middle));
    }

    #[test]
    fn any_single_failing_gate_rejects() {
        let t = ClassificationThresholds::default();
        let breakers: [fn(&mut ScoreSet); 4] = [
            |s| s.rectangularity = 59.0,
            |s| s.aspect_high = 74.0,
            |s| s.x_edge = 39.0,
            |s| s.y_edge = 59.0,
        ];
        for breaker in breakers {
            let mut scores = passing();
            breaker(&mut scores);
            assert!(!t.passes(&scores, TargetClass::High), "{scores:?}");
        }
    }

    #[test]
    fn limits_are_exclusive() {
        let t = ClassificationThresholds::default();
        let mut scores = passing();
        scores.rectangularity = 60.0;
        assert!(!t.passes(&scores, TargetClass::High));
    }
}
