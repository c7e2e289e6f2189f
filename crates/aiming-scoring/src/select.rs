use aiming_core::{BinaryMask, TargetClass};
use aiming_vision::Particle;
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{score_particle, ClassificationThresholds, ScoreSet};

/// Particle that passed classification for the active class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetCandidate {
    /// Index of the source particle in pipeline order.
    pub particle_index: usize,
    pub target_class: TargetClass,
    /// Aspect-ratio score against the active class.
    pub aspect_ratio: f64,
    pub centroid_x: f64,
    /// Bounding-box width in pixels.
    pub width_px: f64,
}

/// Best candidate of a cycle.
pub type SelectedTarget = TargetCandidate;

/// Scores of one particle and whether it cleared the gate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredParticle {
    pub particle_index: usize,
    pub scores: ScoreSet,
    pub accepted: bool,
}

/// Everything the scoring stage derived from one particle list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub scored: Vec<ScoredParticle>,
    pub candidates: Vec<TargetCandidate>,
    pub selected: Option<SelectedTarget>,
}

/// Strict maximum by aspect-ratio score; ties keep the earlier candidate.
pub fn select_target(candidates: &[TargetCandidate]) -> Option<SelectedTarget> {
    let mut best: Option<&TargetCandidate> = None;
    for c in candidates {
        if best.is_none_or(|b| c.aspect_ratio > b.aspect_ratio) {
            best = Some(c);
        }
    }
    best.copied()
}

/// Score every particle, gate against `class` and pick the winner.
///
/// Recomputed from scratch each cycle; nothing from earlier frames is used.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(particles = particles.len(), class = %class))
)]
pub fn score_and_select(
    particles: &[Particle],
    edge_mask: &BinaryMask,
    class: TargetClass,
    thresholds: &ClassificationThresholds,
) -> Selection {
    let mut scored = Vec::with_capacity(particles.len());
    let mut candidates = Vec::new();

    for particle in particles {
        let scores = score_particle(particle, edge_mask);
        let accepted = thresholds.passes(&scores, class);
        if accepted {
            candidates.push(TargetCandidate {
                particle_index: particle.index,
                target_class: class,
                aspect_ratio: scores.aspect(class),
                centroid_x: particle.centroid_x(),
                width_px: particle.bounding.width as f64,
            });
        }
        scored.push(ScoredParticle {
            particle_index: particle.index,
            scores,
            accepted,
        });
    }

    let selected = select_target(&candidates);
    debug!(
        "{} particles, {} {class} candidates, selected {:?}",
        particles.len(),
        candidates.len(),
        selected.map(|t| t.particle_index)
    );

    Selection {
        scored,
        candidates,
        selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::tests::particle;
    use aiming_core::PixelRect;

    fn candidate(index: usize, aspect_ratio: f64) -> TargetCandidate {
        TargetCandidate {
            particle_index: index,
            target_class: TargetClass::High,
            aspect_ratio,
            centroid_x: 100.0 + index as f64,
            width_px: 60.0,
        }
    }

    #[test]
    fn picks_the_highest_aspect_score() {
        let candidates = [candidate(0, 70.0), candidate(1, 85.0), candidate(2, 60.0)];
        let selected = select_target(&candidates).expect("selection");
        assert_eq!(selected.particle_index, 1);
        assert_eq!(selected.aspect_ratio, 85.0);
    }

    #[test]
    fn ties_keep_first_candidate() {
        let candidates = [candidate(0, 80.0), candidate(1, 90.0), candidate(2, 90.0)];
        assert_eq!(select_target(&candidates).unwrap().particle_index, 1);
    }

    #[test]
    fn empty_candidate_set_selects_nothing() {
        assert!(select_target(&[]).is_none());
    }

    #[test]
    fn no_particles_means_no_target() {
        let mask = BinaryMask::new(10, 10);
        let selection = score_and_select(
            &[],
            &mask,
            TargetClass::High,
            &ClassificationThresholds::default(),
        );
        assert!(selection.selected.is_none());
        assert!(selection.scored.is_empty());
    }

    #[test]
    fn every_particle_is_scored_even_when_rejected() {
        // Solid blocks fail the edge gates but still get a score set.
        let mut mask = BinaryMask::new(80, 40);
        mask.data.fill(1);
        let mut particles = vec![particle(62, 20, 1240, 62.0, 20.0)];
        let mut second = particle(29, 29, 841, 29.0, 29.0);
        second.index = 1;
        second.bounding = PixelRect {
            top: 5,
            left: 40,
            height: 29,
            width: 29,
        };
        particles.push(second);

        let selection = score_and_select(
            &particles,
            &mask,
            TargetClass::High,
            &ClassificationThresholds::default(),
        );
        assert_eq!(selection.scored.len(), 2);
        assert!(selection.scored.iter().all(|s| !s.accepted));
        assert!(selection.candidates.is_empty());
        assert!(selection.selected.is_none());
        for s in &selection.scored {
            assert!(s.scores.as_array().iter().all(|v| (0.0..=100.0).contains(v)));
        }
    }
}
