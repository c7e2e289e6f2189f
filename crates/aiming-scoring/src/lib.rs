//! Scoring, classification and selection of vision particles.
//!
//! Every particle gets five independent 0–100 scores ([`ScoreSet`]). A
//! particle is a goal of class `C` only if *all four* gates for `C` pass
//! ([`ClassificationThresholds`]); among those, the best aspect-ratio score
//! wins ([`select_target`]). Nothing is carried over between cycles.

mod classify;
mod edges;
mod scores;
mod select;

pub use classify::ClassificationThresholds;
pub use edges::{score_x_edge, score_y_edge, EdgeEnvelope};
pub use scores::{
    clamp_score, score_aspect_ratio, score_particle, score_rectangularity, ScoreSet,
};
pub use select::{
    score_and_select, select_target, ScoredParticle, SelectedTarget, Selection, TargetCandidate,
};
