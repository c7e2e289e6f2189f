use aiming_core::{BinaryMask, RgbImage};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    convex_hull_fill, label_components, measure_particles, threshold_rgb, AreaLimits,
    ComponentMap, FrameSource, Particle, ThresholdBands, VisionError,
};

/// Pipeline stage; exactly one runs per tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Fetch,
    Threshold,
    ConvexHull,
    Filter,
    Extract,
}

impl Stage {
    /// Stage that runs on the following tick.
    pub fn next(self) -> Stage {
        match self {
            Stage::Fetch => Stage::Threshold,
            Stage::Threshold => Stage::ConvexHull,
            Stage::ConvexHull => Stage::Filter,
            Stage::Filter => Stage::Extract,
            Stage::Extract => Stage::Fetch,
        }
    }
}

/// Fixed pipeline constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Bands used while no particle list has been produced yet.
    pub discovery_bands: ThresholdBands,
    /// Bands used for every later cycle.
    pub steady_bands: ThresholdBands,
    pub area_limits: AreaLimits,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            discovery_bands: ThresholdBands::DISCOVERY,
            steady_bands: ThresholdBands::STEADY,
            area_limits: AreaLimits::default(),
        }
    }
}

/// Output of a completed cycle.
#[derive(Clone, Debug)]
pub struct ParticleReport {
    /// Particles in pipeline order.
    pub particles: Vec<Particle>,
    /// Thresholded mask before the convex hull, needed for edge scoring.
    pub edge_mask: BinaryMask,
    /// 1-based number of this completed cycle.
    pub cycle: u64,
}

/// What a single [`VisionPipeline::tick`] did.
#[derive(Clone, Debug)]
pub enum TickOutcome {
    /// `ran` finished; `next` runs on the following tick.
    Advanced { ran: Stage, next: Stage },
    /// Extraction finished; the machine is back at [`Stage::Fetch`].
    Completed(ParticleReport),
    /// `stage` failed; buffers were released and the machine reset.
    Abandoned { stage: Stage },
}

/// Incremental threshold → hull → filter → extract state machine.
///
/// Buffers are released as soon as no later stage needs them, so at most two
/// masks are held between ticks: the threshold mask (kept for edge scoring)
/// plus either the hull mask or the filtered label map.
pub struct VisionPipeline<S> {
    source: S,
    params: PipelineParams,
    stage: Stage,
    frame: Option<RgbImage>,
    threshold_mask: Option<BinaryMask>,
    hull_mask: Option<BinaryMask>,
    filtered: Option<ComponentMap>,
    has_particle_list: bool,
    completed: u64,
    abandoned: u64,
}

impl<S: FrameSource> VisionPipeline<S> {
    pub fn new(source: S, params: PipelineParams) -> Self {
        Self {
            source,
            params,
            stage: Stage::Fetch,
            frame: None,
            threshold_mask: None,
            hull_mask: None,
            filtered: None,
            has_particle_list: false,
            completed: 0,
            abandoned: 0,
        }
    }

    #[inline]
    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Stage the next tick will run.
    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// True between cycles: at fetch with no buffers held.
    pub fn is_idle(&self) -> bool {
        self.stage == Stage::Fetch && self.frame.is_none() && self.live_mask_count() == 0
    }

    /// Whether any cycle has completed yet (selects steady-state bands).
    #[inline]
    pub fn has_particle_list(&self) -> bool {
        self.has_particle_list
    }

    /// Number of masks (including the filtered label map) currently held.
    pub fn live_mask_count(&self) -> usize {
        usize::from(self.threshold_mask.is_some())
            + usize::from(self.hull_mask.is_some())
            + usize::from(self.filtered.is_some())
    }

    pub fn cycles_completed(&self) -> u64 {
        self.completed
    }

    pub fn cycles_abandoned(&self) -> u64 {
        self.abandoned
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Advance exactly one stage.
    ///
    /// Errors never escape: the cycle is dropped, logged and the machine
    /// restarts at [`Stage::Fetch`] on the next tick.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self), fields(stage = ?self.stage))
    )]
    pub fn tick(&mut self) -> TickOutcome {
        let ran = self.stage;
        match self.step(ran) {
            Ok(Some(report)) => {
                self.stage = Stage::Fetch;
                TickOutcome::Completed(report)
            }
            Ok(None) => {
                self.stage = ran.next();
                TickOutcome::Advanced {
                    ran,
                    next: self.stage,
                }
            }
            Err(err) => {
                warn!("vision cycle abandoned at {ran:?}: {err}");
                self.reset();
                self.abandoned += 1;
                TickOutcome::Abandoned { stage: ran }
            }
        }
    }

    /// Drop all buffers and return to [`Stage::Fetch`].
    pub fn reset(&mut self) {
        self.stage = Stage::Fetch;
        self.frame = None;
        self.threshold_mask = None;
        self.hull_mask = None;
        self.filtered = None;
    }

    fn step(&mut self, stage: Stage) -> Result<Option<ParticleReport>, VisionError> {
        let missing = || VisionError::MissingInput { stage };
        match stage {
            Stage::Fetch => {
                self.frame = Some(self.source.get_frame()?);
            }
            Stage::Threshold => {
                let frame = self.frame.take().ok_or_else(missing)?;
                let bands = if self.has_particle_list {
                    &self.params.steady_bands
                } else {
                    &self.params.discovery_bands
                };
                self.threshold_mask = Some(threshold_rgb(&frame.view(), bands)?);
            }
            Stage::ConvexHull => {
                let mask = self.threshold_mask.as_ref().ok_or_else(missing)?;
                self.hull_mask = Some(convex_hull_fill(mask));
            }
            Stage::Filter => {
                let hull = self.hull_mask.take().ok_or_else(missing)?;
                let limits = self.params.area_limits;
                let map = label_components(&hull).retain_by_area(|a| limits.contains(a));
                self.filtered = Some(map);
            }
            Stage::Extract => {
                let map = self.filtered.take().ok_or_else(missing)?;
                let edge_mask = self.threshold_mask.take().ok_or_else(missing)?;
                if edge_mask.width != map.width || edge_mask.height != map.height {
                    return Err(VisionError::MaskSizeMismatch {
                        width: map.width,
                        height: map.height,
                        got_width: edge_mask.width,
                        got_height: edge_mask.height,
                    });
                }
                let particles = measure_particles(&map);
                self.has_particle_list = true;
                self.completed += 1;
                debug!(
                    "vision cycle {} produced {} particles",
                    self.completed,
                    particles.len()
                );
                return Ok(Some(ParticleReport {
                    particles,
                    edge_mask,
                    cycle: self.completed,
                }));
            }
        }
        Ok(None)
    }
}
