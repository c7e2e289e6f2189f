use aiming_core::TargetClass;
use aiming_scoring::{score_and_select, ScoredParticle, SelectedTarget};
use aiming_vision::{FrameSource, ParticleReport, TickOutcome, VisionPipeline};
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::aim::{bearing_degrees, is_aimed_at, AimSolution};
use crate::config::AimingConfig;
use crate::distance::{fuse_distances, optical_distance_inches, RangingSensor};

/// Process-variable hook for an external heading controller.
pub trait HeadingSource {
    /// Advance the aiming state by one tick and report the bearing.
    fn pid_get(&mut self) -> f64;
}

/// Summary of one completed vision cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycle: u64,
    pub active_class: TargetClass,
    pub particle_count: usize,
    pub scored: Vec<ScoredParticle>,
    pub selected: Option<SelectedTarget>,
}

/// Vision pipeline, scorer and rangefinder wired into a single tick loop.
pub struct AimingSystem<S, R> {
    pipeline: VisionPipeline<S>,
    ranging: R,
    config: AimingConfig,
    selected: Option<SelectedTarget>,
    last_report: Option<CycleReport>,
}

impl<S: FrameSource, R: RangingSensor> AimingSystem<S, R> {
    pub fn new(source: S, ranging: R, config: AimingConfig) -> Self {
        let pipeline = VisionPipeline::new(source, config.pipeline.clone());
        Self {
            pipeline,
            ranging,
            config,
            selected: None,
            last_report: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &AimingConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &VisionPipeline<S> {
        &self.pipeline
    }

    pub fn ranging(&self) -> &R {
        &self.ranging
    }

    /// Summary of the most recent completed cycle.
    pub fn last_report(&self) -> Option<&CycleReport> {
        self.last_report.as_ref()
    }

    /// Run one pipeline stage.
    ///
    /// A completed cycle replaces the selected target; an abandoned one
    /// clears it.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.pipeline.tick();
        match &outcome {
            TickOutcome::Completed(report) => self.update_selection(report),
            TickOutcome::Abandoned { .. } => self.selected = None,
            TickOutcome::Advanced { .. } => {}
        }
        outcome
    }

    fn update_selection(&mut self, report: &ParticleReport) {
        let class = self.config.active_class;
        let selection = score_and_select(
            &report.particles,
            &report.edge_mask,
            class,
            &self.config.thresholds,
        );
        self.selected = selection.selected;
        if let Some(target) = &self.selected {
            debug!(
                "cycle {}: {class} goal at x={:.1} width={}px",
                report.cycle, target.centroid_x, target.width_px
            );
        }
        self.last_report = Some(CycleReport {
            cycle: report.cycle,
            active_class: class,
            particle_count: report.particles.len(),
            scored: selection.scored,
            selected: selection.selected,
        });
    }

    #[inline]
    pub fn selected_target(&self) -> Option<&SelectedTarget> {
        self.selected.as_ref()
    }

    #[inline]
    pub fn has_target(&self) -> bool {
        self.selected.is_some()
    }

    /// Distance from the goal's apparent width; 0 without a target.
    pub fn optical_distance_inches(&self) -> f64 {
        self.selected
            .map(|t| optical_distance_inches(t.width_px, &self.config.camera))
            .unwrap_or(0.0)
    }

    pub fn ranging_distance_inches(&self) -> f64 {
        self.ranging.distance_inches()
    }

    /// Fused distance; recomputed on every call.
    pub fn distance_inches(&self) -> f64 {
        fuse_distances(
            self.optical_distance_inches(),
            self.ranging_distance_inches(),
            self.config.fusion_tolerance,
        )
    }

    pub fn bearing_degrees(&self) -> f64 {
        bearing_degrees(
            self.selected.as_ref(),
            self.distance_inches(),
            &self.config.camera,
        )
    }

    /// True when the bearing is inside the aim tolerance.
    ///
    /// Also true without a target, since the bearing is then 0; check
    /// [`has_target`](Self::has_target) or use [`aim_solution`](Self::aim_solution).
    pub fn is_aimed(&self) -> bool {
        is_aimed_at(self.bearing_degrees(), self.config.aim_tolerance_deg)
    }

    pub fn aim_solution(&self) -> Option<AimSolution> {
        let target = self.selected?;
        let optical = self.optical_distance_inches();
        let ranging = self.ranging_distance_inches();
        let distance = fuse_distances(optical, ranging, self.config.fusion_tolerance);
        let bearing = bearing_degrees(Some(&target), distance, &self.config.camera);
        Some(AimSolution {
            target,
            bearing_degrees: bearing,
            distance_inches: distance,
            optical_distance_inches: optical,
            ranging_distance_inches: ranging,
            aimed: is_aimed_at(bearing, self.config.aim_tolerance_deg),
        })
    }
}

impl<S: FrameSource, R: RangingSensor> HeadingSource for AimingSystem<S, R> {
    fn pid_get(&mut self) -> f64 {
        self.tick();
        self.bearing_degrees()
    }
}
