//! JSON configuration for the aiming subsystem.

use std::{fs, path::Path};

use aiming_core::TargetClass;
use aiming_scoring::ClassificationThresholds;
use aiming_vision::PipelineParams;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Camera and goal geometry used to turn pixels into inches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraGeometry {
    /// Horizontal resolution of the frames the pipeline sees.
    pub image_width_px: f64,
    /// Half of the horizontal field of view, in degrees.
    pub half_fov_deg: f64,
    /// Physical width of the goal frame, in feet.
    pub target_width_ft: f64,
}

impl Default for CameraGeometry {
    fn default() -> Self {
        Self {
            image_width_px: 320.0,
            half_fov_deg: 23.5,
            // 62 in goal frame.
            target_width_ft: 62.0 / 12.0,
        }
    }
}

impl CameraGeometry {
    #[inline]
    pub fn target_width_inches(&self) -> f64 {
        self.target_width_ft * 12.0
    }
}

/// Linear calibration of the analog rangefinder.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangingCalibration {
    pub inches_per_volt: f64,
}

impl Default for RangingCalibration {
    fn default() -> Self {
        // 5 V full scale over 512 inches.
        Self {
            inches_per_volt: 512.0 / 5.0,
        }
    }
}

/// Everything the aiming subsystem reads at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimingConfig {
    pub active_class: TargetClass,
    pub thresholds: ClassificationThresholds,
    pub pipeline: PipelineParams,
    pub camera: CameraGeometry,
    pub ranging: RangingCalibration,
    /// Relative optical/ranging disagreement still averaged together.
    pub fusion_tolerance: f64,
    /// Bearing magnitude (degrees) below which the robot counts as aimed.
    pub aim_tolerance_deg: f64,
}

impl Default for AimingConfig {
    fn default() -> Self {
        Self {
            active_class: TargetClass::Middle,
            thresholds: ClassificationThresholds::default(),
            pipeline: PipelineParams::default(),
            camera: CameraGeometry::default(),
            ranging: RangingCalibration::default(),
            fusion_tolerance: 0.05,
            aim_tolerance_deg: 1.0,
        }
    }
}

impl AimingConfig {
    /// Load a JSON config from disk; missing fields take their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
