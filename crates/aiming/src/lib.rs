//! Optical goal acquisition and aiming for a competition robot.
//!
//! This crate wires the workspace together:
//! - re-exports of the vision and scoring crates,
//! - distance fusion between the camera and an analog rangefinder,
//! - [`AimingSystem`], which an external control loop ticks once per period,
//! - (feature `image`) replay of recorded frames from disk.
//!
//! ## Quickstart
//!
//! ```no_run
//! use aiming::{AimingConfig, AimingSystem, FixedRange, HeadingSource, ImageFileSource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = ImageFileSource::from_dir("frames")?;
//! let mut system = AimingSystem::new(source, FixedRange(180.0), AimingConfig::default());
//!
//! for _ in 0..5 {
//!     let bearing = system.pid_get();
//!     println!("bearing {bearing:.2} deg, aimed: {}", system.is_aimed());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `aiming::core`: frames, masks, rectangles, target classes, logger setup.
//! - `aiming::vision`: the tick-driven threshold/hull/filter/extract pipeline.
//! - `aiming::scoring`: particle scores, classification and target selection.

pub use aiming_core as core;
pub use aiming_scoring as scoring;
pub use aiming_vision as vision;

pub use aiming_core::TargetClass;
pub use aiming_scoring::{ClassificationThresholds, SelectedTarget};
pub use aiming_vision::{FrameError, FrameSource, Stage, TickOutcome};

mod aim;
mod config;
mod distance;
mod system;

pub use aim::{bearing_degrees, is_aimed_at, pixel_offset, AimSolution};
pub use config::{AimingConfig, CameraGeometry, ConfigError, RangingCalibration};
pub use distance::{
    fuse_distances, optical_distance_inches, FixedRange, RangingSensor, ScaledRangefinder,
    VoltageSource,
};
pub use system::{AimingSystem, CycleReport, HeadingSource};

#[cfg(feature = "image")]
pub mod replay;

#[cfg(feature = "image")]
pub use replay::{ImageFileSource, ReplayError};
