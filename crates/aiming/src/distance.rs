//! Optical range, rangefinder range and their fusion.

use crate::config::{CameraGeometry, RangingCalibration};

/// A sensor that reports the distance to whatever is in front of the robot.
pub trait RangingSensor {
    fn distance_inches(&self) -> f64;
}

impl<R: RangingSensor + ?Sized> RangingSensor for &R {
    fn distance_inches(&self) -> f64 {
        (**self).distance_inches()
    }
}

impl<R: RangingSensor + ?Sized> RangingSensor for Box<R> {
    fn distance_inches(&self) -> f64 {
        (**self).distance_inches()
    }
}

/// Raw analog input, in volts.
pub trait VoltageSource {
    fn voltage(&self) -> f64;
}

impl<F: Fn() -> f64> VoltageSource for F {
    fn voltage(&self) -> f64 {
        self()
    }
}

/// Analog rangefinder with a linear volts-to-inches response.
#[derive(Clone, Debug)]
pub struct ScaledRangefinder<V> {
    input: V,
    calibration: RangingCalibration,
}

impl<V: VoltageSource> ScaledRangefinder<V> {
    pub fn new(input: V, calibration: RangingCalibration) -> Self {
        Self { input, calibration }
    }

    pub fn input(&self) -> &V {
        &self.input
    }
}

impl<V: VoltageSource> RangingSensor for ScaledRangefinder<V> {
    fn distance_inches(&self) -> f64 {
        self.input.voltage() * self.calibration.inches_per_volt
    }
}

/// Constant reading; used for replays and bench tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FixedRange(pub f64);

impl RangingSensor for FixedRange {
    fn distance_inches(&self) -> f64 {
        self.0
    }
}

/// Range to a goal that spans `width_px` pixels.
///
/// The goal's known width fixes how wide the whole field of view is at that
/// range; the field of view angle turns that width into a distance. Returns 0
/// for a non-positive pixel width.
pub fn optical_distance_inches(width_px: f64, camera: &CameraGeometry) -> f64 {
    if width_px <= 0.0 {
        return 0.0;
    }
    let field_width = camera.target_width_inches() * camera.image_width_px / width_px;
    field_width / (2.0 * camera.half_fov_deg.to_radians().tan())
}

/// Combine optical and rangefinder distances.
///
/// Readings within `tolerance` of each other (relative) are averaged. Beyond
/// that one of them is looking at something other than the goal, usually
/// something nearer, so the larger reading wins. A non-finite ratio counts
/// as a disagreement.
pub fn fuse_distances(optical: f64, ranging: f64, tolerance: f64) -> f64 {
    let ratio = optical / ranging;
    let agree = ratio.is_finite() && (1.0 - tolerance..=1.0 + tolerance).contains(&ratio);
    if agree {
        (optical + ranging) / 2.0
    } else {
        optical.max(ranging)
    }
}
