use aiming_scoring::SelectedTarget;
use serde::{Deserialize, Serialize};

use crate::config::CameraGeometry;

/// Horizontal offset of `centroid_x` from the image center; negative is left.
#[inline]
pub fn pixel_offset(centroid_x: f64, camera: &CameraGeometry) -> f64 {
    centroid_x - camera.image_width_px / 2.0
}

/// Heading correction toward `target`, in degrees; positive turns right.
///
/// Returns 0 with no target or a non-positive distance. That means "no
/// correction available", not "on target".
pub fn bearing_degrees(
    target: Option<&SelectedTarget>,
    distance_inches: f64,
    camera: &CameraGeometry,
) -> f64 {
    let Some(target) = target else {
        return 0.0;
    };
    if distance_inches <= 0.0 || target.width_px <= 0.0 {
        return 0.0;
    }
    let inches_per_px = camera.target_width_inches() / target.width_px;
    let offset_inches = pixel_offset(target.centroid_x, camera) * inches_per_px;
    (offset_inches / distance_inches).atan().to_degrees()
}

/// `|bearing| < tolerance`.
#[inline]
pub fn is_aimed_at(bearing_deg: f64, tolerance_deg: f64) -> bool {
    bearing_deg.abs() < tolerance_deg
}

/// Snapshot of everything the shooter needs for the current target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AimSolution {
    pub target: SelectedTarget,
    pub bearing_degrees: f64,
    pub distance_inches: f64,
    pub optical_distance_inches: f64,
    pub ranging_distance_inches: f64,
    pub aimed: bool,
}
