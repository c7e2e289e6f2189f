use aiming_core::PixelRect;
use nalgebra::{Matrix2, Point2};
use serde::{Deserialize, Serialize};

use crate::ComponentMap;

/// Inclusive particle area limits in pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AreaLimits {
    pub min: u32,
    pub max: u32,
}

impl Default for AreaLimits {
    fn default() -> Self {
        Self {
            min: 500,
            max: 65535,
        }
    }
}

impl AreaLimits {
    #[inline]
    pub fn contains(&self, area: u32) -> bool {
        self.min <= area && area <= self.max
    }
}

/// One measured candidate region for the current cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Position in the ordered particle list (raster order of first pixel).
    pub index: usize,
    pub bounding: PixelRect,
    /// Center of mass in pixel coordinates.
    pub centroid: Point2<f64>,
    pub area: u32,
    /// Long side of the equivalent rectangle.
    pub equivalent_rect_long: f64,
    /// Short side of the equivalent rectangle.
    pub equivalent_rect_short: f64,
}

impl Particle {
    #[inline]
    pub fn centroid_x(&self) -> f64 {
        self.centroid.x
    }

    /// Long/short side ratio of the equivalent rectangle; always >= 1.
    ///
    /// `None` when the short side is zero.
    pub fn equivalent_aspect_ratio(&self) -> Option<f64> {
        (self.equivalent_rect_short > 0.0)
            .then(|| self.equivalent_rect_long / self.equivalent_rect_short)
    }
}

#[derive(Clone, Copy)]
struct Moments {
    n: f64,
    sx: f64,
    sy: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl Moments {
    const EMPTY: Moments = Moments {
        n: 0.0,
        sx: 0.0,
        sy: 0.0,
        sxx: 0.0,
        syy: 0.0,
        sxy: 0.0,
        min_x: usize::MAX,
        min_y: usize::MAX,
        max_x: 0,
        max_y: 0,
    };

    #[inline]
    fn add(&mut self, x: usize, y: usize) {
        let (fx, fy) = (x as f64, y as f64);
        self.n += 1.0;
        self.sx += fx;
        self.sy += fy;
        self.sxx += fx * fx;
        self.syy += fy * fy;
        self.sxy += fx * fy;
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

/// Equivalent rectangle sides from second central moments.
///
/// A filled rectangle with sides `a >= b` has principal variances `a²/12`
/// and `b²/12`, so `sqrt(12 λ)` recovers the sides. Both sides are then
/// scaled by a common factor so that `long * short == area`.
fn equivalent_rect(m: &Moments) -> (f64, f64) {
    const EPS: f64 = 1e-6;

    let mx = m.sx / m.n;
    let my = m.sy / m.n;
    let cxx = m.sxx / m.n - mx * mx;
    let cyy = m.syy / m.n - my * my;
    let cxy = m.sxy / m.n - mx * my;

    let eig = Matrix2::new(cxx, cxy, cxy, cyy).symmetric_eigenvalues();
    let (hi, lo) = if eig[0] >= eig[1] {
        (eig[0], eig[1])
    } else {
        (eig[1], eig[0])
    };
    let long = (12.0 * hi.max(0.0)).sqrt();
    let short = (12.0 * lo.max(0.0)).sqrt();

    let area = m.n;
    if long <= EPS {
        let side = area.sqrt();
        return (side, side);
    }
    if short <= EPS {
        // One pixel thick: the area fixes the short side.
        return (long, area / long);
    }
    let k = (area / (long * short)).sqrt();
    (long * k, short * k)
}

/// Measure every labeled region of `map`, in label order.
pub fn measure_particles(map: &ComponentMap) -> Vec<Particle> {
    let mut moments = vec![Moments::EMPTY; map.len()];
    for y in 0..map.height {
        for x in 0..map.width {
            let label = map.label(x, y);
            if label != 0 {
                moments[label as usize - 1].add(x, y);
            }
        }
    }

    moments
        .iter()
        .enumerate()
        .filter(|(_, m)| m.n > 0.0)
        .map(|(index, m)| {
            let (long, short) = equivalent_rect(m);
            Particle {
                index,
                bounding: PixelRect::from_bounds(m.min_x, m.min_y, m.max_x, m.max_y),
                centroid: Point2::new(m.sx / m.n, m.sy / m.n),
                area: m.n as u32,
                equivalent_rect_long: long,
                equivalent_rect_short: short,
            }
        })
        .collect()
}
