//! Per-region convex hull filling.
//!
//! The goal outlines are thin tape frames that often break up under glare.
//! Replacing each connected region with its filled convex hull closes those
//! gaps before area filtering and measurement.

use aiming_core::BinaryMask;

use crate::label_components;

#[derive(Clone, Copy, Debug)]
struct RowSpan {
    y: usize,
    x0: usize,
    x1: usize,
}

type Pt = (i64, i64);

#[inline]
fn cross(o: Pt, a: Pt, b: Pt) -> i64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

/// Andrew's monotone chain. Returns vertices in counter-clockwise order
/// (in x-right / y-down pixel space: every interior point has a
/// non-negative cross product against each edge). Collinear points are
/// dropped.
fn monotone_chain(mut pts: Vec<Pt>) -> Vec<Pt> {
    pts.sort_unstable();
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Pt> = Vec::with_capacity(2 * pts.len());
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

fn inside_convex(hull: &[Pt], p: Pt) -> bool {
    (0..hull.len()).all(|i| cross(hull[i], hull[(i + 1) % hull.len()], p) >= 0)
}

/// Replace every 8-connected region of `mask` with its filled convex hull.
///
/// Hulls of neighbouring regions may overlap; the result is their union.
pub fn convex_hull_fill(mask: &BinaryMask) -> BinaryMask {
    let map = label_components(mask);
    let mut spans: Vec<Vec<RowSpan>> = vec![Vec::new(); map.len()];

    // Row extremes per region are enough: the hull of the extremes equals
    // the hull of the whole region.
    for y in 0..map.height {
        for x in 0..map.width {
            let label = map.label(x, y);
            if label == 0 {
                continue;
            }
            let rows = &mut spans[label as usize - 1];
            match rows.last_mut() {
                Some(span) if span.y == y => span.x1 = x,
                _ => rows.push(RowSpan { y, x0: x, x1: x }),
            }
        }
    }

    let mut out = BinaryMask::new(mask.width, mask.height);
    for rows in &spans {
        let pts: Vec<Pt> = rows
            .iter()
            .flat_map(|s| [(s.x0 as i64, s.y as i64), (s.x1 as i64, s.y as i64)])
            .collect();
        let hull = monotone_chain(pts);

        if hull.len() < 3 {
            // Degenerate (point or line) regions stay as their row spans.
            for s in rows {
                for x in s.x0..=s.x1 {
                    out.set(x, s.y, true);
                }
            }
            continue;
        }

        let (min_x, max_x) = hull
            .iter()
            .fold((i64::MAX, i64::MIN), |(lo, hi), p| (lo.min(p.0), hi.max(p.0)));
        let (min_y, max_y) = hull
            .iter()
            .fold((i64::MAX, i64::MIN), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if inside_convex(&hull, (x, y)) {
                    out.set(x as usize, y as usize, true);
                }
            }
        }
    }
    out
}
