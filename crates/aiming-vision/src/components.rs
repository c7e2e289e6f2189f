//! 8-connected component labeling.

use aiming_core::BinaryMask;

/// Label image for a binary mask.
///
/// `labels[y * width + x]` is 0 for background, otherwise `k` in `1..=len()`.
/// Labels are assigned in raster order of each region's first pixel, and
/// `areas[k - 1]` is the pixel count of region `k`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentMap {
    pub width: usize,
    pub height: usize,
    pub labels: Vec<u32>,
    pub areas: Vec<u32>,
}

impl ComponentMap {
    /// Number of labeled regions.
    #[inline]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    #[inline]
    pub fn label(&self, x: usize, y: usize) -> u32 {
        self.labels[y * self.width + x]
    }

    /// Keep regions whose area satisfies `keep`, relabeling survivors densely
    /// while preserving their order.
    pub fn retain_by_area(mut self, mut keep: impl FnMut(u32) -> bool) -> Self {
        let mut remap = vec![0u32; self.areas.len() + 1];
        let mut areas = Vec::new();
        for (idx, &area) in self.areas.iter().enumerate() {
            if keep(area) {
                areas.push(area);
                remap[idx + 1] = areas.len() as u32;
            }
        }
        for l in &mut self.labels {
            *l = remap[*l as usize];
        }
        self.areas = areas;
        self
    }
}

const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Label the 8-connected foreground regions of `mask`.
pub fn label_components(mask: &BinaryMask) -> ComponentMap {
    let (w, h) = (mask.width, mask.height);
    let mut labels = vec![0u32; w * h];
    let mut areas = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for start in 0..w * h {
        if mask.data[start] == 0 || labels[start] != 0 {
            continue;
        }
        let label = areas.len() as u32 + 1;
        let mut area = 0u32;
        labels[start] = label;
        stack.push(start);

        while let Some(idx) = stack.pop() {
            area += 1;
            let (x, y) = ((idx % w) as isize, (idx / w) as isize);
            for (dx, dy) in NEIGHBORS {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let n = ny as usize * w + nx as usize;
                if mask.data[n] != 0 && labels[n] == 0 {
                    labels[n] = label;
                    stack.push(n);
                }
            }
        }
        areas.push(area);
    }

    ComponentMap {
        width: w,
        height: h,
        labels,
        areas,
    }
}
