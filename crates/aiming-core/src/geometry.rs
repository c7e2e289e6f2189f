use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle, stored the way particle reports are:
/// top, left, height, width.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub top: usize,
    pub left: usize,
    pub height: usize,
    pub width: usize,
}

impl PixelRect {
    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> usize {
        self.left + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> usize {
        self.top + self.height
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Smallest rectangle spanning the inclusive pixel bounds.
    pub fn from_bounds(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Self {
        Self {
            top: min_y,
            left: min_x,
            height: max_y + 1 - min_y,
            width: max_x + 1 - min_x,
        }
    }
}
