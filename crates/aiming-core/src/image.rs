use crate::PixelRect;

/// Errors raised when wrapping raw pixel buffers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid image buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },
}

/// Borrowed interleaved RGB frame.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h*3
}

impl RgbImageView<'_> {
    /// Expected buffer length for the declared dimensions.
    #[inline]
    pub fn expected_len(&self) -> usize {
        self.width * self.height * 3
    }

    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.expected_len()
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * self.width + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}

/// Owned interleaved RGB frame, as handed out by a frame source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    /// Wrap a raw buffer, checking that its length matches `width * height * 3`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(ImageError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Frame filled with a single color.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 3;
        self.data[idx..idx + 3].copy_from_slice(&rgb);
    }

    /// Paint an axis-aligned rectangle; pixels outside the frame are skipped.
    pub fn fill_rect(&mut self, rect: PixelRect, rgb: [u8; 3]) {
        for y in rect.top..rect.bottom() {
            for x in rect.left..rect.right() {
                self.put_pixel(x, y, rgb);
            }
        }
    }

    pub fn view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Binary bitmap with pixel values 0 or 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl BinaryMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.data[y * self.width + x] = u8::from(on);
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// The part of `rect` that lies inside this mask.
    pub fn clip(&self, rect: PixelRect) -> PixelRect {
        let left = rect.left.min(self.width);
        let top = rect.top.min(self.height);
        PixelRect {
            top,
            left,
            width: rect.right().min(self.width) - left,
            height: rect.bottom().min(self.height) - top,
        }
    }

    /// Mean pixel value of every column inside `rect`, left to right.
    ///
    /// Columns are averaged over the rows of `rect` only. An empty (or fully
    /// off-mask) rectangle yields an empty vector.
    pub fn column_averages(&self, rect: PixelRect) -> Vec<f32> {
        let rect = self.clip(rect);
        if rect.is_empty() {
            return Vec::new();
        }
        let n = rect.height as f32;
        (rect.left..rect.right())
            .map(|x| {
                let on = (rect.top..rect.bottom())
                    .filter(|&y| self.get(x, y))
                    .count();
                on as f32 / n
            })
            .collect()
    }

    /// Mean pixel value of every row inside `rect`, top to bottom.
    pub fn row_averages(&self, rect: PixelRect) -> Vec<f32> {
        let rect = self.clip(rect);
        if rect.is_empty() {
            return Vec::new();
        }
        let n = rect.width as f32;
        (rect.top..rect.bottom())
            .map(|y| {
                let row = &self.data[y * self.width + rect.left..y * self.width + rect.right()];
                row.iter().filter(|&&v| v != 0).count() as f32 / n
            })
            .collect()
    }
}
