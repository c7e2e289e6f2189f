//! Per-channel RGB band thresholding.

use aiming_core::{BinaryMask, RgbImageView};
use serde::{Deserialize, Serialize};

use crate::VisionError;

/// Inclusive `[min, max]` range for one color channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub min: u8,
    pub max: u8,
}

impl ChannelRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(self, v: u8) -> bool {
        self.min <= v && v <= self.max
    }
}

/// Band set for the three channels. A pixel is foreground when every channel
/// falls inside its band.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBands {
    pub red: ChannelRange,
    pub green: ChannelRange,
    pub blue: ChannelRange,
}

impl ThresholdBands {
    /// Wide green band used until the first particle list exists.
    pub const DISCOVERY: ThresholdBands = ThresholdBands {
        red: ChannelRange::new(0, 55),
        green: ChannelRange::new(200, 255),
        blue: ChannelRange::new(165, 255),
    };

    /// Tighter band once the retro-reflective tape has been found.
    pub const STEADY: ThresholdBands = ThresholdBands {
        red: ChannelRange::new(0, 25),
        green: ChannelRange::new(230, 255),
        blue: ChannelRange::new(195, 225),
    };

    #[inline]
    pub fn matches(&self, [r, g, b]: [u8; 3]) -> bool {
        self.red.contains(r) && self.green.contains(g) && self.blue.contains(b)
    }
}

/// Binarize `frame`: 1 where the pixel matches `bands`, 0 elsewhere.
pub fn threshold_rgb(
    frame: &RgbImageView<'_>,
    bands: &ThresholdBands,
) -> Result<BinaryMask, VisionError> {
    if !frame.is_consistent() {
        return Err(VisionError::MalformedFrame {
            width: frame.width,
            height: frame.height,
            expected: frame.expected_len(),
            got: frame.data.len(),
        });
    }

    let mut mask = BinaryMask::new(frame.width, frame.height);
    for (dst, px) in mask.data.iter_mut().zip(frame.data.chunks_exact(3)) {
        *dst = u8::from(bands.matches([px[0], px[1], px[2]]));
    }
    Ok(mask)
}
