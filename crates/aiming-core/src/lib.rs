//! Core types shared by the aiming crates.
//!
//! This crate holds the plain data the vision pipeline moves around: color
//! frames, binary masks, pixel rectangles and the target classes we aim at.
//! It does *not* know how frames are acquired or how particles are scored.

mod geometry;
mod image;
mod logger;
mod target;

pub use geometry::PixelRect;
pub use image::{BinaryMask, ImageError, RgbImage, RgbImageView};
pub use target::TargetClass;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
