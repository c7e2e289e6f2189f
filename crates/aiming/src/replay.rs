//! Feed recorded camera frames from disk through the pipeline.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use aiming_core::RgbImage;
use aiming_vision::{FrameError, FrameSource};
use log::debug;

#[derive(thiserror::Error, Debug)]
pub enum ReplayError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("no image files found in {0}")]
    NoImages(PathBuf),
}

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "ppm"];

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
}

/// Convert a decoded `image` buffer into the pipeline's frame type.
pub fn rgb_frame(img: &::image::DynamicImage) -> RgbImage {
    let rgb = img.to_rgb8();
    RgbImage {
        width: rgb.width() as usize,
        height: rgb.height() as usize,
        data: rgb.into_raw(),
    }
}

/// Loads one frame per request from a queue of image files.
///
/// Once the queue is empty every request fails with [`FrameError::NoFrame`].
#[derive(Clone, Debug, Default)]
pub struct ImageFileSource {
    pending: VecDeque<PathBuf>,
    current: Option<PathBuf>,
}

impl ImageFileSource {
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            pending: paths.into_iter().collect(),
            current: None,
        }
    }

    /// Every image file directly inside `dir`, in file-name order.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_image_file(&path) {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            return Err(ReplayError::NoImages(dir.to_path_buf()));
        }
        paths.sort();
        Ok(Self::from_paths(paths))
    }

    /// Expand directories into their image files; plain files are kept as is.
    pub fn from_inputs(inputs: &[PathBuf]) -> Result<Self, ReplayError> {
        let mut paths = Vec::new();
        for input in inputs {
            if input.is_dir() {
                paths.extend(Self::from_dir(input)?.pending);
            } else {
                paths.push(input.clone());
            }
        }
        Ok(Self::from_paths(paths))
    }

    /// Files not handed out yet.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// File behind the most recent frame request.
    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }
}

impl FrameSource for ImageFileSource {
    fn get_frame(&mut self) -> Result<RgbImage, FrameError> {
        let path = self.pending.pop_front().ok_or(FrameError::NoFrame)?;
        debug!("loading frame {}", path.display());
        let decoded = ::image::open(&path)
            .map_err(|e| FrameError::Unavailable(format!("{}: {e}", path.display())));
        self.current = Some(path);
        Ok(rgb_frame(&decoded?))
    }
}
