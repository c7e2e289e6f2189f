use aiming_core::{ImageError, RgbImage};

/// Transient failures while acquiring a frame.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    #[error("camera unavailable: {0}")]
    Unavailable(String),
    #[error("no new frame available")]
    NoFrame,
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Anything that can hand the pipeline a color frame on request.
///
/// Implementations may fail at any time; the pipeline treats every error as
/// transient and simply tries again on the next cycle.
pub trait FrameSource {
    fn get_frame(&mut self) -> Result<RgbImage, FrameError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn get_frame(&mut self) -> Result<RgbImage, FrameError> {
        (**self).get_frame()
    }
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn get_frame(&mut self) -> Result<RgbImage, FrameError> {
        (**self).get_frame()
    }
}
