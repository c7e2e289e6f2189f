use crate::{FrameError, Stage};

/// Errors that abandon a pipeline cycle.
///
/// None of these leave the pipeline: [`crate::VisionPipeline::tick`] logs them
/// and resets to [`Stage::Fetch`].
#[derive(thiserror::Error, Debug)]
pub enum VisionError {
    #[error(transparent)]
    Acquisition(#[from] FrameError),
    #[error("frame buffer does not match {width}x{height} (expected {expected} bytes, got {got})")]
    MalformedFrame {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },
    #[error("mask is {got_width}x{got_height}, expected {width}x{height}")]
    MaskSizeMismatch {
        width: usize,
        height: usize,
        got_width: usize,
        got_height: usize,
    },
    #[error("stage {stage:?} ran without its input buffer")]
    MissingInput { stage: Stage },
}
