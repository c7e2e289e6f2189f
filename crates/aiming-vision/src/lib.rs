//! Image processing pipeline for the aiming subsystem.
//!
//! Stages, one per control-loop tick:
//! - fetch a color frame from a [`FrameSource`],
//! - threshold it against fixed RGB bands,
//! - replace every connected region by its filled convex hull,
//! - drop regions outside the area limits,
//! - measure the survivors into [`Particle`]s.
//!
//! [`VisionPipeline::tick`] advances exactly one stage and never fails: a
//! broken cycle is logged, abandoned and the machine starts over at fetch.

mod components;
mod error;
mod hull;
mod particle;
mod pipeline;
mod source;
mod threshold;

pub use components::{label_components, ComponentMap};
pub use error::VisionError;
pub use hull::convex_hull_fill;
pub use particle::{measure_particles, AreaLimits, Particle};
pub use pipeline::{ParticleReport, PipelineParams, Stage, TickOutcome, VisionPipeline};
pub use source::{FrameError, FrameSource};
pub use threshold::{threshold_rgb, ChannelRange, ThresholdBands};
