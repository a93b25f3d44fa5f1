//! Tonelab Effect — effect configuration and per-frame variant selection.
//!
//! Owns the grading parameters and the baked LUT, keeps the buffer
//! consistent with the committed parameters, and derives the set of
//! active shader feature flags each frame. The host render pipeline is an
//! external collaborator reached through the [`FrameSink`] trait; this
//! crate never touches pixel data or GPU resources.

pub mod config;
pub mod frame;

// Re-exports for convenience.
pub use config::GradeEffect;
pub use frame::{ColorSpace, FeatureFlags, FramePacket, FrameSink};
