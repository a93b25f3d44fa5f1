//! Tonelab Core — domain layer for LUT-based color grading.
//!
//! This crate contains the transfer-curve math, grading parameters, the
//! LUT bake, and the RGBM encoding. No GPU or framework dependencies.

pub mod curve;
pub mod error;
pub mod lut;
pub mod params;

// Re-exports for convenience.
pub use curve::{CurveChannel, CurveSet, Keyframe, TransferCurve};
pub use error::CurveError;
pub use lut::{LUT_SIZE, LutBuffer, Rgbm};
pub use params::{DitherMode, GradeParams};
