//! Error types for curve validation and the LUT bake.

use crate::curve::CurveChannel;

/// A transfer curve that cannot be evaluated.
///
/// Surfaced by [`crate::lut::LutBuffer::bake`] and by curve-commit paths;
/// a rejected curve never replaces a committed LUT buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    #[error("{channel} curve has no keyframes")]
    Empty { channel: CurveChannel },
    #[error("{channel} curve keyframes out of order at index {index}")]
    UnsortedKeys { channel: CurveChannel, index: usize },
}
