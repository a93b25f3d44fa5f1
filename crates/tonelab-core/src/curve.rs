//! Keyframed transfer-curve evaluation.
//!
//! Implements cubic Hermite interpolation through user-defined keyframes.
//! Each grading configuration carries four curves (red, green, blue,
//! luminance), each an independent 1D transfer function over [0, 1].
//!
//! # Algorithm
//! For a segment between keys K0 and K1 with dt = K1.position − K0.position
//! and local parameter t:
//! ```text
//! q(t) = (2t³ − 3t² + 1)×V0 + (t³ − 2t² + t)×dt×M0
//!      + (−2t³ + 3t²)×V1 + (t³ − t²)×dt×M1
//! ```
//! where M0 is K0's outgoing tangent and M1 is K1's incoming tangent.
//!
//! # Complexity
//! - Evaluate: O(log N) binary search + O(1) interpolation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// Identifies one of the four transfer curves in a [`CurveSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveChannel {
    Red,
    Green,
    Blue,
    /// Secondary remap applied identically to all three color channels.
    Luminance,
}

impl fmt::Display for CurveChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Luminance => "luminance",
        };
        f.write_str(name)
    }
}

/// A single control point of a [`TransferCurve`].
///
/// Tangents are slopes (dy/dx); the outgoing tangent shapes the segment
/// after this key, the incoming tangent the segment before it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub position: f32,
    pub value: f32,
    pub in_tangent: f32,
    pub out_tangent: f32,
}

impl Keyframe {
    /// Keyframe with flat tangents.
    pub fn new(position: f32, value: f32) -> Self {
        Self {
            position,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    pub fn with_tangents(position: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            position,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// A 1D transfer function defined by keyframes sorted by position.
///
/// Evaluation clamps at the outer keys, so the curve is defined for any
/// finite input. The default curve is the identity line from (0,0) to (1,1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferCurve {
    keys: Vec<Keyframe>,
}

impl Default for TransferCurve {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransferCurve {
    /// The identity line: evaluates to its input over [0, 1].
    pub fn identity() -> Self {
        Self::linear(0.0, 0.0, 1.0, 1.0)
    }

    /// A straight line between two points, tangents set to the line's slope.
    pub fn linear(p0: f32, v0: f32, p1: f32, v1: f32) -> Self {
        let slope = if (p1 - p0).abs() < 1e-10 {
            0.0
        } else {
            (v1 - v0) / (p1 - p0)
        };
        Self {
            keys: vec![
                Keyframe::with_tangents(p0, v0, slope, slope),
                Keyframe::with_tangents(p1, v1, slope, slope),
            ],
        }
    }

    /// Build a curve from raw keyframes. Validity (non-empty, sorted by
    /// position) is checked at commit time via [`TransferCurve::validate`],
    /// not here.
    pub fn from_keys(keys: Vec<Keyframe>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Check that this curve can be evaluated: at least one keyframe, and
    /// positions in ascending order.
    pub fn validate(&self, channel: CurveChannel) -> Result<(), CurveError> {
        if self.keys.is_empty() {
            return Err(CurveError::Empty { channel });
        }
        for (index, pair) in self.keys.windows(2).enumerate() {
            if pair[1].position < pair[0].position {
                return Err(CurveError::UnsortedKeys {
                    channel,
                    index: index + 1,
                });
            }
        }
        Ok(())
    }

    /// Evaluate the curve at position `u`.
    ///
    /// Pure, no side effects. Inputs outside the key range are clamped to
    /// the first/last key's value; a single-key curve is constant.
    ///
    /// Assumes a validated curve; an empty curve returns `u` unchanged so
    /// the function stays total (commit paths reject empty curves before
    /// they reach evaluation).
    pub fn evaluate(&self, u: f32) -> f32 {
        let keys = &self.keys;
        let Some(first) = keys.first() else {
            return u;
        };
        let last = &keys[keys.len() - 1];

        // Clamp to range
        if u <= first.position {
            return first.value;
        }
        if u >= last.position {
            return last.value;
        }

        // Binary search for the segment containing u
        let mut lo = 0;
        let mut hi = keys.len() - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if keys[mid].position <= u {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let k0 = &keys[lo];
        let k1 = &keys[hi];

        let dt = k1.position - k0.position;
        let t = if dt.abs() < 1e-10 {
            0.5
        } else {
            (u - k0.position) / dt
        };

        hermite(k0.value, k0.out_tangent * dt, k1.value, k1.in_tangent * dt, t)
    }
}

/// Cubic Hermite interpolation between V0 and V1 with scaled tangents.
fn hermite(v0: f32, m0: f32, v1: f32, m1: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    (2.0 * t3 - 3.0 * t2 + 1.0) * v0
        + (t3 - 2.0 * t2 + t) * m0
        + (-2.0 * t3 + 3.0 * t2) * v1
        + (t3 - t2) * m1
}

/// The four transfer curves of one grading configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveSet {
    pub red: TransferCurve,
    pub green: TransferCurve,
    pub blue: TransferCurve,
    pub luminance: TransferCurve,
}

impl CurveSet {
    pub fn channel(&self, channel: CurveChannel) -> &TransferCurve {
        match channel {
            CurveChannel::Red => &self.red,
            CurveChannel::Green => &self.green,
            CurveChannel::Blue => &self.blue,
            CurveChannel::Luminance => &self.luminance,
        }
    }

    pub fn channel_mut(&mut self, channel: CurveChannel) -> &mut TransferCurve {
        match channel {
            CurveChannel::Red => &mut self.red,
            CurveChannel::Green => &mut self.green,
            CurveChannel::Blue => &mut self.blue,
            CurveChannel::Luminance => &mut self.luminance,
        }
    }

    /// Validate all four curves, reporting the first failure.
    pub fn validate(&self) -> Result<(), CurveError> {
        self.red.validate(CurveChannel::Red)?;
        self.green.validate(CurveChannel::Green)?;
        self.blue.validate(CurveChannel::Blue)?;
        self.luminance.validate(CurveChannel::Luminance)?;
        Ok(())
    }
}
