//! LUT bake and RGBM encoding.
//!
//! The bake samples the full grading transform (per-channel curve,
//! contrast pivoted at mid-gray, luminance remap, brightness blend) at
//! `size` positions across [0, 1] and stores each result as an RGBM
//! record, ready for upload as a 1×N clamp-addressed texture.
//!
//! # Complexity
//! Bake: O(size × log K) for K keyframes per curve.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::curve::{CurveSet, TransferCurve};
use crate::error::CurveError;

/// Number of samples in a baked LUT (1×512 texture).
pub const LUT_SIZE: usize = 512;

/// Floor applied to the shared multiplier so near-black input never
/// divides by zero.
const ENCODE_FLOOR: f32 = 1e-6;

/// One RGBM-encoded LUT sample: channels divided by a shared multiplier
/// `m`, all four components in [0, 1] and storable at 8 bits each.
///
/// The multiplier is quantized to 1/255 steps to match 8-bit storage.
/// Encoding is lossy and one-way; the shader reconstructs `channel × m`
/// on the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Rgbm {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub m: f32,
}

impl Rgbm {
    /// Encode an RGB triple. Channels are expected in [0, 1]; the shared
    /// multiplier is the ceiling of the largest channel in 1/255 steps.
    pub fn encode(rgb: Vec3) -> Self {
        let m = (rgb.max_element().max(ENCODE_FLOOR) * 255.0).ceil() / 255.0;
        Self {
            r: rgb.x / m,
            g: rgb.y / m,
            b: rgb.z / m,
            m,
        }
    }

    /// CPU-side reconstruction of the encoded color.
    ///
    /// The shader performs this on the GPU; this counterpart exists for
    /// tests and debugging.
    pub fn decode(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b) * self.m
    }
}

/// A baked color-grading LUT: `size` RGBM records indexed by quantized
/// input level.
///
/// Always regenerated wholesale; identical inputs produce byte-identical
/// buffers. The edge records are the true domain endpoints, so the upload
/// sink must use clamp addressing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LutBuffer {
    records: Vec<Rgbm>,
}

impl LutBuffer {
    /// Bake the grading transform into a fresh buffer.
    ///
    /// Per sample x with u = x / (size − 1), each color channel is:
    /// 1. evaluated through its transfer curve,
    /// 2. contrast-scaled around the 0.5 pivot,
    /// 3. remapped through the shared luminance curve,
    /// 4. blended toward the brightness target by |brightness|.
    ///
    /// The brightness target is +1 for positive brightness and −1
    /// otherwise; the blended result is clamped to [0, 1] before encoding,
    /// which floors the negative target at black while keeping the
    /// steeper darkening ramp it produces.
    ///
    /// Fails with [`CurveError`] if any curve is empty or unsorted,
    /// producing no buffer.
    pub fn bake(
        curves: &CurveSet,
        brightness: f32,
        contrast: f32,
        size: usize,
    ) -> Result<Self, CurveError> {
        curves.validate()?;

        let blend_target = if brightness > 0.0 { 1.0 } else { -1.0 };
        let blend = brightness.abs().min(1.0);
        let step = 1.0 / (size.max(2) - 1) as f32;

        let mut records = Vec::with_capacity(size);
        for x in 0..size {
            let u = step * x as f32;
            let graded = Vec3::new(
                grade_channel(&curves.red, &curves.luminance, u, contrast),
                grade_channel(&curves.green, &curves.luminance, u, contrast),
                grade_channel(&curves.blue, &curves.luminance, u, contrast),
            );
            let rgb = graded
                .lerp(Vec3::splat(blend_target), blend)
                .clamp(Vec3::ZERO, Vec3::ONE);
            records.push(Rgbm::encode(rgb));
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Rgbm] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Byte view of the records for the texture upload sink
    /// (1×N layout, RGBM channel order).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records)
    }
}

/// One channel of the bake chain: curve → contrast pivot → luminance remap.
fn grade_channel(channel: &TransferCurve, luminance: &TransferCurve, u: f32, contrast: f32) -> f32 {
    luminance.evaluate((channel.evaluate(u) - 0.5) * contrast + 0.5)
}
