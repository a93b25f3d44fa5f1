//! Scalar grading parameters.
//!
//! `GradeParams` is the single source of truth for all scalar adjustments.
//! Brightness and contrast are folded into the baked LUT; everything else
//! is read live by the per-frame variant selection.

use serde::{Deserialize, Serialize};

/// Output dithering applied by the shader pass. The modes are mutually
/// exclusive; the variant selection asserts at most one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DitherMode {
    #[default]
    Off,
    /// Ordered (Bayer-matrix) dithering.
    Ordered,
    /// Triangular-PDF noise dithering.
    Triangular,
}

/// Every setter writes here; the LUT bake and the per-frame variant
/// selection read the full struct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeParams {
    /// Brightness blend. Positive lightens toward white, negative darkens.
    /// Nominal range [-1, 1]; 0.0 = neutral. Folded into the LUT.
    pub brightness: f32,
    /// Contrast multiplier pivoted at mid-gray. 1.0 = neutral.
    /// Folded into the LUT.
    pub contrast: f32,
    /// Saturation multiplier, consumed by the shader pass only.
    /// 1.0 = neutral. Never invalidates the LUT.
    pub saturation: f32,
    /// Whether the tonemapping shader variant is active.
    pub tonemapping: bool,
    /// Exposure for the tonemapping variant. Only read when
    /// `tonemapping` is set.
    pub exposure: f32,
    /// Vignette strength. 0.0 disables the vignette variant.
    pub vignette: f32,
    /// Output dithering mode.
    pub dither: DitherMode,
}

impl Default for GradeParams {
    /// Produces a neutral grade — the baked LUT is the identity mapping
    /// and no optional shader variant is active.
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
            saturation: 1.0,
            tonemapping: false,
            exposure: 1.8,
            vignette: 0.0,
            dither: DitherMode::Off,
        }
    }
}
