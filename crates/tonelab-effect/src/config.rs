//! Effect configuration: parameter ownership and LUT lifecycle.
//!
//! Setters are the ONLY place grading state changes. Anything folded into
//! the LUT (curves, brightness, contrast) invalidates the buffer and
//! rebuilds it synchronously, so the per-frame read path only ever sees a
//! clean buffer. Saturation and the flag-only parameters never touch it.

use std::time::Instant;

use tonelab_core::{
    CurveChannel, CurveError, CurveSet, DitherMode, GradeParams, LUT_SIZE, LutBuffer,
    TransferCurve,
};

/// One color-grading effect instance: full parameter set, the four
/// transfer curves, and the baked LUT with its dirty flag.
///
/// Single-threaded by design — one instance per rendering context, no
/// internal locking. Construction bakes immediately, so a fresh effect is
/// clean before first use.
#[derive(Debug, Clone)]
pub struct GradeEffect {
    params: GradeParams,
    curves: CurveSet,
    lut: LutBuffer,
    dirty: bool,
}

impl Default for GradeEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl GradeEffect {
    /// Neutral effect: identity curves, neutral scalars, identity LUT.
    pub fn new() -> Self {
        let mut effect = Self {
            params: GradeParams::default(),
            curves: CurveSet::default(),
            lut: LutBuffer::default(),
            dirty: true,
        };
        effect.rebuild();
        effect
    }

    /// Build an effect from existing parameters and curves, validating the
    /// curves before the first bake.
    pub fn from_parts(params: GradeParams, curves: CurveSet) -> Result<Self, CurveError> {
        curves.validate()?;
        let mut effect = Self {
            params,
            curves,
            lut: LutBuffer::default(),
            dirty: true,
        };
        effect.rebuild();
        Ok(effect)
    }

    pub fn params(&self) -> &GradeParams {
        &self.params
    }

    pub fn curves(&self) -> &CurveSet {
        &self.curves
    }

    pub fn lut(&self) -> &LutBuffer {
        &self.lut
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ── Parameters folded into the LUT ──────────────────────────

    /// Replace one transfer curve. The curve is validated before it is
    /// committed; on error the previous curve and buffer are retained.
    pub fn set_curve(
        &mut self,
        channel: CurveChannel,
        curve: TransferCurve,
    ) -> Result<(), CurveError> {
        curve.validate(channel)?;
        if *self.curves.channel(channel) != curve {
            *self.curves.channel_mut(channel) = curve;
            self.invalidate();
            self.rebuild();
        }
        Ok(())
    }

    pub fn set_brightness(&mut self, brightness: f32) {
        if self.params.brightness != brightness {
            self.params.brightness = brightness;
            self.invalidate();
            self.rebuild();
        }
    }

    pub fn set_contrast(&mut self, contrast: f32) {
        if self.params.contrast != contrast {
            self.params.contrast = contrast;
            self.invalidate();
            self.rebuild();
        }
    }

    // ── Parameters read live each frame ─────────────────────────

    pub fn set_saturation(&mut self, saturation: f32) {
        self.params.saturation = saturation;
    }

    pub fn set_tonemapping(&mut self, enabled: bool) {
        self.params.tonemapping = enabled;
    }

    pub fn set_exposure(&mut self, exposure: f32) {
        self.params.exposure = exposure;
    }

    pub fn set_vignette(&mut self, strength: f32) {
        self.params.vignette = strength;
    }

    pub fn set_dither(&mut self, mode: DitherMode) {
        self.params.dither = mode;
    }

    // ── Buffer lifecycle ────────────────────────────────────────

    /// Explicit "parameters changed" notification: marks the buffer dirty
    /// without rebuilding. Idempotent.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Drop the baked storage and mark the buffer dirty.
    pub fn reset_storage(&mut self) {
        self.lut = LutBuffer::default();
        self.dirty = true;
    }

    /// Rebuild the LUT if dirty. Idempotent; identical committed
    /// parameters produce a byte-identical buffer.
    ///
    /// Committed curves are always validated, so the bake cannot fail
    /// through the public API; if it ever does, the previous buffer is
    /// retained and the effect stays dirty.
    pub fn rebuild(&mut self) {
        if !self.dirty {
            return;
        }

        let start = Instant::now();
        match LutBuffer::bake(
            &self.curves,
            self.params.brightness,
            self.params.contrast,
            LUT_SIZE,
        ) {
            Ok(lut) => {
                self.lut = lut;
                self.dirty = false;
                tracing::debug!(
                    "lut rebuilt: {} samples in {:.2}ms",
                    LUT_SIZE,
                    start.elapsed().as_secs_f64() * 1000.0
                );
            }
            Err(err) => {
                tracing::error!("lut rebuild rejected: {err}");
            }
        }
    }
}
