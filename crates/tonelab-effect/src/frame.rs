//! Per-frame variant selection and the render-collaborator contract.
//!
//! Feature flags are computed fresh on every frame from the current
//! parameters plus the host's color-space query, and handed to the render
//! collaborator by value — there is no shared mutable shader state.

use tonelab_core::{DitherMode, GradeParams, Rgbm};

use crate::config::GradeEffect;

/// Shader keyword asserted when the pipeline works in linear color space.
pub const KEYWORD_LINEAR: &str = "LINEAR_ON";
/// Shader keyword for the tonemapping variant.
pub const KEYWORD_TONEMAPPING: &str = "TONEMAPPING_ON";
/// Shader keyword for the vignette variant.
pub const KEYWORD_VIGNETTE: &str = "VIGNETTE_ON";
/// Shader keyword for ordered dithering.
pub const KEYWORD_DITHER_ORDERED: &str = "DITHER_ORDERED";
/// Shader keyword for triangular dithering.
pub const KEYWORD_DITHER_TRIANGULAR: &str = "DITHER_TRIANGULAR";

/// Working color space of the host render pipeline, polled once per frame
/// from the host's color-space query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Linear,
    Gamma,
}

/// The set of shader feature variants active for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub linear: bool,
    pub tonemapping: bool,
    pub vignette: bool,
    pub dither_ordered: bool,
    pub dither_triangular: bool,
}

impl FeatureFlags {
    /// Derive the active variant set from the current parameters.
    ///
    /// At most one dither flag is set; `DitherMode::Off` asserts neither.
    pub fn derive(params: &GradeParams, color_space: ColorSpace) -> Self {
        Self {
            linear: color_space == ColorSpace::Linear,
            tonemapping: params.tonemapping,
            vignette: params.vignette > 0.0,
            dither_ordered: params.dither == DitherMode::Ordered,
            dither_triangular: params.dither == DitherMode::Triangular,
        }
    }

    /// Keywords to enable on a string-keyed material API.
    pub fn active_keywords(&self) -> Vec<&'static str> {
        let mut keywords = Vec::with_capacity(4);
        if self.linear {
            keywords.push(KEYWORD_LINEAR);
        }
        if self.tonemapping {
            keywords.push(KEYWORD_TONEMAPPING);
        }
        if self.vignette {
            keywords.push(KEYWORD_VIGNETTE);
        }
        if self.dither_ordered {
            keywords.push(KEYWORD_DITHER_ORDERED);
        }
        if self.dither_triangular {
            keywords.push(KEYWORD_DITHER_TRIANGULAR);
        }
        keywords
    }
}

/// Everything the shader pass needs for one frame, computed fresh and
/// immutable once built.
///
/// `exposure` is `Some` iff the tonemapping variant is active; `vignette`
/// is `Some` iff the vignette variant is active. The LUT records cast to
/// bytes with `bytemuck` for texture upload; the sink must use clamp
/// addressing at the edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePacket<'a> {
    pub lut: &'a [Rgbm],
    pub saturation: f32,
    pub exposure: Option<f32>,
    pub vignette: Option<f32>,
    pub flags: FeatureFlags,
}

/// The render collaborator: consumes one frame's LUT, uniforms, and
/// variant flags. Implemented by the host pipeline, never by this crate.
pub trait FrameSink {
    fn submit(&mut self, packet: FramePacket<'_>);
}

impl GradeEffect {
    /// Assemble the per-frame packet from the committed state.
    ///
    /// The synchronous-rebuild policy guarantees the buffer is clean by
    /// the time a frame reads it.
    pub fn frame_packet(&self, color_space: ColorSpace) -> FramePacket<'_> {
        debug_assert!(!self.is_dirty(), "frame read from a dirty LUT buffer");
        let params = self.params();
        FramePacket {
            lut: self.lut().records(),
            saturation: params.saturation,
            exposure: params.tonemapping.then_some(params.exposure),
            vignette: (params.vignette > 0.0).then_some(params.vignette),
            flags: FeatureFlags::derive(params, color_space),
        }
    }

    /// Push the current frame's packet to the render collaborator.
    pub fn push_frame(&self, sink: &mut dyn FrameSink, color_space: ColorSpace) {
        sink.submit(self.frame_packet(color_space));
    }
}
