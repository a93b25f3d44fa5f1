//! End-to-end behavior of one effect instance across parameter changes
//! and simulated render frames.

use tonelab_core::{CurveChannel, DitherMode, LUT_SIZE, TransferCurve};
use tonelab_effect::{ColorSpace, FramePacket, FrameSink, GradeEffect};

/// Captures what the host pipeline would receive each frame.
#[derive(Default)]
struct RecordingSink {
    frames: Vec<CapturedFrame>,
}

struct CapturedFrame {
    lut_len: usize,
    saturation: f32,
    exposure: Option<f32>,
    vignette: Option<f32>,
    keywords: Vec<&'static str>,
}

impl FrameSink for RecordingSink {
    fn submit(&mut self, packet: FramePacket<'_>) {
        self.frames.push(CapturedFrame {
            lut_len: packet.lut.len(),
            saturation: packet.saturation,
            exposure: packet.exposure,
            vignette: packet.vignette,
            keywords: packet.flags.active_keywords(),
        });
    }
}

#[test]
fn default_effect_submits_identity_lut() {
    let effect = GradeEffect::new();
    let mut sink = RecordingSink::default();
    effect.push_frame(&mut sink, ColorSpace::Gamma);

    let frame = &sink.frames[0];
    assert_eq!(frame.lut_len, LUT_SIZE);
    assert_eq!(frame.saturation, 1.0);
    assert_eq!(frame.exposure, None);
    assert_eq!(frame.vignette, None);
    assert!(frame.keywords.is_empty());

    // Sample 256 of 512 decodes to mid-gray.
    let rgb = effect.lut().records()[256].decode();
    for c in 0..3 {
        assert!((rgb[c] - 0.5).abs() < 0.01, "channel {c}: {:.6}", rgb[c]);
    }
}

#[test]
fn dither_mode_switch_flips_keywords() {
    let mut effect = GradeEffect::new();
    let mut sink = RecordingSink::default();

    effect.set_dither(DitherMode::Ordered);
    effect.push_frame(&mut sink, ColorSpace::Gamma);
    effect.set_dither(DitherMode::Triangular);
    effect.push_frame(&mut sink, ColorSpace::Gamma);
    effect.set_dither(DitherMode::Off);
    effect.push_frame(&mut sink, ColorSpace::Gamma);

    assert_eq!(sink.frames[0].keywords, vec!["DITHER_ORDERED"]);
    assert_eq!(sink.frames[1].keywords, vec!["DITHER_TRIANGULAR"]);
    assert!(sink.frames[2].keywords.is_empty());
}

#[test]
fn vignette_strength_passes_through_unchanged() {
    let mut effect = GradeEffect::new();
    let mut sink = RecordingSink::default();

    effect.push_frame(&mut sink, ColorSpace::Gamma);
    effect.set_vignette(0.3);
    effect.push_frame(&mut sink, ColorSpace::Gamma);

    assert_eq!(sink.frames[0].vignette, None);
    assert_eq!(sink.frames[1].vignette, Some(0.3));
    assert_eq!(sink.frames[1].keywords, vec!["VIGNETTE_ON"]);
}

#[test]
fn linear_color_space_asserts_linear_keyword() {
    let effect = GradeEffect::new();
    let mut sink = RecordingSink::default();
    effect.push_frame(&mut sink, ColorSpace::Linear);
    assert_eq!(sink.frames[0].keywords, vec!["LINEAR_ON"]);
}

#[test]
fn saturation_changes_between_frames_leave_lut_untouched() {
    let mut effect = GradeEffect::new();
    let before = effect.lut().as_bytes().to_vec();

    let mut sink = RecordingSink::default();
    effect.set_saturation(0.4);
    effect.push_frame(&mut sink, ColorSpace::Gamma);
    effect.set_saturation(1.6);
    effect.push_frame(&mut sink, ColorSpace::Gamma);

    assert_eq!(sink.frames[0].saturation, 0.4);
    assert_eq!(sink.frames[1].saturation, 1.6);
    assert_eq!(effect.lut().as_bytes(), before.as_slice());
}

#[test]
fn rejected_curve_leaves_render_state_consistent() {
    let mut effect = GradeEffect::new();
    let before = effect.lut().as_bytes().to_vec();

    let bad = TransferCurve::from_keys(Vec::new());
    assert!(effect.set_curve(CurveChannel::Blue, bad).is_err());

    // The next frame still renders from the previous committed buffer.
    let mut sink = RecordingSink::default();
    effect.push_frame(&mut sink, ColorSpace::Gamma);
    assert_eq!(sink.frames[0].lut_len, LUT_SIZE);
    assert_eq!(effect.lut().as_bytes(), before.as_slice());
}

#[test]
fn full_grade_round_trip_stays_in_range() {
    let mut effect = GradeEffect::new();
    effect.set_brightness(-0.2);
    effect.set_contrast(1.4);
    effect
        .set_curve(CurveChannel::Red, TransferCurve::linear(0.0, 0.05, 1.0, 0.95))
        .unwrap();

    for record in effect.lut().records() {
        let rgb = record.decode();
        for c in 0..3 {
            assert!(
                (0.0..=1.0 + 1e-4).contains(&rgb[c]),
                "decoded channel {c} out of range: {:.6}",
                rgb[c]
            );
        }
        assert!(record.m > 0.0 && record.m <= 1.0);
    }
}
