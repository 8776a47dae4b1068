use super::*;
use crate::foundation::core::Affine;
use crate::render::recording::{DrawCall, DrawOp, RecordingSurface};
use crate::style::model::{AnimationKind, PatternKind};

fn style(text: &str) -> StyleConfig {
    StyleConfig {
        text: text.to_owned(),
        ..StyleConfig::default()
    }
}

fn render(style: &StyleConfig, t: f64) -> RecordingSurface {
    let mut s = RecordingSurface::new(style.canvas.width, style.canvas.height);
    render_frame(&mut s, style, style.canvas.width, style.canvas.height, t).unwrap();
    s
}

fn text_ops(s: &RecordingSurface) -> Vec<&DrawCall> {
    s.calls()
        .iter()
        .filter(|c| matches!(c.op, DrawOp::FillText { .. } | DrawOp::StrokeText { .. }))
        .collect()
}

#[test]
fn pulse_scale_is_identity_at_start_and_peaks_at_quarter() {
    let st = style("WOW");
    let at0 = render(&st, 0.0);
    let at1 = render(&st, 0.25);
    let tr0 = text_ops(&at0)[0].transform;
    let tr1 = text_ops(&at1)[0].transform;
    assert_eq!(tr0, Affine::translate((64.0, 64.0)));
    let scaled = tr1 * Point::new(10.0, 0.0);
    assert!((scaled.x - (64.0 + 12.0)).abs() < 1e-9);
}

#[test]
fn transparent_background_skips_fill() {
    let st = style("WOW");
    let s = render(&st, 0.0);
    assert!(!s.calls().iter().any(|c| matches!(c.op, DrawOp::FillRect { .. })));

    let opaque = StyleConfig {
        transparent_background: false,
        background_color: Rgba8::new(1, 2, 3, 255),
        ..style("WOW")
    };
    let s = render(&opaque, 0.0);
    match &s.calls()[0].op {
        DrawOp::FillRect { rect, color } => {
            assert_eq!(*rect, Rect::new(0.0, 0.0, 128.0, 128.0));
            assert_eq!(*color, Rgba8::new(1, 2, 3, 255));
        }
        other => panic!("expected background fill, got {other:?}"),
    }
}

#[test]
fn outline_precedes_fill_and_scales_with_canvas() {
    let st = StyleConfig {
        canvas: crate::foundation::core::Canvas::new(256, 256),
        ..style("WOW")
    };
    let s = render(&st, 0.0);
    let ops = text_ops(&s);
    assert_eq!(ops.len(), 2);
    assert!(matches!(
        ops[0].op,
        DrawOp::StrokeText { color: OUTLINE_COLOR, width, .. } if (width - 4.0).abs() < 1e-12
    ));
    assert!(matches!(ops[1].op, DrawOp::FillText { .. }));
}

#[test]
fn black_text_on_transparent_background_has_no_outline() {
    let st = StyleConfig {
        text_color: Rgba8::BLACK,
        ..style("WOW")
    };
    let s = render(&st, 0.0);
    assert!(
        !s.calls()
            .iter()
            .any(|c| matches!(c.op, DrawOp::StrokeText { .. }))
    );

    let opaque = StyleConfig {
        transparent_background: false,
        ..st
    };
    let s = render(&opaque, 0.0);
    assert!(
        s.calls()
            .iter()
            .any(|c| matches!(c.op, DrawOp::StrokeText { .. }))
    );
}

#[test]
fn lines_are_centered_as_a_block() {
    let st = style("A\nB");
    let s = render(&st, 0.0);
    let centers: Vec<Point> = s
        .calls()
        .iter()
        .filter_map(|c| match &c.op {
            DrawOp::FillText { center, .. } => Some(*center),
            _ => None,
        })
        .collect();
    assert_eq!(centers.len(), 2);
    assert!((centers[0].y + centers[1].y).abs() < 1e-9);
    assert!(centers[0].y < centers[1].y);
}

#[test]
fn empty_text_renders_only_background_and_pattern() {
    let st = StyleConfig {
        pattern: PatternKind::Star,
        ..style("")
    };
    let s = render(&st, 0.4);
    assert!(text_ops(&s).is_empty());
    assert_eq!(s.calls().len(), 20);
}

#[test]
fn blink_alpha_applies_to_text_only() {
    let st = StyleConfig {
        animation: AnimationKind::Blink,
        pattern: PatternKind::Burst,
        ..style("WOW")
    };
    let s = render(&st, 0.75);
    assert_eq!(s.calls()[0].alpha, 1.0);
    assert!(text_ops(&s).iter().all(|c| c.alpha == 0.2));
}

#[test]
fn rainbow_overrides_fill_color() {
    let st = StyleConfig {
        animation: AnimationKind::Rainbow,
        ..style("WOW")
    };
    let s = render(&st, 0.0);
    assert!(s.calls().iter().any(|c| matches!(
        c.op,
        DrawOp::FillText { color, .. } if color == Rgba8::new(255, 0, 0, 255)
    )));
}

#[test]
fn state_stack_is_balanced_after_render() {
    let st = StyleConfig {
        animation: AnimationKind::Spin,
        ..style("HELLO\nWORLD")
    };
    let s = render(&st, 0.3);
    assert_eq!(s.depth(), 0);
    assert_eq!(s.current_transform(), Affine::IDENTITY);
}

#[test]
fn rendering_is_deterministic() {
    let st = StyleConfig {
        animation: AnimationKind::Shake,
        pattern: PatternKind::Heart,
        ..style("HI THERE")
    };
    assert_eq!(render(&st, 0.37).calls(), render(&st, 0.37).calls());
}
