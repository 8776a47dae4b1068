use super::*;

#[test]
fn export_fps_rounds_duration_to_frames() {
    assert_eq!(Fps::EXPORT.secs_to_frames_round(2.0), 40);
    assert_eq!(Fps::EXPORT.secs_to_frames_round(0.5), 10);
    assert_eq!(Fps::EXPORT.secs_to_frames_round(1.27), 25);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(1, 0).is_err());
}

#[test]
fn size_norm_uses_smaller_side() {
    assert_eq!(Canvas::new(128, 128).size_norm(), 1.0);
    assert_eq!(Canvas::new(300, 200).size_norm(), 200.0 / 128.0);
    assert_eq!(Canvas::new(64, 512).size_norm(), 0.5);
}

#[test]
fn hsl_primaries() {
    assert_eq!(Rgba8::from_hsl(0.0, 1.0, 0.5), Rgba8::new(255, 0, 0, 255));
    assert_eq!(Rgba8::from_hsl(120.0, 1.0, 0.5), Rgba8::new(0, 255, 0, 255));
    assert_eq!(Rgba8::from_hsl(240.0, 1.0, 0.5), Rgba8::new(0, 0, 255, 255));
    assert_eq!(Rgba8::from_hsl(360.0, 1.0, 0.5), Rgba8::new(255, 0, 0, 255));
}

#[test]
fn opacity_scales_alpha_only() {
    let c = Rgba8::WHITE.with_opacity(0.2);
    assert_eq!(c, Rgba8::new(255, 255, 255, 51));
    assert_eq!(Rgba8::WHITE.with_opacity(f32::NAN), Rgba8::WHITE);
    assert!(Rgba8::new(0, 0, 0, 10).is_black());
}
