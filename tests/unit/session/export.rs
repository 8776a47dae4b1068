use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Rgba8;
use crate::render::recording::RecordingSurface;
use crate::style::model::{AnimationKind, PatternKind};

fn style() -> StyleConfig {
    StyleConfig {
        text: "WOW".to_owned(),
        ..StyleConfig::default()
    }
}

fn date() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn count_gif_frames(bytes: &[u8]) -> (usize, Vec<u16>) {
    let mut dec = ::gif::DecodeOptions::new()
        .read_info(std::io::Cursor::new(bytes))
        .unwrap();
    let mut delays = Vec::new();
    while let Some(f) = dec.read_next_frame().unwrap() {
        delays.push(f.delay);
    }
    (delays.len(), delays)
}

#[test]
fn plan_samples_twenty_frames_per_second() {
    let p = ExportPlan::new(2.0, Fps::EXPORT).unwrap();
    assert_eq!(p.frame_count, 40);
    assert!((p.delay_ms - 50.0).abs() < 1e-4);
    assert_eq!(p.time_of(0), 0.0);
    assert_eq!(p.time_of(20), 0.5);

    let short = ExportPlan::new(0.01, Fps::EXPORT).unwrap();
    assert_eq!(short.frame_count, 1);
    assert!((short.delay_ms - 10.0).abs() < 1e-4);

    let odd = ExportPlan::new(1.23, Fps::EXPORT).unwrap();
    assert_eq!(odd.frame_count, 25);

    assert!(ExportPlan::new(0.0, Fps::EXPORT).is_err());
    assert!(ExportPlan::new(f32::NAN, Fps::EXPORT).is_err());
}

#[test]
fn driver_pushes_every_frame_with_timing() {
    let driver = ExportDriver::new(style(), Fps::EXPORT).unwrap();
    let mut surface = RecordingSurface::new(128, 128);
    let mut sink = InMemorySink::new();
    let stats = driver.run(&mut surface, &mut sink).unwrap();

    assert_eq!(stats.frames_written, 40);
    assert!(sink.is_finished());
    let cfg = sink.config().unwrap();
    assert_eq!(cfg.frame_count, 40);
    assert!(cfg.transparent);
    for (i, (idx, _, meta)) in sink.frames().iter().enumerate() {
        assert_eq!(idx.0, i as u64);
        assert!((meta.delay_ms - 50.0).abs() < 1e-4);
        assert!(meta.transparent);
    }
}

#[test]
fn transparent_exports_binarize_alpha() {
    let driver = ExportDriver::new(style(), Fps::EXPORT).unwrap();
    let mut surface = RecordingSurface::new(128, 128);
    surface.readback_fill = Rgba8::new(255, 255, 255, 100);
    let mut sink = InMemorySink::new();
    driver.run(&mut surface, &mut sink).unwrap();
    let (_, frame, _) = &sink.frames()[0];
    assert!(frame.data.chunks_exact(4).all(|p| p[3] == 0));
}

#[test]
fn opaque_exports_keep_alpha() {
    let opaque = StyleConfig {
        transparent_background: false,
        ..style()
    };
    let driver = ExportDriver::new(opaque, Fps::EXPORT).unwrap();
    let mut surface = RecordingSurface::new(128, 128);
    surface.readback_fill = Rgba8::new(255, 255, 255, 100);
    let mut sink = InMemorySink::new();
    driver.run(&mut surface, &mut sink).unwrap();
    let (_, frame, meta) = &sink.frames()[0];
    assert!(!meta.transparent);
    assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 100]));
}

#[test]
fn driver_rejects_mismatched_surface() {
    let driver = ExportDriver::new(style(), Fps::EXPORT).unwrap();
    let mut surface = RecordingSurface::new(64, 64);
    let mut sink = InMemorySink::new();
    assert!(driver.run(&mut surface, &mut sink).is_err());
    assert!(sink.config().is_none());
}

#[test]
fn progress_reports_each_frame() {
    let driver = ExportDriver::new(style(), Fps::EXPORT).unwrap();
    let mut seen = Vec::new();
    driver
        .run_with_progress(
            &mut RecordingSurface::new(128, 128),
            &mut InMemorySink::new(),
            |n| seen.push(n),
        )
        .unwrap();
    assert_eq!(seen, (1..=40).collect::<Vec<u64>>());
}

#[test]
fn slug_keeps_ascii_words() {
    assert_eq!(slugify("Hello World!"), "hello-world");
    assert_eq!(slugify("OMG\nLOL"), "omg-lol");
    assert_eq!(slugify("  --wow--  "), "wow");
    assert_eq!(slugify("こんにちは"), "text");
    assert_eq!(slugify(""), "text");
    assert_eq!(slugify(&"a".repeat(100)).len(), MAX_SLUG_LEN);
}

#[test]
fn file_name_carries_size_and_date() {
    let st = StyleConfig {
        canvas: crate::foundation::core::Canvas::new(300, 200),
        ..style()
    };
    assert_eq!(
        output_file_name(&st, date()),
        "reaction-wow-300x200-20261019.gif"
    );
}

fn pattern_only() -> StyleConfig {
    StyleConfig {
        text: String::new(),
        pattern: PatternKind::Burst,
        animation: AnimationKind::Spin,
        duration_secs: 1.0,
        ..StyleConfig::default()
    }
}

#[test]
fn export_animation_produces_decodable_gif() {
    let opts = ExportOptions {
        date: Some(date()),
        ..ExportOptions::default()
    };
    let out = export_animation(&pattern_only(), &opts).unwrap();
    assert_eq!(out.frame_count, 20);
    assert_eq!(out.file_name, "reaction-text-128x128-20261019.gif");
    let (n, delays) = count_gif_frames(&out.bytes);
    assert_eq!(n, 20);
    assert!(delays.iter().all(|&d| d == 5));
}

#[test]
fn spawned_export_finishes() {
    let opts = ExportOptions {
        date: Some(date()),
        ..ExportOptions::default()
    };
    let task = spawn_export(pattern_only(), opts).unwrap();
    assert_eq!(task.progress().1, 20);
    let status_while_running = task.status();
    assert!(matches!(
        status_while_running,
        ExportStatus::Generating | ExportStatus::Finished
    ));
    let status = Arc::clone(&task.status);
    let out = task.wait().unwrap();
    assert_eq!(out.frame_count, 20);
    assert_eq!(*status.lock().unwrap(), ExportStatus::Finished);
}

#[test]
fn spawned_export_reports_failure() {
    let opts = ExportOptions {
        font_path: Some(PathBuf::from("/definitely/not/a/font.ttf")),
        ..ExportOptions::default()
    };
    let task = spawn_export(style(), opts).unwrap();
    let status = Arc::clone(&task.status);
    assert!(matches!(task.wait(), Err(KinetypeError::Font(_))));
    assert!(matches!(*status.lock().unwrap(), ExportStatus::Failed(_)));
}

#[test]
fn spawn_rejects_invalid_style_up_front() {
    let bad = StyleConfig {
        duration_secs: -1.0,
        ..style()
    };
    assert!(spawn_export(bad, ExportOptions::default()).is_err());
}
