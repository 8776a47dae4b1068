use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::EXPORT,
        frame_count: 2,
        transparent: true,
    }
}

fn meta() -> FrameMeta {
    FrameMeta {
        delay_ms: 50.0,
        transparent: true,
    }
}

#[test]
fn captures_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let f = FrameRGBA::transparent(2, 2);
    sink.push_frame(FrameIndex(0), &f, meta()).unwrap();
    sink.push_frame(FrameIndex(1), &f, meta()).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(cfg()));
    assert_eq!(sink.frames().len(), 2);
    assert!(sink.is_finished());
}

#[test]
fn rejects_push_before_begin() {
    let mut sink = InMemorySink::new();
    let f = FrameRGBA::transparent(2, 2);
    assert!(sink.push_frame(FrameIndex(0), &f, meta()).is_err());
}

#[test]
fn rejects_out_of_order_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let f = FrameRGBA::transparent(2, 2);
    sink.push_frame(FrameIndex(1), &f, meta()).unwrap();
    assert!(sink.push_frame(FrameIndex(1), &f, meta()).is_err());
}

#[test]
fn begin_resets_previous_run() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let f = FrameRGBA::transparent(2, 2);
    sink.push_frame(FrameIndex(0), &f, meta()).unwrap();
    sink.end().unwrap();
    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_finished());
}
