use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 4,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
        audio: None,
    }
}

#[test]
fn collects_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &FrameRgb::black(4, 2)).unwrap();
    sink.push_frame(FrameIndex(1), &FrameRgb::solid(4, 2, [1, 2, 3]))
        .unwrap();
    sink.end().unwrap();
    assert!(sink.is_finished());
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1].0, FrameIndex(1));
    assert_eq!(sink.config().unwrap().width, 4);
}

#[test]
fn rejects_wrong_size_and_empty_stream() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(FrameIndex(0), &FrameRgb::black(4, 2)).is_err());
    sink.begin(cfg()).unwrap();
    assert!(sink.push_frame(FrameIndex(0), &FrameRgb::black(2, 2)).is_err());
    assert!(matches!(sink.end(), Err(ReelError::Encode(_))));
}
