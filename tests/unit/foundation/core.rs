use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_seconds_round_trip() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(8.0), 240);
    assert!((fps.frames_to_secs(45) - 1.5).abs() < 1e-12);

    let ntsc = Fps::new(30000, 1001).unwrap();
    let secs = ntsc.frames_to_secs(123);
    assert_eq!(ntsc.secs_to_frames_round(secs), 123);
}

#[test]
fn resolution_validates_and_reports_aspect() {
    assert!(Resolution::new(0, 10).is_err());
    let r = Resolution::reels_fhd();
    assert!((r.aspect() - 0.5625).abs() < 1e-9);
    assert_eq!(r.area(), 1080 * 1920);
}
