use super::*;
use crate::effects::transitions::TransitionStyle;
use crate::motion::spec::MotionStyle;

#[test]
fn empty_object_yields_defaults() {
    let cfg = ReelsConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, ReelsConfig::default());
    assert_eq!(cfg.resolution().unwrap(), Resolution::reels_fhd());
    assert_eq!(cfg.fps().unwrap().num, 30);
    assert_eq!(cfg.ease(), Ease::InOutCubic);
    assert_eq!(cfg.workers, 4);
    assert_eq!(cfg.max_photos, 50);
    assert_eq!(cfg.encoding.crf, 18);
}

#[test]
fn parses_selections_and_moods() {
    let json = r#"{
        "transition": "random",
        "motion": "pan_left",
        "intensity": "high",
        "easing": "ease_out_back",
        "camera_style": "cinematic",
        "mood": "ocean",
        "caption_style": "poetic",
        "seed": 42
    }"#;
    let cfg = ReelsConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.transition, TransitionSelection::Random);
    assert_eq!(cfg.motion, MotionSelection::Fixed(MotionStyle::PanLeft));
    assert_eq!(cfg.intensity, IntensityLevel::High);
    assert_eq!(cfg.ease(), Ease::OutBack);
    assert_eq!(cfg.camera_style, CameraStyle::Cinematic);
    assert_eq!(cfg.mood, Some(Mood::Ocean));
    assert_eq!(cfg.caption_style, CaptionStyle::Poetic);
    assert_eq!(cfg.seed, Some(42));

    let cfg = ReelsConfig::from_reader(r#"{"transition": "circular"}"#.as_bytes()).unwrap();
    assert_eq!(
        cfg.transition,
        TransitionSelection::Fixed(TransitionStyle::CircularWipe)
    );
}

#[test]
fn unknown_keys_and_styles_are_rejected() {
    assert!(ReelsConfig::from_reader(r#"{"bogus": 1}"#.as_bytes()).is_err());
    assert!(ReelsConfig::from_reader(r#"{"motion": "spin"}"#.as_bytes()).is_err());
}

#[test]
fn validate_rejects_bad_values() {
    let bad = [
        r#"{"duration_per_photo": 0}"#,
        r#"{"width": 1081}"#,
        r#"{"height": 0}"#,
        r#"{"fps": 0}"#,
        r#"{"workers": 0}"#,
        r#"{"transition_duration": -1}"#,
        r#"{"color_grading_intensity": 1.5}"#,
    ];
    for json in bad {
        assert!(ReelsConfig::from_reader(json.as_bytes()).is_err(), "{json}");
    }
}

#[test]
fn from_path_reads_file() {
    let path = std::env::temp_dir().join(format!("reelcraft_cfg_{}.json", std::process::id()));
    std::fs::write(&path, r#"{"fps": 24, "width": 720, "height": 1280}"#).unwrap();
    let cfg = ReelsConfig::from_path(&path).unwrap();
    assert_eq!(cfg.fps, 24);
    assert_eq!(cfg.resolution().unwrap().width, 720);
    let _ = std::fs::remove_file(&path);
    assert!(ReelsConfig::from_path(&path).is_err());
}
