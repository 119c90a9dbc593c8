use super::*;
use crate::animation::ease::Ease;
use crate::foundation::rng::rng_from_seed;
use crate::motion::spec::{IntensityLevel, MotionStyle};

fn source() -> Arc<FrameRgb> {
    let mut f = FrameRgb::black(24, 32);
    for y in 0..32 {
        for x in 0..24 {
            f.set_pixel(x, y, [(x * 9) as u8, (y * 7) as u8, 50]);
        }
    }
    Arc::new(f)
}

fn target() -> Resolution {
    Resolution {
        width: 18,
        height: 32,
    }
}

#[test]
fn rejects_non_positive_duration() {
    let spec = MotionSpec::still();
    let fps = Fps::new(10, 1).unwrap();
    let mut rng = rng_from_seed(Some(1));
    assert!(Clip::new(source(), 0.0, spec, target(), fps, &mut rng).is_err());
    assert!(Clip::new(source(), -1.0, spec, target(), fps, &mut rng).is_err());
    assert!(Clip::new(source(), f64::INFINITY, spec, target(), fps, &mut rng).is_err());
}

#[test]
fn frames_are_restartable_and_sized() {
    let fps = Fps::new(10, 1).unwrap();
    for style in MotionStyle::ALL {
        let spec = MotionSpec::with_level(style, IntensityLevel::High, Ease::InOutCubic);
        let mut rng = rng_from_seed(Some(5));
        let clip = Clip::new(source(), 0.5, spec, target(), fps, &mut rng).unwrap();
        let first: Vec<FrameRgb> = clip.frames().collect();
        let second: Vec<FrameRgb> = clip.frames().collect();
        assert_eq!(first.len(), 5);
        assert_eq!(first, second, "{style}");
        assert!(first.iter().all(|f| f.resolution() == target()));
    }
}

#[test]
fn handheld_jitter_differs_between_frames_but_not_between_calls() {
    let fps = Fps::new(30, 1).unwrap();
    let spec = MotionSpec::with_level(MotionStyle::Handheld, IntensityLevel::Medium, Ease::Linear);
    let mut rng = rng_from_seed(Some(9));
    let clip = Clip::new(source(), 1.0, spec, target(), fps, &mut rng).unwrap();
    let offsets: Vec<(i64, i64)> = (0..30).map(|k| clip.jitter(f64::from(k) / 30.0)).collect();
    assert!(offsets.iter().all(|(x, y)| x.abs() <= 5 && y.abs() <= 5));
    assert!(offsets.windows(2).any(|w| w[0] != w[1]));
    assert_eq!(clip.jitter(0.5), clip.jitter(0.5));
}

#[test]
fn source_is_cover_fitted_to_target() {
    let fps = Fps::new(10, 1).unwrap();
    let mut rng = rng_from_seed(Some(2));
    let clip = Clip::new(source(), 1.0, MotionSpec::still(), target(), fps, &mut rng).unwrap();
    assert_eq!(clip.source().resolution(), target());
    assert_eq!(clip.frame_at(0.3), *clip.source());
}

#[test]
fn set_duration_updates_frame_count() {
    let fps = Fps::new(30, 1).unwrap();
    let mut rng = rng_from_seed(Some(2));
    let mut clip = Clip::new(source(), 3.0, MotionSpec::still(), target(), fps, &mut rng).unwrap();
    assert_eq!(clip.frame_count(), 90);
    clip.set_duration(2.5).unwrap();
    assert_eq!(clip.frame_count(), 75);
    assert!(clip.set_duration(0.0).is_err());
}
