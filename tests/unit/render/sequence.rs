use std::sync::Arc;

use super::*;
use crate::effects::grading::Mood;
use crate::effects::transitions::TransitionStyle;
use crate::foundation::rng::rng_from_seed;
use crate::motion::spec::MotionSpec;

fn res() -> Resolution {
    Resolution {
        width: 8,
        height: 12,
    }
}

fn solid_clip(rgb: [u8; 3], duration: f64, fps: Fps, rng: &mut ReelRng) -> Clip {
    let src = Arc::new(FrameRgb::solid(8, 12, rgb));
    Clip::new(src, duration, MotionSpec::still(), res(), fps, rng).unwrap()
}

fn fade(secs: f64) -> TransitionSpec {
    TransitionSpec::new(TransitionStyle::Fade, secs, None).unwrap()
}

#[test]
fn three_clips_with_fade_overlap() {
    let fps = Fps::new(4, 1).unwrap();
    let mut rng = rng_from_seed(Some(3));
    let clips = vec![
        solid_clip([200, 0, 0], 3.0, fps, &mut rng),
        solid_clip([0, 0, 200], 3.0, fps, &mut rng),
        solid_clip([0, 200, 0], 3.0, fps, &mut rng),
    ];
    let seq = Sequence::new(clips, &[fade(0.5), fade(0.5)], fps, &mut rng).unwrap();
    assert!((seq.duration_secs() - 8.0).abs() < 1e-9);
    assert_eq!(seq.starts(), &[0.0, 2.5, 5.0]);
    assert_eq!(seq.frame_count(), 32);

    assert_eq!(seq.frame_at(FrameIndex(0)).pixel(0, 0), [200, 0, 0]);
    // t = 2.75 sits halfway through the first overlap.
    assert_eq!(seq.frame_at(FrameIndex(11)).pixel(4, 6), [100, 0, 100]);
    assert_eq!(seq.frame_at(FrameIndex(12)).pixel(4, 6), [0, 0, 200]);
    assert_eq!(seq.frame_at(FrameIndex(31)).pixel(4, 6), [0, 200, 0]);
}

#[test]
fn transitions_clamp_to_half_of_shorter_neighbour() {
    let fps = Fps::new(10, 1).unwrap();
    let mut rng = rng_from_seed(Some(1));
    let clips = vec![
        solid_clip([1, 1, 1], 2.0, fps, &mut rng),
        solid_clip([2, 2, 2], 0.6, fps, &mut rng),
    ];
    let seq = Sequence::new(clips, &[fade(1.5)], fps, &mut rng).unwrap();
    assert!((seq.transitions()[0].duration_secs - 0.3).abs() < 1e-12);
    assert!((seq.duration_secs() - 2.3).abs() < 1e-9);
}

#[test]
fn zero_length_transitions_concatenate() {
    let fps = Fps::new(10, 1).unwrap();
    let mut rng = rng_from_seed(Some(1));
    let clips = vec![
        solid_clip([1, 1, 1], 1.0, fps, &mut rng),
        solid_clip([2, 2, 2], 1.0, fps, &mut rng),
    ];
    let seq = Sequence::new(clips, &[fade(0.0)], fps, &mut rng).unwrap();
    assert_eq!(seq.frame_count(), 20);
    assert_eq!(seq.frame_at(FrameIndex(9)).pixel(0, 0), [1, 1, 1]);
    assert_eq!(seq.frame_at(FrameIndex(10)).pixel(0, 0), [2, 2, 2]);
}

#[test]
fn rejects_bad_shapes() {
    let fps = Fps::new(10, 1).unwrap();
    let mut rng = rng_from_seed(Some(1));
    assert!(Sequence::new(Vec::new(), &[], fps, &mut rng).is_err());
    let clips = vec![solid_clip([1, 1, 1], 1.0, fps, &mut rng)];
    assert!(Sequence::new(clips, &[fade(0.5)], fps, &mut rng).is_err());
}

#[test]
fn frames_are_restartable_with_grading() {
    let fps = Fps::new(5, 1).unwrap();
    let mut rng = rng_from_seed(Some(11));
    let clips = vec![
        solid_clip([120, 90, 60], 1.0, fps, &mut rng),
        solid_clip([60, 90, 120], 1.0, fps, &mut rng),
    ];
    let glitch = TransitionSpec::new(TransitionStyle::Glitch, 0.4, None).unwrap();
    let seq = Sequence::new(clips, &[glitch], fps, &mut rng)
        .unwrap()
        .with_grade(ColorGrade::new(Mood::Vintage, 0.7));
    let a: Vec<_> = seq.frames().collect();
    let b: Vec<_> = seq.frames().collect();
    assert_eq!(a.len(), seq.frame_count() as usize);
    assert_eq!(a, b);
    assert!(a.iter().all(|(_, f)| f.resolution() == res()));
    assert!(a.windows(2).all(|w| w[0].0.0 + 1 == w[1].0.0));
}

#[test]
fn beat_retimed_clips_start_one_overlap_early_per_boundary() {
    use crate::analysis::beats::{BeatTimeline, retime_durations};

    let fps = Fps::new(10, 1).unwrap();
    let mut rng = rng_from_seed(Some(5));
    let beats = BeatTimeline::new(vec![2.0, 4.5], 0.5).unwrap();
    let durations = retime_durations(&[3.0, 3.0, 3.0], &beats);
    let clips = durations
        .iter()
        .map(|&d| solid_clip([9, 9, 9], d, fps, &mut rng))
        .collect();
    let seq = Sequence::new(clips, &[fade(0.5), fade(0.5)], fps, &mut rng).unwrap();
    let starts = seq.starts();
    assert!((starts[1] - (2.0 - 0.5)).abs() < 1e-9);
    assert!((starts[2] - (4.5 - 1.0)).abs() < 1e-9);
}
