use super::*;
use crate::foundation::rng::rng_from_seed;

#[test]
fn mood_detection_follows_keyword_order() {
    assert_eq!(Mood::detect("A golden hour walk"), Mood::Sunset);
    assert_eq!(Mood::detect("Waves on the BEACH"), Mood::Ocean);
    assert_eq!(Mood::detect("Green hills"), Mood::Forest);
    assert_eq!(Mood::detect("Sunset over the sea"), Mood::Sunset);
    assert_eq!(Mood::detect("calm morning"), Mood::Soft);
    assert_eq!(Mood::detect(""), Mood::Neutral);
    assert_eq!(Mood::detect("a cat"), Mood::Neutral);
}

#[test]
fn mood_detection_matches_korean_captions() {
    assert_eq!(Mood::detect("해변에서 바라본 노을"), Mood::Sunset);
    assert_eq!(Mood::detect("푸른 바다와 해변"), Mood::Ocean);
    assert_eq!(Mood::detect("숲 속의 자연"), Mood::Forest);
    assert_eq!(Mood::detect("도시의 건물과 거리"), Mood::City);
    assert_eq!(Mood::detect("복고 감성"), Mood::Vintage);
    assert_eq!(Mood::detect("강렬한 순간"), Mood::Dramatic);
    assert_eq!(Mood::detect("차분한 아침"), Mood::Soft);
    assert_eq!(Mood::detect("특별한 순간"), Mood::Neutral);
}

#[test]
fn scaled_preset_moves_linearly_from_identity() {
    let half = Mood::Sunset.preset().scaled(0.5);
    assert!((half.temperature - 10.0).abs() < 1e-6);
    assert!((half.saturation - 1.1).abs() < 1e-6);
    assert!((half.tint[2] - 0.95).abs() < 1e-6);
    assert_eq!(Mood::Sunset.preset().scaled(1.0), Mood::Sunset.preset());
}

#[test]
fn zero_intensity_is_identity() {
    let mut rng = rng_from_seed(Some(1));
    for mood in [Mood::Sunset, Mood::Vintage, Mood::Dramatic, Mood::City] {
        assert!(mood.preset().scaled(0.0).is_identity());
        let mut f = FrameRgb::solid(6, 4, [120, 60, 200]);
        let before = f.clone();
        ColorGrade::new(mood, 0.0).apply(&mut f, &mut rng);
        assert_eq!(f, before, "{mood:?}");
    }
}

#[test]
fn neutral_grade_leaves_frame_untouched() {
    let mut f = FrameRgb::solid(3, 3, [10, 20, 30]);
    let before = f.clone();
    ColorGrade::new(Mood::Neutral, 1.0).apply(&mut f, &mut rng_from_seed(Some(0)));
    assert_eq!(f, before);
}

#[test]
fn temperature_warms_red_and_cools_blue() {
    let mut f = FrameRgb::solid(2, 2, [100, 100, 100]);
    let grade = GradePreset {
        temperature: 20.0,
        ..GradePreset::NEUTRAL
    };
    apply_grade(&mut f, &grade);
    assert_eq!(f.pixel(0, 0), [120, 100, 80]);
}

#[test]
fn saturation_keeps_grey_and_value() {
    let mut grey = FrameRgb::solid(1, 1, [90, 90, 90]);
    let grade = GradePreset {
        saturation: 1.5,
        ..GradePreset::NEUTRAL
    };
    apply_grade(&mut grey, &grade);
    assert_eq!(grey.pixel(0, 0), [90, 90, 90]);

    let mut colour = FrameRgb::solid(1, 1, [200, 150, 100]);
    apply_grade(&mut colour, &grade);
    let [r, g, b] = colour.pixel(0, 0);
    assert_eq!(r, 200);
    assert!(g < 150 && b < 100);
}

#[test]
fn contrast_pivots_on_the_mean() {
    let mut f = FrameRgb::from_raw(2, 1, vec![100, 100, 100, 200, 200, 200]).unwrap();
    let grade = GradePreset {
        contrast: 2.0,
        ..GradePreset::NEUTRAL
    };
    apply_grade(&mut f, &grade);
    assert_eq!(f.pixel(0, 0), [50, 50, 50]);
    assert_eq!(f.pixel(1, 0), [250, 250, 250]);
}

#[test]
fn vignette_darkens_corners_not_centre() {
    let mut f = FrameRgb::solid(21, 21, [200, 200, 200]);
    vignette(&mut f, 0.5);
    assert!(f.pixel(0, 0)[0] < 110);
    assert!(f.pixel(10, 10)[0] >= 195);
}

#[test]
fn grain_is_seeded() {
    let base = FrameRgb::solid(8, 8, [128, 128, 128]);
    let mut a = base.clone();
    let mut b = base.clone();
    film_grain(&mut a, 0.05, &mut rng_from_seed(Some(6)));
    film_grain(&mut b, 0.05, &mut rng_from_seed(Some(6)));
    assert_eq!(a, b);
    assert_ne!(a, base);
    assert!(ColorGrade::new(Mood::Vintage, 0.7).uses_grain());
    assert!(!ColorGrade::new(Mood::Ocean, 0.7).uses_grain());
}
