use super::*;
use crate::foundation::rng::rng_from_seed;

#[test]
fn intensity_levels_map_to_budgets() {
    assert_eq!(IntensityLevel::Low.budget(), 0.05);
    assert_eq!(IntensityLevel::Medium.budget(), 0.15);
    assert_eq!(IntensityLevel::High.budget(), 0.30);
    assert_eq!(IntensityLevel::default(), IntensityLevel::Medium);
}

#[test]
fn styles_parse_by_name() {
    for style in MotionStyle::ALL {
        assert_eq!(style.name().parse::<MotionStyle>().unwrap(), style);
    }
    assert_eq!(
        "3d_rotate".parse::<MotionStyle>().unwrap(),
        MotionStyle::Rotate3d
    );
    assert!("spin".parse::<MotionStyle>().is_err());
}

#[test]
fn selection_serde_accepts_random_and_styles() {
    let sel: MotionSelection = serde_json::from_str("\"random\"").unwrap();
    assert_eq!(sel, MotionSelection::Random);
    let sel: MotionSelection = serde_json::from_str("\"pan_up\"").unwrap();
    assert_eq!(sel, MotionSelection::Fixed(MotionStyle::PanUp));
    assert!(serde_json::from_str::<MotionSelection>("\"wobble\"").is_err());
    assert_eq!(
        serde_json::to_string(&MotionSelection::Random).unwrap(),
        "\"random\""
    );
}

#[test]
fn random_selection_stays_in_ken_burns_set() {
    let mut rng = rng_from_seed(Some(3));
    for _ in 0..64 {
        let style = MotionSelection::Random.pick(&mut rng);
        assert!(MotionStyle::KEN_BURNS.contains(&style));
    }
}

#[test]
fn spec_rejects_out_of_range_intensity() {
    assert!(MotionSpec::new(MotionStyle::ZoomIn, 1.5, Ease::Linear).is_err());
    assert!(MotionSpec::new(MotionStyle::ZoomIn, -0.1, Ease::Linear).is_err());
    assert!(MotionSpec::new(MotionStyle::ZoomIn, f64::NAN, Ease::Linear).is_err());
    assert!(MotionSpec::new(MotionStyle::ZoomIn, 0.3, Ease::Linear).is_ok());
}

#[test]
fn resolve_is_deterministic_for_a_seed() {
    let spec = MotionSpec::with_level(
        MotionStyle::ZoomPanCombo,
        IntensityLevel::High,
        Ease::Linear,
    );
    let a = spec.resolve(&mut rng_from_seed(Some(11)));
    let b = spec.resolve(&mut rng_from_seed(Some(11)));
    assert_eq!(a, b);

    let still = MotionSpec::still().resolve(&mut rng_from_seed(Some(0)));
    assert_eq!(still, ResolvedMotion::Zoom { zoom_in: true });
}
