use super::*;
use crate::foundation::rng::rng_from_seed;

#[test]
fn styles_parse_with_aliases() {
    assert_eq!(
        "circular".parse::<TransitionStyle>().unwrap(),
        TransitionStyle::CircularWipe
    );
    assert_eq!(
        "page_curl".parse::<TransitionStyle>().unwrap(),
        TransitionStyle::PageCurl
    );
    assert!("dissolve".parse::<TransitionStyle>().is_err());
    let d: Direction = serde_json::from_str("\"top\"").unwrap();
    assert_eq!(d, Direction::Up);
}

#[test]
fn selection_round_trips_through_json() {
    let sel: TransitionSelection = serde_json::from_str("\"random\"").unwrap();
    assert_eq!(sel, TransitionSelection::Random);
    let sel: TransitionSelection = serde_json::from_str("\"glitch\"").unwrap();
    assert_eq!(sel, TransitionSelection::Fixed(TransitionStyle::Glitch));
}

#[test]
fn spec_rejects_negative_duration() {
    assert!(TransitionSpec::new(TransitionStyle::Fade, -0.5, None).is_err());
    assert!(TransitionSpec::new(TransitionStyle::Fade, f64::NAN, None).is_err());
    assert!(TransitionSpec::new(TransitionStyle::Fade, 0.0, None).is_ok());
}

#[test]
fn resolve_keeps_explicit_direction() {
    let spec = TransitionSpec::new(TransitionStyle::Slide, 0.5, Some(Direction::Down)).unwrap();
    let r = spec.resolve(&mut rng_from_seed(Some(1)));
    assert_eq!(r.direction, Direction::Down);
}

#[test]
fn composite_resamples_mismatched_outgoing_frame() {
    let spec = TransitionSpec::new(TransitionStyle::Fade, 0.5, None).unwrap();
    let r = spec.resolve(&mut rng_from_seed(Some(1)));
    let a = FrameRgb::solid(5, 5, [10, 10, 10]);
    let b = FrameRgb::solid(8, 6, [20, 20, 20]);
    let out = r.composite(Some(&a), &b, 0.0, &mut rng_from_seed(Some(2)));
    assert_eq!((out.width, out.height), (8, 6));
    assert_eq!(out.pixel(4, 3), [10, 10, 10]);
}

#[test]
fn every_style_keeps_dimensions() {
    let a = FrameRgb::solid(12, 16, [1, 2, 3]);
    let b = FrameRgb::solid(12, 16, [200, 100, 50]);
    let mut rng = rng_from_seed(Some(3));
    for style in TransitionStyle::ALL {
        let r = TransitionSpec::new(style, 0.5, None)
            .unwrap()
            .resolve(&mut rng);
        for p in [0.0, 0.25, 0.5, 0.99] {
            let out = r.composite(Some(&a), &b, p, &mut rng);
            assert_eq!((out.width, out.height), (12, 16), "{style}");
            let out = r.composite(None, &b, p, &mut rng);
            assert_eq!((out.width, out.height), (12, 16), "{style}");
        }
    }
}
