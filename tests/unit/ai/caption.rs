use super::*;

struct Failing;

impl CaptionGenerator for Failing {
    fn generate(&self, _frames: &[&FrameRgb], _style: CaptionStyle) -> ReelResult<String> {
        Err(ReelError::evaluation("quota exceeded"))
    }
}

#[test]
fn style_parses_and_prints() {
    assert_eq!("Poetic".parse::<CaptionStyle>().unwrap(), CaptionStyle::Poetic);
    assert!("haiku".parse::<CaptionStyle>().is_err());
    assert_eq!(CaptionStyle::default().to_string(), "descriptive");
}

#[test]
fn quotes_are_stripped() {
    let generator = FixedCaption("  \"Sunset over the bay\" ".to_owned());
    assert_eq!(
        caption_or_fallback(&generator, &[], CaptionStyle::Simple),
        "Sunset over the bay"
    );
}

#[test]
fn failures_and_blank_text_fall_back() {
    assert_eq!(
        caption_or_fallback(&Failing, &[], CaptionStyle::Descriptive),
        FALLBACK_CAPTION
    );
    let blank = FixedCaption("  ''  ".to_owned());
    assert_eq!(
        caption_or_fallback(&blank, &[], CaptionStyle::Descriptive),
        FALLBACK_CAPTION
    );
}
