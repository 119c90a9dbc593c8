use super::*;

#[test]
fn wrap_respects_line_width_and_count() {
    let lines = wrap_lines("one two three four five six seven", 9, 10);
    assert_eq!(lines, vec!["one two", "three", "four five", "six seven"]);
    let lines = wrap_lines("a b c d e f", 3, 2);
    assert_eq!(lines, vec!["a b", "c d…"]);
    assert!(wrap_lines("   ", 10, 2).is_empty());
}

#[test]
fn wrap_counts_full_width_glyphs_double() {
    // Each Hangul syllable is two columns wide.
    let lines = wrap_lines("바다 위의 노을 그리고 해변", 10, 5);
    assert_eq!(lines, vec!["바다 위의", "노을", "그리고", "해변"]);
    for line in &lines {
        assert!(line.width() <= 10, "{line}");
    }
}

#[test]
fn wrap_splits_words_wider_than_a_line() {
    let lines = wrap_lines("特別な瞬間を記録する", 8, 5);
    assert_eq!(lines, vec!["特別な瞬", "間を記録", "する"]);
    assert_eq!(wrap_lines("abcdefghij", 4, 5), vec!["abcd", "efgh", "ij"]);
}

#[test]
fn escapes_markup() {
    assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
}

#[test]
fn opacity_fades_at_both_ends() {
    assert_eq!(CaptionOverlay::opacity_at(0.0, 10.0), 0.0);
    assert!((CaptionOverlay::opacity_at(0.5, 10.0) - 0.5).abs() < 1e-6);
    assert_eq!(CaptionOverlay::opacity_at(5.0, 10.0), 1.0);
    assert!((CaptionOverlay::opacity_at(9.75, 10.0) - 0.25).abs() < 1e-6);
    assert_eq!(CaptionOverlay::opacity_at(1.0, 0.0), 0.0);
}

#[test]
fn band_darkens_frame_under_caption() {
    let res = Resolution {
        width: 120,
        height: 240,
    };
    let overlay = CaptionOverlay::render(
        "Sunny day",
        res,
        Arc::new(usvg::fontdb::Database::new()),
    )
    .unwrap();
    assert_eq!(overlay.text(), "Sunny day");

    let mut frame = FrameRgb::solid(120, 240, [200, 200, 200]);
    overlay.apply(&mut frame, 1.0);
    // Corner of the translucent band, away from any glyph.
    assert!(frame.pixel(0, overlay.band_top)[0] < 200);
    assert_eq!(frame.pixel(0, 239), [200, 200, 200]);

    let mut untouched = FrameRgb::solid(120, 240, [200, 200, 200]);
    overlay.apply(&mut untouched, 0.0);
    assert_eq!(untouched, FrameRgb::solid(120, 240, [200, 200, 200]));
}

#[test]
fn empty_caption_is_rejected() {
    let res = Resolution {
        width: 64,
        height: 64,
    };
    assert!(CaptionOverlay::render(" ", res, Arc::new(usvg::fontdb::Database::new())).is_err());
}
