use std::sync::Arc;

use anyhow::Context;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::foundation::core::Resolution;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::frame::FrameRgb;

/// Fade-in/fade-out length of the caption, in seconds.
pub const CAPTION_FADE_SECS: f64 = 1.0;
/// Line budget in terminal columns: full-width glyphs count 2, so Hangul and CJK lines
/// hold half as many characters as Latin ones.
const MAX_LINE_COLUMNS: usize = 28;
const MAX_LINES: usize = 3;

/// Font database with the system fonts loaded.
pub fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// Split a word wider than `max_cols` into pieces that fit.
fn split_wide_word(word: &str, max_cols: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut cols = 0;
    for c in word.chars() {
        let w = c.width().unwrap_or(0);
        if cols + w > max_cols && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            cols = 0;
        }
        piece.push(c);
        cols += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Greedy word wrap by display width; overlong text is cut with an ellipsis on the last line.
pub(crate) fn wrap_lines(text: &str, max_cols: usize, max_lines: usize) -> Vec<String> {
    let max_cols = max_cols.max(2);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        for piece in split_wide_word(word, max_cols) {
            let fits = current.is_empty() || current.width() + 1 + piece.width() <= max_cols;
            if !fits {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&piece);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }
    lines
}

fn caption_svg(lines: &[String], width: u32, band_h: u32, font_px: u32) -> String {
    let line_h = f64::from(font_px) * 1.25;
    let first_y = f64::from(band_h) / 2.0 - line_h * (lines.len() as f64 - 1.0) / 2.0;
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{band_h}" viewBox="0 0 {width} {band_h}"><rect x="0" y="0" width="{width}" height="{band_h}" fill="black" fill-opacity="0.45"/>"#
    );
    for (i, line) in lines.iter().enumerate() {
        let y = first_y + line_h * i as f64;
        svg.push_str(&format!(
            r#"<text x="{x}" y="{y:.1}" font-family="sans-serif" font-size="{font_px}" font-weight="bold" text-anchor="middle" dominant-baseline="central" fill="white" stroke="black" stroke-width="{stroke}">{text}</text>"#,
            x = width / 2,
            stroke = (font_px / 18).max(1),
            text = escape_xml(line),
        ));
    }
    svg.push_str("</svg>");
    svg
}

/// A caption rasterised once and blended over frames near the top of the video.
#[derive(Clone, Debug)]
pub struct CaptionOverlay {
    text: String,
    width: u32,
    band_h: u32,
    band_top: u32,
    /// Premultiplied RGBA8, `width * band_h * 4` bytes.
    band: Vec<u8>,
}

impl CaptionOverlay {
    /// Rasterise `text` as a caption band for frames of `res`.
    pub fn render(
        text: &str,
        res: Resolution,
        fontdb: Arc<usvg::fontdb::Database>,
    ) -> ReelResult<Self> {
        let lines = wrap_lines(text, MAX_LINE_COLUMNS, MAX_LINES);
        if lines.is_empty() {
            return Err(ReelError::validation("caption text is empty"));
        }
        let font_px = (res.width / 20).max(8);
        let line_h = (f64::from(font_px) * 1.25).ceil() as u32;
        let band_h = (line_h * lines.len() as u32 + font_px).min(res.height);
        let band_top = (res.height / 12).min(res.height - band_h);

        let svg = caption_svg(&lines, res.width, band_h, font_px);
        let opts = usvg::Options {
            fontdb,
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse caption svg")?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(res.width, band_h)
            .ok_or_else(|| ReelError::evaluation("failed to allocate caption pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        Ok(Self {
            text: text.to_owned(),
            width: res.width,
            band_h,
            band_top,
            band: pixmap.data().to_vec(),
        })
    }

    /// The caption text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Opacity at `t` seconds of a `total`-second video: fades in and out over 1 s.
    pub fn opacity_at(t: f64, total: f64) -> f32 {
        if total <= 0.0 {
            return 0.0;
        }
        let fade = CAPTION_FADE_SECS.min(total / 2.0);
        let a = (t / fade).min((total - t) / fade);
        a.clamp(0.0, 1.0) as f32
    }

    /// Blend the caption band over `frame`.
    pub fn apply(&self, frame: &mut FrameRgb, opacity: f32) {
        let op = (opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
        if op == 0 || frame.width != self.width {
            return;
        }
        let rows = self.band_h.min(frame.height.saturating_sub(self.band_top));
        for y in 0..rows {
            let dst = frame.row_mut(self.band_top + y);
            let src_start = (y * self.width * 4) as usize;
            let src = &self.band[src_start..src_start + self.width as usize * 4];
            for (d, s) in dst.chunks_exact_mut(3).zip(src.chunks_exact(4)) {
                let sa = mul_div255_u16(u16::from(s[3]), op);
                if sa == 0 {
                    continue;
                }
                let inv = 255 - sa;
                for c in 0..3 {
                    let sc = mul_div255_u16(u16::from(s[c]), op);
                    let dc = mul_div255_u16(u16::from(d[c]), inv);
                    d[c] = (sc + dc).min(255) as u8;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/caption_overlay.rs"]
mod tests;
