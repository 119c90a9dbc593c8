use std::f64::consts::TAU;

use rand::Rng;

use crate::foundation::math::{clamp_u8, lerp};
use crate::foundation::rng::ReelRng;
use crate::render::frame::FrameRgb;

/// Share of the grading intensity used for the vignette of moody presets.
pub const VIGNETTE_SHARE: f32 = 0.3;
/// Share of the grading intensity used for film grain.
pub const GRAIN_SHARE: f32 = 0.05;

/// Colour mood, each backed by a grading preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Warm, golden.
    Sunset,
    /// Cool, blue.
    Ocean,
    /// Saturated greens.
    Forest,
    /// Desaturated, contrasty.
    City,
    /// Warm, faded, grainy.
    Vintage,
    /// Punchy and dark.
    Dramatic,
    /// Bright, low contrast.
    Soft,
    /// No change.
    #[default]
    Neutral,
}

const MOOD_KEYWORDS: [(Mood, &[&str]); 7] = [
    (Mood::Sunset, &["sunset", "일몰", "저녁", "노을", "golden hour"]),
    (Mood::Ocean, &["ocean", "sea", "beach", "바다", "해변", "물"]),
    (Mood::Forest, &["forest", "nature", "green", "숲", "자연", "나무"]),
    (Mood::City, &["city", "urban", "building", "도시", "건물", "거리"]),
    (Mood::Vintage, &["vintage", "retro", "old", "빈티지", "복고", "옛날"]),
    (Mood::Dramatic, &["dramatic", "intense", "strong", "드라마틱", "강렬", "역동"]),
    (Mood::Soft, &["soft", "gentle", "calm", "부드러운", "차분", "평화"]),
];

impl Mood {
    /// Keyword match over free text. First matching mood wins; [`Mood::Neutral`] otherwise.
    pub fn detect(text: &str) -> Self {
        let text = text.to_lowercase();
        MOOD_KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| text.contains(w)))
            .map(|(mood, _)| *mood)
            .unwrap_or(Self::Neutral)
    }

    /// The full-strength preset of this mood.
    pub fn preset(self) -> GradePreset {
        let p = |temperature, saturation, brightness, contrast, tint| GradePreset {
            temperature,
            saturation,
            brightness,
            contrast,
            tint,
        };
        match self {
            Self::Sunset => p(20.0, 1.2, 1.05, 1.1, [1.1, 1.0, 0.9]),
            Self::Ocean => p(-15.0, 1.15, 1.0, 1.05, [0.9, 1.0, 1.15]),
            Self::Forest => p(0.0, 1.25, 0.95, 1.1, [0.95, 1.1, 0.95]),
            Self::City => p(-5.0, 0.9, 1.0, 1.2, [1.0, 1.0, 1.05]),
            Self::Vintage => p(10.0, 0.8, 0.95, 1.15, [1.1, 1.05, 0.9]),
            Self::Dramatic => p(0.0, 1.3, 0.9, 1.3, [1.0, 1.0, 1.0]),
            Self::Soft => p(5.0, 0.85, 1.1, 0.9, [1.05, 1.05, 1.05]),
            Self::Neutral => GradePreset::NEUTRAL,
        }
    }

    fn wants_vignette(self) -> bool {
        matches!(self, Self::Dramatic | Self::Vintage | Self::Sunset)
    }

    fn wants_grain(self) -> bool {
        matches!(self, Self::Vintage)
    }
}

/// Grading parameters. Identity is temperature 0, every factor 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradePreset {
    /// Added to red and subtracted from blue.
    pub temperature: f32,
    /// HSV saturation factor.
    pub saturation: f32,
    /// Multiplicative brightness.
    pub brightness: f32,
    /// Contrast around the frame mean.
    pub contrast: f32,
    /// Per-channel RGB gain.
    pub tint: [f32; 3],
}

impl GradePreset {
    /// The identity grade.
    pub const NEUTRAL: GradePreset = GradePreset {
        temperature: 0.0,
        saturation: 1.0,
        brightness: 1.0,
        contrast: 1.0,
        tint: [1.0, 1.0, 1.0],
    };

    /// Move every parameter from identity towards this preset by `intensity`.
    pub fn scaled(&self, intensity: f32) -> Self {
        let k = intensity.clamp(0.0, 1.0);
        let towards = |v: f32| lerp(1.0, v, k);
        Self {
            temperature: lerp(0.0, self.temperature, k),
            saturation: towards(self.saturation),
            brightness: towards(self.brightness),
            contrast: towards(self.contrast),
            tint: self.tint.map(towards),
        }
    }

    /// Whether applying this grade is a no-op.
    pub fn is_identity(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

fn saturate_pixel(px: &mut [f32; 3], factor: f32) {
    let max = px[0].max(px[1]).max(px[2]);
    let min = px[0].min(px[1]).min(px[2]);
    if max <= 0.0 || max == min {
        return;
    }
    let s = (max - min) / max;
    let s_new = (s * factor).clamp(0.0, 1.0);
    let ratio = s_new / s;
    for c in px.iter_mut() {
        *c = max - (max - *c) * ratio;
    }
}

/// Apply a (pre-scaled) grade in place.
///
/// Order: temperature, tint, saturation, brightness, contrast; clamped after each step.
pub fn apply_grade(frame: &mut FrameRgb, grade: &GradePreset) {
    if grade.is_identity() {
        return;
    }
    let mut buf: Vec<f32> = frame.data.iter().map(|&v| f32::from(v)).collect();

    for px in buf.chunks_exact_mut(3) {
        if grade.temperature != 0.0 {
            px[0] = (px[0] + grade.temperature).clamp(0.0, 255.0);
            px[2] = (px[2] - grade.temperature).clamp(0.0, 255.0);
        }
        for (c, gain) in px.iter_mut().zip(grade.tint) {
            *c = (*c * gain).clamp(0.0, 255.0);
        }
        if grade.saturation != 1.0 {
            let mut p = [px[0], px[1], px[2]];
            saturate_pixel(&mut p, grade.saturation);
            px.copy_from_slice(&p.map(|v| v.clamp(0.0, 255.0)));
        }
        if grade.brightness != 1.0 {
            for c in px.iter_mut() {
                *c = (*c * grade.brightness).clamp(0.0, 255.0);
            }
        }
    }

    if grade.contrast != 1.0 && !buf.is_empty() {
        let mean = (buf.iter().map(|&v| f64::from(v)).sum::<f64>() / buf.len() as f64) as f32;
        for v in buf.iter_mut() {
            *v = ((*v - mean) * grade.contrast + mean).clamp(0.0, 255.0);
        }
    }

    for (dst, v) in frame.data.iter_mut().zip(buf) {
        *dst = clamp_u8(v);
    }
}

/// Darken towards the corners by `1 - dist * intensity`, `dist` being 1 at the corners.
pub fn vignette(frame: &mut FrameRgb, intensity: f32) {
    if intensity <= 0.0 {
        return;
    }
    let cx = frame.width as f32 / 2.0;
    let cy = frame.height as f32 / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt().max(f32::EPSILON);
    for y in 0..frame.height {
        let dy = y as f32 - cy;
        for x in 0..frame.width {
            let dx = x as f32 - cx;
            let dist = (dx * dx + dy * dy).sqrt() / max_dist;
            let gain = (1.0 - dist * intensity).clamp(0.0, 1.0);
            let i = frame.idx(x, y);
            for v in &mut frame.data[i..i + 3] {
                *v = (f32::from(*v) * gain) as u8;
            }
        }
    }
}

fn standard_normal(rng: &mut ReelRng) -> f64 {
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Add gaussian noise with standard deviation `255 * intensity` to every channel.
pub fn film_grain(frame: &mut FrameRgb, intensity: f32, rng: &mut ReelRng) {
    if intensity <= 0.0 {
        return;
    }
    let sigma = 255.0 * f64::from(intensity);
    for v in frame.data.iter_mut() {
        let noisy = f64::from(*v) + standard_normal(rng) * sigma;
        *v = clamp_u8(noisy as f32);
    }
}

/// Mood-driven grading of whole frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorGrade {
    /// Chosen mood.
    pub mood: Mood,
    /// Overall strength in `[0, 1]`.
    pub intensity: f32,
    grade: GradePreset,
}

impl ColorGrade {
    /// Grade for `mood` at `intensity`.
    pub fn new(mood: Mood, intensity: f32) -> Self {
        let intensity = intensity.clamp(0.0, 1.0);
        Self {
            mood,
            intensity,
            grade: mood.preset().scaled(intensity),
        }
    }

    /// Whether this grade draws random grain (and so needs a per-frame RNG).
    pub fn uses_grain(&self) -> bool {
        self.mood.wants_grain() && self.intensity > 0.0
    }

    /// Grade, vignette and grain one frame in place.
    pub fn apply(&self, frame: &mut FrameRgb, rng: &mut ReelRng) {
        apply_grade(frame, &self.grade);
        if self.mood.wants_vignette() {
            vignette(frame, self.intensity * VIGNETTE_SHARE);
        }
        if self.mood.wants_grain() {
            film_grain(frame, self.intensity * GRAIN_SHARE, rng);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/grading.rs"]
mod tests;
