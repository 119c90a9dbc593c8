use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRgb;

/// Caption used whenever the generator fails or returns nothing.
pub const FALLBACK_CAPTION: &str = "A special moment";

/// Tone requested from the caption generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionStyle {
    /// Plain description of the scene.
    #[default]
    Descriptive,
    /// Lyrical.
    Poetic,
    /// A few words.
    Simple,
}

impl CaptionStyle {
    /// Style token passed to generators.
    pub fn name(self) -> &'static str {
        match self {
            Self::Descriptive => "descriptive",
            Self::Poetic => "poetic",
            Self::Simple => "simple",
        }
    }
}

impl fmt::Display for CaptionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CaptionStyle {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "descriptive" => Ok(Self::Descriptive),
            "poetic" => Ok(Self::Poetic),
            "simple" => Ok(Self::Simple),
            other => Err(ReelError::validation(format!(
                "unknown caption style '{other}'"
            ))),
        }
    }
}

/// Caption generation collaborator (typically a vision language model).
pub trait CaptionGenerator: Send + Sync {
    /// Produce one caption for the whole set of frames.
    fn generate(&self, frames: &[&FrameRgb], style: CaptionStyle) -> ReelResult<String>;
}

/// Generator that always returns the same text.
#[derive(Clone, Debug)]
pub struct FixedCaption(pub String);

impl CaptionGenerator for FixedCaption {
    fn generate(&self, _frames: &[&FrameRgb], _style: CaptionStyle) -> ReelResult<String> {
        Ok(self.0.clone())
    }
}

/// Ask `generator` for a caption, degrading to [`FALLBACK_CAPTION`] on error or empty text.
pub fn caption_or_fallback(
    generator: &dyn CaptionGenerator,
    frames: &[&FrameRgb],
    style: CaptionStyle,
) -> String {
    match generator.generate(frames, style) {
        Ok(text) => {
            let text = text.trim().trim_matches(|c| c == '"' || c == '\'').trim();
            if text.is_empty() {
                tracing::warn!("caption generator returned empty text; using fallback");
                FALLBACK_CAPTION.to_owned()
            } else {
                text.to_owned()
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "caption generation failed; using fallback");
            FALLBACK_CAPTION.to_owned()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ai/caption.rs"]
mod tests;
