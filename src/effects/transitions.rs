use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::effects::composite;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::rng::ReelRng;
use crate::render::frame::FrameRgb;

/// Default overlap between adjacent clips, in seconds.
pub const DEFAULT_TRANSITION_SECS: f64 = 0.5;
/// Row-displacement strength of the glitch transition.
pub const GLITCH_INTENSITY: f64 = 0.5;

/// How two adjacent clips are blended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStyle {
    /// Linear cross-fade.
    Fade,
    /// Incoming clip slides in, pushing the outgoing one out.
    Slide,
    /// Incoming clip grows from half size in the centre.
    Zoom,
    /// Alpha blend, same curve as `fade`.
    Morph,
    /// Decaying row displacement on the outgoing clip.
    Glitch,
    /// Expanding circle reveals the incoming clip.
    #[serde(alias = "circular")]
    CircularWipe,
    /// Straight sweep with a soft shadow on the outgoing side.
    PageCurl,
}

impl TransitionStyle {
    /// Every style, the pool drawn from when the transition is `random`.
    pub const ALL: [TransitionStyle; 7] = [
        Self::Fade,
        Self::Slide,
        Self::Zoom,
        Self::Morph,
        Self::Glitch,
        Self::CircularWipe,
        Self::PageCurl,
    ];

    /// Snake-case name as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Slide => "slide",
            Self::Zoom => "zoom",
            Self::Morph => "morph",
            Self::Glitch => "glitch",
            Self::CircularWipe => "circular_wipe",
            Self::PageCurl => "page_curl",
        }
    }

    fn is_directional(self) -> bool {
        matches!(self, Self::Slide | Self::PageCurl)
    }
}

impl fmt::Display for TransitionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransitionStyle {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "circular" {
            return Ok(Self::CircularWipe);
        }
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ReelError::validation(format!("unknown transition style \"{s}\"")))
    }
}

/// A configured transition: a fixed style or a per-boundary random pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TransitionSelection {
    /// Always this style.
    Fixed(TransitionStyle),
    /// Draw from [`TransitionStyle::ALL`] per boundary.
    Random,
}

impl TransitionSelection {
    /// Pick the concrete style for one boundary.
    pub fn pick(self, rng: &mut ReelRng) -> TransitionStyle {
        match self {
            Self::Fixed(style) => style,
            Self::Random => TransitionStyle::ALL[rng.random_range(0..TransitionStyle::ALL.len())],
        }
    }
}

impl Default for TransitionSelection {
    fn default() -> Self {
        Self::Fixed(TransitionStyle::Fade)
    }
}

impl TryFrom<String> for TransitionSelection {
    type Error = ReelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("random") {
            return Ok(Self::Random);
        }
        Ok(Self::Fixed(value.parse()?))
    }
}

impl From<TransitionSelection> for String {
    fn from(value: TransitionSelection) -> Self {
        match value {
            TransitionSelection::Fixed(style) => style.name().to_owned(),
            TransitionSelection::Random => "random".to_owned(),
        }
    }
}

/// Direction the incoming content travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards the left edge.
    Left,
    /// Towards the right edge.
    Right,
    /// Towards the top edge.
    #[serde(alias = "top")]
    Up,
    /// Towards the bottom edge.
    #[serde(alias = "bottom")]
    Down,
}

impl Direction {
    /// All directions.
    pub const ALL: [Direction; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];
}

/// Transition parameters owned by the boundary between two clips.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionSpec {
    /// Blend style.
    pub style: TransitionStyle,
    /// Overlap length in seconds.
    pub duration_secs: f64,
    /// Travel direction for `slide` and `page_curl`. Chosen at random when unset.
    #[serde(default)]
    pub direction: Option<Direction>,
}

impl TransitionSpec {
    /// Build a validated transition spec.
    pub fn new(
        style: TransitionStyle,
        duration_secs: f64,
        direction: Option<Direction>,
    ) -> ReelResult<Self> {
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(ReelError::validation(format!(
                "transition duration must be >= 0, got {duration_secs}"
            )));
        }
        Ok(Self {
            style,
            duration_secs,
            direction,
        })
    }

    /// Fix the direction of directional styles.
    pub fn resolve(&self, rng: &mut ReelRng) -> ResolvedTransition {
        let direction = if self.style.is_directional() {
            self.direction
                .unwrap_or_else(|| Direction::ALL[rng.random_range(0..Direction::ALL.len())])
        } else {
            self.direction.unwrap_or(Direction::Right)
        };
        ResolvedTransition {
            style: self.style,
            duration_secs: self.duration_secs,
            direction,
        }
    }
}

/// A transition with its direction fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedTransition {
    /// Blend style.
    pub style: TransitionStyle,
    /// Overlap length in seconds, after clamping to the neighbouring clips.
    pub duration_secs: f64,
    /// Travel direction.
    pub direction: Direction,
}

impl ResolvedTransition {
    /// Composite the frame at `progress` in `[0, 1)` of the overlap.
    ///
    /// `a` is the outgoing clip's frame, `b` the incoming one. `rng` drives the glitch rows.
    pub fn composite(
        &self,
        a: Option<&FrameRgb>,
        b: &FrameRgb,
        progress: f64,
        rng: &mut ReelRng,
    ) -> FrameRgb {
        let p = progress.clamp(0.0, 1.0);
        let resized;
        let a = match a {
            Some(a) if a.width != b.width || a.height != b.height => {
                resized = a.resize(b.width, b.height);
                Some(&resized)
            }
            other => other,
        };
        match self.style {
            TransitionStyle::Fade | TransitionStyle::Morph => match a {
                Some(a) => composite::crossfade(a, b, p),
                None => composite::crossfade(&FrameRgb::black(b.width, b.height), b, p),
            },
            TransitionStyle::Slide => composite::slide(a, b, p, self.direction),
            TransitionStyle::Zoom => composite::zoom_in(a, b, p),
            TransitionStyle::Glitch => match a {
                Some(a) => composite::glitch(a, GLITCH_INTENSITY, 1.0 - p, rng),
                None => b.clone(),
            },
            TransitionStyle::CircularWipe => match a {
                Some(a) => composite::circular_wipe(a, b, p, None),
                None => b.clone(),
            },
            TransitionStyle::PageCurl => match a {
                Some(a) => composite::page_curl(a, b, p, self.direction),
                None => b.clone(),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
