use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::animation::ease::Ease;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::rng::ReelRng;

/// Camera motion applied across one clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionStyle {
    /// Centred zoom from `1` to `1 + i`.
    ZoomIn,
    /// Centred zoom from `1 + i` to `1`.
    ZoomOut,
    /// Horizontal pan, right to left.
    PanLeft,
    /// Horizontal pan, left to right.
    PanRight,
    /// Vertical pan, bottom to top.
    PanUp,
    /// Vertical pan, top to bottom.
    PanDown,
    /// Zoom in while drifting towards a corner.
    Diagonal,
    /// Crop centre travels once around a small circle.
    Circular,
    /// Small random shake every frame.
    Handheld,
    /// Pseudo 3D swing around the vertical axis.
    #[serde(rename = "3d_rotate")]
    Rotate3d,
    /// Zoom in or out combined with a pan.
    ZoomPanCombo,
}

impl MotionStyle {
    /// The classic Ken Burns set drawn from when the motion is `random`.
    pub const KEN_BURNS: [MotionStyle; 7] = [
        Self::ZoomIn,
        Self::ZoomOut,
        Self::PanLeft,
        Self::PanRight,
        Self::PanUp,
        Self::PanDown,
        Self::Diagonal,
    ];

    /// Every style.
    pub const ALL: [MotionStyle; 11] = [
        Self::ZoomIn,
        Self::ZoomOut,
        Self::PanLeft,
        Self::PanRight,
        Self::PanUp,
        Self::PanDown,
        Self::Diagonal,
        Self::Circular,
        Self::Handheld,
        Self::Rotate3d,
        Self::ZoomPanCombo,
    ];

    /// Snake-case name as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
            Self::PanLeft => "pan_left",
            Self::PanRight => "pan_right",
            Self::PanUp => "pan_up",
            Self::PanDown => "pan_down",
            Self::Diagonal => "diagonal",
            Self::Circular => "circular",
            Self::Handheld => "handheld",
            Self::Rotate3d => "3d_rotate",
            Self::ZoomPanCombo => "zoom_pan_combo",
        }
    }
}

impl fmt::Display for MotionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MotionStyle {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ReelError::validation(format!("unknown motion style \"{s}\"")))
    }
}

/// A configured motion: a fixed style or a per-clip random Ken Burns pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MotionSelection {
    /// Always this style.
    Fixed(MotionStyle),
    /// Draw from [`MotionStyle::KEN_BURNS`] per clip.
    Random,
}

impl MotionSelection {
    /// Pick the concrete style for one clip.
    pub fn pick(self, rng: &mut ReelRng) -> MotionStyle {
        match self {
            Self::Fixed(style) => style,
            Self::Random => {
                MotionStyle::KEN_BURNS[rng.random_range(0..MotionStyle::KEN_BURNS.len())]
            }
        }
    }
}

impl Default for MotionSelection {
    fn default() -> Self {
        Self::Fixed(MotionStyle::ZoomIn)
    }
}

impl TryFrom<String> for MotionSelection {
    type Error = ReelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("random") {
            return Ok(Self::Random);
        }
        Ok(Self::Fixed(value.parse()?))
    }
}

impl From<MotionSelection> for String {
    fn from(value: MotionSelection) -> Self {
        match value {
            MotionSelection::Fixed(style) => style.name().to_owned(),
            MotionSelection::Random => "random".to_owned(),
        }
    }
}

/// Named motion strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityLevel {
    /// 5% zoom/pan budget.
    Low,
    /// 15% zoom/pan budget.
    #[default]
    Medium,
    /// 30% zoom/pan budget.
    High,
}

impl IntensityLevel {
    /// Fractional zoom/pan budget for this level.
    pub fn budget(self) -> f64 {
        match self {
            Self::Low => 0.05,
            Self::Medium => 0.15,
            Self::High => 0.30,
        }
    }
}

/// Motion parameters owned by a single clip.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MotionSpec {
    /// Motion style.
    pub style: MotionStyle,
    /// Zoom/pan budget in `[0, 1]`.
    pub intensity: f64,
    /// Curve mapping `t / D` to motion progress.
    pub easing: Ease,
}

impl MotionSpec {
    /// Build a validated motion spec.
    pub fn new(style: MotionStyle, intensity: f64, easing: Ease) -> ReelResult<Self> {
        if !intensity.is_finite() || !(0.0..=1.0).contains(&intensity) {
            return Err(ReelError::validation(format!(
                "motion intensity must be in [0, 1], got {intensity}"
            )));
        }
        Ok(Self {
            style,
            intensity,
            easing,
        })
    }

    /// Motion spec for a named intensity level.
    pub fn with_level(style: MotionStyle, level: IntensityLevel, easing: Ease) -> Self {
        Self {
            style,
            intensity: level.budget(),
            easing,
        }
    }

    /// A spec that holds the image still (centred, no zoom).
    pub fn still() -> Self {
        Self {
            style: MotionStyle::ZoomIn,
            intensity: 0.0,
            easing: Ease::Linear,
        }
    }

    /// Fix every random parameter of the style.
    pub fn resolve(&self, rng: &mut ReelRng) -> ResolvedMotion {
        match self.style {
            MotionStyle::ZoomIn => ResolvedMotion::Zoom { zoom_in: true },
            MotionStyle::ZoomOut => ResolvedMotion::Zoom { zoom_in: false },
            MotionStyle::PanLeft => ResolvedMotion::Pan(PanDirection::Left),
            MotionStyle::PanRight => ResolvedMotion::Pan(PanDirection::Right),
            MotionStyle::PanUp => ResolvedMotion::Pan(PanDirection::Up),
            MotionStyle::PanDown => ResolvedMotion::Pan(PanDirection::Down),
            MotionStyle::Diagonal => {
                ResolvedMotion::Diagonal(Corner::ALL[rng.random_range(0..Corner::ALL.len())])
            }
            MotionStyle::Circular => ResolvedMotion::Circular,
            MotionStyle::Handheld => ResolvedMotion::Handheld,
            MotionStyle::Rotate3d => ResolvedMotion::Rotate3d {
                direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            },
            MotionStyle::ZoomPanCombo => ResolvedMotion::ZoomPanCombo {
                pan: PanDirection::ALL[rng.random_range(0..PanDirection::ALL.len())],
                zoom_in: rng.random_bool(0.5),
            },
        }
    }
}

/// Pan direction of the visible window's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanDirection {
    /// Content moves right to left.
    Left,
    /// Content moves left to right.
    Right,
    /// Content moves bottom to top.
    Up,
    /// Content moves top to bottom.
    Down,
}

impl PanDirection {
    /// All directions.
    pub const ALL: [PanDirection; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];
}

/// Target corner of a diagonal move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Window ends at the top-left.
    TopLeft,
    /// Window ends at the top-right.
    TopRight,
    /// Window ends at the bottom-left.
    BottomLeft,
    /// Window ends at the bottom-right.
    BottomRight,
}

impl Corner {
    /// All corners.
    pub const ALL: [Corner; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];
}

/// A motion style with its random parameters fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResolvedMotion {
    /// Centred zoom.
    Zoom {
        /// `true` zooms in, `false` zooms out.
        zoom_in: bool,
    },
    /// Single-axis pan at fixed scale.
    Pan(PanDirection),
    /// Zoom in drifting towards a corner.
    Diagonal(Corner),
    /// Circular crop path.
    Circular,
    /// Per-frame shake.
    Handheld,
    /// Pseudo 3D swing.
    Rotate3d {
        /// `1.0` or `-1.0`.
        direction: f64,
    },
    /// Zoom composed with a pan.
    ZoomPanCombo {
        /// Pan direction.
        pan: PanDirection,
        /// Zoom direction.
        zoom_in: bool,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/motion/spec.rs"]
mod tests;
