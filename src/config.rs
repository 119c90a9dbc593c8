use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::ai::caption::CaptionStyle;
use crate::analysis::beats::DEFAULT_MIN_INTERVAL;
use crate::animation::ease::Ease;
use crate::assets::discover::DEFAULT_MAX_PHOTOS;
use crate::assets::preprocess::DEFAULT_WORKERS;
use crate::effects::grading::Mood;
use crate::effects::transitions::{DEFAULT_TRANSITION_SECS, TransitionSelection};
use crate::encode::ffmpeg::EncodeSettings;
use crate::foundation::core::{Fps, Resolution};
use crate::foundation::error::{ReelError, ReelResult};
use crate::motion::spec::{IntensityLevel, MotionSelection};

/// How clip motions are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraStyle {
    /// Ken Burns only.
    #[default]
    Basic,
    /// Random pick among Ken Burns and the enabled extra motions, per clip.
    Dynamic,
    /// First enabled of 3D rotation, circular, zoom+pan combo; Ken Burns otherwise.
    Cinematic,
}

/// Reel generation options. Every field has a safe default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReelsConfig {
    /// Base clip length in seconds.
    pub duration_per_photo: f64,
    /// Output width in pixels (even).
    pub width: u32,
    /// Output height in pixels (even).
    pub height: u32,
    /// Output frames per second.
    pub fps: u32,

    /// Blend adjacent clips. When off, clips are concatenated.
    pub transitions: bool,
    /// Transition style, or `random`.
    pub transition: TransitionSelection,
    /// Overlap per boundary in seconds.
    pub transition_duration: f64,

    /// Ken Burns style, or `random`.
    pub motion: MotionSelection,
    /// Animate the camera at all.
    pub ken_burns: bool,
    /// Motion strength.
    pub intensity: IntensityLevel,
    /// Easing curve name, e.g. `ease_in_out_cubic`.
    pub easing: String,
    /// Motion selection strategy.
    pub camera_style: CameraStyle,
    /// Allow pseudo-3D rotation.
    pub enable_3d_rotation: bool,
    /// Allow circular drift.
    pub enable_circular_motion: bool,
    /// Allow zoom combined with pan.
    pub enable_zoom_pan_combo: bool,
    /// Handheld shake on every clip.
    pub enable_handheld: bool,

    /// Crop around faces.
    pub enable_smart_crop: bool,
    /// Lengthen clips with important content.
    pub enable_adaptive_duration: bool,

    /// Grade colours by mood.
    pub enable_color_grading: bool,
    /// Grading strength in `[0, 1]`.
    pub color_grading_intensity: f32,
    /// Mood override. Detected from the caption when unset.
    pub mood: Option<Mood>,

    /// Retime clips to music beats.
    pub enable_beat_sync: bool,
    /// Minimum spacing between detected beats, seconds.
    pub beat_min_interval: f64,
    /// Background music file.
    pub background_music: Option<PathBuf>,
    /// Narration track mixed over the music.
    pub narration_audio: Option<PathBuf>,

    /// Overlay a generated caption.
    pub enable_ai_captions: bool,
    /// Caption tone.
    pub caption_style: CaptionStyle,

    /// Order photos by modification time instead of name.
    pub sort_by_time: bool,
    /// Cap on photos per reel.
    pub max_photos: usize,
    /// Preprocessing worker threads.
    pub workers: usize,
    /// Seed for every random choice. Drawn from the OS when unset.
    pub seed: Option<u64>,

    /// H.264 encoder settings.
    pub encoding: EncodeSettings,
}

impl Default for ReelsConfig {
    fn default() -> Self {
        Self {
            duration_per_photo: 3.0,
            width: 1080,
            height: 1920,
            fps: 30,
            transitions: true,
            transition: TransitionSelection::default(),
            transition_duration: DEFAULT_TRANSITION_SECS,
            motion: MotionSelection::default(),
            ken_burns: true,
            intensity: IntensityLevel::default(),
            easing: Ease::default().name().to_owned(),
            camera_style: CameraStyle::default(),
            enable_3d_rotation: false,
            enable_circular_motion: false,
            enable_zoom_pan_combo: false,
            enable_handheld: false,
            enable_smart_crop: false,
            enable_adaptive_duration: false,
            enable_color_grading: false,
            color_grading_intensity: 0.7,
            mood: None,
            enable_beat_sync: false,
            beat_min_interval: DEFAULT_MIN_INTERVAL,
            background_music: None,
            narration_audio: None,
            enable_ai_captions: false,
            caption_style: CaptionStyle::default(),
            sort_by_time: false,
            max_photos: DEFAULT_MAX_PHOTOS,
            workers: DEFAULT_WORKERS,
            seed: None,
            encoding: EncodeSettings::default(),
        }
    }
}

impl ReelsConfig {
    /// Parse a JSON config.
    pub fn from_reader<R: Read>(reader: R) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_reader(reader).context("parse reels config json")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Reject values the pipeline cannot honour.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.duration_per_photo.is_finite() || self.duration_per_photo <= 0.0 {
            return Err(ReelError::validation(
                "duration_per_photo must be a positive number of seconds",
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation("width/height must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(ReelError::validation(
                "width/height must be even (required for yuv420p output)",
            ));
        }
        if self.fps == 0 {
            return Err(ReelError::validation("fps must be non-zero"));
        }
        if !self.transition_duration.is_finite() || self.transition_duration < 0.0 {
            return Err(ReelError::validation("transition_duration must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.color_grading_intensity) {
            return Err(ReelError::validation(
                "color_grading_intensity must be in [0, 1]",
            ));
        }
        if !self.beat_min_interval.is_finite() || self.beat_min_interval <= 0.0 {
            return Err(ReelError::validation("beat_min_interval must be > 0"));
        }
        if self.max_photos == 0 {
            return Err(ReelError::validation("max_photos must be >= 1"));
        }
        if self.workers == 0 {
            return Err(ReelError::validation("workers must be >= 1"));
        }
        Ok(())
    }

    /// Output resolution.
    pub fn resolution(&self) -> ReelResult<Resolution> {
        Resolution::new(self.width, self.height)
    }

    /// Output frame rate.
    pub fn fps(&self) -> ReelResult<Fps> {
        Fps::new(self.fps, 1)
    }

    /// Easing curve; unknown names fall back to `ease_in_out_cubic`.
    pub fn ease(&self) -> Ease {
        Ease::from_name(&self.easing)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
