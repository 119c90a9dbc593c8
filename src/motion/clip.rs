use std::sync::Arc;

use rand::Rng;

use crate::foundation::core::{Fps, Resolution};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::rng::{ReelRng, frame_rng};
use crate::motion::camera::{self, CameraFrame, HANDHELD_SHAKE_PX};
use crate::motion::spec::{MotionSpec, ResolvedMotion};
use crate::render::frame::FrameRgb;

const HANDHELD_STREAM: u64 = 1;

/// One source image animated over a fixed duration.
///
/// All parameters are fixed at construction. `frame_at` is pure, so iterating the clip's
/// frames twice yields identical output.
#[derive(Clone, Debug)]
pub struct Clip {
    source: Arc<FrameRgb>,
    prescaled: Option<Arc<FrameRgb>>,
    spec: MotionSpec,
    motion: ResolvedMotion,
    duration: f64,
    target: Resolution,
    fps: Fps,
    jitter_seed: u64,
}

impl Clip {
    /// Build a clip, resolving the motion's random parameters from `rng`.
    ///
    /// A source that is not already at `target` is cover-fitted first.
    pub fn new(
        source: Arc<FrameRgb>,
        duration: f64,
        spec: MotionSpec,
        target: Resolution,
        fps: Fps,
        rng: &mut ReelRng,
    ) -> ReelResult<Self> {
        validate_duration(duration)?;
        let source = if source.resolution() == target {
            source
        } else {
            Arc::new(source.fit_cover(target))
        };
        let motion = spec.resolve(rng);
        let jitter_seed = rng.random::<u64>();
        let prescaled = camera::fixed_scale(&motion, spec.intensity)
            .map(|z| Arc::new(camera::scale_by(&source, z)));
        Ok(Self {
            source,
            prescaled,
            spec,
            motion,
            duration,
            target,
            fps,
            jitter_seed,
        })
    }

    /// Clip duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Replace the duration, keeping every other parameter.
    pub fn set_duration(&mut self, duration: f64) -> ReelResult<()> {
        validate_duration(duration)?;
        self.duration = duration;
        Ok(())
    }

    /// Motion spec this clip was built from.
    pub fn spec(&self) -> &MotionSpec {
        &self.spec
    }

    /// Motion with its random parameters resolved.
    pub fn motion(&self) -> &ResolvedMotion {
        &self.motion
    }

    /// Output resolution.
    pub fn resolution(&self) -> Resolution {
        self.target
    }

    /// The (cover-fitted) source image.
    pub fn source(&self) -> &FrameRgb {
        &self.source
    }

    /// Eased progress at `t` seconds into the clip.
    pub fn progress(&self, t: f64) -> f64 {
        self.spec.easing.apply(t / self.duration)
    }

    /// Number of frames the clip spans at its frame rate.
    pub fn frame_count(&self) -> u64 {
        self.fps.secs_to_frames_round(self.duration)
    }

    fn jitter(&self, t: f64) -> (i64, i64) {
        if !matches!(self.motion, ResolvedMotion::Handheld) {
            return (0, 0);
        }
        let index = (t.max(0.0) * self.fps.as_f64() + 1e-9).floor() as u64;
        let mut rng = frame_rng(self.jitter_seed, HANDHELD_STREAM, index);
        (
            rng.random_range(-HANDHELD_SHAKE_PX..=HANDHELD_SHAKE_PX),
            rng.random_range(-HANDHELD_SHAKE_PX..=HANDHELD_SHAKE_PX),
        )
    }

    /// Render the frame at `t` seconds, `t` clamped into `[0, D]`.
    pub fn frame_at(&self, t: f64) -> FrameRgb {
        let t = if t.is_nan() {
            0.0
        } else {
            t.clamp(0.0, self.duration)
        };
        let cam = CameraFrame {
            source: &self.source,
            prescaled: self.prescaled.as_deref(),
            target: self.target,
            intensity: self.spec.intensity,
            progress: self.progress(t),
            jitter: self.jitter(t),
        };
        camera::render(&self.motion, &cam)
    }

    /// Iterate the clip's frames from `t = 0` at the clip frame rate.
    pub fn frames(&self) -> ClipFrames<'_> {
        ClipFrames {
            clip: self,
            next: 0,
            count: self.frame_count(),
        }
    }
}

fn validate_duration(duration: f64) -> ReelResult<()> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(ReelError::validation(format!(
            "clip duration must be > 0, got {duration}"
        )));
    }
    Ok(())
}

/// Restartable frame iterator of a [`Clip`].
pub struct ClipFrames<'a> {
    clip: &'a Clip,
    next: u64,
    count: u64,
}

impl Iterator for ClipFrames<'_> {
    type Item = FrameRgb;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let t = self.clip.fps.frames_to_secs(self.next);
        self.next += 1;
        Some(self.clip.frame_at(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.count - self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ClipFrames<'_> {}

#[cfg(test)]
#[path = "../../tests/unit/motion/clip.rs"]
mod tests;
