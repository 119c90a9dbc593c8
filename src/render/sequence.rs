use rand::Rng;

use crate::effects::caption_overlay::CaptionOverlay;
use crate::effects::grading::ColorGrade;
use crate::effects::transitions::{ResolvedTransition, TransitionSpec};
use crate::foundation::core::{Fps, FrameIndex, Resolution};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::rng::{ReelRng, frame_rng};
use crate::motion::clip::Clip;
use crate::render::frame::FrameRgb;

const TRANSITION_STREAM: u64 = 2;
const GRADE_STREAM: u64 = 3;

/// Ordered clips joined by overlapping transitions, plus whole-video finishing passes.
///
/// Clip `i` starts at `start[i-1] + D[i-1] - T[i]`, so the total length is
/// `ΣD - ΣT`. Every frame is a pure function of its index.
#[derive(Clone, Debug)]
pub struct Sequence {
    clips: Vec<Clip>,
    boundaries: Vec<ResolvedTransition>,
    starts: Vec<f64>,
    total: f64,
    fps: Fps,
    resolution: Resolution,
    grade: Option<ColorGrade>,
    caption: Option<CaptionOverlay>,
    effect_seed: u64,
}

impl Sequence {
    /// Join `clips` with one transition per boundary.
    ///
    /// `boundaries` must hold `clips.len() - 1` entries. Each overlap is clamped to at most
    /// half of either neighbouring clip.
    pub fn new(
        clips: Vec<Clip>,
        boundaries: &[TransitionSpec],
        fps: Fps,
        rng: &mut ReelRng,
    ) -> ReelResult<Self> {
        let Some(first) = clips.first() else {
            return Err(ReelError::validation("sequence needs at least one clip"));
        };
        if boundaries.len() + 1 != clips.len() {
            return Err(ReelError::validation(format!(
                "sequence of {} clips needs {} transitions, got {}",
                clips.len(),
                clips.len() - 1,
                boundaries.len()
            )));
        }
        let resolution = first.resolution();
        if let Some(bad) = clips.iter().find(|c| c.resolution() != resolution) {
            return Err(ReelError::validation(format!(
                "clip resolution {}x{} does not match sequence resolution {}x{}",
                bad.resolution().width,
                bad.resolution().height,
                resolution.width,
                resolution.height
            )));
        }

        let mut resolved = Vec::with_capacity(boundaries.len());
        let mut starts = Vec::with_capacity(clips.len());
        starts.push(0.0);
        for (i, spec) in boundaries.iter().enumerate() {
            let prev = clips[i].duration();
            let next = clips[i + 1].duration();
            let mut tr = spec.resolve(rng);
            tr.duration_secs = tr.duration_secs.min(prev / 2.0).min(next / 2.0);
            starts.push(starts[i] + prev - tr.duration_secs);
            resolved.push(tr);
        }
        let total = starts[clips.len() - 1] + clips[clips.len() - 1].duration();

        Ok(Self {
            clips,
            boundaries: resolved,
            starts,
            total,
            fps,
            resolution,
            grade: None,
            caption: None,
            effect_seed: rng.random::<u64>(),
        })
    }

    /// Grade every output frame.
    pub fn with_grade(mut self, grade: ColorGrade) -> Self {
        self.grade = Some(grade);
        self
    }

    /// Blend a caption over every output frame, fading in and out.
    pub fn with_caption(mut self, caption: CaptionOverlay) -> Self {
        self.caption = Some(caption);
        self
    }

    /// The clips in playback order.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Transitions after clamping, one per boundary.
    pub fn transitions(&self) -> &[ResolvedTransition] {
        &self.boundaries
    }

    /// Start time of each clip in seconds.
    pub fn starts(&self) -> &[f64] {
        &self.starts
    }

    /// Total length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.total
    }

    /// Output frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Output resolution.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Number of output frames.
    pub fn frame_count(&self) -> u64 {
        self.fps.secs_to_frames_round(self.total)
    }

    /// Index of the clip that owns time `t` (the later clip inside an overlap).
    fn clip_at(&self, t: f64) -> usize {
        self.starts
            .partition_point(|&s| s <= t + 1e-9)
            .saturating_sub(1)
    }

    /// Render output frame `idx`.
    pub fn frame_at(&self, idx: FrameIndex) -> FrameRgb {
        let t = self.fps.frames_to_secs(idx.0);
        let i = self.clip_at(t);
        let local = (t - self.starts[i]).max(0.0);
        let clip = &self.clips[i];

        let mut frame = match i.checked_sub(1).map(|p| (p, &self.boundaries[p])) {
            Some((p, tr)) if tr.duration_secs > 0.0 && local < tr.duration_secs => {
                let prev = &self.clips[p];
                let a = prev.frame_at(prev.duration() - tr.duration_secs + local);
                let b = clip.frame_at(local);
                let mut rng = frame_rng(self.effect_seed, TRANSITION_STREAM, idx.0);
                tr.composite(Some(&a), &b, local / tr.duration_secs, &mut rng)
            }
            _ => clip.frame_at(local),
        };

        if let Some(grade) = self.grade.as_ref() {
            let mut rng = frame_rng(self.effect_seed, GRADE_STREAM, idx.0);
            grade.apply(&mut frame, &mut rng);
        }
        if let Some(caption) = self.caption.as_ref() {
            caption.apply(&mut frame, CaptionOverlay::opacity_at(t, self.total));
        }
        frame
    }

    /// Iterate every output frame from the start.
    pub fn frames(&self) -> SequenceFrames<'_> {
        SequenceFrames {
            seq: self,
            next: 0,
            count: self.frame_count(),
        }
    }
}

/// Restartable frame iterator of a [`Sequence`].
pub struct SequenceFrames<'a> {
    seq: &'a Sequence,
    next: u64,
    count: u64,
}

impl Iterator for SequenceFrames<'_> {
    type Item = (FrameIndex, FrameRgb);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let idx = FrameIndex(self.next);
        self.next += 1;
        Some((idx, self.seq.frame_at(idx)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.count - self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SequenceFrames<'_> {}

#[cfg(test)]
#[path = "../../tests/unit/render/sequence.rs"]
mod tests;
