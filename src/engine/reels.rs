use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::ai::caption::{CaptionGenerator, caption_or_fallback};
use crate::analysis::beats::{BeatTimeline, detect_beats, retime_durations};
use crate::analysis::faces::{FaceDetector, adjust_duration};
use crate::assets::discover::discover_photos;
use crate::assets::preprocess::{PreparedPhoto, PreprocessOpts, preprocess_photos};
use crate::audio::media::{AudioPcm, MIX_CHANNELS, MIX_SAMPLE_RATE, decode_for_beats, decode_for_mix};
use crate::audio::mix::{mix_music_and_narration, write_f32le_file};
use crate::config::{CameraStyle, ReelsConfig};
use crate::effects::caption_overlay::{CaptionOverlay, system_fontdb};
use crate::effects::grading::{ColorGrade, Mood};
use crate::effects::transitions::TransitionSpec;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::rng::{ReelRng, rng_from_seed};
use crate::motion::clip::Clip;
use crate::motion::spec::{MotionSpec, MotionStyle};
use crate::render::frame::FrameRgb;
use crate::render::sequence::Sequence;

/// Progress callback: `(percent, message)`.
pub type ProgressFn = Box<dyn FnMut(u8, &str) + Send>;

/// Summary of one generated reel.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderReport {
    /// Written MP4, when rendering to a file.
    pub output: Option<PathBuf>,
    /// Photos that made it into the reel, in order.
    pub photos: Vec<PathBuf>,
    /// Photos discovered but skipped after a decode or preprocessing failure.
    pub skipped: usize,
    /// Output frames.
    pub frames: u64,
    /// Video length in seconds.
    pub duration_secs: f64,
    /// Overlay caption, when captions are enabled.
    pub caption: Option<String>,
    /// Grading mood, when grading is enabled.
    pub mood: Option<Mood>,
    /// Beats used for retiming.
    pub beats: usize,
    /// Whether an audio track was muxed.
    pub audio: bool,
}

/// A fully assembled reel, ready to stream.
pub struct ReelPlan {
    /// Clips, transitions and finishing passes.
    pub sequence: Sequence,
    /// Photos that made it into the reel, in order.
    pub photos: Vec<PathBuf>,
    /// Photos skipped during preprocessing.
    pub skipped: usize,
    /// Overlay caption.
    pub caption: Option<String>,
    /// Grading mood.
    pub mood: Option<Mood>,
    /// Beat timeline used for retiming.
    pub beats: Option<BeatTimeline>,
}

/// Photo-to-reel orchestrator.
///
/// Collaborators (face detector, caption generator) are optional; without them the engine
/// falls back to centred crops, base durations and a fixed caption.
pub struct ReelsEngine {
    cfg: ReelsConfig,
    faces: Option<Arc<dyn FaceDetector>>,
    captions: Option<Arc<dyn CaptionGenerator>>,
    fontdb: Option<Arc<usvg::fontdb::Database>>,
    progress: Option<ProgressFn>,
}

impl ReelsEngine {
    /// Create an engine for a validated config.
    pub fn new(cfg: ReelsConfig) -> ReelResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            faces: None,
            captions: None,
            fontdb: None,
            progress: None,
        })
    }

    /// Use `detector` for smart crop and adaptive duration.
    pub fn with_face_detector(mut self, detector: Arc<dyn FaceDetector>) -> Self {
        self.faces = Some(detector);
        self
    }

    /// Use `generator` for the caption overlay.
    pub fn with_caption_generator(mut self, generator: Arc<dyn CaptionGenerator>) -> Self {
        self.captions = Some(generator);
        self
    }

    /// Render captions with `fontdb` instead of the system fonts.
    pub fn with_fontdb(mut self, fontdb: Arc<usvg::fontdb::Database>) -> Self {
        self.fontdb = Some(fontdb);
        self
    }

    /// Receive `(percent, message)` milestones.
    pub fn on_progress(mut self, f: impl FnMut(u8, &str) + Send + 'static) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    /// The engine configuration.
    pub fn config(&self) -> &ReelsConfig {
        &self.cfg
    }

    fn report(&mut self, percent: u8, message: &str) {
        tracing::info!(percent, "{message}");
        if let Some(cb) = self.progress.as_mut() {
            cb(percent, message);
        }
    }

    /// Collect, preprocess and assemble the reel for the photos in `input_dir`.
    ///
    /// Fails with an input error, before any output exists, when the directory is unreadable
    /// or holds no decodable photo.
    #[tracing::instrument(skip_all, fields(input = %input_dir.display()))]
    pub fn plan(&mut self, input_dir: &Path) -> ReelResult<ReelPlan> {
        let cfg = self.cfg.clone();
        let res = cfg.resolution()?;
        let fps = cfg.fps()?;
        let mut rng = rng_from_seed(cfg.seed);

        self.report(10, "collecting photos");
        let paths = discover_photos(input_dir, cfg.max_photos, cfg.sort_by_time)?;

        self.report(22, "preprocessing photos");
        let opts = PreprocessOpts {
            target: res,
            smart_crop: cfg.enable_smart_crop,
            score_importance: cfg.enable_adaptive_duration,
        };
        let prepared = preprocess_photos(&paths, &opts, self.faces.as_deref(), cfg.workers)?;
        if prepared.is_empty() {
            return Err(ReelError::input(format!(
                "no valid images in '{}'",
                input_dir.display()
            )));
        }
        let skipped = paths.len() - prepared.len();

        let caption = if cfg.enable_ai_captions {
            let frames: Vec<&FrameRgb> = prepared.iter().map(|p| &p.frame).collect();
            Some(match self.captions.as_deref() {
                Some(generator) => caption_or_fallback(generator, &frames, cfg.caption_style),
                None => {
                    tracing::warn!("captions enabled without a caption generator; using fallback");
                    crate::ai::caption::FALLBACK_CAPTION.to_owned()
                }
            })
        } else {
            None
        };

        let durations = self.base_durations(&prepared);
        let mut clips = Vec::with_capacity(prepared.len());
        let n = prepared.len();
        let mut photos = Vec::with_capacity(n);
        for (i, (photo, duration)) in prepared.into_iter().zip(durations).enumerate() {
            let spec = choose_motion(&cfg, &mut rng);
            let clip = Clip::new(Arc::new(photo.frame), duration, spec, res, fps, &mut rng)?;
            tracing::debug!(
                clip = i,
                path = %photo.path.display(),
                style = %spec.style,
                intensity = spec.intensity,
                duration,
                motion = ?clip.motion(),
                "clip built"
            );
            clips.push(clip);
            photos.push(photo.path);
            self.report(30 + (25 * (i + 1) / n) as u8, "building clips");
        }

        let beats = if cfg.enable_beat_sync {
            self.report(60, "syncing to beats");
            let beats = self.detect_music_beats(&cfg);
            if let Some(beats) = beats.as_ref() {
                let current: Vec<f64> = clips.iter().map(Clip::duration).collect();
                for (clip, d) in clips.iter_mut().zip(retime_durations(&current, beats)) {
                    clip.set_duration(d)?;
                }
            }
            beats
        } else {
            None
        };

        self.report(70, "applying transitions");
        let mut boundaries = Vec::with_capacity(clips.len().saturating_sub(1));
        for _ in 1..clips.len() {
            let style = cfg.transition.pick(&mut rng);
            let secs = if cfg.transitions {
                cfg.transition_duration
            } else {
                0.0
            };
            boundaries.push(TransitionSpec::new(style, secs, None)?);
        }
        let mut sequence = Sequence::new(clips, &boundaries, fps, &mut rng)?;

        let mood = if cfg.enable_color_grading {
            let mood = cfg
                .mood
                .unwrap_or_else(|| caption.as_deref().map(Mood::detect).unwrap_or_default());
            sequence = sequence.with_grade(ColorGrade::new(mood, cfg.color_grading_intensity));
            Some(mood)
        } else {
            None
        };

        if let Some(text) = caption.as_deref() {
            let fontdb = self.fontdb.get_or_insert_with(system_fontdb).clone();
            match CaptionOverlay::render(text, res, fontdb) {
                Ok(overlay) => sequence = sequence.with_caption(overlay),
                Err(e) => tracing::warn!(error = %e, "caption overlay failed; rendering without it"),
            }
        }

        Ok(ReelPlan {
            sequence,
            photos,
            skipped,
            caption,
            mood,
            beats,
        })
    }

    fn base_durations(&self, prepared: &[PreparedPhoto]) -> Vec<f64> {
        let base = self.cfg.duration_per_photo;
        let adaptive = self.cfg.enable_adaptive_duration && self.faces.is_some();
        prepared
            .iter()
            .map(|p| {
                if adaptive {
                    adjust_duration(base, p.importance)
                } else {
                    base
                }
            })
            .collect()
    }

    fn detect_music_beats(&self, cfg: &ReelsConfig) -> Option<BeatTimeline> {
        let Some(music) = cfg.background_music.as_deref() else {
            tracing::warn!("beat sync enabled without background music; skipping");
            return None;
        };
        let pcm = match decode_for_beats(music) {
            Ok(pcm) => pcm,
            Err(e) => {
                tracing::warn!(path = %music.display(), error = %e, "beat detection skipped");
                return None;
            }
        };
        match detect_beats(&pcm.to_mono(), pcm.sample_rate, cfg.beat_min_interval) {
            Ok(beats) => {
                tracing::info!(beats = beats.len(), "beats detected");
                Some(beats)
            }
            Err(e) => {
                tracing::warn!(error = %e, "beat detection failed");
                None
            }
        }
    }

    /// Assemble the reel and stream it into `sink`.
    #[tracing::instrument(skip_all, fields(input = %input_dir.display()))]
    pub fn render_to_sink(
        &mut self,
        input_dir: &Path,
        sink: &mut dyn FrameSink,
        audio: Option<AudioInputConfig>,
    ) -> ReelResult<RenderReport> {
        let plan = self.plan(input_dir)?;
        let has_audio = audio.is_some();
        self.report(90, "encoding");
        let frames = stream_sequence(&plan.sequence, sink, audio)?;
        self.report(100, "done");
        Ok(RenderReport {
            output: None,
            photos: plan.photos,
            skipped: plan.skipped,
            frames,
            duration_secs: plan.sequence.duration_secs(),
            caption: plan.caption,
            mood: plan.mood,
            beats: plan.beats.as_ref().map_or(0, BeatTimeline::len),
            audio: has_audio,
        })
    }

    /// Generate an MP4 reel at `output` from the photos in `input_dir`.
    ///
    /// Frames are encoded into a sibling partial file that replaces `output` only once the
    /// encode succeeds, so a failed run leaves any earlier file at `output` untouched.
    #[tracing::instrument(skip_all, fields(input = %input_dir.display(), output = %output.display()))]
    pub fn generate(&mut self, input_dir: &Path, output: &Path) -> ReelResult<RenderReport> {
        let plan = self.plan(input_dir)?;
        let duration = plan.sequence.duration_secs();

        let mix_path = mix_path_for(output);
        let audio = self.prepare_audio(duration, &mix_path)?;
        let has_audio = audio.is_some();

        self.report(90, "encoding");
        let partial = partial_path_for(output);
        let mut opts = FfmpegSinkOpts::new(&partial);
        opts.settings = self.cfg.encoding.clone();
        let mut sink = FfmpegSink::new(opts);
        let streamed = stream_sequence(&plan.sequence, &mut sink, audio);
        if has_audio {
            let _ = std::fs::remove_file(&mix_path);
        }
        let frames = commit_output(streamed, &partial, output)?;
        self.report(100, "done");

        Ok(RenderReport {
            output: Some(output.to_path_buf()),
            photos: plan.photos,
            skipped: plan.skipped,
            frames,
            duration_secs: duration,
            caption: plan.caption,
            mood: plan.mood,
            beats: plan.beats.as_ref().map_or(0, BeatTimeline::len),
            audio: has_audio,
        })
    }

    /// Mix music and narration into a raw `f32le` file at `mix_path`.
    ///
    /// Returns `None` when there is no usable audio; missing tracks are logged and skipped.
    fn prepare_audio(
        &self,
        duration_secs: f64,
        mix_path: &Path,
    ) -> ReelResult<Option<AudioInputConfig>> {
        let load = |path: Option<&Path>, what: &str| -> Option<AudioPcm> {
            let path = path?;
            match decode_for_mix(path) {
                Ok(pcm) => Some(pcm),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping {what}");
                    None
                }
            }
        };
        let music = load(self.cfg.background_music.as_deref(), "background music");
        let narration = load(self.cfg.narration_audio.as_deref(), "narration");
        if music.is_none() && narration.is_none() {
            return Ok(None);
        }

        let mixed = mix_music_and_narration(
            music.as_ref(),
            narration.as_ref(),
            duration_secs,
            MIX_SAMPLE_RATE,
            MIX_CHANNELS,
        );
        write_f32le_file(&mixed, mix_path)?;
        Ok(Some(AudioInputConfig {
            path: mix_path.to_path_buf(),
            sample_rate: MIX_SAMPLE_RATE,
            channels: MIX_CHANNELS,
        }))
    }
}

/// Push every frame of `sequence` through `sink`; returns the frame count.
pub fn stream_sequence(
    sequence: &Sequence,
    sink: &mut dyn FrameSink,
    audio: Option<AudioInputConfig>,
) -> ReelResult<u64> {
    let res = sequence.resolution();
    sink.begin(SinkConfig {
        width: res.width,
        height: res.height,
        fps: sequence.fps(),
        audio,
    })?;
    let mut written = 0u64;
    for (idx, frame) in sequence.frames() {
        if let Err(e) = sink.push_frame(idx, &frame) {
            // Let the writer shut down before the caller discards its output.
            let _ = sink.end();
            return Err(e);
        }
        written += 1;
    }
    sink.end()?;
    Ok(written)
}

/// Raw audio mix path beside `output`.
fn mix_path_for(output: &Path) -> PathBuf {
    output.with_extension("mix.f32le")
}

/// In-progress encode path beside `output`. Keeps the container extension for ffmpeg.
pub(crate) fn partial_path_for(output: &Path) -> PathBuf {
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("mp4");
    output.with_extension(format!("partial.{ext}"))
}

/// Move a finished encode into place, or discard the partial file of a failed one.
pub(crate) fn commit_output(
    streamed: ReelResult<u64>,
    partial: &Path,
    output: &Path,
) -> ReelResult<u64> {
    match streamed {
        Ok(frames) => {
            std::fs::rename(partial, output).map_err(|e| {
                ReelError::encode(format!(
                    "failed to move '{}' to '{}': {e}",
                    partial.display(),
                    output.display()
                ))
            })?;
            Ok(frames)
        }
        Err(e) => {
            if partial.exists() {
                let _ = std::fs::remove_file(partial);
            }
            Err(e)
        }
    }
}

/// Motion for the next clip, following the camera style and enabled extras.
pub(crate) fn choose_motion(cfg: &ReelsConfig, rng: &mut ReelRng) -> MotionSpec {
    use rand::Rng as _;

    let extras: Vec<MotionStyle> = [
        (cfg.enable_3d_rotation, MotionStyle::Rotate3d),
        (cfg.enable_circular_motion, MotionStyle::Circular),
        (cfg.enable_zoom_pan_combo, MotionStyle::ZoomPanCombo),
    ]
    .into_iter()
    .filter_map(|(on, style)| on.then_some(style))
    .collect();

    let style = if cfg.enable_handheld {
        Some(MotionStyle::Handheld)
    } else {
        match cfg.camera_style {
            CameraStyle::Basic => cfg.ken_burns.then(|| cfg.motion.pick(rng)),
            CameraStyle::Cinematic => extras
                .first()
                .copied()
                .or_else(|| cfg.ken_burns.then(|| cfg.motion.pick(rng))),
            CameraStyle::Dynamic => {
                let slots = extras.len() + usize::from(cfg.ken_burns);
                if slots == 0 {
                    None
                } else {
                    let k = rng.random_range(0..slots);
                    match extras.get(k) {
                        Some(&style) => Some(style),
                        None => Some(cfg.motion.pick(rng)),
                    }
                }
            }
        }
    };

    match style {
        Some(style) => MotionSpec::with_level(style, cfg.intensity, cfg.ease()),
        None => MotionSpec::still(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/reels.rs"]
mod tests;
