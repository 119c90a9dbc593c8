//! reelcraft turns a folder of photos into a vertical "reels" video.
//!
//! Each photo becomes a clip with simulated camera motion (Ken Burns zoom and pan, circular
//! drift, handheld shake, pseudo-3D rotation). Adjacent clips overlap through a transition,
//! frames are optionally colour graded and captioned, clip lengths can follow music beats, and
//! the ordered frame stream is handed to the system `ffmpeg` for H.264/AAC MP4 output.
//!
//! - Load a [`ReelsConfig`]
//! - Create a [`ReelsEngine`], optionally with a [`FaceDetector`] and [`CaptionGenerator`]
//! - Call [`ReelsEngine::generate`] or stream into any [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod ai;
pub(crate) mod analysis;
pub(crate) mod animation;
pub(crate) mod assets;
pub(crate) mod audio;
pub(crate) mod config;
pub(crate) mod effects;
/// Encoding sinks.
pub mod encode;
pub(crate) mod engine;
pub(crate) mod motion;
/// Frame buffers and sequencing.
pub mod render;

pub use crate::foundation::core::{Fps, FrameIndex, Resolution};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::foundation::rng::{ReelRng, rng_from_seed};

pub use crate::ai::caption::{
    CaptionGenerator, CaptionStyle, FALLBACK_CAPTION, FixedCaption, caption_or_fallback,
};
pub use crate::analysis::beats::{BeatTimeline, detect_beats, retime_durations};
pub use crate::analysis::faces::{
    FaceBox, FaceDetector, NoFaceDetector, adjust_duration, focus_point, importance, smart_crop,
};
pub use crate::animation::ease::Ease;
pub use crate::assets::decode::{DecodedPhoto, decode_photo_bytes, load_photo, save_frame};
pub use crate::assets::discover::{discover_photos, is_photo_path};
pub use crate::assets::preprocess::{
    PreparedPhoto, PreprocessOpts, build_thread_pool, prepare_photo, preprocess_photos,
    run_ordered,
};
pub use crate::audio::media::{AudioPcm, decode_audio_f32, decode_for_beats, decode_for_mix};
pub use crate::audio::mix::mix_music_and_narration;
pub use crate::config::{CameraStyle, ReelsConfig};
pub use crate::effects::caption_overlay::{CaptionOverlay, system_fontdb};
pub use crate::effects::grading::{ColorGrade, GradePreset, Mood, apply_grade};
pub use crate::effects::transitions::{
    Direction, ResolvedTransition, TransitionSelection, TransitionSpec, TransitionStyle,
};
pub use crate::encode::ffmpeg::{EncodeSettings, FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use crate::engine::reels::{
    ProgressFn, ReelPlan, ReelsEngine, RenderReport, stream_sequence,
};
pub use crate::motion::clip::Clip;
pub use crate::motion::spec::{
    IntensityLevel, MotionSelection, MotionSpec, MotionStyle, ResolvedMotion,
};
pub use crate::render::frame::FrameRgb;
pub use crate::render::sequence::Sequence;
