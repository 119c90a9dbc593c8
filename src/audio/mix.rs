use std::path::Path;

use crate::audio::media::AudioPcm;
use crate::foundation::error::{ReelError, ReelResult};

/// Background music gain when playing alone.
pub const MUSIC_VOLUME: f32 = 0.8;
/// Background music gain under a narration track.
pub const MUSIC_UNDER_NARRATION_VOLUME: f32 = 0.3;
/// Narration gain.
pub const NARRATION_VOLUME: f32 = 0.7;

/// Sum `sources` (each at its gain) into `duration_secs` of interleaved output PCM.
///
/// Sources are expected at the output rate. Longer sources are truncated, shorter ones leave
/// silence; mono sources are spread to every output channel.
pub(crate) fn mix_sources(
    sources: &[(&AudioPcm, f32)],
    duration_secs: f64,
    sample_rate: u32,
    channels: u16,
) -> Vec<f32> {
    let frames = (duration_secs.max(0.0) * f64::from(sample_rate)).round() as usize;
    let out_ch = usize::from(channels.max(1));
    let mut out = vec![0.0f32; frames * out_ch];

    for (pcm, gain) in sources {
        let src_ch = usize::from(pcm.channels.max(1));
        let src_frames = pcm.frames().min(frames);
        for f in 0..src_frames {
            for c in 0..out_ch {
                let sc = if src_ch == 1 { 0 } else { c.min(src_ch - 1) };
                out[f * out_ch + c] += pcm.interleaved_f32[f * src_ch + sc] * gain;
            }
        }
    }

    for s in &mut out {
        *s = s.clamp(-1.0, 1.0);
    }
    out
}

/// Mix optional background music and narration for a video of `duration_secs`.
///
/// Music plays at 0.8, or 0.3 when narration is present; narration plays at 0.7.
pub fn mix_music_and_narration(
    music: Option<&AudioPcm>,
    narration: Option<&AudioPcm>,
    duration_secs: f64,
    sample_rate: u32,
    channels: u16,
) -> Vec<f32> {
    let mut sources = Vec::with_capacity(2);
    if let Some(m) = music {
        let gain = if narration.is_some() {
            MUSIC_UNDER_NARRATION_VOLUME
        } else {
            MUSIC_VOLUME
        };
        sources.push((m, gain));
    }
    if let Some(n) = narration {
        sources.push((n, NARRATION_VOLUME));
    }
    mix_sources(&sources, duration_secs, sample_rate, channels)
}

/// Write interleaved `f32` PCM samples to raw little-endian `.f32le` file.
pub(crate) fn write_f32le_file(samples_interleaved: &[f32], out_path: &Path) -> ReelResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ReelError::encode(format!(
                "failed to create audio mix output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        ReelError::encode(format!(
            "failed to write mixed audio file '{}': {e}",
            out_path.display()
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
