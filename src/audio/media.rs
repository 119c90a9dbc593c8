use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// Sample rate of the output audio track.
pub const MIX_SAMPLE_RATE: u32 = 48_000;
/// Channel count of the output audio track.
pub const MIX_CHANNELS: u16 = 2;

/// Decoded interleaved floating-point PCM.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioPcm {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved `f32` PCM samples.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.interleaved_f32.len() / usize::from(self.channels.max(1))
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    /// Average all channels into one.
    pub fn to_mono(&self) -> Vec<f32> {
        let ch = usize::from(self.channels.max(1));
        if ch == 1 {
            return self.interleaved_f32.clone();
        }
        self.interleaved_f32
            .chunks_exact(ch)
            .map(|frame| frame.iter().sum::<f32>() / ch as f32)
            .collect()
    }
}

pub(crate) fn parse_f32le(bytes: &[u8]) -> ReelResult<Vec<f32>> {
    if !bytes.len().is_multiple_of(4) {
        return Err(ReelError::evaluation(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Decode any audio file `ffmpeg` understands into interleaved `f32` PCM.
pub fn decode_audio_f32(path: &Path, sample_rate: u32, channels: u16) -> ReelResult<AudioPcm> {
    if sample_rate == 0 || channels == 0 {
        return Err(ReelError::validation(
            "audio decode needs a non-zero sample rate and channel count",
        ));
    }
    if !path.is_file() {
        return Err(ReelError::input(format!(
            "audio file '{}' does not exist",
            path.display()
        )));
    }

    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            &channels.to_string(),
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| {
            ReelError::evaluation(format!("failed to run ffmpeg for audio decode: {e}"))
        })?;

    if !out.status.success() {
        return Err(ReelError::evaluation(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    Ok(AudioPcm {
        sample_rate,
        channels,
        interleaved_f32: parse_f32le(&out.stdout)?,
    })
}

/// Decode a track as stereo at [`MIX_SAMPLE_RATE`] for the output mix.
pub fn decode_for_mix(path: &Path) -> ReelResult<AudioPcm> {
    decode_audio_f32(path, MIX_SAMPLE_RATE, MIX_CHANNELS)
}

/// Decode a track as mono at the beat-detection rate.
pub fn decode_for_beats(path: &Path) -> ReelResult<AudioPcm> {
    decode_audio_f32(path, crate::analysis::beats::BEAT_SAMPLE_RATE, 1)
}

#[cfg(test)]
#[path = "../../tests/unit/audio/media.rs"]
mod tests;
