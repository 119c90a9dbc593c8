use crate::foundation::error::{ReelError, ReelResult};

/// Rate audio is resampled to before beat detection.
pub const BEAT_SAMPLE_RATE: u32 = 22_050;
/// Energy window length in seconds.
pub const BEAT_WINDOW_SECS: f64 = 0.05;
/// Standard deviations above the mean energy a beat must exceed.
pub const BEAT_THRESHOLD_STD: f64 = 1.5;
/// Default minimum spacing between beats, in seconds.
pub const DEFAULT_MIN_INTERVAL: f64 = 0.5;
/// A retimed clip ends on the first beat at least this far past its start.
pub const RETIME_MIN_SECS: f64 = 0.5;

const SPACING_EPS: f64 = 1e-9;

/// Strictly increasing beat timestamps with a guaranteed minimum spacing.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BeatTimeline {
    times: Vec<f64>,
    min_interval: f64,
}

impl BeatTimeline {
    /// Validate and wrap beat times (seconds).
    pub fn new(times: Vec<f64>, min_interval: f64) -> ReelResult<Self> {
        if !min_interval.is_finite() || min_interval <= 0.0 {
            return Err(ReelError::validation(format!(
                "beat min_interval must be > 0, got {min_interval}"
            )));
        }
        if times.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(ReelError::validation("beat times must be finite and >= 0"));
        }
        if times
            .windows(2)
            .any(|w| w[1] - w[0] + SPACING_EPS < min_interval)
        {
            return Err(ReelError::validation(format!(
                "beats must be increasing and at least {min_interval}s apart"
            )));
        }
        Ok(Self {
            times,
            min_interval,
        })
    }

    /// An empty timeline.
    pub fn empty(min_interval: f64) -> ReelResult<Self> {
        Self::new(Vec::new(), min_interval)
    }

    /// Beat times in seconds.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Minimum spacing guaranteed between consecutive beats.
    pub fn min_interval(&self) -> f64 {
        self.min_interval
    }

    /// Number of beats.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether no beat was found.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// RMS energy of consecutive 50 ms windows of a mono signal.
pub fn window_energies(samples: &[f32], sample_rate: u32) -> Vec<f64> {
    let window = ((f64::from(sample_rate) * BEAT_WINDOW_SECS) as usize).max(1);
    samples
        .chunks(window)
        .map(|chunk| {
            let sum: f64 = chunk.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
            (sum / chunk.len() as f64).sqrt()
        })
        .collect()
}

/// Energy-peak beat detection over a mono signal.
///
/// A window is a beat when its RMS exceeds `mean + 1.5 * stddev` of all windows and at least
/// `min_interval` has passed since the previous beat. Selection is greedy, first come first
/// served.
pub fn detect_beats(
    samples: &[f32],
    sample_rate: u32,
    min_interval: f64,
) -> ReelResult<BeatTimeline> {
    if sample_rate == 0 {
        return Err(ReelError::validation("sample rate must be > 0"));
    }
    let energies = window_energies(samples, sample_rate);
    if energies.is_empty() {
        return BeatTimeline::empty(min_interval);
    }
    let n = energies.len() as f64;
    let mean = energies.iter().sum::<f64>() / n;
    let var = energies.iter().map(|e| (e - mean) * (e - mean)).sum::<f64>() / n;
    let threshold = mean + var.sqrt() * BEAT_THRESHOLD_STD;

    let window = ((f64::from(sample_rate) * BEAT_WINDOW_SECS) as usize).max(1);
    let window_secs = window as f64 / f64::from(sample_rate);
    let mut beats = Vec::new();
    let mut last = -min_interval;
    for (i, &energy) in energies.iter().enumerate() {
        if energy <= threshold {
            continue;
        }
        let t = i as f64 * window_secs;
        if t - last + SPACING_EPS >= min_interval {
            beats.push(t);
            last = t;
        }
    }
    tracing::debug!(beats = beats.len(), threshold, "beat detection");
    BeatTimeline::new(beats, min_interval)
}

/// Snap clip durations to beats, walking the clips once.
///
/// Each clip but the last ends on the first beat more than 0.5 s past its start. Clips with no
/// such beat (and the last clip) keep their duration. Beats are consumed in order and never
/// revisited.
///
/// Clip starts are the running sum of durations, with no transition overlap. Once the sequence
/// overlaps clips by `T`, the cut into clip `i` plays `i * T` ahead of the beat it was snapped
/// to.
pub fn retime_durations(durations: &[f64], beats: &BeatTimeline) -> Vec<f64> {
    if beats.is_empty() {
        return durations.to_vec();
    }
    let times = beats.times();
    let mut out = Vec::with_capacity(durations.len());
    let mut current = 0.0;
    let mut idx = 0;
    for (i, &d) in durations.iter().enumerate() {
        let mut next_beat = None;
        while idx < times.len() {
            if times[idx] > current + RETIME_MIN_SECS {
                next_beat = Some(times[idx]);
                break;
            }
            idx += 1;
        }
        let duration = match next_beat {
            Some(beat) if i + 1 < durations.len() => beat - current,
            _ => d,
        };
        out.push(duration);
        current += duration;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/beats.rs"]
mod tests;
