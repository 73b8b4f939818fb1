//! Audio analysis: short-time energy based loudness and silence detection.

use clipforge_highlight_model::signal::Signal;
use clipforge_highlight_model::waveform::Waveform;

use crate::RecognizerConfig;

/// Find loud segments and silences in a decoded waveform.
pub fn analyze_audio(waveform: &Waveform, config: &RecognizerConfig) -> Vec<Signal> {
    if waveform.is_empty() || waveform.sample_rate() == 0 {
        tracing::warn!("Empty waveform; no audio signals");
        return Vec::new();
    }

    let rms = rms_frames(waveform.samples(), config.frame_len, config.hop_len);
    if rms.is_empty() {
        return Vec::new();
    }

    let frame_secs = config.hop_len as f64 / waveform.sample_rate() as f64;

    let mut signals = find_loud_segments(&rms, frame_secs, config);
    signals.extend(find_silences(
        &rms,
        frame_secs,
        waveform.duration_secs(),
        config,
    ));

    tracing::info!(count = signals.len(), "Found audio-based signals");
    signals
}

/// Root-mean-square energy over overlapping frames.
///
/// Frame `i` covers samples `[i * hop, i * hop + frame_len)`; the frame's
/// time coordinate is `i * hop / sample_rate`, so conversions back to
/// seconds are monotonic in the frame index.
fn rms_frames(samples: &[f32], frame_len: usize, hop_len: usize) -> Vec<f32> {
    let mut frames = Vec::with_capacity(samples.len() / hop_len + 1);
    let mut start = 0;
    while start < samples.len() {
        let end = (start + frame_len).min(samples.len());
        let window = &samples[start..end];
        let energy: f32 = window.iter().map(|s| s * s).sum();
        frames.push((energy / window.len() as f32).sqrt());
        start += hop_len;
    }
    frames
}

/// Contiguous runs of frames where RMS exceeds `mean * loudness_factor`,
/// kept only if longer than the transient-spike cutoff.
fn find_loud_segments(rms: &[f32], frame_secs: f64, config: &RecognizerConfig) -> Vec<Signal> {
    let mean = rms.iter().sum::<f32>() / rms.len() as f32;
    let threshold = mean * config.loudness_factor;

    contiguous_runs(rms, |v| v > threshold)
        .into_iter()
        .filter_map(|(first, last)| {
            let start = first as f64 * frame_secs;
            let end = last as f64 * frame_secs;
            (end - start > config.min_loud_secs).then(|| Signal::loud_segment(start, end))
        })
        .collect()
}

/// Gaps between non-silent intervals (including before the first and after
/// the last) that last at least the minimum silence duration.
fn find_silences(
    rms: &[f32],
    frame_secs: f64,
    total_secs: f64,
    config: &RecognizerConfig,
) -> Vec<Signal> {
    let peak = rms.iter().copied().fold(0.0_f32, f32::max);
    // top_db below the loudest frame, amplitude scale.
    let threshold = peak * 10.0_f32.powf(-config.silence_top_db / 20.0);

    let mut signals = Vec::new();
    let mut last_end = 0.0_f64;

    for (first, last) in contiguous_runs(rms, |v| v > threshold) {
        let start = first as f64 * frame_secs;
        if start - last_end >= config.min_silence_secs {
            signals.push(Signal::silence(last_end, start));
        }
        last_end = last as f64 * frame_secs;
    }

    if total_secs - last_end >= config.min_silence_secs {
        signals.push(Signal::silence(last_end, total_secs));
    }

    signals
}

/// Index ranges `(first, last)` of maximal contiguous runs satisfying `pred`.
fn contiguous_runs(values: &[f32], pred: impl Fn(f32) -> bool) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    for (i, v) in values.iter().enumerate() {
        if pred(*v) {
            current = match current {
                Some((first, _)) => Some((first, i)),
                None => Some((i, i)),
            };
        } else if let Some(run) = current.take() {
            runs.push(run);
        }
    }
    if let Some(run) = current {
        runs.push(run);
    }
    runs
}
