//! ClipForge Signal Recognizer
//!
//! Derives atomic signals from the two cheap evidence streams:
//! - **Text:** questions, keywords, and exclamations per transcript segment
//! - **Audio:** sustained loud stretches and long silences from the waveform
//!
//! This crate is pure computation — no I/O, no decoding. Inputs are data;
//! outputs are data.

pub mod audio;
pub mod text;

use clipforge_common::error::{ClipforgeError, ClipforgeResult};
use clipforge_highlight_model::signal::{sort_signals_by_start, Signal};
use clipforge_highlight_model::transcript::Transcript;
use clipforge_highlight_model::waveform::Waveform;

/// Thresholds for audio signal detection.
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    /// A frame is "loud" when its RMS exceeds `mean(rms) * loudness_factor`.
    pub loudness_factor: f32,

    /// Loud groups shorter than this are dropped as transient spikes (seconds).
    pub min_loud_secs: f64,

    /// Silence threshold, in decibels below the loudest frame.
    pub silence_top_db: f32,

    /// Minimum gap length to report as a silence signal (seconds).
    pub min_silence_secs: f64,

    /// RMS analysis frame length in samples.
    pub frame_len: usize,

    /// Hop between consecutive RMS frames in samples.
    pub hop_len: usize,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            loudness_factor: 1.8,
            min_loud_secs: 0.5,
            silence_top_db: 40.0,
            min_silence_secs: 1.0,
            frame_len: 2048,
            hop_len: 512,
        }
    }
}

impl RecognizerConfig {
    /// Reject configurations that would produce nonsensical analysis windows.
    pub fn validate(&self) -> ClipforgeResult<()> {
        if self.frame_len == 0 || self.hop_len == 0 {
            return Err(ClipforgeError::config(
                "frame_len and hop_len must be positive",
            ));
        }
        if self.hop_len > self.frame_len {
            return Err(ClipforgeError::config("hop_len must not exceed frame_len"));
        }
        if self.loudness_factor <= 0.0 {
            return Err(ClipforgeError::config("loudness_factor must be positive"));
        }
        if self.silence_top_db <= 0.0 {
            return Err(ClipforgeError::config("silence_top_db must be positive"));
        }
        if self.min_loud_secs < 0.0 || self.min_silence_secs < 0.0 {
            return Err(ClipforgeError::config(
                "minimum durations must be non-negative",
            ));
        }
        Ok(())
    }
}

/// The signal recognizer.
pub struct SignalRecognizer {
    config: RecognizerConfig,
}

impl SignalRecognizer {
    /// Create a recognizer, failing fast on an invalid configuration.
    pub fn new(config: RecognizerConfig) -> ClipforgeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a recognizer with default thresholds.
    pub fn with_defaults() -> Self {
        Self {
            config: RecognizerConfig::default(),
        }
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Find text-based signals in the transcript.
    pub fn analyze_transcript(&self, transcript: &Transcript) -> Vec<Signal> {
        text::analyze_transcript(transcript)
    }

    /// Find audio-based signals in the waveform.
    pub fn analyze_audio(&self, waveform: &Waveform) -> Vec<Signal> {
        audio::analyze_audio(waveform, &self.config)
    }

    /// Run both analyses and merge the results, stable-sorted by start time.
    ///
    /// `waveform` is `None` when upstream audio decoding failed; the text
    /// signals are still returned (partial-data recovery, not an error).
    pub fn find_signals(&self, transcript: &Transcript, waveform: Option<&Waveform>) -> Vec<Signal> {
        let mut signals = self.analyze_transcript(transcript);

        match waveform {
            Some(wf) => signals.extend(self.analyze_audio(wf)),
            None => {
                tracing::warn!("No decoded audio available; continuing with text signals only")
            }
        }

        sort_signals_by_start(&mut signals);
        tracing::info!(total = signals.len(), "Signal recognition complete");
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipforge_highlight_model::transcript::TranscriptSegment;

    fn sample_transcript() -> Transcript {
        Transcript::new(vec![
            TranscriptSegment::new("Alright, here we go.", 0.5, 2.0),
            TranscriptSegment::new("So, what is the main problem here?", 3.0, 5.0),
            TranscriptSegment::new("This is just incredible!", 6.0, 8.0),
            TranscriptSegment::new("I mean, wow.", 8.1, 8.8),
            TranscriptSegment::new("A normal sentence for testing.", 10.0, 12.0),
        ])
    }

    #[test]
    fn invalid_config_fails_at_construction() {
        let config = RecognizerConfig {
            hop_len: 0,
            ..Default::default()
        };
        assert!(SignalRecognizer::new(config).is_err());

        let config = RecognizerConfig {
            loudness_factor: -1.0,
            ..Default::default()
        };
        assert!(SignalRecognizer::new(config).is_err());
    }

    #[test]
    fn missing_audio_still_yields_text_signals() {
        let recognizer = SignalRecognizer::with_defaults();
        let signals = recognizer.find_signals(&sample_transcript(), None);
        assert_eq!(signals.len(), 5);
    }

    #[test]
    fn combined_signals_are_sorted_by_start() {
        let recognizer = SignalRecognizer::with_defaults();

        // Silence with one loud burst between the text segments.
        let sr = 22_050usize;
        let mut samples = vec![0.0_f32; sr * 15];
        for s in samples.iter_mut().take(11 * sr).skip(9 * sr) {
            *s = 0.9;
        }
        let waveform = Waveform::new(samples, sr as u32);

        let signals = recognizer.find_signals(&sample_transcript(), Some(&waveform));
        assert!(signals.len() > 5);

        let starts: Vec<f64> = signals.iter().map(|s| s.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(starts, sorted);

        // The "wow" keyword at 8.1s precedes the loud burst at ~9s.
        let wow = signals
            .iter()
            .position(|s| s.is_keyword() && s.text() == Some("I mean, wow."))
            .unwrap();
        let loud = signals.iter().position(|s| s.is_loud_segment()).unwrap();
        assert!(wow < loud);
    }
}
