//! Waveform contract with the audio-extraction collaborator.

/// A decoded mono audio waveform.
///
/// The caller guarantees a constant sample rate throughout. ClipForge never
/// decodes compressed audio itself; the upstream collaborator hands over raw
/// samples (e.g. `ffmpeg -f f32le -ac 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Interpret little-endian f32 PCM bytes as a mono waveform.
    ///
    /// Trailing bytes that do not form a whole sample are rejected.
    pub fn from_f32le_bytes(bytes: &[u8], sample_rate: u32) -> Option<Self> {
        if bytes.len() % 4 != 0 {
            return None;
        }
        let samples = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Some(Self::new(samples, sample_rate))
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
