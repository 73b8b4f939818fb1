//! Transcript contract with the speech-to-text collaborator.

use serde::{Deserialize, Serialize};

/// A single transcribed speech segment with timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Spoken text for this segment.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds (>= start).
    pub end: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// A full transcript: ordered, non-overlapping segments.
///
/// Gaps between segments are expected; silence is detected from the raw
/// waveform, not from transcript gaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self { segments }
    }

    /// Video duration derived from the end of the last segment.
    pub fn duration_secs(&self) -> f64 {
        self.segments.last().map(|s| s.end).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segment whose `[start, end)` range contains `t`, if any.
    pub fn segment_containing_start(&self, t: f64) -> Option<&TranscriptSegment> {
        self.segments.iter().find(|s| s.start <= t && t < s.end)
    }

    /// The segment whose `[start, end]` range contains `t` (inclusive end).
    pub fn segment_containing_end(&self, t: f64) -> Option<&TranscriptSegment> {
        self.segments.iter().find(|s| s.start <= t && t <= s.end)
    }
}

/// Parse a transcript from JSON produced by the transcription collaborator.
///
/// Accepts either a bare segment array or a `{"segments": [...]}` object.
pub fn parse_transcript(json: &str) -> Result<Transcript, serde_json::Error> {
    match serde_json::from_str::<Transcript>(json) {
        Ok(t) => Ok(t),
        Err(_) => serde_json::from_str::<Vec<TranscriptSegment>>(json).map(Transcript::new),
    }
}
