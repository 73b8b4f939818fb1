//! Signal types for the recognizer output stream.
//!
//! Signals are serialized with a `type` tag so persisted artifacts read as
//! `{"type": "loud_segment", ...}` — the same wire shape the renderer and
//! inspection tooling already consume.

use serde::{Deserialize, Serialize};

/// An atomic detected cue with timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Start time in seconds.
    pub start: f64,

    /// End time in seconds (>= start).
    pub end: f64,

    /// The cue payload.
    #[serde(flatten)]
    pub kind: SignalKind,
}

/// Discriminated union of cue types.
///
/// Text-derived variants always carry the source sentence; audio-derived
/// variants never do. The invariant is enforced by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalKind {
    /// Segment phrased as a question.
    Question {
        /// Source sentence.
        text: String,
    },

    /// Segment containing a watched keyword.
    Keyword {
        /// The keyword that matched.
        word: String,
        /// Source sentence.
        text: String,
    },

    /// Segment containing an exclamation mark.
    Exclamation {
        /// Source sentence.
        text: String,
    },

    /// Sustained high-energy stretch of audio.
    LoudSegment,

    /// Sustained quiet stretch of audio.
    Silence {
        /// Gap length in seconds.
        duration: f64,
    },
}

impl Signal {
    pub fn question(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            kind: SignalKind::Question { text: text.into() },
        }
    }

    pub fn keyword(start: f64, end: f64, word: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            kind: SignalKind::Keyword {
                word: word.into(),
                text: text.into(),
            },
        }
    }

    pub fn exclamation(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            kind: SignalKind::Exclamation { text: text.into() },
        }
    }

    pub fn loud_segment(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            kind: SignalKind::LoudSegment,
        }
    }

    pub fn silence(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            kind: SignalKind::Silence {
                duration: (end - start).max(0.0),
            },
        }
    }

    /// Source sentence for text-derived signals.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            SignalKind::Question { text }
            | SignalKind::Keyword { text, .. }
            | SignalKind::Exclamation { text } => Some(text),
            SignalKind::LoudSegment | SignalKind::Silence { .. } => None,
        }
    }

    pub fn is_question(&self) -> bool {
        matches!(self.kind, SignalKind::Question { .. })
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self.kind, SignalKind::Keyword { .. })
    }

    pub fn is_exclamation(&self) -> bool {
        matches!(self.kind, SignalKind::Exclamation { .. })
    }

    pub fn is_loud_segment(&self) -> bool {
        matches!(self.kind, SignalKind::LoudSegment)
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Stable-sort signals by start time, preserving relative order of ties.
pub fn sort_signals_by_start(signals: &mut [Signal]) {
    signals.sort_by(|a, b| a.start.total_cmp(&b.start));
}

/// Serialize signals to JSONL format (one JSON object per line).
pub fn serialize_signals(signals: &[Signal]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for signal in signals {
        output.push_str(&serde_json::to_string(signal)?);
        output.push('\n');
    }
    Ok(output)
}

/// Parse signals from JSONL content.
pub fn parse_signals(jsonl: &str) -> Result<Vec<Signal>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_uses_snake_case_wire_names() {
        let json = serde_json::to_string(&Signal::loud_segment(1.0, 2.0)).unwrap();
        assert!(json.contains(r#""type":"loud_segment""#));

        let json = serde_json::to_string(&Signal::question(0.0, 1.0, "why?")).unwrap();
        assert!(json.contains(r#""type":"question""#));
        assert!(json.contains(r#""text":"why?""#));
    }

    #[test]
    fn text_only_on_text_variants() {
        assert_eq!(Signal::question(0.0, 1.0, "hm?").text(), Some("hm?"));
        assert_eq!(Signal::loud_segment(0.0, 1.0).text(), None);
        assert_eq!(Signal::silence(0.0, 2.0).text(), None);
    }

    #[test]
    fn silence_records_duration() {
        let s = Signal::silence(3.0, 5.5);
        assert_eq!(s.kind, SignalKind::Silence { duration: 2.5 });
    }

    #[test]
    fn jsonl_roundtrip() {
        let signals = vec![
            Signal::keyword(5.5, 7.5, "amazing", "This is just amazing!"),
            Signal::loud_segment(6.0, 7.0),
        ];
        let jsonl = serialize_signals(&signals).unwrap();
        assert_eq!(parse_signals(&jsonl).unwrap(), signals);
    }

    #[test]
    fn stable_sort_keeps_tie_order() {
        let mut signals = vec![
            Signal::keyword(2.0, 3.0, "wow", "wow"),
            Signal::exclamation(2.0, 3.0, "wow!"),
            Signal::question(1.0, 2.0, "eh?"),
        ];
        sort_signals_by_start(&mut signals);
        assert!(signals[0].is_question());
        assert!(signals[1].is_keyword());
        assert!(signals[2].is_exclamation());
    }
}
