//! Final clip records consumed by the rendering collaborator.

use serde::{Deserialize, Serialize};

use crate::timeline::TimelineEvent;

/// Narrative pattern behind a game-footage clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeKind {
    MultiKill,
    ReactionKill,
}

/// A selected clip: boundaries, score, and the evidence that produced it.
///
/// Immutable once selected; the renderer consumes the list verbatim and owns
/// all presentation concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Start time in seconds (>= 0).
    pub start: f64,

    /// End time in seconds (> start).
    pub end: f64,

    /// Curator score. Window clips use additive scores, narrative clips
    /// multiplicative ones; both compare only within a single selection pass.
    pub score: f64,

    /// Narrative tag for clips from the narrative curator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<NarrativeKind>,

    /// The signals/events contributing to this clip, in timeline order.
    pub events: Vec<TimelineEvent>,
}

impl Clip {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;

    #[test]
    fn narrative_tag_serializes_snake_case_and_is_omitted_when_absent() {
        let clip = Clip {
            start: 8.0,
            end: 14.0,
            score: 150.0,
            narrative: Some(NarrativeKind::MultiKill),
            events: vec![],
        };
        let json = serde_json::to_string(&clip).unwrap();
        assert!(json.contains(r#""narrative":"multi_kill""#));

        let plain = Clip {
            narrative: None,
            events: vec![TimelineEvent::Signal(Signal::loud_segment(9.0, 10.0))],
            ..clip
        };
        let json = serde_json::to_string(&plain).unwrap();
        assert!(!json.contains("narrative"));
    }
}
