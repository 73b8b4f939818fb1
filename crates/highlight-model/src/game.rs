//! Game event types for the observer output stream.

use serde::{Deserialize, Serialize};

/// An atomic in-game action detected from video frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame capture time in seconds.
    pub timestamp: f64,

    /// The action payload.
    #[serde(flatten)]
    pub kind: GameEventKind,
}

/// Discriminated union of detected in-game actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEventKind {
    /// A kill credited to the local player.
    Kill {
        /// Whether the kill-type icon identified a headshot.
        headshot: bool,
        /// Which verification checks confirmed the detection.
        verification: KillVerification,
    },
}

/// Provenance of a kill detection: the outcome of each verification factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillVerification {
    /// Green-band color filter passed on the killfeed region.
    pub color_pass: bool,
    /// An agent portrait template matched.
    pub agent_pass: bool,
    /// A kill/headshot icon template matched.
    pub icon_pass: bool,
    /// Recognized killer name matched the configured player.
    pub name_pass: bool,

    /// Best-matching agent template, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Best-matching icon template, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Confidence of the best agent match.
    pub agent_confidence: f32,
    /// Confidence of the best icon match.
    pub icon_confidence: f32,
}

impl GameEvent {
    pub fn kill(timestamp: f64, headshot: bool, verification: KillVerification) -> Self {
        Self {
            timestamp,
            kind: GameEventKind::Kill {
                headshot,
                verification,
            },
        }
    }

    pub fn is_headshot(&self) -> bool {
        match &self.kind {
            GameEventKind::Kill { headshot, .. } => *headshot,
        }
    }

    /// All four verification factors passed for this event.
    pub fn is_verified_ego_kill(&self) -> bool {
        match &self.kind {
            GameEventKind::Kill { verification, .. } => {
                verification.color_pass
                    && verification.agent_pass
                    && verification.icon_pass
                    && verification.name_pass
            }
        }
    }
}
