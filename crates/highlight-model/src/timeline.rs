//! The merged event timeline fed to the narrative curator.

use serde::{Deserialize, Serialize};

use crate::game::GameEvent;
use crate::signal::Signal;

/// A single entry in the merged game/audio/text event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimelineEvent {
    Game(GameEvent),
    Signal(Signal),
}

impl TimelineEvent {
    /// Normalized timestamp: frame time for game events, start for signals.
    pub fn timestamp(&self) -> f64 {
        match self {
            TimelineEvent::Game(e) => e.timestamp,
            TimelineEvent::Signal(s) => s.start,
        }
    }

    /// End time where one exists, otherwise the timestamp itself.
    pub fn end_or_timestamp(&self) -> f64 {
        match self {
            TimelineEvent::Game(e) => e.timestamp,
            TimelineEvent::Signal(s) => s.end,
        }
    }

    pub fn as_kill(&self) -> Option<&GameEvent> {
        match self {
            TimelineEvent::Game(e) => Some(e),
            TimelineEvent::Signal(_) => None,
        }
    }

    pub fn is_kill(&self) -> bool {
        self.as_kill().is_some()
    }

    pub fn is_loud_segment(&self) -> bool {
        matches!(self, TimelineEvent::Signal(s) if s.is_loud_segment())
    }
}

/// Merge observer events and recognizer signals into one stream sorted by
/// timestamp (stable: game events keep their relative order on ties).
pub fn merge_timeline(events: Vec<GameEvent>, signals: Vec<Signal>) -> Vec<TimelineEvent> {
    let mut merged: Vec<TimelineEvent> = events
        .into_iter()
        .map(TimelineEvent::Game)
        .chain(signals.into_iter().map(TimelineEvent::Signal))
        .collect();
    merged.sort_by(|a, b| a.timestamp().total_cmp(&b.timestamp()));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::KillVerification;

    fn kill(ts: f64) -> GameEvent {
        GameEvent::kill(
            ts,
            false,
            KillVerification {
                color_pass: true,
                agent_pass: true,
                icon_pass: true,
                name_pass: true,
                agent: None,
                icon: None,
                agent_confidence: 0.9,
                icon_confidence: 0.9,
            },
        )
    }

    #[test]
    fn merge_sorts_by_timestamp() {
        let merged = merge_timeline(
            vec![kill(10.0), kill(2.0)],
            vec![Signal::loud_segment(5.0, 6.0)],
        );
        let stamps: Vec<f64> = merged.iter().map(|e| e.timestamp()).collect();
        assert_eq!(stamps, vec![2.0, 5.0, 10.0]);
    }

    #[test]
    fn end_or_timestamp_falls_back_for_game_events() {
        assert_eq!(TimelineEvent::Game(kill(3.0)).end_or_timestamp(), 3.0);
        assert_eq!(
            TimelineEvent::Signal(Signal::loud_segment(3.0, 4.5)).end_or_timestamp(),
            4.5
        );
    }
}
