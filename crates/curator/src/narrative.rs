//! The narrative curator: temporal pattern matching over the merged
//! game/audio/text event timeline.

use clipforge_common::error::{ClipforgeError, ClipforgeResult};
use clipforge_highlight_model::clip::{Clip, NarrativeKind};
use clipforge_highlight_model::signal::SignalKind;
use clipforge_highlight_model::timeline::TimelineEvent;

use crate::select::{select_non_overlapping, ClipCandidate};

/// Score multiplier for a headshot kill.
const HEADSHOT_MULTIPLIER: f64 = 2.5;
/// Score multiplier for each kill after the first in a chain.
const MULTI_KILL_MULTIPLIER: f64 = 3.0;
/// Score multiplier applied once when the chain contains a loud reaction.
const REACTION_MULTIPLIER: f64 = 4.0;

/// Base score for a timeline event in narrative scoring. Never negative.
pub fn event_base_score(event: &TimelineEvent) -> f64 {
    match event {
        TimelineEvent::Game(_) => 10.0,
        TimelineEvent::Signal(signal) => match &signal.kind {
            SignalKind::LoudSegment => 5.0,
            SignalKind::Keyword { .. } => 3.0,
            SignalKind::Question { .. } => 2.0,
            SignalKind::Exclamation { .. } => 1.0,
            SignalKind::Silence { .. } => 1.0,
        },
    }
}

/// Pattern-matching parameters for narrative detection.
#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    /// Multi-kill window, anchored at the chain-initiating kill (seconds).
    pub chain_window_secs: f64,

    /// Maximum delay between a kill and its loud reaction (seconds).
    pub reaction_window_secs: f64,

    /// Padding added before and after the narrative's events (seconds).
    pub buffer_secs: f64,

    /// Maximum number of clips to select.
    pub top_n: usize,

    /// Maximum allowed overlap ratio between a candidate and a selected clip.
    pub overlap_threshold: f64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            chain_window_secs: 5.0,
            reaction_window_secs: 2.0,
            buffer_secs: 2.0,
            top_n: 5,
            overlap_threshold: 0.5,
        }
    }
}

impl NarrativeConfig {
    pub fn validate(&self) -> ClipforgeResult<()> {
        if self.chain_window_secs <= 0.0 || self.reaction_window_secs <= 0.0 {
            return Err(ClipforgeError::config(
                "pattern windows must be positive",
            ));
        }
        if self.buffer_secs < 0.0 {
            return Err(ClipforgeError::config("buffer_secs must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.overlap_threshold) {
            return Err(ClipforgeError::config(
                "overlap_threshold must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// A scored chain of causally/temporally related events.
#[derive(Debug, Clone)]
pub struct Narrative {
    pub kind: NarrativeKind,
    pub events: Vec<TimelineEvent>,
    pub score: f64,
    pub start: f64,
    pub end: f64,
}

impl ClipCandidate for Narrative {
    fn start(&self) -> f64 {
        self.start
    }
    fn end(&self) -> f64 {
        self.end
    }
    fn score(&self) -> f64 {
        self.score
    }
}

/// The narrative curator.
pub struct NarrativeCurator {
    config: NarrativeConfig,
}

impl NarrativeCurator {
    /// Create a curator, failing fast on an invalid configuration.
    pub fn new(config: NarrativeConfig) -> ClipforgeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a curator with default pattern windows.
    pub fn with_defaults() -> Self {
        Self {
            config: NarrativeConfig::default(),
        }
    }

    pub fn config(&self) -> &NarrativeConfig {
        &self.config
    }

    /// Find multi-kill and reaction-kill patterns in the event stream.
    ///
    /// The input is sorted by timestamp defensively; overlapping chains
    /// anchored at different kills are all emitted (selection deduplicates).
    pub fn find_narratives(&self, timeline: &[TimelineEvent]) -> Vec<Narrative> {
        let mut events = timeline.to_vec();
        events.sort_by(|a, b| a.timestamp().total_cmp(&b.timestamp()));

        tracing::info!("Finding narrative patterns in the event stream");
        let mut narratives = Vec::new();
        narratives.extend(self.find_multi_kills(&events));
        narratives.extend(self.find_reaction_kills(&events));

        tracing::info!(count = narratives.len(), "Found potential narratives");
        narratives
    }

    /// Chains of kills within a window anchored at the chain-initiating kill.
    ///
    /// The window deliberately does not slide per-pair: a kill 4.9s after the
    /// anchor joins the chain even when it is more than the window away from
    /// the previous kill.
    fn find_multi_kills(&self, events: &[TimelineEvent]) -> Vec<Narrative> {
        let mut narratives = Vec::new();

        for (i, event) in events.iter().enumerate() {
            if !event.is_kill() {
                continue;
            }
            let anchor_ts = event.timestamp();
            let mut chain = vec![event.clone()];

            for next in &events[i + 1..] {
                if !next.is_kill() {
                    continue;
                }
                if next.timestamp() - anchor_ts < self.config.chain_window_secs {
                    chain.push(next.clone());
                } else {
                    break;
                }
            }

            if chain.len() >= 2 {
                narratives.push(self.build_narrative(NarrativeKind::MultiKill, chain));
            }
        }

        narratives
    }

    /// A kill followed by the nearest loud segment within the reaction window.
    ///
    /// Only the closest loud segment counts: scanning stops at the first one
    /// whether or not it is close enough.
    fn find_reaction_kills(&self, events: &[TimelineEvent]) -> Vec<Narrative> {
        let mut narratives = Vec::new();

        for (i, event) in events.iter().enumerate() {
            if !event.is_kill() {
                continue;
            }

            for next in &events[i + 1..] {
                if !next.is_loud_segment() {
                    continue;
                }
                let delta = next.timestamp() - event.timestamp();
                if 0.0 < delta && delta <= self.config.reaction_window_secs {
                    let chain = vec![event.clone(), next.clone()];
                    narratives.push(self.build_narrative(NarrativeKind::ReactionKill, chain));
                }
                break;
            }
        }

        narratives
    }

    fn build_narrative(&self, kind: NarrativeKind, events: Vec<TimelineEvent>) -> Narrative {
        let min_ts = events
            .iter()
            .map(|e| e.timestamp())
            .fold(f64::INFINITY, f64::min);
        let max_end = events
            .iter()
            .map(|e| e.end_or_timestamp())
            .fold(f64::NEG_INFINITY, f64::max);

        Narrative {
            kind,
            score: score_narrative(&events),
            start: (min_ts - self.config.buffer_secs).max(0.0),
            end: max_end + self.config.buffer_secs,
            events,
        }
    }

    /// Select the best non-overlapping narrative clips, highest score first.
    pub fn select_best_clips(&self, timeline: &[TimelineEvent]) -> Vec<Clip> {
        let narratives = self.find_narratives(timeline);
        if narratives.is_empty() {
            return Vec::new();
        }

        let selected = select_non_overlapping(
            narratives,
            self.config.top_n,
            self.config.overlap_threshold,
        );

        tracing::info!(count = selected.len(), "Selected final narrative clips");
        selected
            .into_iter()
            .map(|n| Clip {
                start: n.start,
                end: n.end,
                score: n.score,
                narrative: Some(n.kind),
                events: n.events,
            })
            .collect()
    }
}

/// Multiplicative narrative scoring.
///
/// Base values for every event are summed first; then, walking kills in chain
/// order, a headshot multiplies the running total by 2.5 and every kill after
/// the first multiplies it by 3.0; finally the total is multiplied by 4.0
/// once if any loud segment is present.
pub fn score_narrative(events: &[TimelineEvent]) -> f64 {
    let mut score: f64 = events.iter().map(event_base_score).sum();

    let mut kills_seen = 0;
    for event in events {
        if let Some(kill) = event.as_kill() {
            kills_seen += 1;
            if kill.is_headshot() {
                score *= HEADSHOT_MULTIPLIER;
            }
            if kills_seen > 1 {
                score *= MULTI_KILL_MULTIPLIER;
            }
        }
    }

    if events.iter().any(|e| e.is_loud_segment()) {
        score *= REACTION_MULTIPLIER;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipforge_highlight_model::game::{GameEvent, KillVerification};
    use clipforge_highlight_model::signal::Signal;

    fn verification() -> KillVerification {
        KillVerification {
            color_pass: true,
            agent_pass: true,
            icon_pass: true,
            name_pass: true,
            agent: None,
            icon: None,
            agent_confidence: 0.9,
            icon_confidence: 0.9,
        }
    }

    fn kill(ts: f64, headshot: bool) -> TimelineEvent {
        TimelineEvent::Game(GameEvent::kill(ts, headshot, verification()))
    }

    fn loud(start: f64, end: f64) -> TimelineEvent {
        TimelineEvent::Signal(Signal::loud_segment(start, end))
    }

    #[test]
    fn finds_multi_kill_chain_within_anchored_window() {
        let events = vec![kill(10.0, false), kill(12.0, true), kill(18.0, false)];
        let curator = NarrativeCurator::with_defaults();
        let narratives = curator.find_narratives(&events);

        let multi: Vec<&Narrative> = narratives
            .iter()
            .filter(|n| n.kind == NarrativeKind::MultiKill)
            .collect();
        assert_eq!(multi.len(), 1);
        assert_eq!(multi[0].events.len(), 2);
    }

    #[test]
    fn chain_window_is_anchored_not_sliding() {
        // Third kill is 4.9s after the anchor but 2.9s after the second:
        // it joins because the window is measured from the first kill.
        let events = vec![kill(0.0, false), kill(2.0, false), kill(4.9, false)];
        let curator = NarrativeCurator::with_defaults();
        let narratives = curator.find_narratives(&events);

        let longest = narratives
            .iter()
            .filter(|n| n.kind == NarrativeKind::MultiKill)
            .map(|n| n.events.len())
            .max()
            .unwrap();
        assert_eq!(longest, 3);
    }

    #[test]
    fn finds_reaction_kill_with_nearest_loud_segment_only() {
        let events = vec![
            kill(20.0, true),
            loud(21.5, 22.5),
            kill(30.0, false),
            loud(33.0, 34.0), // too late for the second kill
        ];
        let curator = NarrativeCurator::with_defaults();
        let narratives = curator.find_narratives(&events);

        let reactions: Vec<&Narrative> = narratives
            .iter()
            .filter(|n| n.kind == NarrativeKind::ReactionKill)
            .collect();
        assert_eq!(reactions.len(), 1);
        assert!(reactions[0].events[0].is_kill());
        assert!(reactions[0].events[1].is_loud_segment());
    }

    #[test]
    fn second_loud_segment_in_window_does_not_add_a_narrative() {
        // Both loud segments are inside the reaction window; only the first
        // one may pair with the kill.
        let events = vec![kill(10.0, false), loud(10.5, 11.0), loud(11.5, 12.0)];
        let curator = NarrativeCurator::with_defaults();
        let narratives = curator.find_narratives(&events);

        let reactions = narratives
            .iter()
            .filter(|n| n.kind == NarrativeKind::ReactionKill)
            .count();
        assert_eq!(reactions, 1);
    }

    #[test]
    fn multi_kill_scoring_matches_worked_example() {
        // (10 + 10) * 2.5 (headshot) * 3.0 (second kill) = 150.
        let events = vec![kill(10.0, false), kill(12.0, true)];
        assert_eq!(score_narrative(&events), 150.0);
    }

    #[test]
    fn reaction_kill_scoring_matches_worked_example() {
        // (10 + 5) * 2.5 (headshot) * 4.0 (reaction) = 150.
        let events = vec![kill(20.0, true), loud(21.5, 22.5)];
        assert_eq!(score_narrative(&events), 150.0);
    }

    #[test]
    fn reaction_multiplier_applies_once_despite_extra_loud_segments() {
        let single = score_narrative(&[kill(0.0, false), loud(0.5, 1.0)]);
        let double = score_narrative(&[kill(0.0, false), loud(0.5, 1.0), loud(1.2, 1.6)]);
        // The second loud segment adds its base value but no extra x4.
        assert_eq!(single, (10.0 + 5.0) * 4.0);
        assert_eq!(double, (10.0 + 5.0 + 5.0) * 4.0);
    }

    #[test]
    fn clip_bounds_add_buffer_around_chain() {
        let events = vec![kill(10.0, false), kill(12.0, true)];
        let curator = NarrativeCurator::with_defaults();
        let clips = curator.select_best_clips(&events);

        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].start, 8.0);
        assert_eq!(clips[0].end, 14.0);
        assert_eq!(clips[0].narrative, Some(NarrativeKind::MultiKill));
    }

    #[test]
    fn clip_start_clamps_at_zero() {
        let events = vec![kill(0.5, false), kill(1.5, false)];
        let curator = NarrativeCurator::with_defaults();
        let clips = curator.select_best_clips(&events);
        assert_eq!(clips[0].start, 0.0);
    }

    #[test]
    fn empty_timeline_yields_no_clips() {
        let curator = NarrativeCurator::with_defaults();
        assert!(curator.select_best_clips(&[]).is_empty());
    }

    #[test]
    fn invalid_config_fails_fast() {
        let config = NarrativeConfig {
            chain_window_secs: 0.0,
            ..Default::default()
        };
        assert!(NarrativeCurator::new(config).is_err());
    }
}
