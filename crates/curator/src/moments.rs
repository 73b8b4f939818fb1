//! The general-purpose clip curator: windowed signal scoring and selection.

use std::collections::BTreeSet;

use clipforge_common::error::{ClipforgeError, ClipforgeResult};
use clipforge_highlight_model::clip::Clip;
use clipforge_highlight_model::signal::{Signal, SignalKind};
use clipforge_highlight_model::timeline::TimelineEvent;
use clipforge_highlight_model::transcript::Transcript;

use crate::select::{select_non_overlapping, ClipCandidate};

/// Bonus when a question is followed by a loud segment within ten seconds.
const QUESTION_LOUD_BONUS: f64 = 25.0;
/// Window after a question in which a loud segment earns the bonus (seconds).
const QUESTION_LOUD_WINDOW_SECS: f64 = 10.0;
/// Bonus per source sentence carrying both a keyword and an exclamation.
const KEYWORD_EXCLAMATION_BONUS: f64 = 15.0;

/// Base score for a signal kind. Never negative.
pub fn base_score(kind: &SignalKind) -> f64 {
    match kind {
        SignalKind::LoudSegment => 30.0,
        SignalKind::Keyword { .. } => 20.0,
        SignalKind::Question { .. } => 15.0,
        SignalKind::Exclamation { .. } => 10.0,
        SignalKind::Silence { .. } => 5.0,
    }
}

/// Sliding-window parameters for moment detection.
#[derive(Debug, Clone)]
pub struct CuratorConfig {
    /// Window width in whole seconds.
    pub window_secs: u32,

    /// Window step in whole seconds.
    pub step_secs: u32,

    /// Maximum number of clips to select.
    pub top_n: usize,

    /// Maximum allowed overlap ratio between a candidate and a selected clip,
    /// measured against the candidate's own duration.
    pub overlap_threshold: f64,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            window_secs: 15,
            step_secs: 1,
            top_n: 10,
            overlap_threshold: 0.5,
        }
    }
}

impl CuratorConfig {
    pub fn validate(&self) -> ClipforgeResult<()> {
        if self.window_secs == 0 || self.step_secs == 0 {
            return Err(ClipforgeError::config(
                "window_secs and step_secs must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.overlap_threshold) {
            return Err(ClipforgeError::config(
                "overlap_threshold must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// A fixed-width window aggregate: transient, discarded after selection.
#[derive(Debug, Clone)]
pub struct Moment {
    pub start: f64,
    pub end: f64,
    pub score: f64,
    pub signals: Vec<Signal>,
}

impl ClipCandidate for Moment {
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

/// The clip curator.
pub struct ClipCurator {
    config: CuratorConfig,
}

impl ClipCurator {
    /// Create a curator, failing fast on an invalid configuration.
    pub fn new(config: CuratorConfig) -> ClipforgeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a curator with default windowing.
    pub fn with_defaults() -> Self {
        Self {
            config: CuratorConfig::default(),
        }
    }

    pub fn config(&self) -> &CuratorConfig {
        &self.config
    }

    /// Slide a fixed-width window across the video and score each position.
    ///
    /// `signals` must be sorted by start time; `duration_secs` is the video
    /// length (the end of the last transcript segment). Windows without
    /// signals are skipped.
    pub fn find_moments(&self, signals: &[Signal], duration_secs: f64) -> Vec<Moment> {
        if signals.is_empty() {
            return Vec::new();
        }

        let window = self.config.window_secs as i64;
        let step = self.config.step_secs as i64;
        let duration = duration_secs.floor() as i64;

        let mut moments = Vec::new();
        let mut window_start = 0_i64;
        while window_start + window <= duration {
            let ws = window_start as f64;
            let we = (window_start + window) as f64;

            let in_window: Vec<Signal> = signals
                .iter()
                .filter(|s| ws <= s.start && s.start < we)
                .cloned()
                .collect();

            if !in_window.is_empty() {
                let score = Self::score_window(&in_window);
                moments.push(Moment {
                    start: ws,
                    end: we,
                    score,
                    signals: in_window,
                });
            }

            window_start += step;
        }

        tracing::info!(count = moments.len(), "Identified potential moments");
        moments
    }

    /// Sum of base scores plus the two combination bonuses.
    fn score_window(signals: &[Signal]) -> f64 {
        let mut score: f64 = signals.iter().map(|s| base_score(&s.kind)).sum();

        // Question answered loudly: the first question followed by the first
        // loud segment, strictly after it and within ten seconds.
        let question = signals.iter().find(|s| s.is_question());
        let loud = signals.iter().find(|s| s.is_loud_segment());
        if let (Some(question), Some(loud)) = (question, loud) {
            let delta = loud.start - question.start;
            if 0.0 < delta && delta < QUESTION_LOUD_WINDOW_SECS {
                score += QUESTION_LOUD_BONUS;
            }
        }

        // Emphatic keyword: a sentence carrying both a keyword and an
        // exclamation, counted once per distinct source text.
        let texts: BTreeSet<&str> = signals.iter().filter_map(|s| s.text()).collect();
        for text in texts {
            let has_keyword = signals
                .iter()
                .any(|s| s.is_keyword() && s.text() == Some(text));
            let has_exclamation = signals
                .iter()
                .any(|s| s.is_exclamation() && s.text() == Some(text));
            if has_keyword && has_exclamation {
                score += KEYWORD_EXCLAMATION_BONUS;
            }
        }

        score
    }

    /// Full curation pass: window, score, select, and snap boundaries.
    ///
    /// Returns clips sorted ascending by start time.
    pub fn select_best_clips(&self, signals: &[Signal], transcript: &Transcript) -> Vec<Clip> {
        let moments = self.find_moments(signals, transcript.duration_secs());
        if moments.is_empty() {
            return Vec::new();
        }

        tracing::info!(
            candidates = moments.len(),
            "Selecting best clips from potential moments"
        );
        let selected =
            select_non_overlapping(moments, self.config.top_n, self.config.overlap_threshold);

        let mut clips: Vec<Clip> = selected
            .into_iter()
            .filter(|m| !m.signals.is_empty())
            .map(|m| self.snap_to_transcript(m, transcript))
            .collect();

        clips.sort_by(|a, b| a.start.total_cmp(&b.start));
        tracing::info!(count = clips.len(), "Selected final clips");
        clips
    }

    /// Align a selected window with the transcript segments containing its
    /// earliest signal start and latest signal end. Falls back to the raw
    /// window boundaries when no containing segment exists.
    fn snap_to_transcript(&self, moment: Moment, transcript: &Transcript) -> Clip {
        let first_start = moment
            .signals
            .iter()
            .map(|s| s.start)
            .fold(f64::INFINITY, f64::min);
        let last_end = moment
            .signals
            .iter()
            .map(|s| s.end)
            .fold(f64::NEG_INFINITY, f64::max);

        let start = transcript
            .segment_containing_start(first_start)
            .map(|seg| seg.start)
            .unwrap_or(moment.start);
        let end = transcript
            .segment_containing_end(last_end)
            .map(|seg| seg.end)
            .unwrap_or(moment.end);

        Clip {
            start,
            end,
            score: moment.score,
            narrative: None,
            events: moment.signals.into_iter().map(TimelineEvent::Signal).collect(),
        }
    }
}
