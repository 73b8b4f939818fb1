//! Property tests for greedy clip selection.

use clipforge_curator::select::{overlap_duration, select_non_overlapping, ClipCandidate};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    start: f64,
    end: f64,
    score: f64,
}

impl ClipCandidate for Candidate {
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

/// Fixed-width candidates, like the sliding windows both curators produce.
fn windows(width: f64) -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec((0.0f64..300.0, 0.0f64..100.0), 0..40).prop_map(move |raw| {
        raw.into_iter()
            .map(|(start, score)| Candidate {
                start,
                end: start + width,
                score,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn selection_respects_top_n(candidates in windows(15.0), top_n in 0usize..10) {
        let selected = select_non_overlapping(candidates, top_n, 0.5);
        prop_assert!(selected.len() <= top_n);
    }

    #[test]
    fn selected_clips_come_from_the_input(candidates in windows(15.0)) {
        let selected = select_non_overlapping(candidates.clone(), 10, 0.5);
        for clip in &selected {
            prop_assert!(candidates.contains(clip));
        }
    }

    /// With equal-duration candidates the asymmetric overlap test is
    /// symmetric, so every selected pair must respect the threshold.
    #[test]
    fn equal_width_selection_is_pairwise_compatible(candidates in windows(15.0)) {
        let selected = select_non_overlapping(candidates, 10, 0.5);
        for (i, a) in selected.iter().enumerate() {
            for b in &selected[i + 1..] {
                let ratio = overlap_duration(a, b) / b.duration();
                prop_assert!(ratio <= 0.5 + 1e-9, "overlap ratio {ratio} exceeds threshold");
            }
        }
    }

    #[test]
    fn selection_is_idempotent(candidates in windows(15.0)) {
        let first = select_non_overlapping(candidates, 10, 0.5);
        let second = select_non_overlapping(first.clone(), 10, 0.5);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn scores_are_non_increasing(candidates in windows(15.0)) {
        let selected = select_non_overlapping(candidates, 10, 0.5);
        for pair in selected.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
