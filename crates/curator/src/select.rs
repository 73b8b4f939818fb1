//! Greedy non-overlapping candidate selection shared by both curators.

/// A scored, time-bounded selection candidate.
pub trait ClipCandidate {
    /// Start time in seconds.
    fn start(&self) -> f64;
    /// End time in seconds.
    fn end(&self) -> f64;
    /// Curator score; higher wins.
    fn score(&self) -> f64;

    fn duration(&self) -> f64 {
        self.end() - self.start()
    }
}

/// Shared duration between two candidates, zero when disjoint.
pub fn overlap_duration<A: ClipCandidate, B: ClipCandidate>(a: &A, b: &B) -> f64 {
    (a.end().min(b.end()) - a.start().max(b.start())).max(0.0)
}

/// Select up to `top_n` candidates, highest score first, discarding every
/// remaining candidate whose overlap with a selected one exceeds
/// `overlap_threshold` of that candidate's *own* duration (asymmetric test).
///
/// Loop invariant: `selected` is pairwise compatible under that test, and
/// `candidates` only holds entries compatible with everything in `selected`.
/// Scores never change during selection, so one descending sort up front is
/// equivalent to re-sorting each round; ties keep their input order.
pub fn select_non_overlapping<T: ClipCandidate>(
    mut candidates: Vec<T>,
    top_n: usize,
    overlap_threshold: f64,
) -> Vec<T> {
    candidates.sort_by(|a, b| b.score().total_cmp(&a.score()));

    let mut selected = Vec::new();
    while !candidates.is_empty() && selected.len() < top_n {
        let best = candidates.remove(0);
        candidates.retain(|candidate| {
            let own = candidate.duration();
            if own <= 0.0 {
                return true;
            }
            overlap_duration(&best, candidate) / own <= overlap_threshold
        });
        selected.push(best);
    }

    selected
}
