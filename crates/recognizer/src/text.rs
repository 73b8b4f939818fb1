//! Text analysis: per-segment question, keyword, and exclamation detection.

use clipforge_highlight_model::signal::Signal;
use clipforge_highlight_model::transcript::Transcript;

/// Keywords indicating strong emotion or opinion. Matched whole-word against
/// punctuation-stripped text (a trailing `?` on the keyword is ignored for
/// matching but preserved in the emitted signal).
pub const KEYWORDS: &[&str] = &[
    "problem",
    "amazing",
    "incredible",
    "crazy",
    "wow",
    "best",
    "worst",
    "omg",
    "unbelievable",
    "terrible",
    "horrible",
    "love",
    "hate",
    "genius",
    "insane",
    "really?",
];

/// Interrogative words checked at the beginning of a sentence.
pub const QUESTION_WORDS: &[&str] = &[
    "what", "who", "how", "why", "where", "when", "is", "are", "do", "does",
];

/// Scan every transcript segment independently for text-based signals.
///
/// A single segment may emit several signals: a question containing a keyword
/// and an exclamation mark emits three.
pub fn analyze_transcript(transcript: &Transcript) -> Vec<Signal> {
    tracing::info!("Analyzing transcript for text-based signals");
    let mut signals = Vec::new();

    for segment in &transcript.segments {
        let text_original = segment.text.trim();
        let text_lower = text_original.to_lowercase();

        if is_question(&text_lower) {
            signals.push(Signal::question(segment.start, segment.end, text_original));
        }

        for keyword in matched_keywords(&text_lower) {
            signals.push(Signal::keyword(
                segment.start,
                segment.end,
                keyword,
                text_original,
            ));
        }

        if text_lower.contains('!') {
            signals.push(Signal::exclamation(
                segment.start,
                segment.end,
                text_original,
            ));
        }
    }

    tracing::info!(count = signals.len(), "Found text-based signals");
    signals
}

/// A segment reads as a question when it ends with `?` or opens with an
/// interrogative word (stripped of adjacent punctuation).
fn is_question(text_lower: &str) -> bool {
    if text_lower.ends_with('?') {
        return true;
    }
    let first_word = text_lower
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c| matches!(c, '?' | ',' | '.'));
    QUESTION_WORDS.contains(&first_word)
}

/// Whole-word keyword matches against the punctuation-stripped text.
fn matched_keywords(text_lower: &str) -> Vec<&'static str> {
    let clean: String = text_lower
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect();
    let words: Vec<&str> = clean.split_whitespace().collect();

    KEYWORDS
        .iter()
        .filter(|keyword| {
            let needle = keyword.trim_end_matches('?');
            words.iter().any(|w| *w == needle)
        })
        .copied()
        .collect()
}
