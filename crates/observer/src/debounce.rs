//! Frame-to-frame deduplication of killfeed detections.
//!
//! A kill entry stays on screen across many extracted frames. A new event is
//! emitted only when the verification key changes from the previous frame;
//! any frame that fails verification clears the key, so the same kill
//! reappearing later is treated as new.

/// The identity of a verified killfeed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationKey {
    pub agent: Option<String>,
    pub icon: Option<String>,
    pub name_pass: bool,
}

/// Per-run debounce state. Reset for every `analyze_all_frames` call.
#[derive(Debug, Default)]
pub struct DebounceState {
    previous: Option<VerificationKey>,
}

impl DebounceState {
    /// Record a verified detection; returns true when it differs from the
    /// previous frame and should be emitted.
    pub fn observe(&mut self, key: VerificationKey) -> bool {
        let emit = self.previous.as_ref() != Some(&key);
        self.previous = Some(key);
        emit
    }

    /// The current frame held no verified entry.
    pub fn clear(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(agent: &str, icon: &str) -> VerificationKey {
        VerificationKey {
            agent: Some(agent.to_string()),
            icon: Some(icon.to_string()),
            name_pass: true,
        }
    }

    #[test]
    fn repeated_key_is_suppressed() {
        let mut state = DebounceState::default();
        assert!(state.observe(key("jett", "kill")));
        assert!(!state.observe(key("jett", "kill")));
        assert!(!state.observe(key("jett", "kill")));
    }

    #[test]
    fn changed_key_emits_again() {
        let mut state = DebounceState::default();
        assert!(state.observe(key("jett", "kill")));
        assert!(state.observe(key("sage", "kill")));
        assert!(state.observe(key("sage", "headshot")));
    }

    #[test]
    fn clear_resets_so_the_same_key_reemits() {
        let mut state = DebounceState::default();
        assert!(state.observe(key("jett", "kill")));
        state.clear();
        assert!(state.observe(key("jett", "kill")));
    }
}
