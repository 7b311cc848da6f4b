//! The three-state sleep cycle.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DaemonState {
    Listening,
    Dreaming,
    DeepSleep,
}

impl DaemonState {
    pub fn label(self) -> &'static str {
        match self {
            DaemonState::Listening => "LISTENING",
            DaemonState::Dreaming => "DREAMING",
            DaemonState::DeepSleep => "DEEP_SLEEP",
        }
    }
}

/// The only edges accepted outside of `wake()`, which is always allowed
/// from any state back to `Listening`.
pub fn is_nominal_edge(from: DaemonState, to: DaemonState) -> bool {
    matches!(
        (from, to),
        (DaemonState::Listening, DaemonState::Dreaming)
            | (DaemonState::Dreaming, DaemonState::DeepSleep)
            | (DaemonState::DeepSleep, DaemonState::Listening)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_ring_is_accepted() {
        assert!(is_nominal_edge(DaemonState::Listening, DaemonState::Dreaming));
        assert!(is_nominal_edge(DaemonState::Dreaming, DaemonState::DeepSleep));
        assert!(is_nominal_edge(DaemonState::DeepSleep, DaemonState::Listening));
    }

    #[test]
    fn skipping_a_state_is_rejected() {
        assert!(!is_nominal_edge(DaemonState::Listening, DaemonState::DeepSleep));
        assert!(!is_nominal_edge(DaemonState::Dreaming, DaemonState::Listening));
    }
}
