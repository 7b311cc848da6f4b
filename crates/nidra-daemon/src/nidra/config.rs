use serde::{Deserialize, Serialize};

use super::state::DaemonState;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NidraConfig {
    pub heartbeat_listening_ms: i64,
    pub heartbeat_dreaming_ms: i64,
    pub heartbeat_deep_sleep_ms: i64,
    pub idle_timeout_ms: i64,
    pub dream_duration_ms: i64,
    pub deep_sleep_duration_ms: i64,
}

impl Default for NidraConfig {
    fn default() -> Self {
        Self {
            heartbeat_listening_ms: 60_000,
            heartbeat_dreaming_ms: 5_000,
            heartbeat_deep_sleep_ms: 30_000,
            idle_timeout_ms: 10 * 60_000,
            dream_duration_ms: 2 * 60_000,
            deep_sleep_duration_ms: 8 * 60_000,
        }
    }
}

impl NidraConfig {
    pub fn heartbeat_ms(&self, state: DaemonState) -> i64 {
        match state {
            DaemonState::Listening => self.heartbeat_listening_ms,
            DaemonState::Dreaming => self.heartbeat_dreaming_ms,
            DaemonState::DeepSleep => self.heartbeat_deep_sleep_ms,
        }
    }
}
