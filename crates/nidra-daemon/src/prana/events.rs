use serde::{Deserialize, Serialize};

use super::health::HealthState;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PranaEvent {
    Health { from: HealthState, to: HealthState, reason: String, timestamp_ms: i64, restart_count: u32 },
    Error { message: String, timestamp_ms: i64 },
    ScanStart { timestamp_ms: i64 },
    SkillDiscovered { name: String, timestamp_ms: i64 },
    ScanComplete { discovered: usize, timestamp_ms: i64 },
    ScanError { message: String, timestamp_ms: i64 },
}

/// Collaborator notified of health transitions out-of-band (e.g. paging).
/// Failures must never destabilize the supervisor.
pub trait HealthBroadcast: Send + Sync {
    fn notify(&self, state: HealthState, severity: super::health::Severity, reason: &str);
}
