use serde::{Deserialize, Serialize};

use super::state::DaemonState;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum NidraEvent {
    StateChange { prev: DaemonState, next: DaemonState, timestamp_ms: i64 },
    Heartbeat { state: DaemonState, timestamp_ms: i64, uptime_ms: i64 },
    ConsolidationStart { timestamp_ms: i64 },
    ConsolidationEnd { timestamp_ms: i64, duration_ms: i64 },
}
