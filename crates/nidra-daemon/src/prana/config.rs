use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PranaConfig {
    pub error_budget: usize,
    pub error_window_ms: i64,
    pub initial_restart_delay_ms: i64,
    pub max_restart_delay_ms: i64,
    pub max_restart_attempts: u32,
    pub cooldown_ms: i64,
    pub scan_interval_ms: i64,
    pub scan_grace_period_ms: i64,
}

impl Default for PranaConfig {
    fn default() -> Self {
        Self {
            error_budget: 5,
            error_window_ms: 60_000,
            initial_restart_delay_ms: 1_000,
            max_restart_delay_ms: 60_000,
            max_restart_attempts: 10,
            cooldown_ms: 5 * 60_000,
            scan_interval_ms: 5 * 60_000,
            scan_grace_period_ms: 5_000,
        }
    }
}
