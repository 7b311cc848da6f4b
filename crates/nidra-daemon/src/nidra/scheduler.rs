//! Drift-correcting interval scheduling and chunked long sleeps.

use std::time::Duration;

/// A day in milliseconds — the chunk size `sleep_until` re-checks the
/// absolute target at, so a single sleep can safely exceed whatever the
/// platform timer considers a safe maximum duration.
const MAX_CHUNK_MS: i64 = 24 * 60 * 60 * 1000;

/// Chain scheduler that corrects for drift: each tick's delay accounts
/// for how late the previous tick actually fired.
pub struct DriftScheduler {
    interval_ms: i64,
    expected_time_ms: i64,
}

impl DriftScheduler {
    pub fn new(now_ms: i64, interval_ms: i64) -> Self {
        Self { interval_ms, expected_time_ms: now_ms + interval_ms }
    }

    pub fn set_interval(&mut self, interval_ms: i64) {
        self.interval_ms = interval_ms;
    }

    /// Compute the delay until the next beat, given the current time,
    /// and advance internal bookkeeping for the beat after that.
    pub fn next_delay_ms(&mut self, now_ms: i64) -> i64 {
        let drift = now_ms - self.expected_time_ms;
        let next_delay = (self.interval_ms - drift).max(0);
        self.expected_time_ms = now_ms + next_delay;
        next_delay
    }

    pub fn expected_time_ms(&self) -> i64 {
        self.expected_time_ms
    }
}

/// Sleep until `target_ms` (as measured by `now_ms`), splitting the wait
/// into chunks no larger than `MAX_CHUNK_MS` and re-reading `now_ms` each
/// time so a stale absolute target is never overslept.
pub async fn sleep_until(target_ms: i64, now_ms: impl Fn() -> i64) {
    loop {
        let remaining = target_ms - now_ms();
        if remaining <= 0 {
            return;
        }
        let chunk = remaining.min(MAX_CHUNK_MS);
        tokio::time::sleep(Duration::from_millis(chunk as u64)).await;
    }
}
