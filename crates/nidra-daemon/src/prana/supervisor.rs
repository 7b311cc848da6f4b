//! Prana: keeps a daemon alive, bounds its error rate, and runs periodic
//! background scans for new capabilities.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use nidra_core::EventBus;

use super::budget::ErrorBudget;
use super::config::PranaConfig;
use super::events::{HealthBroadcast, PranaEvent};
use super::health::{severity_of, HealthState};
use super::restart::RestartPolicy;
use super::scan::ScanHandler;

/// What the supervisor restarts. A concrete daemon wraps its own
/// lifecycle behind this so Prana never depends on Nidra's internals.
#[async_trait]
pub trait Restartable: Send + Sync {
    async fn stop(&self);
    async fn self_heal(&self) -> Result<(), String>;
}

pub type DaemonFactory = Arc<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn Restartable>, String>> + Send + Sync>;

pub struct Supervisor {
    config: PranaConfig,
    health: Mutex<HealthState>,
    budget: Mutex<ErrorBudget>,
    restart_policy: Mutex<RestartPolicy>,
    daemon: Mutex<Option<Arc<dyn Restartable>>>,
    factory: DaemonFactory,
    scan_handler: Arc<dyn ScanHandler>,
    broadcast: Option<Arc<dyn HealthBroadcast>>,
    pub events: EventBus<PranaEvent>,
    cancel: CancellationToken,
    scan_task: Mutex<Option<JoinHandle<()>>>,
}

impl Supervisor {
    pub fn new(
        config: PranaConfig,
        factory: DaemonFactory,
        scan_handler: Arc<dyn ScanHandler>,
        broadcast: Option<Arc<dyn HealthBroadcast>>,
    ) -> Arc<Self> {
        let budget = ErrorBudget::new(config.error_budget, config.error_window_ms);
        let restart_policy = RestartPolicy::new(config.initial_restart_delay_ms, config.max_restart_delay_ms, config.max_restart_attempts);
        Arc::new(Self {
            config,
            health: Mutex::new(HealthState::Stopped),
            budget: Mutex::new(budget),
            restart_policy: Mutex::new(restart_policy),
            daemon: Mutex::new(None),
            factory,
            scan_handler,
            broadcast,
            events: EventBus::new(),
            cancel: CancellationToken::new(),
            scan_task: Mutex::new(None),
        })
    }

    pub fn health(&self) -> HealthState {
        *self.health.lock().unwrap()
    }

    /// Idempotent: builds the first daemon and launches the scan loop.
    pub async fn start(self: &Arc<Self>, now_ms: i64) -> Result<(), String> {
        if *self.health.lock().unwrap() != HealthState::Stopped {
            return Ok(());
        }
        let daemon = (self.factory)().await?;
        *self.daemon.lock().unwrap() = Some(daemon);
        self.transition(HealthState::Healthy, "started", now_ms);

        let supervisor = self.clone();
        let handle = tokio::spawn(async move { supervisor.scan_loop().await });
        *self.scan_task.lock().unwrap() = Some(handle);
        Ok(())
    }

    pub async fn stop(&self, now_ms: i64) {
        self.cancel.cancel();
        if let Some(handle) = self.scan_task.lock().unwrap().take() {
            handle.abort();
        }
        if let Some(daemon) = self.daemon.lock().unwrap().take() {
            daemon.stop().await;
        }
        self.transition(HealthState::Stopped, "stopped", now_ms);
    }

    /// Record an observed error; crosses the budget boundary in either
    /// direction depending on the sliding window.
    pub fn report_error(&self, message: impl Into<String>, now_ms: i64) {
        let message = message.into();
        self.events.emit(&PranaEvent::Error { message: message.clone(), timestamp_ms: now_ms });

        let over_budget = self.budget.lock().unwrap().record(now_ms);
        let current = *self.health.lock().unwrap();
        if over_budget && current == HealthState::Healthy {
            self.transition(HealthState::Degraded, "error budget exceeded", now_ms);
        } else if !over_budget && current == HealthState::Degraded {
            self.transition(HealthState::Healthy, "error rate recovered", now_ms);
        }
    }

    /// Drive the full restart cycle: remove the old daemon, self-heal,
    /// back off, then start a fresh one. Never throws upward — a
    /// catastrophic failure just surfaces as a health transition.
    pub async fn report_crash(self: &Arc<Self>, reason: impl Into<String>, now_ms: i64) {
        let reason = reason.into();
        self.transition(HealthState::Crashed, &reason, now_ms);

        if let Some(old) = self.daemon.lock().unwrap().take() {
            old.stop().await;
            if let Err(err) = old.self_heal().await {
                warn!(%err, "self-heal reported a problem before restart");
            }
        }

        let delay_ms = self.restart_policy.lock().unwrap().next_delay_ms();
        tokio::time::sleep(Duration::from_millis(delay_ms.max(0) as u64)).await;

        if self.restart_policy.lock().unwrap().exhausted() {
            tokio::time::sleep(Duration::from_millis(self.config.cooldown_ms.max(0) as u64)).await;
            if let Some(daemon) = self.daemon.lock().unwrap().as_ref() {
                let _ = daemon.self_heal().await;
            }
        }

        match (self.factory)().await {
            Ok(daemon) => {
                *self.daemon.lock().unwrap() = Some(daemon);
                self.restart_policy.lock().unwrap().reset();
                self.transition(HealthState::Healthy, "restarted", now_ms);
            }
            Err(err) => {
                warn!(%err, "restart attempt failed");
                self.transition(HealthState::Crashed, &format!("restart failed: {err}"), now_ms);
            }
        }
    }

    fn transition(&self, next: HealthState, reason: &str, now_ms: i64) {
        let prev = {
            let mut health = self.health.lock().unwrap();
            let prev = *health;
            *health = next;
            prev
        };
        if prev == next {
            return;
        }
        let restart_count = self.restart_policy.lock().unwrap().attempts();
        self.events.emit(&PranaEvent::Health {
            from: prev,
            to: next,
            reason: reason.to_string(),
            timestamp_ms: now_ms,
            restart_count,
        });
        if let Some(broadcast) = &self.broadcast {
            let _ = catch_unwind(AssertUnwindSafe(|| broadcast.notify(next, severity_of(next), reason)));
        }
    }

    async fn scan_loop(self: Arc<Self>) {
        tokio::select! {
            _ = self.cancel.cancelled() => return,
            _ = tokio::time::sleep(Duration::from_millis(self.config.scan_grace_period_ms.max(0) as u64)) => {}
        }

        loop {
            if self.health() != HealthState::Crashed {
                self.run_one_scan().await;
            }
            tokio::select! {
                _ = self.cancel.cancelled() => return,
                _ = tokio::time::sleep(Duration::from_millis(self.config.scan_interval_ms.max(0) as u64)) => {}
            }
        }
    }

    async fn run_one_scan(&self) {
        let now = chrono::Utc::now().timestamp_millis();
        self.events.emit(&PranaEvent::ScanStart { timestamp_ms: now });
        match self.scan_handler.scan().await {
            Ok(discovered) => {
                for name in &discovered {
                    self.events.emit(&PranaEvent::SkillDiscovered { name: name.clone(), timestamp_ms: now });
                }
                self.events.emit(&PranaEvent::ScanComplete { discovered: discovered.len(), timestamp_ms: now });
            }
            Err(err) => {
                self.events.emit(&PranaEvent::ScanError { message: err, timestamp_ms: now });
            }
        }
    }
}
