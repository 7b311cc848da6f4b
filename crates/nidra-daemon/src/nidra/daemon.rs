//! The Nidra sleep-cycle daemon: a drift-correcting heartbeat, phase
//! timers, and dream/deep-sleep handler dispatch around `DaemonState`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use nidra_core::{Error, EventBus, Result};

use super::config::NidraConfig;
use super::events::NidraEvent;
use super::handlers::{DeepSleepHandler, DreamHandler};
use super::persistence::{DaemonRow, DaemonStore};
use super::scheduler::{sleep_until, DriftScheduler};
use super::state::{is_nominal_edge, DaemonState};

struct Inner {
    state: DaemonState,
    last_heartbeat_ms: i64,
    started_at_ms: i64,
    last_activity_ms: i64,
    phase_entered_ms: i64,
    consolidation_phase: Option<String>,
    consolidation_progress: Option<f64>,
    dream_cancel: Option<CancellationToken>,
}

impl Inner {
    fn row(&self) -> DaemonRow {
        DaemonRow {
            state: self.state,
            last_heartbeat_ms: self.last_heartbeat_ms,
            started_at_ms: self.started_at_ms,
            consolidation_phase: self.consolidation_phase.clone(),
            consolidation_progress: self.consolidation_progress.clone(),
        }
    }
}

pub struct NidraDaemon<S: DaemonStore> {
    inner: Mutex<Inner>,
    config: NidraConfig,
    store: Arc<S>,
    dream_handler: Arc<dyn DreamHandler>,
    deep_sleep_handler: Arc<dyn DeepSleepHandler>,
    pub events: EventBus<NidraEvent>,
    wake_notify: Notify,
    run_cancel: CancellationToken,
    disposed: AtomicBool,
}

impl<S: DaemonStore + 'static> NidraDaemon<S> {
    /// Restore from the store, or start fresh in `LISTENING` if no row
    /// exists yet.
    pub async fn new(
        config: NidraConfig,
        store: Arc<S>,
        dream_handler: Arc<dyn DreamHandler>,
        deep_sleep_handler: Arc<dyn DeepSleepHandler>,
        now_ms: i64,
    ) -> Result<Arc<Self>> {
        let restored = store.load().await.unwrap_or_else(|err| {
            warn!(?err, "failed to load persisted daemon row, starting fresh");
            None
        });

        let inner = match restored {
            Some(row) => Inner {
                state: row.state,
                last_heartbeat_ms: row.last_heartbeat_ms,
                started_at_ms: row.started_at_ms,
                last_activity_ms: now_ms,
                phase_entered_ms: now_ms,
                consolidation_phase: row.consolidation_phase,
                consolidation_progress: row.consolidation_progress,
                dream_cancel: None,
            },
            None => Inner {
                state: DaemonState::Listening,
                last_heartbeat_ms: now_ms,
                started_at_ms: now_ms,
                last_activity_ms: now_ms,
                phase_entered_ms: now_ms,
                consolidation_phase: None,
                consolidation_progress: None,
                dream_cancel: None,
            },
        };

        Ok(Arc::new(Self {
            inner: Mutex::new(inner),
            config,
            store,
            dream_handler,
            deep_sleep_handler,
            events: EventBus::new(),
            wake_notify: Notify::new(),
            run_cancel: CancellationToken::new(),
            disposed: AtomicBool::new(false),
        }))
    }

    fn check_disposed(&self) -> Result<()> {
        if self.disposed.load(Ordering::SeqCst) {
            Err(Error::Disposed)
        } else {
            Ok(())
        }
    }

    pub fn state(&self) -> Result<DaemonState> {
        self.check_disposed()?;
        Ok(self.inner.lock().unwrap().state)
    }

    pub fn consolidation_progress(&self) -> Result<(Option<String>, Option<f64>)> {
        self.check_disposed()?;
        let inner = self.inner.lock().unwrap();
        Ok((inner.consolidation_phase.clone(), inner.consolidation_progress.clone()))
    }

    /// Idempotent: spawns the scheduling loop exactly once.
    pub fn start(self: &Arc<Self>) -> JoinHandle<()> {
        let daemon = self.clone();
        tokio::spawn(async move { daemon.run_loop().await })
    }

    /// Activity signal: resets the idle timer in `LISTENING`, otherwise
    /// behaves like `wake()`.
    pub async fn touch(self: &Arc<Self>, now_ms: i64) -> Result<()> {
        self.check_disposed()?;
        let should_wake = {
            let mut inner = self.inner.lock().unwrap();
            if inner.state == DaemonState::Listening {
                inner.last_activity_ms = now_ms;
                false
            } else {
                true
            }
        };
        if should_wake {
            self.wake(now_ms).await?;
        } else {
            self.wake_notify.notify_one();
        }
        Ok(())
    }

    /// Transition to `LISTENING` from any state. Aborts an in-flight
    /// dream handler if one is running.
    pub async fn wake(self: &Arc<Self>, now_ms: i64) -> Result<()> {
        self.check_disposed()?;
        let (prev, dream_cancel) = {
            let mut inner = self.inner.lock().unwrap();
            let prev = inner.state;
            let cancel = inner.dream_cancel.take();
            inner.state = DaemonState::Listening;
            inner.last_activity_ms = now_ms;
            inner.phase_entered_ms = now_ms;
            inner.consolidation_phase = None;
            inner.consolidation_progress = None;
            (prev, cancel)
        };
        if let Some(cancel) = dream_cancel {
            cancel.cancel();
        }
        if prev != DaemonState::Listening {
            self.persist_full().await;
            self.events.emit(&NidraEvent::StateChange { prev, next: DaemonState::Listening, timestamp_ms: now_ms });
        }
        self.wake_notify.notify_one();
        Ok(())
    }

    /// Cancels all timers, aborts in-flight work, drops handlers, and
    /// marks the daemon disposed. Irreversible.
    pub async fn dispose(self: &Arc<Self>) -> Result<()> {
        self.check_disposed()?;
        self.disposed.store(true, Ordering::SeqCst);
        self.run_cancel.cancel();
        let dream_cancel = self.inner.lock().unwrap().dream_cancel.take();
        if let Some(cancel) = dream_cancel {
            cancel.cancel();
        }
        self.wake_notify.notify_one();
        Ok(())
    }

    async fn persist_full(&self) {
        let row = self.inner.lock().unwrap().row();
        if let Err(err) = self.store.save_full(&row).await {
            warn!(?err, "failed to persist daemon row");
        }
    }

    async fn persist_heartbeat(&self, now_ms: i64) {
        if let Err(err) = self.store.save_heartbeat(now_ms).await {
            warn!(?err, "failed to persist heartbeat timestamp");
        }
    }

    async fn run_loop(self: Arc<Self>) {
        let start_state = self.inner.lock().unwrap().state;
        let mut heartbeat = DriftScheduler::new(now_ms(), self.config.heartbeat_ms(start_state));
        info!("nidra daemon scheduling loop started");

        loop {
            if self.disposed.load(Ordering::SeqCst) {
                return;
            }
            let now = now_ms();
            let (state, idle_or_phase_due) = {
                let inner = self.inner.lock().unwrap();
                let due = match inner.state {
                    DaemonState::Listening => inner.last_activity_ms + self.config.idle_timeout_ms,
                    DaemonState::Dreaming => inner.phase_entered_ms + self.config.dream_duration_ms,
                    DaemonState::DeepSleep => inner.phase_entered_ms + self.config.deep_sleep_duration_ms,
                };
                (inner.state, due)
            };
            heartbeat.set_interval(self.config.heartbeat_ms(state));
            let heartbeat_delay = heartbeat.next_delay_ms(now);
            let heartbeat_due = now + heartbeat_delay;
            let next_due = heartbeat_due.min(idle_or_phase_due);

            tokio::select! {
                _ = self.run_cancel.cancelled() => return,
                _ = self.wake_notify.notified() => continue,
                _ = sleep_until(next_due, now_ms) => {
                    let now = now_ms();
                    if now >= heartbeat.expected_time_ms() {
                        self.fire_heartbeat(now).await;
                    }
                    if now >= idle_or_phase_due {
                        self.fire_phase_timeout(now).await;
                    }
                }
            }
        }
    }

    async fn fire_heartbeat(&self, now: i64) {
        let (state, uptime) = {
            let mut inner = self.inner.lock().unwrap();
            inner.last_heartbeat_ms = now;
            (inner.state, now - inner.started_at_ms)
        };
        self.persist_heartbeat(now).await;
        self.events.emit(&NidraEvent::Heartbeat { state, timestamp_ms: now, uptime_ms: uptime });
    }

    async fn fire_phase_timeout(self: &Arc<Self>, now: i64) {
        let prev = self.inner.lock().unwrap().state;
        let next = match prev {
            DaemonState::Listening => DaemonState::Dreaming,
            DaemonState::Dreaming => DaemonState::DeepSleep,
            DaemonState::DeepSleep => DaemonState::Listening,
        };
        if !is_nominal_edge(prev, next) {
            warn!(?prev, ?next, "rejected non-nominal scheduled transition");
            return;
        }

        {
            let mut inner = self.inner.lock().unwrap();
            inner.state = next;
            inner.phase_entered_ms = now;
        }
        self.persist_full().await;
        self.events.emit(&NidraEvent::StateChange { prev, next, timestamp_ms: now });

        match next {
            DaemonState::Dreaming => self.enter_dream(now),
            DaemonState::DeepSleep => self.enter_deep_sleep(now),
            DaemonState::Listening => {}
        }
    }

    fn enter_dream(self: &Arc<Self>, now: i64) {
        let cancel = CancellationToken::new();
        self.inner.lock().unwrap().dream_cancel = Some(cancel.clone());
        self.events.emit(&NidraEvent::ConsolidationStart { timestamp_ms: now });

        let daemon = self.clone();
        tokio::spawn(async move {
            let report_daemon = daemon.clone();
            let progress = move |phase: &str, pct: f64| {
                let mut inner = report_daemon.inner.lock().unwrap();
                if inner.state == DaemonState::Dreaming {
                    inner.consolidation_phase = Some(phase.to_string());
                    inner.consolidation_progress = Some(pct.clamp(0.0, 1.0));
                }
            };

            let progress: &(dyn Fn(&str, f64) + Send + Sync) = &progress;
            let result = daemon.dream_handler.dream(progress, cancel).await;
            if let Err(err) = result {
                warn!(%err, "dream handler failed");
            }
            let end = now_ms();
            daemon.events.emit(&NidraEvent::ConsolidationEnd { timestamp_ms: end, duration_ms: end - now });
        });
    }

    fn enter_deep_sleep(self: &Arc<Self>, _now: i64) {
        let daemon = self.clone();
        tokio::spawn(async move {
            if let Err(err) = daemon.deep_sleep_handler.maintain().await {
                warn!(%err, "deep-sleep handler failed");
            }
        });
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
