//! End-to-end scenarios spanning Nidra and Prana.

use std::sync::Arc;

use async_trait::async_trait;
use nidra_daemon::nidra::{
    DaemonState, InMemoryStore, NidraConfig, NidraDaemon, NoopDeepSleepHandler, NoopDreamHandler,
};
use nidra_daemon::prana::{HealthState, NoopScanHandler, PranaConfig, Restartable, Supervisor};

#[tokio::test]
async fn fresh_daemon_starts_listening_and_wakes_from_any_state() {
    let daemon = NidraDaemon::new(
        NidraConfig::default(),
        Arc::new(InMemoryStore::default()),
        Arc::new(NoopDreamHandler),
        Arc::new(NoopDeepSleepHandler),
        0,
    )
    .await
    .unwrap();

    assert_eq!(daemon.state().unwrap(), DaemonState::Listening);
    daemon.touch(10).await.unwrap();
    assert_eq!(daemon.state().unwrap(), DaemonState::Listening);

    daemon.wake(20).await.unwrap();
    assert_eq!(daemon.state().unwrap(), DaemonState::Listening);

    daemon.dispose().await.unwrap();
    assert!(daemon.wake(30).await.is_err());
}

struct StubDaemon;

#[async_trait]
impl Restartable for StubDaemon {
    async fn stop(&self) {}
    async fn self_heal(&self) -> Result<(), String> {
        Ok(())
    }
}

#[tokio::test]
async fn supervisor_recovers_from_a_reported_crash() {
    let config = PranaConfig {
        initial_restart_delay_ms: 1,
        max_restart_delay_ms: 2,
        cooldown_ms: 1,
        scan_interval_ms: 60_000,
        scan_grace_period_ms: 60_000,
        ..PranaConfig::default()
    };
    let supervisor = Supervisor::new(
        config,
        std::sync::Arc::new(|| Box::pin(async { Ok(std::sync::Arc::new(StubDaemon) as std::sync::Arc<dyn Restartable>) })),
        Arc::new(NoopScanHandler),
        None,
    );

    supervisor.start(0).await.unwrap();
    assert_eq!(supervisor.health(), HealthState::Healthy);

    supervisor.report_crash("simulated failure", 100).await;
    assert_eq!(supervisor.health(), HealthState::Healthy); // restarted successfully

    supervisor.stop(200).await;
    assert_eq!(supervisor.health(), HealthState::Stopped);
}
