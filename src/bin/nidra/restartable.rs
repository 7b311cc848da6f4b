//! Wires `NidraDaemon` into Prana's restart contract.

use std::sync::Arc;

use async_trait::async_trait;

use nidra_core::Result;
use nidra_daemon::nidra::{
    DaemonStore, DeepSleepHandler, DreamHandler, InMemoryStore, NidraConfig, NidraDaemon, NoopDeepSleepHandler,
    NoopDreamHandler,
};
use nidra_daemon::prana::Restartable;

pub struct DaemonHandle<S: DaemonStore + 'static>(pub Arc<NidraDaemon<S>>);

#[async_trait]
impl<S: DaemonStore + 'static> Restartable for DaemonHandle<S> {
    async fn stop(&self) {
        let _ = self.0.dispose().await;
    }

    async fn self_heal(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

pub async fn new_in_memory_daemon(config: NidraConfig, now_ms: i64) -> Result<Arc<NidraDaemon<InMemoryStore>>> {
    let store = Arc::new(InMemoryStore::default());
    let dream_handler: Arc<dyn DreamHandler> = Arc::new(NoopDreamHandler);
    let deep_sleep_handler: Arc<dyn DeepSleepHandler> = Arc::new(NoopDeepSleepHandler);
    NidraDaemon::new(config, store, dream_handler, deep_sleep_handler, now_ms).await
}
