//! Persisted daemon row. Opaque to everyone but the daemon itself;
//! external readers use the snapshot API instead.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use nidra_core::Result;

use super::state::DaemonState;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DaemonRow {
    pub state: DaemonState,
    pub last_heartbeat_ms: i64,
    pub started_at_ms: i64,
    pub consolidation_phase: Option<String>,
    pub consolidation_progress: Option<f64>,
}

#[async_trait]
pub trait DaemonStore: Send + Sync {
    async fn load(&self) -> Result<Option<DaemonRow>>;
    async fn save_full(&self, row: &DaemonRow) -> Result<()>;
    async fn save_heartbeat(&self, timestamp_ms: i64) -> Result<()>;
}

/// Default store for tests and single-process deployments without a
/// backing database.
#[derive(Default)]
pub struct InMemoryStore {
    row: Mutex<Option<DaemonRow>>,
}

#[async_trait]
impl DaemonStore for InMemoryStore {
    async fn load(&self) -> Result<Option<DaemonRow>> {
        Ok(self.row.lock().await.clone())
    }

    async fn save_full(&self, row: &DaemonRow) -> Result<()> {
        *self.row.lock().await = Some(row.clone());
        Ok(())
    }

    async fn save_heartbeat(&self, timestamp_ms: i64) -> Result<()> {
        if let Some(row) = self.row.lock().await.as_mut() {
            row.last_heartbeat_ms = timestamp_ms;
        }
        Ok(())
    }
}
