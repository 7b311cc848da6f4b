//! Collaborator hooks invoked during the dream and deep-sleep phases.
//! Failures are logged by the caller and never propagate.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub type ProgressFn<'a> = &'a (dyn Fn(&str, f64) + Send + Sync);

#[async_trait]
pub trait DreamHandler: Send + Sync {
    async fn dream(&self, progress: ProgressFn<'_>, cancel: CancellationToken) -> Result<(), String>;
}

#[async_trait]
pub trait DeepSleepHandler: Send + Sync {
    async fn maintain(&self) -> Result<(), String>;
}

/// Does nothing. The daemon works fine without collaborators registered.
pub struct NoopDreamHandler;

#[async_trait]
impl DreamHandler for NoopDreamHandler {
    async fn dream(&self, progress: ProgressFn<'_>, _cancel: CancellationToken) -> Result<(), String> {
        progress("idle", 1.0);
        Ok(())
    }
}

pub struct NoopDeepSleepHandler;

#[async_trait]
impl DeepSleepHandler for NoopDeepSleepHandler {
    async fn maintain(&self) -> Result<(), String> {
        Ok(())
    }
}
