use async_trait::async_trait;

/// Periodic background capability scan. Returns the names of newly
/// discovered skills.
#[async_trait]
pub trait ScanHandler: Send + Sync {
    async fn scan(&self) -> Result<Vec<String>, String>;
}

pub struct NoopScanHandler;

#[async_trait]
impl ScanHandler for NoopScanHandler {
    async fn scan(&self) -> Result<Vec<String>, String> {
        Ok(Vec::new())
    }
}
