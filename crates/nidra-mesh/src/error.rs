//! Mesh-local error surface, funneled into [`nidra_core::Error`] at the
//! public boundary the way every other `nidra-*` crate does.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum MeshError {
    #[error("ask timed out")]
    Timeout,
    #[error("router destroyed")]
    RouterDestroyed,
    #[error("no pending ask for id {0}")]
    NoPendingAsk(String),
}

impl From<MeshError> for nidra_core::Error {
    fn from(err: MeshError) -> Self {
        match err {
            MeshError::Timeout => nidra_core::Error::Timeout,
            MeshError::RouterDestroyed => nidra_core::Error::Disposed,
            MeshError::NoPendingAsk(id) => nidra_core::Error::NoDestination(id),
        }
    }
}
