//! Error taxonomy shared by every cognitive-core crate.
//!
//! Pure numeric code reports
//! `SingularMatrix` as a local skip (never a panic), disposal errors are
//! loud by design, everything else is swallowed at the boundary that owns
//! the retry/backoff policy.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation attempted after disposal")]
    Disposed,

    #[error("singular matrix")]
    SingularMatrix,

    #[error("operation timed out")]
    Timeout,

    #[error("routing loop detected")]
    RoutingLoop,

    #[error("ttl expired")]
    TtlExpired,

    #[error("no subscribers for topic {0}")]
    NoSubscribers(String),

    #[error("no destination: {0}")]
    NoDestination(String),

    #[error("handler failure: {0}")]
    HandlerFailure(String),

    #[error("persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("unhealthy: {0}")]
    Unhealthy(String),

    #[error("error budget exhausted")]
    BudgetExhausted,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    pub fn no_destination(to: impl Into<String>) -> Self {
        Self::NoDestination(to.into())
    }

    pub fn handler_failure(reason: impl Into<String>) -> Self {
        Self::HandlerFailure(reason.into())
    }
}
