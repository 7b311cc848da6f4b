//! Shared types, error taxonomy, and event plumbing for the cognitive
//! runtime core — the bits every other `nidra-*` crate depends on.

pub mod config;
pub mod error;
pub mod event;
pub mod types;

pub use error::{Error, Result};
pub use event::EventBus;
pub use types::{CharsPerTokenEstimator, ContentPart, Message, Role, TokenEstimator};
