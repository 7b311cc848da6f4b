//! Prana: the supervisor that keeps a Nidra daemon alive.

pub mod budget;
pub mod config;
pub mod events;
pub mod health;
pub mod restart;
pub mod scan;
pub mod supervisor;

pub use budget::ErrorBudget;
pub use config::PranaConfig;
pub use events::{HealthBroadcast, PranaEvent};
pub use health::{severity_of, HealthState, Severity};
pub use restart::RestartPolicy;
pub use scan::{NoopScanHandler, ScanHandler};
pub use supervisor::{DaemonFactory, Restartable, Supervisor};
