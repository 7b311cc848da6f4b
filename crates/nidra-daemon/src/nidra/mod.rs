//! The sleep-cycle daemon: `LISTENING -> DREAMING -> DEEP_SLEEP -> LISTENING`.

pub mod config;
pub mod daemon;
pub mod events;
pub mod handlers;
pub mod persistence;
pub mod scheduler;
pub mod state;

pub use config::NidraConfig;
pub use daemon::NidraDaemon;
pub use events::NidraEvent;
pub use handlers::{DeepSleepHandler, DreamHandler, NoopDeepSleepHandler, NoopDreamHandler, ProgressFn};
pub use persistence::{DaemonRow, DaemonStore, InMemoryStore};
pub use scheduler::DriftScheduler;
pub use state::{is_nominal_edge, DaemonState};
