//! Simplex-constrained Kalman filter monitoring system health as a triple
//! of gunas (sattva, rajas, tamas) on the 2-simplex.

pub mod events;
pub mod kalman;
pub mod monitor;
pub mod observation;

pub use events::TrigunaEvent;
pub use kalman::KalmanState;
pub use monitor::{Guna, GunaSnapshot, MonitorState, Trend, TrigunaConfig, TrigunaMonitor};
pub use observation::{observation_to_simplex, Observation, INFLUENCE_MATRIX};
