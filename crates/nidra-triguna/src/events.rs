//! Events emitted by the monitor as it observes new signals.

use serde::{Deserialize, Serialize};

use crate::monitor::Guna;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TrigunaEvent {
    /// The argmax guna changed from one tick to the next.
    GunaShift { from: Guna, to: Guna },
    /// `sattva` crossed above its threshold (edge-triggered).
    SattvaDominant { value: f64, message: String },
    /// `rajas` crossed above its threshold (edge-triggered).
    RajasAlert { value: f64, message: String },
    /// `tamas` crossed above its threshold (edge-triggered).
    TamasAlert { value: f64, message: String },
}
