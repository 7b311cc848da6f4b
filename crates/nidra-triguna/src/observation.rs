//! Raw observation signal and its projection onto the guna simplex.

use nidra_simplex::softmax_closure;
use serde::{Deserialize, Serialize};

/// Six normalized signals in `[0,1]` describing the last turn's outcome.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Observation {
    pub error_rate: f64,
    pub token_velocity: f64,
    pub loop_count: f64,
    pub latency: f64,
    pub success_rate: f64,
    pub user_satisfaction: f64,
}

impl Observation {
    pub fn as_vector(&self) -> [f64; 6] {
        [
            self.error_rate,
            self.token_velocity,
            self.loop_count,
            self.latency,
            self.success_rate,
            self.user_satisfaction,
        ]
    }
}

/// Fixed 3x6 influence matrix: rows are sattva/rajas/tamas, columns are
/// error_rate, token_velocity, loop_count, latency, success_rate,
/// user_satisfaction.
pub const INFLUENCE_MATRIX: [[f64; 6]; 3] = [
    [-0.8, -0.1, -0.2, -0.3, 0.9, 0.8],
    [0.0, 0.8, 0.6, 0.1, -0.1, -0.2],
    [0.9, -0.1, 0.4, 0.8, -0.7, -0.5],
];

/// Project an observation onto the guna simplex via `M . obs` followed by
/// a numerically stable softmax closure.
pub fn observation_to_simplex(obs: &Observation) -> [f64; 3] {
    let v = obs.as_vector();
    let mut affinities = [0.0; 3];
    for (row, affinity) in INFLUENCE_MATRIX.iter().zip(affinities.iter_mut()) {
        *affinity = row.iter().zip(v.iter()).map(|(m, x)| m * x).sum();
    }
    softmax_closure(affinities)
}
