//! Simplex-constrained Kalman filter, operating in ILR (ℝ²) coordinates.
//!
//! Transition F = I, observation model H = I, so predict/update collapse
//! to plain covariance arithmetic over 2x2 matrices.

use nidra_simplex::Mat2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct KalmanState {
    pub x_hat: [f64; 2],
    pub p: [[f64; 2]; 2],
}

impl KalmanState {
    pub fn new(x_hat: [f64; 2]) -> Self {
        Self { x_hat, p: [[1.0, 0.0], [0.0, 1.0]] }
    }

    fn p_mat(&self) -> Mat2 {
        Mat2::new(self.p[0][0], self.p[0][1], self.p[1][0], self.p[1][1])
    }

    fn set_p(&mut self, m: Mat2) {
        self.p = [[m.a, m.b], [m.c, m.d]];
    }
}

/// Predict-then-update a single Kalman step. `process_noise` and
/// `measurement_noise` are applied as `diag(q, q)` / `diag(r, r)`.
///
/// If the innovation covariance `S` is singular, the update is skipped
/// and the current (post-predict) state is returned unchanged — a fail-
/// closed skip, never a panic.
pub fn step(state: &KalmanState, observation: [f64; 2], process_noise: f64, measurement_noise: f64) -> KalmanState {
    let q = Mat2::diag(process_noise, process_noise);
    let r = Mat2::diag(measurement_noise, measurement_noise);

    // Predict (F = I).
    let x_minus = state.x_hat;
    let p_minus = state.p_mat().add(q);

    // Innovation.
    let innovation = [observation[0] - x_minus[0], observation[1] - x_minus[1]];
    let s = p_minus.add(r);

    let Some(s_inv) = s.inverse() else {
        return KalmanState { x_hat: x_minus, p: [[p_minus.a, p_minus.b], [p_minus.c, p_minus.d]] };
    };

    // Gain and state update.
    let k = p_minus.mul(s_inv);
    let correction = k.mul_vec(innovation);
    let x_hat = [x_minus[0] + correction[0], x_minus[1] + correction[1]];

    // Joseph-form covariance update for numerical symmetry/PSD-ness.
    let identity = Mat2::identity();
    let i_minus_k = identity.sub(k);
    let p = i_minus_k.mul(p_minus).mul(i_minus_k.transpose()).add(k.mul(r).mul(k.transpose()));

    let mut next = KalmanState { x_hat, p: [[0.0; 2]; 2] };
    next.set_p(p);
    next
}
