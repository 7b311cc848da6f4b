//! Stateful guna monitor: wraps the Kalman filter with history, dominant
//! guna tracking, OLS trend detection, and threshold-crossing events.

use std::collections::VecDeque;

use nidra_core::EventBus;
use nidra_simplex::{clamp_to_simplex, ilr_forward, ilr_inverse};
use serde::{Deserialize, Serialize};

use crate::events::TrigunaEvent;
use crate::kalman::{self, KalmanState};
use crate::observation::{observation_to_simplex, Observation};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Guna {
    Sattva,
    Rajas,
    Tamas,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GunaSnapshot {
    pub state: [f64; 3],
    pub timestamp_ms: i64,
    pub dominant: Guna,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TrigunaConfig {
    pub process_noise: f64,
    pub measurement_noise: f64,
    pub sattva_threshold: f64,
    pub rajas_threshold: f64,
    pub tamas_threshold: f64,
    pub max_history: usize,
    pub simplex_floor: f64,
    pub trend_window: usize,
    pub trend_threshold: f64,
    pub initial_state: [f64; 3],
}

impl Default for TrigunaConfig {
    fn default() -> Self {
        Self {
            process_noise: 0.01,
            measurement_noise: 0.1,
            sattva_threshold: 0.7,
            rajas_threshold: 0.5,
            tamas_threshold: 0.4,
            max_history: 100,
            simplex_floor: 1e-6,
            trend_window: 5,
            trend_threshold: 0.05,
            initial_state: [0.6, 0.3, 0.1],
        }
    }
}

/// Fields that round-trip across a restart. Config is supplied separately
/// at reconstruction time — it is an operational knob, not learned state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonitorState {
    pub guna_state: [f64; 3],
    pub x_hat: [f64; 2],
    pub p: [[f64; 2]; 2],
    pub prev_dominant: Option<Guna>,
    pub history: Vec<GunaSnapshot>,
}

pub struct TrigunaMonitor {
    config: TrigunaConfig,
    kalman: KalmanState,
    guna_state: [f64; 3],
    prev_dominant: Option<Guna>,
    history: VecDeque<GunaSnapshot>,
    pub events: EventBus<TrigunaEvent>,
}

impl TrigunaMonitor {
    pub fn new(config: TrigunaConfig) -> Self {
        let clamped = clamp_to_simplex(config.initial_state, config.simplex_floor);
        let x_hat = ilr_forward(clamped[0], clamped[1], clamped[2]);
        let dominant = dominant_of(&clamped);
        Self {
            config,
            kalman: KalmanState::new(x_hat),
            guna_state: clamped,
            prev_dominant: Some(dominant),
            history: VecDeque::new(),
            events: EventBus::new(),
        }
    }

    pub fn from_state(config: TrigunaConfig, state: MonitorState) -> Self {
        Self {
            config,
            kalman: KalmanState { x_hat: state.x_hat, p: state.p },
            guna_state: state.guna_state,
            prev_dominant: state.prev_dominant,
            history: state.history.into_iter().collect(),
            events: EventBus::new(),
        }
    }

    pub fn serialize(&self) -> MonitorState {
        MonitorState {
            guna_state: self.guna_state,
            x_hat: self.kalman.x_hat,
            p: self.kalman.p,
            prev_dominant: self.prev_dominant,
            history: self.history.iter().cloned().collect(),
        }
    }

    pub fn guna_state(&self) -> [f64; 3] {
        self.guna_state
    }

    pub fn dominant(&self) -> Guna {
        dominant_of(&self.guna_state)
    }

    pub fn history(&self) -> &VecDeque<GunaSnapshot> {
        &self.history
    }

    /// Observe a new six-signal reading, advance the filter, and emit any
    /// guna-shift / threshold-crossing events. Never yields.
    pub fn update(&mut self, obs: &Observation, timestamp_ms: i64) -> Vec<TrigunaEvent> {
        let prev_state = self.guna_state;
        let prev_dominant = self.prev_dominant;

        let target = observation_to_simplex(obs);
        let clamped_target = clamp_to_simplex(target, self.config.simplex_floor);
        let z = ilr_forward(clamped_target[0], clamped_target[1], clamped_target[2]);

        self.kalman = kalman::step(&self.kalman, z, self.config.process_noise, self.config.measurement_noise);

        let raw = ilr_inverse(self.kalman.x_hat);
        self.guna_state = clamp_to_simplex(raw, self.config.simplex_floor);

        let new_dominant = dominant_of(&self.guna_state);
        self.prev_dominant = Some(new_dominant);

        self.history.push_back(GunaSnapshot {
            state: self.guna_state,
            timestamp_ms,
            dominant: new_dominant,
        });
        let cap = self.config.max_history.min(1000);
        while self.history.len() > cap {
            self.history.pop_front();
        }

        let mut events = Vec::new();
        if prev_dominant != Some(new_dominant) {
            if let Some(from) = prev_dominant {
                events.push(TrigunaEvent::GunaShift { from, to: new_dominant });
            }
        }
        events.extend(self.threshold_events(prev_state));

        for event in &events {
            self.events.emit(event);
        }
        events
    }

    fn threshold_events(&self, prev_state: [f64; 3]) -> Vec<TrigunaEvent> {
        let mut events = Vec::new();
        let sattva = self.guna_state[0];
        let rajas = self.guna_state[1];
        let tamas = self.guna_state[2];

        if prev_state[0] <= self.config.sattva_threshold && sattva > self.config.sattva_threshold {
            events.push(TrigunaEvent::SattvaDominant {
                value: sattva,
                message: format!("sattva crossed above {:.2}", self.config.sattva_threshold),
            });
        }
        if prev_state[1] <= self.config.rajas_threshold && rajas > self.config.rajas_threshold {
            events.push(TrigunaEvent::RajasAlert {
                value: rajas,
                message: format!("rajas crossed above {:.2}", self.config.rajas_threshold),
            });
        }
        if prev_state[2] <= self.config.tamas_threshold && tamas > self.config.tamas_threshold {
            events.push(TrigunaEvent::TamasAlert {
                value: tamas,
                message: format!("tamas crossed above {:.2}", self.config.tamas_threshold),
            });
        }
        events
    }

    /// OLS slope of `guna`'s value against snapshot index over the last
    /// `trendWindow` entries, classified against `trendThreshold`.
    pub fn trend(&self, guna: Guna) -> Trend {
        let window = self.config.trend_window.max(1);
        let n = self.history.len().min(window);
        if n < 2 {
            return Trend::Stable;
        }
        let idx = guna_index(guna);
        let values: Vec<f64> = self.history.iter().rev().take(n).map(|s| s.state[idx]).rev().collect();

        let slope = ols_slope(&values);
        let total_change = slope * (n as f64 - 1.0);
        if total_change > self.config.trend_threshold {
            Trend::Rising
        } else if total_change < -self.config.trend_threshold {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }
}

fn guna_index(guna: Guna) -> usize {
    match guna {
        Guna::Sattva => 0,
        Guna::Rajas => 1,
        Guna::Tamas => 2,
    }
}

fn dominant_of(state: &[f64; 3]) -> Guna {
    let mut best = Guna::Sattva;
    let mut best_value = state[0];
    for (idx, guna) in [Guna::Rajas, Guna::Tamas].into_iter().enumerate() {
        let value = state[idx + 1];
        if value > best_value {
            best_value = value;
            best = guna;
        }
    }
    best
}

fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let xs: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = values.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (x, y) in xs.iter().zip(values.iter()) {
        numerator += (x - x_mean) * (y - y_mean);
        denominator += (x - x_mean).powi(2);
    }
    if denominator.abs() < 1e-15 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy() -> Observation {
        Observation {
            error_rate: 0.0,
            token_velocity: 0.2,
            loop_count: 0.0,
            latency: 0.1,
            success_rate: 0.9,
            user_satisfaction: 0.9,
        }
    }

    fn erroneous() -> Observation {
        Observation {
            error_rate: 0.9,
            token_velocity: 0.1,
            loop_count: 0.2,
            latency: 0.8,
            success_rate: 0.1,
            user_satisfaction: 0.1,
        }
    }

    #[test]
    fn update_from_healthy_observation_favors_sattva_and_stays_on_simplex() {
        let mut monitor = TrigunaMonitor::new(TrigunaConfig::default());
        let events = monitor.update(&healthy(), 1_000);
        let state = monitor.guna_state();
        let sum: f64 = state.iter().sum();
        assert!((sum - 1.0).abs() <= 1e-6);
        for v in state {
            assert!(v >= 1e-6);
        }
        assert_eq!(monitor.dominant(), Guna::Sattva);
        assert!(events.iter().any(|e| matches!(e, TrigunaEvent::SattvaDominant { .. })));
    }

    #[test]
    fn repeated_erroneous_observations_shift_dominant_to_tamas() {
        let mut monitor = TrigunaMonitor::new(TrigunaConfig::default());
        let mut all_events = Vec::new();
        for i in 0..20 {
            all_events.extend(monitor.update(&erroneous(), 1_000 + i));
        }
        assert_eq!(monitor.dominant(), Guna::Tamas);
        assert!(all_events.iter().any(|e| matches!(e, TrigunaEvent::GunaShift { .. })));
    }

    #[test]
    fn serialize_then_from_state_reproduces_dominant_and_history() {
        let mut monitor = TrigunaMonitor::new(TrigunaConfig::default());
        for i in 0..5 {
            monitor.update(&healthy(), 1_000 + i);
        }
        let snapshot = monitor.serialize();
        let restored = TrigunaMonitor::from_state(TrigunaConfig::default(), snapshot);
        assert_eq!(restored.dominant(), monitor.dominant());
        assert_eq!(restored.history().len(), monitor.history().len());
    }

    #[test]
    fn history_truncates_to_configured_cap() {
        let mut config = TrigunaConfig::default();
        config.max_history = 3;
        let mut monitor = TrigunaMonitor::new(config);
        for i in 0..10 {
            monitor.update(&healthy(), i);
        }
        assert_eq!(monitor.history().len(), 3);
    }

    #[test]
    fn trend_with_fewer_than_two_snapshots_is_stable() {
        let monitor = TrigunaMonitor::new(TrigunaConfig::default());
        assert_eq!(monitor.trend(Guna::Sattva), Trend::Stable);
    }

    #[test]
    fn trend_rises_under_sustained_healthy_observations() {
        let mut monitor = TrigunaMonitor::new(TrigunaConfig::default());
        for i in 0..8 {
            monitor.update(&healthy(), i);
        }
        assert_eq!(monitor.trend(Guna::Sattva), Trend::Rising);
    }
}
