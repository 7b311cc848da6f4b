//! Configuration for the budget-aware contextual router.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TuriyaConfig {
    /// Target average cost per decision; `recordOutcome` nudges `lambda`
    /// to track this.
    pub budget_target: f64,
    pub lambda_learning_rate: f64,
    pub lambda_max: f64,
    pub default_cascade_threshold: f64,
}

impl Default for TuriyaConfig {
    fn default() -> Self {
        Self {
            budget_target: 2.0,
            lambda_learning_rate: 0.05,
            lambda_max: 10.0,
            default_cascade_threshold: 0.6,
        }
    }
}
