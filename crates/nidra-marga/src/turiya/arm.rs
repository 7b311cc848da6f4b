//! Per-tier bandit statistics: Beta-style success/failure counters plus
//! a running reward average, used to steer `classify`'s tier choice.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ArmStats {
    pub successes: f64,
    pub failures: f64,
    pub reward_sum: f64,
    pub count: u64,
    pub total_cost: f64,
}

impl ArmStats {
    /// Beta-distribution mean; `(1, 1)` prior keeps an untried arm at an
    /// uninformative 0.5 rather than dividing by zero.
    pub fn success_rate(&self) -> f64 {
        (self.successes + 1.0) / (self.successes + self.failures + 2.0)
    }

    pub fn average_reward(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.reward_sum / self.count as f64
        }
    }

    /// `reward >= 0.5` counts as a Beta success; the running average is
    /// always updated regardless of the threshold.
    pub fn record(&mut self, reward: f64, cost: f64) {
        if reward >= 0.5 {
            self.successes += 1.0;
        } else {
            self.failures += 1.0;
        }
        self.reward_sum += reward;
        self.count += 1;
        self.total_cost += cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untried_arm_has_uninformative_success_rate() {
        let arm = ArmStats::default();
        assert_eq!(arm.success_rate(), 0.5);
    }

    #[test]
    fn recording_rewards_moves_the_average() {
        let mut arm = ArmStats::default();
        arm.record(1.0, 5.0);
        arm.record(0.0, 5.0);
        assert_eq!(arm.average_reward(), 0.5);
        assert_eq!(arm.total_cost, 10.0);
        assert_eq!(arm.count, 2);
    }
}
