//! Turiya: a budget-aware contextual router layered on top of the four
//! fixed tiers. Mutation is serialized behind a single lock per
//! instance, so concurrent callers observe `recordOutcome` as a single
//! atomic critical section.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::arm::ArmStats;
use super::config::TuriyaConfig;
use super::context::DecisionContext;
use super::tier::{Tier, TIERS};

#[derive(Clone, Copy, Debug)]
pub struct TuriyaClassification {
    pub tier: Tier,
    pub confidence: f64,
    pub cost_estimate: f64,
    pub arm_index: usize,
    pub rationale: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct CascadeResult {
    pub final_tier: Tier,
    pub escalated: bool,
    pub original_tier: Tier,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TuriyaState {
    pub arms: [ArmStats; 4],
    pub lambda: f64,
    pub total_cost: f64,
    pub total_count: u64,
}

impl Default for TuriyaState {
    fn default() -> Self {
        Self { arms: [ArmStats::default(); 4], lambda: 0.0, total_cost: 0.0, total_count: 0 }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TierStat {
    pub tier: Tier,
    pub count: u64,
    pub average_reward: f64,
    pub total_cost: f64,
}

#[derive(Clone, Debug)]
pub struct TuriyaStats {
    pub total_decisions: u64,
    pub per_tier: Vec<TierStat>,
    pub total_cost: f64,
    pub opus_baseline_cost: f64,
    pub savings_percent: f64,
}

pub struct TuriyaRouter {
    config: TuriyaConfig,
    state: Mutex<TuriyaState>,
}

impl TuriyaRouter {
    pub fn new(config: TuriyaConfig) -> Self {
        Self { config, state: Mutex::new(TuriyaState::default()) }
    }

    pub fn from_state(config: TuriyaConfig, state: TuriyaState) -> Self {
        Self { config, state: Mutex::new(state) }
    }

    pub fn serialize(&self) -> TuriyaState {
        self.state.lock().unwrap().clone()
    }

    /// Synchronous and non-yielding: a contextual-bandit tier pick over
    /// a prior derived from `context`, nudged by each tier's running
    /// average reward and the current budget Lagrangian `lambda`.
    pub fn classify(&self, context: DecisionContext, preference: Option<Tier>) -> TuriyaClassification {
        let raw_score = 0.30 * context.complexity
            + 0.20 * context.precision
            + 0.15 * context.creativity
            + 0.20 * context.conversation_depth
            + 0.10 * context.code_ratio
            + 0.05 * context.memory_load;

        let prior_tier = preference.unwrap_or_else(|| tier_from_score(raw_score));

        let state = self.state.lock().unwrap();
        let candidates = neighbor_candidates(prior_tier);
        let mut best = prior_tier;
        let mut best_utility = f64::NEG_INFINITY;
        for tier in candidates {
            let arm = &state.arms[tier.index()];
            let prior_reward = if arm.count == 0 { tier_prior_reward(tier, raw_score) } else { arm.average_reward() };
            let utility = prior_reward - state.lambda * (tier.unit_cost() / Tier::Opus.unit_cost());
            if utility > best_utility {
                best_utility = utility;
                best = tier;
            }
        }
        drop(state);

        let confidence = confidence_for(raw_score, best);
        TuriyaClassification {
            tier: best,
            confidence,
            cost_estimate: best.unit_cost(),
            arm_index: best.index(),
            rationale: rationale_for(best, raw_score),
        }
    }

    /// One-step escalation when confidence falls below `threshold`
    /// (or the configured default).
    pub fn cascade_decision(&self, decision: TuriyaClassification, threshold: Option<f64>) -> CascadeResult {
        let threshold = threshold.unwrap_or(self.config.default_cascade_threshold);
        match decision.tier.next() {
            Some(next) if decision.confidence < threshold => {
                CascadeResult { final_tier: next, escalated: true, original_tier: decision.tier }
            }
            _ => CascadeResult { final_tier: decision.tier, escalated: false, original_tier: decision.tier },
        }
    }

    /// Updates arm statistics and the budget Lagrangian. Concurrent
    /// calls on the same instance are serialized by the state lock, so
    /// they produce the same cumulative statistics as any serialized
    /// ordering.
    pub fn record_outcome(&self, decision: TuriyaClassification, reward: f64) {
        let mut state = self.state.lock().unwrap();
        state.arms[decision.arm_index].record(reward.clamp(0.0, 1.0), decision.cost_estimate);
        state.total_cost += decision.cost_estimate;
        state.total_count += 1;

        let avg_cost = state.total_cost / state.total_count as f64;
        let error = avg_cost - self.config.budget_target;
        state.lambda = (state.lambda + self.config.lambda_learning_rate * error).clamp(0.0, self.config.lambda_max);
    }

    pub fn get_stats(&self) -> TuriyaStats {
        let state = self.state.lock().unwrap();
        let per_tier: Vec<TierStat> = TIERS
            .iter()
            .map(|&tier| {
                let arm = &state.arms[tier.index()];
                TierStat {
                    tier,
                    count: arm.count,
                    average_reward: arm.average_reward(),
                    total_cost: arm.total_cost,
                }
            })
            .collect();

        let opus_baseline_cost = state.total_count as f64 * Tier::Opus.unit_cost();
        let savings_percent = if opus_baseline_cost > 0.0 {
            ((opus_baseline_cost - state.total_cost) / opus_baseline_cost * 100.0).max(0.0)
        } else {
            0.0
        };

        TuriyaStats {
            total_decisions: state.total_count,
            per_tier,
            total_cost: state.total_cost,
            opus_baseline_cost,
            savings_percent,
        }
    }
}

fn tier_from_score(score: f64) -> Tier {
    if score < 0.25 {
        Tier::NoLlm
    } else if score < 0.5 {
        Tier::Haiku
    } else if score < 0.75 {
        Tier::Sonnet
    } else {
        Tier::Opus
    }
}

fn tier_prior_reward(tier: Tier, raw_score: f64) -> f64 {
    let ideal = tier_from_score(raw_score);
    let distance = (tier.index() as i32 - ideal.index() as i32).unsigned_abs() as f64;
    (0.75 - 0.2 * distance).max(0.1)
}

fn neighbor_candidates(prior: Tier) -> Vec<Tier> {
    let mut candidates = vec![prior];
    if let Some(lower_index) = prior.index().checked_sub(1) {
        candidates.push(TIERS[lower_index]);
    }
    if let Some(next) = prior.next() {
        candidates.push(next);
    }
    candidates
}

fn confidence_for(raw_score: f64, chosen: Tier) -> f64 {
    let ideal = tier_from_score(raw_score);
    let distance = (chosen.index() as i32 - ideal.index() as i32).unsigned_abs() as f64;
    (1.0 - 0.2 * distance).clamp(0.0, 1.0)
}

fn rationale_for(tier: Tier, raw_score: f64) -> &'static str {
    match tier {
        Tier::NoLlm => "context score below the no-llm threshold",
        Tier::Haiku if raw_score < 0.5 => "low-complexity context routed to the cheapest live tier",
        Tier::Sonnet => "moderate-complexity context",
        Tier::Opus => "high-complexity context escalated to the top tier",
        _ => "budget-adjusted tier selection",
    }
}
