//! Tier selection: usage as a fraction of the context limit picks at most
//! one compaction tier per invocation.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompactionTier {
    Untouched,
    Gentle,
    Moderate,
    Aggressive,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactorConfig {
    pub gentle_threshold: f64,
    pub moderate_threshold: f64,
    pub aggressive_threshold: f64,
    pub moderate_target_fraction: f64,
    pub aggressive_target_fraction: f64,
    pub dedup_jaccard_threshold: f64,
}

impl Default for CompactorConfig {
    fn default() -> Self {
        Self {
            gentle_threshold: 0.60,
            moderate_threshold: 0.75,
            aggressive_threshold: 0.90,
            moderate_target_fraction: 0.5,
            aggressive_target_fraction: 0.4,
            dedup_jaccard_threshold: 0.6,
        }
    }
}

/// At usage exactly equal to a threshold the tier it names is selected
/// (e.g. `usage == 0.60` selects gentle, not untouched).
pub fn select_tier(usage: f64, config: &CompactorConfig) -> CompactionTier {
    if usage >= config.aggressive_threshold {
        CompactionTier::Aggressive
    } else if usage >= config.moderate_threshold {
        CompactionTier::Moderate
    } else if usage >= config.gentle_threshold {
        CompactionTier::Gentle
    } else {
        CompactionTier::Untouched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_usage_selects_the_named_tier_not_the_lower_one() {
        let config = CompactorConfig::default();
        assert_eq!(select_tier(0.60, &config), CompactionTier::Gentle);
        assert_eq!(select_tier(0.599, &config), CompactionTier::Untouched);
        assert_eq!(select_tier(0.75, &config), CompactionTier::Moderate);
        assert_eq!(select_tier(0.90, &config), CompactionTier::Aggressive);
    }
}
