//! Information-theoretic context compactor: bounds context-window usage
//! by applying at most one progressively lossier tier per call.
//!
//! Pure with respect to its inputs — `compact` returns a new message
//! sequence and never mutates the one it was given.

pub mod abbreviate;
pub mod dedup;
pub mod protect;
pub mod prune;
pub mod select;
pub mod tier;

pub use abbreviate::abbreviate_tool_details;
pub use dedup::{dedup_near_duplicates, DedupKeep};
pub use prune::textrank_prune;
pub use select::greedy_composite_select;
pub use tier::{select_tier, CompactionTier, CompactorConfig};

use nidra_core::{Message, TokenEstimator};

/// Usage-driven dispatch: reads current usage, picks at most one tier,
/// and applies it. Downgrading (applying a lighter tier than last call)
/// is implicit — usage is always re-evaluated from scratch.
pub fn compact(messages: &[Message], estimator: &dyn TokenEstimator, config: &CompactorConfig) -> Vec<Message> {
    if messages.is_empty() {
        return Vec::new();
    }

    let limit = estimator.context_limit();
    let total: usize = messages.iter().map(|m| estimator.estimate(m)).sum();
    let usage = if limit == 0 { 1.0 } else { total as f64 / limit as f64 };

    let tier = select_tier(usage, config);
    tracing::info!(usage, ?tier, "compaction tier selected");

    match tier {
        CompactionTier::Untouched => messages.to_vec(),
        CompactionTier::Gentle => abbreviate_tool_details(messages),
        CompactionTier::Moderate => {
            let deduped = dedup_near_duplicates(messages, config.dedup_jaccard_threshold, DedupKeep::Longest);
            let target = (limit as f64 * config.moderate_target_fraction) as usize;
            textrank_prune(&deduped, estimator, target)
        }
        CompactionTier::Aggressive => {
            let deduped = dedup_near_duplicates(messages, config.dedup_jaccard_threshold, DedupKeep::MostRecent);
            let collapsed = abbreviate_tool_details(&deduped);
            let target = (limit as f64 * config.aggressive_target_fraction) as usize;
            greedy_composite_select(&collapsed, estimator, target)
        }
    }
}
