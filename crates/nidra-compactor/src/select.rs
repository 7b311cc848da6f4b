//! Aggressive-tier full rewrite: composite scoring plus greedy
//! budget-constrained inclusion.

use nidra_core::{Message, TokenEstimator};
use nidra_scoring::{min_max_normalize_slice, surprisal_scores, textrank_scores, tfidf_scores, tokenize};

use crate::protect::protected_tail_only;

const TFIDF_WEIGHT: f64 = 0.30;
const TEXTRANK_WEIGHT: f64 = 0.35;
const SURPRISAL_WEIGHT: f64 = 0.35;

/// Score every message by the composite formula, then greedily add
/// unprotected candidates in descending score order while they still fit
/// the budget (a later, cheaper candidate can fill a gap a former,
/// costlier one left behind).
pub fn greedy_composite_select(messages: &[Message], estimator: &dyn TokenEstimator, target_tokens: usize) -> Vec<Message> {
    if messages.is_empty() {
        return Vec::new();
    }

    let docs: Vec<Vec<String>> = messages.iter().map(|m| tokenize(&m.as_text())).collect();
    let tfidf = min_max_normalize_slice(&tfidf_scores(&docs));
    let textrank = min_max_normalize_slice(&textrank_scores(&docs));
    let surprisal = min_max_normalize_slice(&surprisal_scores(&docs));
    let composite: Vec<f64> =
        (0..messages.len()).map(|i| TFIDF_WEIGHT * tfidf[i] + TEXTRANK_WEIGHT * textrank[i] + SURPRISAL_WEIGHT * surprisal[i]).collect();

    let protected = protected_tail_only(messages);
    let mut kept = protected.clone();
    let mut total: usize = kept.iter().map(|&i| estimator.estimate(&messages[i])).sum();

    let mut candidates: Vec<usize> = (0..messages.len()).filter(|i| !protected.contains(i)).collect();
    candidates.sort_by(|a, b| composite[*b].partial_cmp(&composite[*a]).unwrap_or(std::cmp::Ordering::Equal));

    for idx in candidates {
        let cost = estimator.estimate(&messages[idx]);
        if total + cost > target_tokens {
            continue;
        }
        kept.insert(idx);
        total += cost;
    }

    let mut result: Vec<usize> = kept.into_iter().collect();
    result.sort_unstable();
    result.into_iter().map(|i| messages[i].clone()).collect()
}
