//! TextRank-driven pruning down to a token budget, used by the moderate
//! tier after MinHash deduplication.

use std::collections::HashSet;

use nidra_core::{Message, TokenEstimator};
use nidra_scoring::{textrank_scores, tokenize};

use crate::protect::protected_with_first;

/// Drop the lowest-TextRank-scoring, unprotected messages until the
/// remaining set fits `target_tokens`, or nothing more can be dropped.
pub fn textrank_prune(messages: &[Message], estimator: &dyn TokenEstimator, target_tokens: usize) -> Vec<Message> {
    if messages.is_empty() {
        return Vec::new();
    }

    let protected = protected_with_first(messages);
    let docs: Vec<Vec<String>> = messages.iter().map(|m| tokenize(&m.as_text())).collect();
    let scores = textrank_scores(&docs);

    let mut prunable: Vec<usize> = (0..messages.len()).filter(|i| !protected.contains(i)).collect();
    prunable.sort_by(|a, b| scores[*a].partial_cmp(&scores[*b]).unwrap_or(std::cmp::Ordering::Equal));

    let mut kept: HashSet<usize> = (0..messages.len()).collect();
    let mut total: usize = messages.iter().map(|m| estimator.estimate(m)).sum();

    for idx in prunable {
        if total <= target_tokens {
            break;
        }
        kept.remove(&idx);
        total -= estimator.estimate(&messages[idx]);
    }

    let mut result: Vec<usize> = kept.into_iter().collect();
    result.sort_unstable();
    result.into_iter().map(|i| messages[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nidra_core::{CharsPerTokenEstimator, Role};

    #[test]
    fn prunes_down_to_budget_while_keeping_protected_messages() {
        let mut messages = vec![Message::new("sys", Role::System, 0).with_text("system rules")];
        for i in 0..10 {
            messages.push(Message::new(format!("m{i}"), Role::User, i).with_text(&"padding text ".repeat(20)));
        }
        let estimator = CharsPerTokenEstimator::new(10_000);
        let total_before: usize = messages.iter().map(|m| estimator.estimate(m)).sum();
        let target = total_before / 3;

        let pruned = textrank_prune(&messages, &estimator, target);
        let total_after: usize = pruned.iter().map(|m| estimator.estimate(m)).sum();

        assert!(total_after <= total_before);
        assert!(pruned.iter().any(|m| m.id == "sys"));
        assert!(pruned.iter().any(|m| m.id == "m9")); // protected tail
    }

    #[test]
    fn never_drops_below_the_protected_set_even_if_over_budget() {
        let messages = vec![
            Message::new("sys", Role::System, 0).with_text("system"),
            Message::new("a", Role::User, 1).with_text("a"),
            Message::new("b", Role::Assistant, 2).with_text("b"),
        ];
        let estimator = CharsPerTokenEstimator::new(1);
        let pruned = textrank_prune(&messages, &estimator, 0);
        assert_eq!(pruned.len(), 3); // system + first + last two == everything here
    }
}
