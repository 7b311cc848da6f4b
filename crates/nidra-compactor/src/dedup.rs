//! MinHash-based near-duplicate collapsing, shared by the moderate and
//! aggressive tiers with opposite keep policies.

use nidra_core::Message;
use nidra_scoring::{jaccard_estimate, signature, tokenize, Signature};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DedupKeep {
    /// Moderate tier: keep the longest message in each cluster, stable by
    /// timestamp on ties (messages are processed in arrival order, so the
    /// earlier one stays put unless strictly shorter).
    Longest,
    /// Aggressive tier: keep the most recent message even if it is a
    /// near-duplicate of an earlier one.
    MostRecent,
}

/// Collapse messages whose MinHash-estimated Jaccard similarity is at or
/// above `threshold` into a single representative per cluster.
pub fn dedup_near_duplicates(messages: &[Message], threshold: f64, keep: DedupKeep) -> Vec<Message> {
    let mut kept: Vec<(usize, Signature)> = Vec::new();

    for (i, message) in messages.iter().enumerate() {
        let sig = signature(&tokenize(&message.as_text()));
        let cluster = kept.iter().position(|(_, existing)| jaccard_estimate(&sig, existing) >= threshold);

        match cluster {
            None => kept.push((i, sig)),
            Some(pos) => {
                let existing_idx = kept[pos].0;
                let replace = match keep {
                    DedupKeep::Longest => message.as_text().len() > messages[existing_idx].as_text().len(),
                    DedupKeep::MostRecent => message.timestamp_ms >= messages[existing_idx].timestamp_ms,
                };
                if replace {
                    kept[pos] = (i, sig);
                }
            }
        }
    }

    let mut indices: Vec<usize> = kept.into_iter().map(|(i, _)| i).collect();
    indices.sort_unstable();
    indices.into_iter().map(|i| messages[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nidra_core::Role;

    fn msg(id: &str, text: &str, ts: i64) -> Message {
        Message::new(id, Role::User, ts).with_text(text)
    }

    #[test]
    fn near_duplicate_cluster_keeps_the_longest_under_longest_policy() {
        let messages = vec![
            msg("a", "the quick brown fox jumps over the lazy dog", 0),
            msg("b", "the quick brown fox jumps over the lazy dog and then some more extra words here", 1),
        ];
        let result = dedup_near_duplicates(&messages, 0.5, DedupKeep::Longest);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "b");
    }

    #[test]
    fn near_duplicate_cluster_keeps_the_most_recent_under_recency_policy() {
        let messages = vec![
            msg("a", "the quick brown fox jumps over the lazy dog and then some more extra words here", 0),
            msg("b", "the quick brown fox jumps over the lazy dog", 1),
        ];
        let result = dedup_near_duplicates(&messages, 0.5, DedupKeep::MostRecent);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "b");
    }

    #[test]
    fn dissimilar_messages_are_all_kept() {
        let messages = vec![
            msg("a", "weather patterns across the pacific northwest", 0),
            msg("b", "quarterly revenue growth exceeded analyst expectations", 1),
        ];
        let result = dedup_near_duplicates(&messages, 0.6, DedupKeep::Longest);
        assert_eq!(result.len(), 2);
    }
}
