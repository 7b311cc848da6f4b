//! Shannon surprisal per message, against a Laplace-smoothed global
//! unigram model built over the whole document set.

use std::collections::HashMap;

/// Mean `-log2 p(t)` over each document's tokens. Empty documents score 0.
pub fn surprisal_scores(documents: &[Vec<String>]) -> Vec<f64> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut total_tokens = 0usize;
    for doc in documents {
        for token in doc {
            *counts.entry(token.as_str()).or_insert(0) += 1;
            total_tokens += 1;
        }
    }
    let vocab_size = counts.len() as f64;

    documents
        .iter()
        .map(|doc| {
            if doc.is_empty() {
                return 0.0;
            }
            let sum: f64 = doc
                .iter()
                .map(|token| {
                    let count = counts.get(token.as_str()).copied().unwrap_or(0) as f64;
                    let p = (count + 1.0) / (total_tokens as f64 + vocab_size);
                    -p.log2()
                })
                .sum();
            sum / doc.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn empty_document_scores_zero() {
        let docs = vec![doc(&["a", "bb"]), vec![]];
        let scores = surprisal_scores(&docs);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn rare_tokens_score_higher_than_frequent_ones() {
        let docs = vec![
            doc(&["common"]),
            doc(&["common"]),
            doc(&["common"]),
            doc(&["rare"]),
        ];
        let scores = surprisal_scores(&docs);
        assert!(scores[3] > scores[0]);
    }

    #[test]
    fn all_scores_are_nonnegative() {
        let docs = vec![doc(&["alpha", "beta"]), doc(&["beta", "gamma"])];
        for s in surprisal_scores(&docs) {
            assert!(s >= 0.0);
        }
    }
}
