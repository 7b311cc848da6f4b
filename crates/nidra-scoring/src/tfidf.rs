//! TF-IDF scoring over a document set.

use crate::tokenizer::tokenize;
use std::collections::{HashMap, HashSet};

/// Score every document (already-tokenized) in the set. Index-aligned
/// with the input slice. Empty documents score 0.
pub fn tfidf_scores(documents: &[Vec<String>]) -> Vec<f64> {
    let n = documents.len();
    if n == 0 {
        return Vec::new();
    }

    let mut df: HashMap<&str, usize> = HashMap::new();
    for doc in documents {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for term in unique {
            *df.entry(term).or_insert(0) += 1;
        }
    }

    documents
        .iter()
        .map(|doc| {
            if doc.is_empty() {
                return 0.0;
            }
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for term in doc {
                *counts.entry(term.as_str()).or_insert(0) += 1;
            }
            let len = doc.len() as f64;
            let sum: f64 = counts
                .iter()
                .map(|(term, count)| {
                    let doc_freq = df.get(term).copied().unwrap_or(1) as f64;
                    (*count as f64) * (n as f64 / doc_freq).ln()
                })
                .sum();
            sum / (len * len)
        })
        .collect()
}

/// Convenience: tokenize raw text documents and score them.
pub fn tfidf_scores_text(texts: &[&str]) -> Vec<f64> {
    let docs: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();
    tfidf_scores(&docs)
}
