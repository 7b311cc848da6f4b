//! Cross-module scoring scenarios.

use nidra_scoring::*;

#[test]
fn composite_pipeline_tokenize_tfidf_textrank_surprisal() {
    let texts = [
        "the quick brown fox jumps over the lazy dog",
        "the quick brown fox runs fast",
        "completely unrelated content about weather patterns",
    ];
    let docs: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();

    let tfidf = tfidf_scores(&docs);
    let textrank = textrank_scores(&docs);
    let surprisal = surprisal_scores(&docs);

    assert_eq!(tfidf.len(), 3);
    assert_eq!(textrank.len(), 3);
    assert_eq!(surprisal.len(), 3);

    // the two fox documents are near-duplicates and should textrank-rank
    // each other higher than the unrelated weather document.
    assert!(textrank[0] > 0.0 && textrank[1] > 0.0);
}

#[test]
fn minhash_dedup_catches_near_duplicates() {
    let a = tokenize("the quick brown fox jumps over the lazy dog");
    let b = tokenize("the quick brown fox jumps over a lazy dog");
    let c = tokenize("stock markets rallied on news of falling interest rates");

    let sig_a = signature(&a);
    let sig_b = signature(&b);
    let sig_c = signature(&c);

    assert!(jaccard_estimate(&sig_a, &sig_b) > jaccard_estimate(&sig_a, &sig_c));
}

#[test]
fn normalized_scores_stay_within_unit_interval() {
    let scores = vec![0.1, 5.5, 2.3, 0.1];
    let normalized = min_max_normalize_slice(&scores);
    for s in normalized {
        assert!((0.0..=1.0).contains(&s));
    }
}
