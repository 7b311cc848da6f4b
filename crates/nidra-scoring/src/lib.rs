//! Pure, deterministic scoring primitives shared by the context compactor:
//! tokenizer, TF-IDF, TextRank, MinHash, Shannon surprisal, normalization.
//!
//! Nothing here performs I/O or depends on wall-clock time — identical
//! inputs always produce identical outputs.

pub mod minhash;
pub mod normalize;
pub mod surprisal;
pub mod textrank;
pub mod tfidf;
pub mod tokenizer;

pub use minhash::{jaccard_estimate, signature, Signature};
pub use normalize::{min_max_normalize, min_max_normalize_slice};
pub use surprisal::surprisal_scores;
pub use textrank::textrank_scores;
pub use tfidf::{tfidf_scores, tfidf_scores_text};
pub use tokenizer::tokenize;
