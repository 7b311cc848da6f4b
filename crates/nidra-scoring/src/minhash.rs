//! MinHash signatures over token sets, for near-duplicate detection.
//!
//! Deterministic: the 64 hash-function parameters are derived from a
//! fixed seeded LCG (`seed=42`), never from the process RNG, so the
//! same input always produces the same signature.

use std::collections::HashSet;

const NUM_HASHES: usize = 64;
const LCG_SEED: u64 = 42;
const LCG_MULTIPLIER: u64 = 1_103_515_245;
const LCG_INCREMENT: u64 = 12_345;
const LCG_MODULUS: u64 = 1 << 31;
const MERSENNE_PRIME: u64 = (1 << 31) - 1;

pub type Signature = [u64; NUM_HASHES];

fn lcg_next(state: u64) -> u64 {
    (state.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT)) % LCG_MODULUS
}

/// `(a_k, b_k)` pairs for all 64 hash functions, generated once from the
/// fixed seed.
fn hash_params() -> [(u64, u64); NUM_HASHES] {
    let mut params = [(0u64, 0u64); NUM_HASHES];
    let mut state = LCG_SEED;
    for slot in params.iter_mut() {
        state = lcg_next(state);
        let a = state;
        state = lcg_next(state);
        let b = state;
        *slot = (a, b);
    }
    params
}

/// Rolling hash of a single token: `h = (h << 5) - h + c`, taken mod 2^32
/// via `u32` wraparound arithmetic.
fn token_hash(token: &str) -> u32 {
    let mut h: u32 = 0;
    for c in token.chars() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(c as u32);
    }
    h
}

/// Compute the 64-cell MinHash signature of a token set.
pub fn signature(tokens: &[String]) -> Signature {
    let params = hash_params();
    let mut sig = [u64::MAX; NUM_HASHES];

    let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    if unique.is_empty() {
        return [0; NUM_HASHES];
    }

    for token in &unique {
        let h = token_hash(token) as u64;
        for (k, &(a, b)) in params.iter().enumerate() {
            let value = (a.wrapping_mul(h).wrapping_add(b)) % MERSENNE_PRIME;
            if value < sig[k] {
                sig[k] = value;
            }
        }
    }
    sig
}

/// Estimated Jaccard similarity: fraction of matching signature cells.
pub fn jaccard_estimate(a: &Signature, b: &Signature) -> f64 {
    let matches = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    matches as f64 / NUM_HASHES as f64
}

#[cfg(test)]
fn true_jaccard(a: &[String], b: &[String]) -> f64 {
    let sa: HashSet<&str> = a.iter().map(String::as_str).collect();
    let sb: HashSet<&str> = b.iter().map(String::as_str).collect();
    if sa.is_empty() && sb.is_empty() {
        return 1.0;
    }
    let inter = sa.intersection(&sb).count();
    let union = sa.union(&sb).count();
    if union == 0 {
        0.0
    } else {
        inter as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_token_sets_are_fully_similar() {
        let tokens = vec!["alpha".to_string(), "bravo".to_string(), "charlie".to_string()];
        let sig = signature(&tokens);
        assert_eq!(jaccard_estimate(&sig, &sig), 1.0);
    }

    #[test]
    fn disjoint_token_sets_usually_disagree() {
        let a = vec!["alpha".to_string(), "bravo".to_string()];
        let b = vec!["zulu".to_string(), "yankee".to_string()];
        let sim = jaccard_estimate(&signature(&a), &signature(&b));
        assert!(sim < 0.5, "disjoint sets scored {sim}");
    }

    #[test]
    fn estimate_is_deterministic_across_calls() {
        let tokens = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        let sig1 = signature(&tokens);
        let sig2 = signature(&tokens);
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn empty_token_set_has_a_well_defined_signature() {
        let sig = signature(&[]);
        assert_eq!(jaccard_estimate(&sig, &sig), 1.0);
    }

    #[test]
    fn minhash_approximates_true_jaccard_within_expected_error() {
        // Generate several overlapping sets and check the estimate tracks
        // the exact Jaccard similarity within 1/sqrt(num_hashes) = 0.125,
        // the theoretical error bound for this many hash functions.
        let base: Vec<String> = (0..40).map(|i| format!("tok{i}")).collect();
        let variants: Vec<Vec<String>> = (0..5)
            .map(|shift| base.iter().skip(shift * 4).cloned().collect::<Vec<_>>())
            .collect();

        let tolerance = 1.0 / (NUM_HASHES as f64).sqrt();
        for i in 0..variants.len() {
            for j in (i + 1)..variants.len() {
                let exact = true_jaccard(&variants[i], &variants[j]);
                let estimate = jaccard_estimate(&signature(&variants[i]), &signature(&variants[j]));
                assert!(
                    (exact - estimate).abs() <= tolerance + 0.05,
                    "exact={exact} estimate={estimate}"
                );
            }
        }
    }
}
