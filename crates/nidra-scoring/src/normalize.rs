//! Min-max normalization over a score map.

use std::collections::HashMap;
use std::hash::Hash;

/// Normalize scores to `[0,1]`. If every score is equal (zero range),
/// every output becomes `0.5` rather than dividing by zero.
pub fn min_max_normalize<K: Eq + Hash + Clone>(scores: &HashMap<K, f64>) -> HashMap<K, f64> {
    if scores.is_empty() {
        return HashMap::new();
    }
    let min = scores.values().cloned().fold(f64::INFINITY, f64::min);
    let max = scores.values().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    scores
        .iter()
        .map(|(k, v)| {
            let normalized = if range.abs() < f64::EPSILON { 0.5 } else { (v - min) / range };
            (k.clone(), normalized)
        })
        .collect()
}

/// Same operation over a plain slice, preserving index order — convenient
/// for the compactor, which works with parallel score vectors rather than
/// keyed maps.
pub fn min_max_normalize_slice(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    let min = scores.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    scores
        .iter()
        .map(|v| if range.abs() < f64::EPSILON { 0.5 } else { (v - min) / range })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_range_yields_one_half() {
        let scores = vec![3.0, 3.0, 3.0];
        assert_eq!(min_max_normalize_slice(&scores), vec![0.5, 0.5, 0.5]);
    }

    #[test]
    fn min_maps_to_zero_and_max_to_one() {
        let scores = vec![1.0, 5.0, 3.0];
        let out = min_max_normalize_slice(&scores);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 1.0);
    }

    #[test]
    fn empty_map_yields_empty_map() {
        let scores: HashMap<&str, f64> = HashMap::new();
        assert!(min_max_normalize(&scores).is_empty());
    }
}
