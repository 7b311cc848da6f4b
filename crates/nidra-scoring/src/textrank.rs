//! TextRank (weighted PageRank over a token-similarity graph).

use std::collections::HashSet;

const DAMPING: f64 = 0.85;
const MAX_ITERATIONS: usize = 50;
const CONVERGENCE_EPS: f64 = 1e-6;

fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Raw (unnormalized) PageRank vector — sums to 1 (within tolerance) once
/// converged, per the graph's probability-mass conservation.
fn textrank_raw_ranks(documents: &[Vec<String>]) -> Vec<f64> {
    let n = documents.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![1.0];
    }

    let sets: Vec<HashSet<&str>> = documents.iter().map(|d| d.iter().map(String::as_str).collect()).collect();

    let mut weights = vec![vec![0.0_f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let w = jaccard(&sets[i], &sets[j]);
            weights[i][j] = w;
            weights[j][i] = w;
        }
    }

    let out_strength: Vec<f64> = (0..n).map(|j| weights[j].iter().sum()).collect();

    let mut ranks = vec![1.0 / n as f64; n];
    for _ in 0..MAX_ITERATIONS {
        let mut next = vec![(1.0 - DAMPING) / n as f64; n];
        for i in 0..n {
            let mut acc = 0.0;
            for j in 0..n {
                if j == i || out_strength[j] <= 0.0 {
                    continue;
                }
                acc += (weights[i][j] / out_strength[j]) * ranks[j];
            }
            next[i] += DAMPING * acc;
        }
        let delta = next
            .iter()
            .zip(ranks.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        ranks = next;
        if delta < CONVERGENCE_EPS {
            break;
        }
    }
    ranks
}

/// Normalized TextRank scores: divides the converged rank vector by its
/// maximum so the top-ranked document scores exactly 1.
pub fn textrank_scores(documents: &[Vec<String>]) -> Vec<f64> {
    let ranks = textrank_raw_ranks(documents);
    let max_rank = ranks.iter().cloned().fold(0.0_f64, f64::max);
    if max_rank <= 0.0 {
        return ranks;
    }
    ranks.iter().map(|r| r / max_rank).collect()
}
