//! Softmax closure and simplex clamping.

/// Numerically stable softmax over 3 logits, subtracting the max before
/// exponentiating. All-zero input yields `(1/3, 1/3, 1/3)`.
pub fn softmax_closure(logits: [f64; 3]) -> [f64; 3] {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps = [
        (logits[0] - max).exp(),
        (logits[1] - max).exp(),
        (logits[2] - max).exp(),
    ];
    let sum: f64 = exps.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        return [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0];
    }
    [exps[0] / sum, exps[1] / sum, exps[2] / sum]
}

/// Raise every coordinate to at least `floor`, then renormalize onto the
/// simplex. Fails closed (returns the uniform distribution) rather than
/// panicking when the input sum is non-positive.
pub fn clamp_to_simplex(x: [f64; 3], floor: f64) -> [f64; 3] {
    let raised = [x[0].max(floor), x[1].max(floor), x[2].max(floor)];
    let sum: f64 = raised.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        return [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0];
    }
    [raised[0] / sum, raised[1] / sum, raised[2] / sum]
}
