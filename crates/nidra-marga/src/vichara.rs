//! Complexity classifier: `trivial|simple|medium|complex|expert`.

use crate::types::Complexity;

const COMPLEX_MARKERS: &[&str] =
    &["architecture", "algorithm", "prove", "optimize", "distributed", "concurrency", "design a"];
const EXPERT_MARKERS: &[&str] =
    &["prove correctness", "formal proof", "novel algorithm", "research-level", "from first principles"];

pub struct VicharaResult {
    pub complexity: Complexity,
    pub confidence: f64,
}

/// Heuristic over message length and marker vocabulary. Longer, jargon-dense
/// requests skew toward higher complexity; short requests default trivial.
pub fn classify(message: &str) -> VicharaResult {
    let lower = message.to_lowercase();
    let word_count = lower.split_whitespace().count();

    let expert_hits = EXPERT_MARKERS.iter().filter(|m| lower.contains(*m)).count();
    let complex_hits = COMPLEX_MARKERS.iter().filter(|m| lower.contains(*m)).count();

    let (base, confidence) = if expert_hits > 0 {
        (Complexity::Expert, 0.9)
    } else if complex_hits > 0 || word_count > 120 {
        (Complexity::Complex, 0.75)
    } else if word_count > 40 {
        (Complexity::Medium, 0.7)
    } else if word_count > 8 {
        (Complexity::Simple, 0.65)
    } else {
        (Complexity::Trivial, 0.6)
    };

    VicharaResult { complexity: base, confidence }
}

/// Certain task types carry a floor: the classifier's raw estimate is
/// raised, never lowered.
pub fn apply_minimum_override(
    complexity: Complexity,
    task_type: crate::types::TaskType,
) -> Complexity {
    use crate::types::TaskType;
    let floor = match task_type {
        TaskType::Reasoning => Some(Complexity::Complex),
        TaskType::Vision => Some(Complexity::Medium),
        _ => None,
    };
    match floor {
        Some(f) if f > complexity => f,
        _ => complexity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskType;

    #[test]
    fn short_message_is_trivial() {
        let r = classify("hi");
        assert_eq!(r.complexity, Complexity::Trivial);
    }

    #[test]
    fn expert_markers_win() {
        let r = classify("please give me a formal proof of this theorem");
        assert_eq!(r.complexity, Complexity::Expert);
    }

    #[test]
    fn reasoning_floor_raises_trivial_to_complex() {
        let c = apply_minimum_override(Complexity::Trivial, TaskType::Reasoning);
        assert_eq!(c, Complexity::Complex);
    }

    #[test]
    fn floor_never_lowers_an_already_higher_estimate() {
        let c = apply_minimum_override(Complexity::Expert, TaskType::Reasoning);
        assert_eq!(c, Complexity::Expert);
    }
}
