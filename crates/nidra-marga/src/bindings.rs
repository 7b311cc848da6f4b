//! Binding tables and the fixed cloud model ladder used for escalation.

use crate::types::{BindingStrategy, Complexity, ModelRef, Resolution, TaskType};

pub struct Binding {
    pub provider_id: &'static str,
    pub model_id: &'static str,
    pub rationale: &'static str,
}

/// Weakest to strongest. Escalation chains are always a suffix of this
/// ladder; the ladder itself never changes at runtime.
pub const MODEL_LADDER: &[(&str, &str)] =
    &[("anthropic", "haiku"), ("anthropic", "sonnet"), ("anthropic", "opus")];

const CODING_STRONG: (&str, &str) = ("anthropic", "opus");
const GENERIC_STRONG_COMPLEX: (&str, &str) = ("anthropic", "sonnet");
const TOP_TIER: (&str, &str) = ("anthropic", "opus");

/// Binding lookup: maps (strategy, task type, resolution) to a concrete
/// (provider, model). The task-type classifier alone decides `resolution`
/// (§4.7 step 1); `strategy` only selects which binding table maps the
/// task type onto a provider/model (step 4). Cloud/hybrid default onto
/// the weakest ladder rung; complexity upgrades are applied afterwards
/// by the caller, against the ladder only.
pub fn lookup(strategy: BindingStrategy, task_type: TaskType, resolution: Resolution) -> Binding {
    if resolution == Resolution::ToolOnly {
        return Binding { provider_id: "local", model_id: "tool-exec", rationale: "tool-only path, no model needed" };
    }
    if resolution == Resolution::LocalCompute {
        return Binding {
            provider_id: "local",
            model_id: "heuristic",
            rationale: "resolved locally without invoking an LLM",
        };
    }
    if strategy == BindingStrategy::Local {
        return Binding {
            provider_id: "local",
            model_id: local_model_for(task_type),
            rationale: "local binding strategy: routed to an on-device model",
        };
    }

    match task_type {
        TaskType::CodeGen => Binding { provider_id: "anthropic", model_id: "sonnet", rationale: "code-gen baseline" },
        TaskType::Reasoning => Binding { provider_id: "anthropic", model_id: "sonnet", rationale: "reasoning baseline" },
        TaskType::Vision => Binding { provider_id: "anthropic", model_id: "sonnet", rationale: "vision baseline" },
        _ => Binding { provider_id: "anthropic", model_id: "haiku", rationale: "default cloud baseline" },
    }
}

/// The `local` binding strategy's per-task-type model table. None of
/// these are on [`MODEL_LADDER`], so they never escalate and never
/// receive a complexity upgrade (that only touches in-ladder bindings).
fn local_model_for(task_type: TaskType) -> &'static str {
    match task_type {
        TaskType::CodeGen => "local-code",
        TaskType::Reasoning => "local-reasoning",
        TaskType::Vision => "local-vision",
        _ => "local-chat",
    }
}

/// Replace the bound model with a stronger one once effective complexity
/// crosses `complex`. Code tasks prefer the coding-oriented strong model;
/// everything else gets the generic strong rung. `expert` always lands on
/// the top tier.
pub fn upgrade_for_complexity(
    complexity: Complexity,
    task_type: TaskType,
    current: &Binding,
) -> Option<(&'static str, &'static str, &'static str)> {
    match complexity {
        Complexity::Expert => Some((TOP_TIER.0, TOP_TIER.1, "expert complexity routes to top tier")),
        Complexity::Complex => {
            let (provider, model) =
                if task_type == TaskType::CodeGen { CODING_STRONG } else { GENERIC_STRONG_COMPLEX };
            if model == current.model_id {
                None
            } else {
                Some((
                    provider,
                    model,
                    if task_type == TaskType::CodeGen {
                        "complex code task upgraded to coding-strong model"
                    } else {
                        "complex task upgraded to generic strong model"
                    },
                ))
            }
        }
        _ => None,
    }
}

/// Every ladder entry strictly stronger than `(provider_id, model_id)`.
/// Empty when the model is not on the ladder (e.g. a local-compute or
/// tool-only resolution) or already at the top.
pub fn escalation_chain(provider_id: &str, model_id: &str) -> Vec<ModelRef> {
    let position = MODEL_LADDER.iter().position(|(p, m)| *p == provider_id && *m == model_id);
    match position {
        Some(idx) => MODEL_LADDER[idx + 1..]
            .iter()
            .map(|(p, m)| ModelRef::new(*p, *m))
            .collect(),
        None => Vec::new(),
    }
}
