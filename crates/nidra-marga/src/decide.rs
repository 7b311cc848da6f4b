//! The Marga pipeline: a pure function from request to decision.

use std::time::Instant;

use crate::bindings::{self, escalation_chain, lookup};
use crate::pravritti;
use crate::types::{MargaDecideRequest, MargaDecision, Resolution, TaskType, DECISION_VERSION};
use crate::vichara;

const ABSTAIN_SCORE_MARGIN: f64 = 1.0;
const ABSTAIN_CONFIDENCE_CEILING: f64 = 0.67;

/// Never panics or errors: missing optional inputs fall back to documented
/// defaults, and the function always returns a decision.
pub fn decide(request: &MargaDecideRequest) -> MargaDecision {
    let start = Instant::now();

    let task = pravritti::classify(&request.message, request.has_tools, request.has_images);
    let resolution = pravritti::resolution_for(task.task_type, &request.message);

    let vichara_result = vichara::classify(&request.message);
    let complexity = vichara::apply_minimum_override(vichara_result.complexity, task.task_type);

    let skip_llm = resolution != Resolution::Llm;

    let mut binding = lookup(request.binding_strategy, task.task_type, resolution);
    let mut rationale = binding.rationale.to_string();

    // Complexity upgrades walk the cloud model ladder; a binding the
    // `local` strategy already routed on-device never has one to climb.
    if resolution == Resolution::Llm && binding.provider_id == "anthropic" {
        if let Some((provider, model, why)) =
            bindings::upgrade_for_complexity(complexity, task.task_type, &binding)
        {
            binding.provider_id = provider;
            binding.model_id = model;
            rationale = why.to_string();
        }
    }

    let chain = escalation_chain(binding.provider_id, binding.model_id);

    let confidence = (task.confidence * vichara_result.confidence).sqrt().clamp(0.0, 1.0);

    let (abstain, abstain_reason) = match task.secondary_task_type {
        Some(_)
            if (task.top_score - task.second_score) <= ABSTAIN_SCORE_MARGIN
                && confidence <= ABSTAIN_CONFIDENCE_CEILING =>
        {
            (true, Some("near_tie_top2".to_string()))
        }
        _ => (false, None),
    };

    let provider_health_hints = request.provider_health.as_ref().and_then(|health| {
        match health.get(binding.provider_id) {
            Some(false) => Some(vec![format!(
                "provider {} reported unhealthy; selection unchanged",
                binding.provider_id
            )]),
            _ => None,
        }
    });

    let temperature = Some(temperature_for(task.task_type));

    let decision_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    MargaDecision {
        decision_version: DECISION_VERSION,
        provider_id: binding.provider_id.to_string(),
        model_id: binding.model_id.to_string(),
        task_type: task.task_type,
        resolution,
        complexity,
        skip_llm,
        escalation_chain: chain,
        rationale,
        confidence,
        decision_time_ms,
        secondary_task_type: task.secondary_task_type,
        checkin_subtype: task.checkin_subtype,
        abstain,
        abstain_reason,
        provider_health_hints,
        temperature,
    }
}

fn temperature_for(task_type: TaskType) -> f64 {
    match task_type {
        TaskType::CodeGen => 0.2,
        TaskType::Reasoning => 0.5,
        TaskType::Chat | TaskType::Smalltalk => 0.7,
        _ => 0.4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BindingStrategy;
    use std::collections::HashMap;

    #[test]
    fn greeting_resolves_locally_and_skips_the_llm() {
        let req = MargaDecideRequest::new("hi there");
        let decision = decide(&req);
        assert!(matches!(decision.task_type, TaskType::Chat | TaskType::Smalltalk));
        assert_eq!(decision.skip_llm, decision.resolution != Resolution::Llm);
        assert_eq!(decision.decision_version, DECISION_VERSION);
        assert!(decision.decision_time_ms <= 150.0);
    }

    #[test]
    fn escalation_chain_never_includes_the_selected_model() {
        let req = MargaDecideRequest::new("please design a distributed, fault-tolerant consensus algorithm and prove correctness of the protocol");
        let decision = decide(&req);
        assert!(!decision
            .escalation_chain
            .iter()
            .any(|m| m.provider_id == decision.provider_id && m.model_id == decision.model_id));
    }

    #[test]
    fn confidence_is_always_in_unit_interval() {
        for msg in ["", "hi", "please implement a sorting function", "why does gravity bend light"] {
            let decision = decide(&MargaDecideRequest::new(msg));
            assert!(decision.confidence >= 0.0 && decision.confidence <= 1.0);
        }
    }

    #[test]
    fn unhealthy_provider_attaches_a_hint_without_changing_selection() {
        let mut req = MargaDecideRequest::new("please implement a function to reverse a string");
        req.binding_strategy = BindingStrategy::Cloud;
        let mut health = HashMap::new();
        health.insert("anthropic".to_string(), false);
        req.provider_health = Some(health);

        let decision = decide(&req);
        assert!(decision.provider_health_hints.is_some());
        assert_eq!(decision.provider_id, "anthropic");
    }

    #[test]
    fn local_binding_strategy_keeps_classifier_resolution_and_binds_on_device() {
        let mut req = MargaDecideRequest::new("please implement a sorting algorithm in rust");
        req.binding_strategy = BindingStrategy::Local;
        let decision = decide(&req);
        assert_eq!(decision.task_type, TaskType::CodeGen);
        assert_eq!(decision.resolution, Resolution::Llm);
        assert!(!decision.skip_llm);
        assert_eq!(decision.provider_id, "local");
        assert_eq!(decision.model_id, "local-code");
    }

    #[test]
    fn local_binding_strategy_never_escalates_to_a_cloud_model() {
        let mut req = MargaDecideRequest::new("please design a distributed, fault-tolerant consensus algorithm and prove correctness of the protocol");
        req.binding_strategy = BindingStrategy::Local;
        let decision = decide(&req);
        assert_eq!(decision.provider_id, "local");
        assert!(decision.escalation_chain.is_empty());
    }
}
