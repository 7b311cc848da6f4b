use nidra_core::{Message, Role};
use nidra_marga::turiya::{extract_context, Tier, TuriyaConfig, TuriyaRouter};
use nidra_marga::{decide, MargaDecideRequest, Resolution, DECISION_VERSION};

#[test]
fn greeting_is_resolved_without_the_llm_and_matches_the_published_version() {
    let decision = decide(&MargaDecideRequest::new("hi there"));
    assert_eq!(decision.decision_version, DECISION_VERSION);
    assert!(decision.decision_time_ms <= 150.0);
    assert!(decision.skip_llm || decision.resolution == Resolution::Llm);
}

#[test]
fn turiya_round_trips_a_decision_through_a_full_conversation() {
    let messages = vec![
        Message::new("1", Role::User, 0).with_text("please refactor this function for clarity"),
        Message::new("2", Role::Assistant, 1).with_text("sure, here's a cleaner version"),
    ];
    let context = extract_context(&messages, Some("You are a helpful coding assistant."), &[], 2);

    let router = TuriyaRouter::new(TuriyaConfig::default());
    let decision = router.classify(context, None);
    let cascade = router.cascade_decision(decision, None);
    router.record_outcome(decision, 0.9);

    let stats = router.get_stats();
    assert_eq!(stats.total_decisions, 1);
    assert!(matches!(cascade.original_tier, Tier::NoLlm | Tier::Haiku | Tier::Sonnet | Tier::Opus));
}
