//! Scenarios spanning the full tier ladder.

use nidra_core::{CharsPerTokenEstimator, ContentPart, Message, Role};
use nidra_compactor::{compact, CompactorConfig};

fn conversation(n: usize) -> Vec<Message> {
    let mut messages = vec![Message::new("sys", Role::System, 0).with_text("you are a helpful assistant")];
    for i in 0..n {
        messages.push(Message::new(format!("u{i}"), Role::User, i as i64 + 1).with_text(format!("question number {i} about topic {i}")));
        messages.push(
            Message::new(format!("a{i}"), Role::Assistant, i as i64 + 1).with_text(format!("answer number {i} discussing topic {i} in depth")),
        );
    }
    messages
}

#[test]
fn gentle_tier_collapses_tool_details_but_keeps_message_count() {
    let mut messages = conversation(2);
    messages.push(Message::new("tool1", Role::ToolResult, 99).with_text("placeholder"));
    if let Some(last) = messages.last_mut() {
        last.content.push(ContentPart::ToolResult { id: "t1".into(), output: "x".repeat(500) });
    }

    // Force a small enough limit that usage lands in the gentle band.
    let total_chars: usize = messages.iter().map(|m| m.as_text().len()).sum();
    let estimator = CharsPerTokenEstimator::new((total_chars as f64 / 4.0 / 0.62) as usize);

    let result = compact(&messages, &estimator, &CompactorConfig::default());
    assert_eq!(result.len(), messages.len());
}

#[test]
fn aggressive_tier_shrinks_a_long_conversation_to_fit_budget() {
    let messages = conversation(40);
    let estimator = CharsPerTokenEstimator::new(200); // tiny limit forces aggressive tier
    let result = compact(&messages, &estimator, &CompactorConfig::default());

    assert!(result.len() < messages.len());
    assert!(result.iter().any(|m| m.role == Role::System));
}

#[test]
fn moderate_tier_deduplicates_near_identical_messages() {
    let mut messages = vec![Message::new("sys", Role::System, 0).with_text("rules")];
    for i in 0..6 {
        messages.push(Message::new(format!("m{i}"), Role::User, i).with_text("the quick brown fox jumps over the lazy dog"));
    }
    messages.push(Message::new("tail1", Role::User, 100).with_text("final question"));
    messages.push(Message::new("tail2", Role::Assistant, 101).with_text("final answer"));

    let total_chars: usize = messages.iter().map(|m| m.as_text().len()).sum();
    let estimator = CharsPerTokenEstimator::new((total_chars as f64 / 4.0 / 0.8) as usize);

    let result = compact(&messages, &estimator, &CompactorConfig::default());
    assert!(result.len() < messages.len());
    assert!(result.iter().any(|m| m.id == "tail1"));
    assert!(result.iter().any(|m| m.id == "tail2"));
}
