//! Feature extraction for the contextual router: reduces a conversation
//! into normalized `[0,1]` features Turiya's classifier scores against.

use nidra_core::{ContentPart, Message};

#[derive(Clone, Copy, Debug, Default)]
pub struct DecisionContext {
    pub complexity: f64,
    pub urgency: f64,
    pub creativity: f64,
    pub precision: f64,
    pub code_ratio: f64,
    pub conversation_depth: f64,
    pub memory_load: f64,
}

const URGENT_MARKERS: &[&str] = &["urgent", "asap", "immediately", "now", "critical", "emergency"];
const CREATIVE_MARKERS: &[&str] = &["brainstorm", "creative", "imagine", "design", "story", "poem"];
const PRECISE_MARKERS: &[&str] = &["exact", "precisely", "must", "strict", "spec", "format"];

/// `memoryHits` is the count of memory entries retrieved for this turn;
/// `tools` is the set of tool names available.
pub fn extract_context(
    messages: &[Message],
    system_prompt: Option<&str>,
    tools: &[String],
    memory_hits: usize,
) -> DecisionContext {
    let last_text = messages
        .iter()
        .rev()
        .find(|m| m.role == nidra_core::Role::User)
        .map(|m| m.as_text())
        .unwrap_or_default();
    let lower = last_text.to_lowercase();

    let word_count = lower.split_whitespace().count() as f64;
    let complexity = (word_count / 120.0).min(1.0);

    let urgency = if URGENT_MARKERS.iter().any(|m| lower.contains(m)) { 1.0 } else { 0.0 };
    let creativity = marker_density(&lower, CREATIVE_MARKERS);
    let precision = marker_density(&lower, PRECISE_MARKERS);

    let code_ratio = code_part_ratio(messages);
    let conversation_depth = (messages.len() as f64 / 40.0).min(1.0);
    let memory_load = (memory_hits as f64 / 10.0).min(1.0);

    let _ = (system_prompt, tools.len());

    DecisionContext {
        complexity,
        urgency,
        creativity,
        precision,
        code_ratio,
        conversation_depth,
        memory_load,
    }
}

fn marker_density(lower: &str, markers: &[&str]) -> f64 {
    let hits = markers.iter().filter(|m| lower.contains(*m)).count() as f64;
    (hits / 3.0).min(1.0)
}

fn code_part_ratio(messages: &[Message]) -> f64 {
    let mut code_like = 0usize;
    let mut total = 0usize;
    for message in messages {
        for part in &message.content {
            total += 1;
            match part {
                ContentPart::ToolCall { .. } | ContentPart::ToolResult { .. } => code_like += 1,
                ContentPart::Text { text } if text.contains("```") || text.contains("fn ") || text.contains("```rust") => {
                    code_like += 1
                }
                _ => {}
            }
        }
    }
    if total == 0 {
        0.0
    } else {
        (code_like as f64 / total as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nidra_core::Role;

    #[test]
    fn longer_messages_score_higher_complexity() {
        let short = vec![Message::new("1", Role::User, 0).with_text("hi")];
        let long_text = "word ".repeat(150);
        let long = vec![Message::new("1", Role::User, 0).with_text(long_text)];

        let short_ctx = extract_context(&short, None, &[], 0);
        let long_ctx = extract_context(&long, None, &[], 0);
        assert!(long_ctx.complexity > short_ctx.complexity);
    }

    #[test]
    fn urgent_marker_sets_urgency_to_one() {
        let messages = vec![Message::new("1", Role::User, 0).with_text("I need this ASAP please")];
        let ctx = extract_context(&messages, None, &[], 0);
        assert_eq!(ctx.urgency, 1.0);
    }

    #[test]
    fn all_features_stay_in_unit_interval() {
        let messages = vec![Message::new("1", Role::User, 0).with_text("word ".repeat(500))];
        let ctx = extract_context(&messages, None, &[], 50);
        for v in [ctx.complexity, ctx.urgency, ctx.creativity, ctx.precision, ctx.code_ratio, ctx.conversation_depth, ctx.memory_load] {
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
