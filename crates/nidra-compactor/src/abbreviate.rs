//! Gentle-tier collapsing of tool call/result details to abbreviations,
//! preserving top-level structure and counts.

use nidra_core::{ContentPart, Message};

const TOOL_RESULT_PREVIEW_CHARS: usize = 80;

pub fn abbreviate_tool_details(messages: &[Message]) -> Vec<Message> {
    messages.iter().cloned().map(abbreviate_message).collect()
}

fn abbreviate_message(mut message: Message) -> Message {
    for part in message.content.iter_mut() {
        match part {
            ContentPart::ToolCall { arguments, .. } => {
                let key_count = arguments.as_object().map(|o| o.len()).unwrap_or(0);
                *arguments = serde_json::json!({ "_abbreviated": true, "arg_count": key_count });
            }
            ContentPart::ToolResult { output, .. } => {
                let total_chars = output.chars().count();
                if total_chars > TOOL_RESULT_PREVIEW_CHARS {
                    let preview: String = output.chars().take(TOOL_RESULT_PREVIEW_CHARS).collect();
                    *output = format!("{preview}… ({total_chars} chars)");
                }
            }
            _ => {}
        }
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use nidra_core::Role;

    #[test]
    fn long_tool_result_is_truncated_with_a_length_marker() {
        let long_output = "x".repeat(200);
        let mut message = Message::new("m1", Role::ToolResult, 0);
        message.content.push(ContentPart::ToolResult { id: "t1".into(), output: long_output.clone() });

        let abbreviated = abbreviate_tool_details(&[message]).remove(0);
        let ContentPart::ToolResult { output, .. } = &abbreviated.content[0] else {
            panic!("expected tool result")
        };
        assert!(output.len() < long_output.len());
        assert!(output.contains("200 chars"));
    }

    #[test]
    fn tool_call_arguments_collapse_to_a_key_count() {
        let mut message = Message::new("m2", Role::Assistant, 0);
        message.content.push(ContentPart::ToolCall {
            id: "t2".into(),
            name: "search".into(),
            arguments: serde_json::json!({"query": "rust", "limit": 5}),
        });

        let abbreviated = abbreviate_tool_details(&[message]).remove(0);
        let ContentPart::ToolCall { arguments, .. } = &abbreviated.content[0] else {
            panic!("expected tool call")
        };
        assert_eq!(arguments["arg_count"], 2);
    }
}
