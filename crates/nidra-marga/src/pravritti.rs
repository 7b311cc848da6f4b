//! Task-type classifier. Keyword-weighted scoring over a fixed set of
//! categories; deterministic and side-effect free.

use crate::types::TaskType;

const TASK_TYPES: [TaskType; 9] = [
    TaskType::CodeGen,
    TaskType::Reasoning,
    TaskType::Chat,
    TaskType::Smalltalk,
    TaskType::ToolExec,
    TaskType::Vision,
    TaskType::Search,
    TaskType::Memory,
    TaskType::FileOp,
];

fn keywords(task_type: TaskType) -> &'static [&'static str] {
    match task_type {
        TaskType::CodeGen => &[
            "code", "function", "implement", "bug", "refactor", "compile", "fn ", "class ",
            "script", "rust", "python", "javascript",
        ],
        TaskType::Reasoning => &[
            "why", "prove", "explain", "reason", "analyze", "compare", "trade-off", "tradeoff",
            "think through", "because",
        ],
        TaskType::Chat => &["what do you think", "tell me about", "discuss", "opinion"],
        TaskType::Smalltalk => &[
            "hi", "hello", "hey", "how are you", "good morning", "thanks", "thank you", "bye",
        ],
        TaskType::ToolExec => &["run", "execute", "call the", "invoke", "use the tool"],
        TaskType::Vision => &["image", "picture", "photo", "screenshot", "diagram"],
        TaskType::Search => &["search", "find", "look up", "google", "latest"],
        TaskType::Memory => &["remember", "recall", "earlier you said", "last time"],
        TaskType::FileOp => &["file", "directory", "folder", "save", "read the", "write to"],
    }
}

pub struct PravrittiResult {
    pub task_type: TaskType,
    pub secondary_task_type: Option<TaskType>,
    pub confidence: f64,
    pub top_score: f64,
    pub second_score: f64,
    pub checkin_subtype: Option<String>,
}

/// Score every category against the lowercased message, breaking ties by
/// declaration order in [`TASK_TYPES`] (earlier wins).
pub fn classify(message: &str, has_tools: bool, has_images: bool) -> PravrittiResult {
    let lower = message.to_lowercase();
    let mut scores: Vec<(TaskType, f64)> = TASK_TYPES
        .iter()
        .map(|&tt| {
            let mut score = keywords(tt).iter().filter(|kw| lower.contains(*kw)).count() as f64;
            if has_tools && tt == TaskType::ToolExec {
                score += 1.0;
            }
            if has_images && tt == TaskType::Vision {
                score += 1.0;
            }
            (tt, score)
        })
        .collect();

    // Stable sort descending by score, ties keep TASK_TYPES declaration order.
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

    let (top_type, top_score) = scores[0];
    let (second_type, second_score) = scores[1];

    let (task_type, checkin_subtype) = if top_score == 0.0 {
        (TaskType::Chat, None)
    } else if top_type == TaskType::Smalltalk {
        (TaskType::Smalltalk, Some("greeting".to_string()))
    } else {
        (top_type, None)
    };

    let secondary_task_type =
        if second_score > 0.0 && second_type != task_type { Some(second_type) } else { None };

    let confidence = if top_score == 0.0 {
        0.5
    } else {
        (top_score / (top_score + second_score.max(0.25))).min(1.0)
    };

    PravrittiResult {
        task_type,
        secondary_task_type,
        confidence,
        top_score,
        second_score,
        checkin_subtype,
    }
}

/// Resolution path implied purely by the task type (before binding-strategy
/// overrides are applied in the pipeline).
pub fn resolution_for(task_type: TaskType, message: &str) -> crate::types::Resolution {
    use crate::types::Resolution;
    match task_type {
        TaskType::ToolExec => Resolution::ToolOnly,
        TaskType::Smalltalk if is_well_formed(message) => Resolution::LocalCompute,
        _ => Resolution::Llm,
    }
}

/// A smalltalk message is "well-formed" when it is short, non-empty text —
/// anything longer or blank falls through to the chat path instead.
fn is_well_formed(message: &str) -> bool {
    let trimmed = message.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= 200
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_classifies_as_smalltalk() {
        let r = classify("hi there", false, false);
        assert_eq!(r.task_type, TaskType::Smalltalk);
        assert_eq!(resolution_for(r.task_type, "hi there"), crate::types::Resolution::LocalCompute);
    }

    #[test]
    fn empty_message_falls_back_to_chat() {
        let r = classify("", false, false);
        assert_eq!(r.task_type, TaskType::Chat);
        assert_eq!(r.confidence, 0.5);
    }

    #[test]
    fn code_keywords_win_over_chat() {
        let r = classify("please implement a function to parse json", false, false);
        assert_eq!(r.task_type, TaskType::CodeGen);
    }

    #[test]
    fn has_tools_nudges_toward_tool_exec() {
        let r = classify("please run the linter", true, false);
        assert_eq!(r.task_type, TaskType::ToolExec);
    }
}
