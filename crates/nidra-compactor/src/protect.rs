//! Index sets that tiers must never drop, regardless of score.

use std::collections::HashSet;

use nidra_core::{Message, Role};

/// System roles, the first message, and the last two messages — the
/// moderate tier's protected set.
pub fn protected_with_first(messages: &[Message]) -> HashSet<usize> {
    let mut protected = system_indices(messages);
    if !messages.is_empty() {
        protected.insert(0);
    }
    protected.extend(tail_indices(messages));
    protected
}

/// System roles plus a protected tail — the aggressive tier's protected
/// set (no special treatment of the first message, per its "system
/// messages and a protected tail" wording).
pub fn protected_tail_only(messages: &[Message]) -> HashSet<usize> {
    let mut protected = system_indices(messages);
    protected.extend(tail_indices(messages));
    protected
}

fn system_indices(messages: &[Message]) -> HashSet<usize> {
    messages.iter().enumerate().filter(|(_, m)| m.role == Role::System).map(|(i, _)| i).collect()
}

fn tail_indices(messages: &[Message]) -> HashSet<usize> {
    let n = messages.len();
    let mut tail = HashSet::new();
    if n >= 1 {
        tail.insert(n - 1);
    }
    if n >= 2 {
        tail.insert(n - 2);
    }
    tail
}
