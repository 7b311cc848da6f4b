//! Router observer events: `delivered | undeliverable | broadcast`, plus
//! the mailbox-overflow signal.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum RouterEvent {
    Delivered { envelope_id: String, to: String },
    Undeliverable { envelope_id: String, to: String, reason: String },
    Broadcast { envelope_id: String, recipient_count: usize },
    MailboxOverflow { actor_id: String, dropped_priority: u8 },
}
