//! The routed message: payload plus priority, TTL, and hop metadata.

use serde::{Deserialize, Serialize};

/// Destination meaning a broadcast to every local actor and peer channel.
pub const BROADCAST: &str = "*";
/// Destination meaning a topic publish; the actual topic is carried in
/// [`Envelope::topic`].
pub const TOPIC_DESTINATION: &str = "__topic__";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeKind {
    Tell,
    Ask,
    Reply,
    Signal,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub id: String,
    pub from: String,
    pub to: String,
    pub kind: EnvelopeKind,
    pub topic: Option<String>,
    pub correlation_id: Option<String>,
    pub payload: serde_json::Value,
    /// 0 (lowest) .. 3 (highest).
    pub priority: u8,
    pub timestamp_ms: i64,
    pub ttl_ms: i64,
    pub hops: Vec<String>,
}

impl Envelope {
    pub fn tell(from: impl Into<String>, to: impl Into<String>, payload: serde_json::Value, timestamp_ms: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            from: from.into(),
            to: to.into(),
            kind: EnvelopeKind::Tell,
            topic: None,
            correlation_id: None,
            payload,
            priority: 1,
            timestamp_ms,
            ttl_ms: 0,
            hops: Vec::new(),
        }
    }

    pub fn broadcast(from: impl Into<String>, payload: serde_json::Value, timestamp_ms: i64) -> Self {
        Self::tell(from, BROADCAST, payload, timestamp_ms)
    }

    pub fn topic(
        from: impl Into<String>,
        topic: impl Into<String>,
        payload: serde_json::Value,
        timestamp_ms: i64,
    ) -> Self {
        let mut e = Self::tell(from, TOPIC_DESTINATION, payload, timestamp_ms);
        e.topic = Some(topic.into());
        e
    }

    pub fn reply_to(&self, from: impl Into<String>, payload: serde_json::Value, timestamp_ms: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            from: from.into(),
            to: self.from.clone(),
            kind: EnvelopeKind::Reply,
            topic: None,
            correlation_id: Some(self.id.clone()),
            payload,
            priority: self.priority,
            timestamp_ms,
            ttl_ms: 0,
            hops: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority.min(3);
        self
    }

    pub fn with_ttl(mut self, ttl_ms: i64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    pub fn expired(&self, now_ms: i64) -> bool {
        self.ttl_ms > 0 && now_ms - self.timestamp_ms > self.ttl_ms
    }
}
