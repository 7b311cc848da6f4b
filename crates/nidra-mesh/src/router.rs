//! Envelope routing: reply correlation, ask timeouts, TTL, loop
//! prevention, broadcast, topic pub/sub, and point-to-point delivery —
//! in that fixed order. `route()` itself is
//! synchronous and never yields.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::oneshot;
use tokio::time::Duration;
use tracing::{info, warn};

use nidra_core::{Error, EventBus, Result};

use crate::envelope::{Envelope, EnvelopeKind, BROADCAST, TOPIC_DESTINATION};
use crate::events::RouterEvent;
use crate::mailbox::{EnqueueOutcome, PriorityMailbox};

/// A channel to a peer actor system, reached by either its peer id or
/// the id of any actor known to live there. Opaque from the router's
/// point of view — delivery is "send this envelope somewhere else".
pub trait PeerChannel: Send + Sync {
    fn peer_id(&self) -> &str;
    fn owns_actor(&self, actor_id: &str) -> bool;
    fn send(&self, envelope: Envelope);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AskOptions {
    pub timeout_ms: Option<u64>,
    pub priority: Option<u8>,
    pub ttl_ms: Option<i64>,
}

pub struct MeshRouter {
    local_mailboxes: DashMap<String, Arc<std::sync::Mutex<PriorityMailbox>>>,
    local_notify: DashMap<String, Arc<tokio::sync::Notify>>,
    peers: DashMap<String, Arc<dyn PeerChannel>>,
    topics: DashMap<String, Vec<String>>,
    pending: DashMap<String, oneshot::Sender<Envelope>>,
    default_ask_timeout_ms: u64,
    max_mailbox_size: usize,
    pub events: EventBus<RouterEvent>,
}

pub enum RouteOutcome {
    Delivered,
    Broadcast { recipient_count: usize },
    Undeliverable { reason: String },
    AskPending,
}

impl MeshRouter {
    pub fn new(max_mailbox_size: usize, default_ask_timeout_ms: u64) -> Arc<Self> {
        Arc::new(Self {
            local_mailboxes: DashMap::new(),
            local_notify: DashMap::new(),
            peers: DashMap::new(),
            topics: DashMap::new(),
            pending: DashMap::new(),
            default_ask_timeout_ms,
            max_mailbox_size,
            events: EventBus::new(),
        })
    }

    pub fn register_actor(&self, actor_id: impl Into<String>) -> Arc<tokio::sync::Notify> {
        let id = actor_id.into();
        self.local_mailboxes
            .insert(id.clone(), Arc::new(std::sync::Mutex::new(PriorityMailbox::new(self.max_mailbox_size))));
        let notify = Arc::new(tokio::sync::Notify::new());
        self.local_notify.insert(id, notify.clone());
        notify
    }

    pub fn unregister_actor(&self, actor_id: &str) {
        self.local_mailboxes.remove(actor_id);
        self.local_notify.remove(actor_id);
        for mut subscribers in self.topics.iter_mut() {
            subscribers.retain(|id| id != actor_id);
        }
    }

    pub fn register_peer(&self, channel: Arc<dyn PeerChannel>) {
        self.peers.insert(channel.peer_id().to_string(), channel);
    }

    pub fn unregister_peer(&self, peer_id: &str) {
        self.peers.remove(peer_id);
    }

    pub fn subscribe_topic(&self, actor_id: impl Into<String>, topic: impl Into<String>) {
        self.topics.entry(topic.into()).or_default().push(actor_id.into());
    }

    pub fn dequeue(&self, actor_id: &str) -> Option<Envelope> {
        self.local_mailboxes.get(actor_id).and_then(|mbox| mbox.lock().unwrap().dequeue())
    }

    /// Pure routing decision and delivery. Never yields: mailbox pushes
    /// and peer sends are synchronous hand-offs.
    pub fn route(&self, now_ms: i64, mut envelope: Envelope) -> RouteOutcome {
        if envelope.kind == EnvelopeKind::Reply {
            return self.route_reply(envelope);
        }

        if envelope.expired(now_ms) {
            self.undeliverable(&envelope, "TTL expired");
            return RouteOutcome::Undeliverable { reason: "TTL expired".into() };
        }

        if envelope.to != BROADCAST && envelope.hops.contains(&envelope.to) {
            self.undeliverable(&envelope, "Routing loop detected");
            return RouteOutcome::Undeliverable { reason: "Routing loop detected".into() };
        }

        if envelope.kind == EnvelopeKind::Ask {
            // Registration happens via `ask()` before `route()` is
            // called; this is a defensive no-op for any direct caller
            // that routes an Ask envelope without going through `ask()`.
            if !self.pending.contains_key(&envelope.id) {
                warn!(id = %envelope.id, "ask envelope routed without a registered pending entry");
            }
        }

        envelope.hops.push(envelope.to.clone());

        if envelope.to == BROADCAST {
            return self.route_broadcast(envelope);
        }

        if envelope.topic.is_some() && envelope.to == TOPIC_DESTINATION {
            return self.route_topic(envelope);
        }

        self.route_point_to_point(envelope)
    }

    fn route_reply(&self, envelope: Envelope) -> RouteOutcome {
        if let Some(correlation_id) = envelope.correlation_id.clone() {
            if let Some((_, tx)) = self.pending.remove(&correlation_id) {
                let to = envelope.to.clone();
                let id = envelope.id.clone();
                let _ = tx.send(envelope);
                self.delivered(&id, &to);
                return RouteOutcome::Delivered;
            }
        }
        self.undeliverable(&envelope, "No pending ask");
        RouteOutcome::Undeliverable { reason: "No pending ask".into() }
    }

    fn route_broadcast(&self, envelope: Envelope) -> RouteOutcome {
        let mut count = 0;
        for entry in self.local_mailboxes.iter() {
            if entry.key() == &envelope.from {
                continue;
            }
            self.push_local(entry.key(), envelope.clone());
            count += 1;
        }
        for entry in self.peers.iter() {
            if entry.key() == &envelope.from {
                continue;
            }
            entry.value().send(envelope.clone());
            count += 1;
        }
        info!(id = %envelope.id, recipient_count = count, "broadcast");
        self.events.emit(&RouterEvent::Broadcast { envelope_id: envelope.id.clone(), recipient_count: count });
        RouteOutcome::Broadcast { recipient_count: count }
    }

    fn route_topic(&self, envelope: Envelope) -> RouteOutcome {
        let topic = envelope.topic.clone().unwrap();
        let subscribers: Vec<String> = self
            .topics
            .get(&topic)
            .map(|v| v.iter().filter(|id| **id != envelope.from).cloned().collect())
            .unwrap_or_default();

        if subscribers.is_empty() {
            self.undeliverable(&envelope, "No subscribers");
            return RouteOutcome::Undeliverable { reason: "No subscribers".into() };
        }
        for sub in &subscribers {
            self.push_local(sub, envelope.clone());
        }
        self.delivered(&envelope.id, &topic);
        RouteOutcome::Delivered
    }

    fn route_point_to_point(&self, envelope: Envelope) -> RouteOutcome {
        if self.local_mailboxes.contains_key(&envelope.to) {
            let to = envelope.to.clone();
            let id = envelope.id.clone();
            self.push_local(&to, envelope);
            self.delivered(&id, &to);
            return RouteOutcome::Delivered;
        }
        if let Some(peer) = self
            .peers
            .iter()
            .find(|p| p.key() == &envelope.to || p.value().owns_actor(&envelope.to))
        {
            let to = envelope.to.clone();
            let id = envelope.id.clone();
            peer.value().send(envelope);
            self.delivered(&id, &to);
            return RouteOutcome::Delivered;
        }
        self.undeliverable(&envelope, "No local actor or peer channel");
        RouteOutcome::Undeliverable { reason: "No local actor or peer channel".into() }
    }

    fn push_local(&self, actor_id: &str, envelope: Envelope) {
        if let Some(mbox) = self.local_mailboxes.get(actor_id) {
            let outcome = mbox.lock().unwrap().enqueue(envelope);
            if let EnqueueOutcome::DroppedIncoming = outcome {
                self.events.emit(&RouterEvent::MailboxOverflow { actor_id: actor_id.to_string(), dropped_priority: 0 });
            }
            if let Some(notify) = self.local_notify.get(actor_id) {
                notify.notify_one();
            }
        }
    }

    fn delivered(&self, envelope_id: &str, to: &str) {
        self.events.emit(&RouterEvent::Delivered { envelope_id: envelope_id.to_string(), to: to.to_string() });
    }

    fn undeliverable(&self, envelope: &Envelope, reason: &str) {
        warn!(id = %envelope.id, to = %envelope.to, reason, "undeliverable");
        self.events.emit(&RouterEvent::Undeliverable {
            envelope_id: envelope.id.clone(),
            to: envelope.to.clone(),
            reason: reason.to_string(),
        });
    }

    /// Request/reply: registers the pending entry before delivery so a
    /// reply that arrives on the same tick is correctly correlated, then
    /// awaits the reply or times out. Timeouts fire exactly once; the
    /// pending entry is always removed before returning.
    pub async fn ask(
        self: &Arc<Self>,
        now_ms: i64,
        from: impl Into<String>,
        to: impl Into<String>,
        payload: serde_json::Value,
        opts: AskOptions,
    ) -> Result<Envelope> {
        let mut envelope = Envelope::tell(from, to, payload, now_ms);
        envelope.kind = EnvelopeKind::Ask;
        if let Some(p) = opts.priority {
            envelope.priority = p.min(3);
        }
        if let Some(ttl) = opts.ttl_ms {
            envelope.ttl_ms = ttl;
        }

        let (tx, rx) = oneshot::channel();
        self.pending.insert(envelope.id.clone(), tx);

        let id = envelope.id.clone();
        let outcome = self.route(now_ms, envelope);
        if let RouteOutcome::Undeliverable { reason } = outcome {
            self.pending.remove(&id);
            return Err(Error::NoDestination(reason));
        }

        let timeout_ms = opts.timeout_ms.unwrap_or(self.default_ask_timeout_ms);
        match tokio::time::timeout(Duration::from_millis(timeout_ms), rx).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(_)) => {
                self.pending.remove(&id);
                Err(Error::Disposed)
            }
            Err(_) => {
                self.pending.remove(&id);
                Err(Error::Timeout)
            }
        }
    }

    /// Rejects every pending ask with a disposal-style error. Already
    /// in-flight local deliveries are unaffected — only asks still
    /// awaiting a reply are torn down.
    pub fn destroy(&self) {
        let ids: Vec<String> = self.pending.iter().map(|e| e.key().clone()).collect();
        for id in ids {
            if let Some((_, tx)) = self.pending.remove(&id) {
                drop(tx);
            }
        }
    }

    pub fn local_actor_count(&self) -> usize {
        self.local_mailboxes.len()
    }

    /// All registered mailboxes empty — used by graceful shutdown to
    /// decide when draining is complete.
    pub fn all_mailboxes_empty(&self) -> bool {
        self.local_mailboxes.iter().all(|entry| entry.value().lock().unwrap().is_empty())
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }
}
