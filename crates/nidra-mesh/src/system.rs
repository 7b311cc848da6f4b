//! The actor system: spawns actors, owns the router and the peer-view
//! table, and drains mailboxes on a graceful shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use nidra_core::Result;

use crate::config::MeshConfig;
use crate::envelope::Envelope;
use crate::gossip::PeerTable;
use crate::router::{AskOptions, MeshRouter};

/// One step of an actor's behavior. Returning `Some` installs a new
/// behavior effective from the next envelope (`become`); returning
/// `None` keeps the current one.
#[async_trait]
pub trait Behavior: Send + Sync {
    async fn receive(&mut self, envelope: Envelope, ctx: &ActorContext) -> BehaviorResult;
}

pub enum BehaviorResult {
    Continue,
    Become(Box<dyn Behavior>),
}

/// Handle passed to a behavior so it can reply or send further
/// envelopes without holding a raw reference to the router's internals.
pub struct ActorContext {
    pub actor_id: String,
    router: Arc<MeshRouter>,
}

impl ActorContext {
    pub fn tell(&self, to: impl Into<String>, payload: serde_json::Value, now_ms: i64) {
        let envelope = Envelope::tell(self.actor_id.clone(), to, payload, now_ms);
        self.router.route(now_ms, envelope);
    }

    pub fn reply(&self, to: &Envelope, payload: serde_json::Value, now_ms: i64) {
        let envelope = to.reply_to(self.actor_id.clone(), payload, now_ms);
        self.router.route(now_ms, envelope);
    }
}

/// Opaque reference to a spawned actor. Raw behavior functions never
/// cross this boundary — callers only ever see an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorRef {
    id: String,
}

impl ActorRef {
    pub fn id(&self) -> &str {
        &self.id
    }
}

struct ActorHandle {
    join: JoinHandle<()>,
    stop: Arc<AtomicBool>,
    notify: Arc<tokio::sync::Notify>,
}

pub struct ActorSystem {
    pub router: Arc<MeshRouter>,
    pub peers: Arc<PeerTable>,
    config: MeshConfig,
    actors: DashMap<String, ActorHandle>,
}

impl ActorSystem {
    pub fn new(config: MeshConfig) -> Arc<Self> {
        let router = MeshRouter::new(config.max_mailbox_size, config.default_ask_timeout_ms);
        let peers = Arc::new(PeerTable::new(config.suspect_timeout_ms, config.dead_timeout_ms));
        Arc::new(Self { router, peers, config, actors: DashMap::new() })
    }

    /// Spawns a task that serially pulls the actor's mailbox and feeds
    /// its behavior one envelope at a time. Other actors run
    /// concurrently and unrestricted.
    pub fn spawn(self: &Arc<Self>, actor_id: impl Into<String>, mut behavior: Box<dyn Behavior>) -> ActorRef {
        let id = actor_id.into();
        let notify = self.router.register_actor(id.clone());
        let stop = Arc::new(AtomicBool::new(false));

        let router = self.router.clone();
        let loop_id = id.clone();
        let loop_stop = stop.clone();
        let loop_notify = notify.clone();
        let join = tokio::spawn(async move {
            let ctx = ActorContext { actor_id: loop_id.clone(), router: router.clone() };
            loop {
                if loop_stop.load(Ordering::SeqCst) {
                    return;
                }
                match router.dequeue(&loop_id) {
                    Some(envelope) => match behavior.receive(envelope, &ctx).await {
                        BehaviorResult::Continue => {}
                        BehaviorResult::Become(next) => behavior = next,
                    },
                    None => loop_notify.notified().await,
                }
            }
        });

        self.actors.insert(id.clone(), ActorHandle { join, stop, notify });
        ActorRef { id }
    }

    pub fn stop(&self, actor_ref: &ActorRef) {
        if let Some((_, handle)) = self.actors.remove(actor_ref.id()) {
            handle.stop.store(true, Ordering::SeqCst);
            handle.notify.notify_one();
            handle.join.abort();
        }
        self.router.unregister_actor(actor_ref.id());
    }

    pub fn subscribe(&self, actor_ref: &ActorRef, topic: impl Into<String>) {
        self.router.subscribe_topic(actor_ref.id().to_string(), topic);
    }

    pub fn broadcast(&self, from: impl Into<String>, payload: serde_json::Value, now_ms: i64) {
        self.router.route(now_ms, Envelope::broadcast(from, payload, now_ms));
    }

    pub async fn ask(
        self: &Arc<Self>,
        now_ms: i64,
        from: impl Into<String>,
        to: impl Into<String>,
        payload: serde_json::Value,
        opts: AskOptions,
    ) -> Result<Envelope> {
        self.router.ask(now_ms, from, to, payload, opts).await
    }

    /// Drains every mailbox (lets in-flight actors finish what's already
    /// queued) within `deadline`, then force-aborts anything left and
    /// rejects pending asks.
    pub async fn shutdown(&self, deadline: Duration) {
        info!(actor_count = self.actors.len(), "actor system shutdown starting");
        let drain = async {
            while !self.router.all_mailboxes_empty() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        };
        if tokio::time::timeout(deadline, drain).await.is_err() {
            warn!("actor system shutdown deadline exceeded — aborting remaining work");
        }

        for entry in self.actors.iter() {
            entry.value().stop.store(true, Ordering::SeqCst);
            entry.value().notify.notify_one();
        }
        let ids: Vec<String> = self.actors.iter().map(|e| e.key().clone()).collect();
        for id in ids {
            if let Some((_, handle)) = self.actors.remove(&id) {
                handle.join.abort();
            }
            self.router.unregister_actor(&id);
        }
        self.router.destroy();
    }

    pub fn config(&self) -> &MeshConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering as O};

    struct Echo {
        received: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Behavior for Echo {
        async fn receive(&mut self, envelope: Envelope, ctx: &ActorContext) -> BehaviorResult {
            self.received.fetch_add(1, O::SeqCst);
            if envelope.kind == crate::envelope::EnvelopeKind::Ask {
                ctx.reply(&envelope, json!({"echo": true}), 0);
            }
            BehaviorResult::Continue
        }
    }

    #[tokio::test]
    async fn spawned_actor_processes_a_tell() {
        let system = ActorSystem::new(MeshConfig::default());
        let received = Arc::new(AtomicUsize::new(0));
        let actor = system.spawn("echo", Box::new(Echo { received: received.clone() }));

        system.router.route(0, Envelope::tell("tester", actor.id(), json!({}), 0));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(received.load(O::SeqCst), 1);
    }

    #[tokio::test]
    async fn ask_through_the_system_receives_a_reply() {
        let system = ActorSystem::new(MeshConfig::default());
        let received = Arc::new(AtomicUsize::new(0));
        let actor = system.spawn("echo", Box::new(Echo { received }));

        let result = system.ask(0, "tester", actor.id(), json!({}), AskOptions::default()).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().payload["echo"], true);
    }

    #[tokio::test]
    async fn stop_removes_the_actor_from_the_router() {
        let system = ActorSystem::new(MeshConfig::default());
        let received = Arc::new(AtomicUsize::new(0));
        let actor = system.spawn("echo", Box::new(Echo { received }));
        assert_eq!(system.router.local_actor_count(), 1);
        system.stop(&actor);
        assert_eq!(system.router.local_actor_count(), 0);
    }
}
