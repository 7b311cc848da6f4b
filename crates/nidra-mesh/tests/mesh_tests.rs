use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use nidra_mesh::envelope::EnvelopeKind;
use nidra_mesh::system::{ActorContext, Behavior, BehaviorResult};
use nidra_mesh::{ActorSystem, AskOptions, Envelope, MeshConfig};

struct Counter {
    count: Arc<AtomicUsize>,
}

#[async_trait]
impl Behavior for Counter {
    async fn receive(&mut self, envelope: Envelope, ctx: &ActorContext) -> BehaviorResult {
        self.count.fetch_add(1, Ordering::SeqCst);
        if envelope.kind == EnvelopeKind::Ask {
            ctx.reply(&envelope, json!({"count": self.count.load(Ordering::SeqCst)}), 0);
        }
        BehaviorResult::Continue
    }
}

#[tokio::test]
async fn three_actors_one_broadcast_two_receive() {
    let system = ActorSystem::new(MeshConfig::default());
    let a_count = Arc::new(AtomicUsize::new(0));
    let b_count = Arc::new(AtomicUsize::new(0));
    let c_count = Arc::new(AtomicUsize::new(0));

    let a = system.spawn("a", Box::new(Counter { count: a_count.clone() }));
    system.spawn("b", Box::new(Counter { count: b_count.clone() }));
    system.spawn("c", Box::new(Counter { count: c_count.clone() }));

    system.broadcast(a.id(), json!({"hello": true}), 0);
    tokio::time::sleep(Duration::from_millis(30)).await;

    assert_eq!(a_count.load(Ordering::SeqCst), 0);
    assert_eq!(b_count.load(Ordering::SeqCst), 1);
    assert_eq!(c_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn ask_round_trip_carries_the_original_correlation_id() {
    let system = ActorSystem::new(MeshConfig::default());
    let count = Arc::new(AtomicUsize::new(0));
    let actor = system.spawn("responder", Box::new(Counter { count }));

    let reply = system.ask(0, "caller", actor.id(), json!({}), AskOptions::default()).await.unwrap();
    assert_eq!(reply.payload["count"], 1);
}

#[tokio::test]
async fn shutdown_drains_then_stops_accepting_work() {
    let system = ActorSystem::new(MeshConfig::default());
    let count = Arc::new(AtomicUsize::new(0));
    let actor = system.spawn("worker", Box::new(Counter { count: count.clone() }));

    system.router.route(0, Envelope::tell("caller", actor.id(), json!({}), 0));
    system.shutdown(Duration::from_secs(1)).await;

    assert_eq!(system.router.local_actor_count(), 0);
}
