//! SWIM-inspired peer views: Lamport-generation merge, suspicion
//! lifecycle, and a deterministic fanout picker for gossip exchange.
//!
//! No real randomness is used anywhere in the mesh — fanout selection
//! reuses the same seeded LCG idiom `nidra-scoring` uses
//! for MinHash, so gossip rounds are reproducible in tests.

use std::collections::HashMap;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PeerStatus {
    Alive,
    Suspect,
    Dead,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PeerView {
    pub actor_id: String,
    pub expertise: Option<Vec<String>>,
    pub capabilities: Option<Vec<String>>,
    pub status: PeerStatus,
    pub generation: u64,
    pub last_seen_ms: i64,
}

impl PeerView {
    pub fn alive(actor_id: impl Into<String>, now_ms: i64) -> Self {
        Self {
            actor_id: actor_id.into(),
            expertise: None,
            capabilities: None,
            status: PeerStatus::Alive,
            generation: 0,
            last_seen_ms: now_ms,
        }
    }
}

/// Merge rule: higher generation wins outright; on a generation tie, the
/// worse (more alarming) status wins. `lastSeen` always advances to the
/// newer of the two.
pub fn merge(existing: &PeerView, incoming: &PeerView) -> PeerView {
    let mut merged = if incoming.generation > existing.generation {
        incoming.clone()
    } else if incoming.generation < existing.generation {
        existing.clone()
    } else if incoming.status > existing.status {
        incoming.clone()
    } else {
        existing.clone()
    };
    merged.last_seen_ms = existing.last_seen_ms.max(incoming.last_seen_ms);
    merged
}

/// Owns the local view of every known peer and runs the suspicion
/// lifecycle. Synchronous; callers drive it from a scheduler tick.
pub struct PeerTable {
    views: DashMap<String, PeerView>,
    suspect_timeout_ms: i64,
    dead_timeout_ms: i64,
}

impl PeerTable {
    pub fn new(suspect_timeout_ms: i64, dead_timeout_ms: i64) -> Self {
        Self { views: DashMap::new(), suspect_timeout_ms, dead_timeout_ms }
    }

    pub fn merge_incoming(&self, incoming: PeerView) -> PeerView {
        let merged = match self.views.get(&incoming.actor_id) {
            Some(existing) => merge(&existing, &incoming),
            None => incoming,
        };
        self.views.insert(merged.actor_id.clone(), merged.clone());
        merged
    }

    pub fn get(&self, actor_id: &str) -> Option<PeerView> {
        self.views.get(actor_id).map(|v| v.clone())
    }

    pub fn snapshot(&self) -> Vec<PeerView> {
        self.views.iter().map(|v| v.clone()).collect()
    }

    pub fn touch_alive(&self, actor_id: &str, now_ms: i64) {
        let mut view = self
            .views
            .entry(actor_id.to_string())
            .or_insert_with(|| PeerView::alive(actor_id.to_string(), now_ms));
        view.last_seen_ms = now_ms;
        view.status = PeerStatus::Alive;
    }

    /// Run the suspicion lifecycle against the clock: silence past
    /// `suspectTimeoutMs` demotes `alive -> suspect` with a local
    /// generation bump; further silence past `deadTimeoutMs` (measured
    /// from the same `lastSeen`) demotes `suspect -> dead`. Returns the
    /// actor ids whose status changed, for the caller to emit events and
    /// drop peer channels for.
    pub fn tick(&self, now_ms: i64) -> Vec<(String, PeerStatus)> {
        let mut changed = Vec::new();
        for mut entry in self.views.iter_mut() {
            let silence = now_ms - entry.last_seen_ms;
            let next = match entry.status {
                PeerStatus::Alive if silence > self.suspect_timeout_ms => Some(PeerStatus::Suspect),
                PeerStatus::Suspect if silence > self.dead_timeout_ms => Some(PeerStatus::Dead),
                _ => None,
            };
            if let Some(next) = next {
                entry.status = next;
                entry.generation += 1;
                changed.push((entry.actor_id.clone(), next));
            }
        }
        changed
    }
}

/// Deterministic LCG matching `nidra-scoring`'s MinHash transition:
/// `s <- (s*1103515245 + 12345) mod 2^31`.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = (self.0.wrapping_mul(1_103_515_245).wrapping_add(12_345)) % (1u64 << 31);
        self.0
    }
}

/// Picks up to `fanout` peer ids from `candidates`, shuffled
/// deterministically by `seed` (e.g. a monotonically increasing gossip
/// round counter) rather than by a real random source.
pub fn pick_fanout(candidates: &[String], fanout: usize, seed: u64) -> Vec<String> {
    if candidates.is_empty() || fanout == 0 {
        return Vec::new();
    }
    let mut keyed: HashMap<usize, u64> = HashMap::new();
    let mut lcg = Lcg(seed.wrapping_add(1));
    for i in 0..candidates.len() {
        keyed.insert(i, lcg.next());
    }
    let mut indices: Vec<usize> = (0..candidates.len()).collect();
    indices.sort_by_key(|i| keyed[i]);
    indices.into_iter().take(fanout).map(|i| candidates[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_generation_always_wins() {
        let a = PeerView { generation: 1, status: PeerStatus::Alive, ..PeerView::alive("p", 0) };
        let b = PeerView { generation: 2, status: PeerStatus::Suspect, ..PeerView::alive("p", 5) };
        let merged = merge(&a, &b);
        assert_eq!(merged.generation, 2);
        assert_eq!(merged.status, PeerStatus::Suspect);
    }

    #[test]
    fn equal_generation_worse_status_wins() {
        let a = PeerView { generation: 1, status: PeerStatus::Alive, ..PeerView::alive("p", 0) };
        let b = PeerView { generation: 1, status: PeerStatus::Dead, ..PeerView::alive("p", 1) };
        let merged = merge(&a, &b);
        assert_eq!(merged.status, PeerStatus::Dead);
        assert_eq!(merged.last_seen_ms, 1);
    }

    #[test]
    fn higher_generation_alive_rehabilitates() {
        let a = PeerView { generation: 1, status: PeerStatus::Dead, ..PeerView::alive("p", 0) };
        let b = PeerView { generation: 2, status: PeerStatus::Alive, ..PeerView::alive("p", 10) };
        let merged = merge(&a, &b);
        assert_eq!(merged.status, PeerStatus::Alive);
    }

    #[test]
    fn silence_past_suspect_timeout_demotes_and_bumps_generation() {
        let table = PeerTable::new(100, 200);
        table.touch_alive("p", 0);
        let changed = table.tick(150);
        assert_eq!(changed, vec![("p".to_string(), PeerStatus::Suspect)]);
        assert_eq!(table.get("p").unwrap().generation, 1);
    }

    #[test]
    fn fanout_never_exceeds_candidate_count() {
        let candidates = vec!["a".into(), "b".into()];
        let picked = pick_fanout(&candidates, 5, 42);
        assert_eq!(picked.len(), 2);
    }
}
