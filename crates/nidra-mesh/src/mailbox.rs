//! Priority-lane mailbox: 4 lanes (0..3), high-priority first, FIFO
//! within a lane. Exclusively owned by its actor; the router only
//! enqueues.

use std::collections::VecDeque;

use crate::envelope::Envelope;

const LANES: usize = 4;

/// Outcome of [`PriorityMailbox::enqueue`], used by the caller to decide
/// whether to emit a `mailbox_overflow` event.
pub enum EnqueueOutcome {
    Enqueued,
    /// The incoming message itself was dropped; mailbox was full and no
    /// lower-priority lane had anything to evict.
    DroppedIncoming,
    /// An older, lower-priority message was evicted to make room.
    EvictedOlder,
}

pub struct PriorityMailbox {
    lanes: [VecDeque<Envelope>; LANES],
    max_size: usize,
}

impl PriorityMailbox {
    pub fn new(max_size: usize) -> Self {
        Self { lanes: Default::default(), max_size }
    }

    pub fn len(&self) -> usize {
        self.lanes.iter().map(|l| l.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enqueue discipline: if there is room, push onto the envelope's own
    /// lane. Otherwise drop the oldest message in the lowest-priority
    /// non-empty lane strictly below the incoming priority. If no such
    /// lane exists (the mailbox is saturated with messages at or above
    /// the incoming priority), drop the incoming message instead.
    pub fn enqueue(&mut self, envelope: Envelope) -> EnqueueOutcome {
        let priority = (envelope.priority as usize).min(LANES - 1);
        if self.len() < self.max_size {
            self.lanes[priority].push_back(envelope);
            return EnqueueOutcome::Enqueued;
        }

        let victim_lane = (0..priority).find(|p| !self.lanes[*p].is_empty());
        match victim_lane {
            Some(lane) => {
                self.lanes[lane].pop_front();
                self.lanes[priority].push_back(envelope);
                EnqueueOutcome::EvictedOlder
            }
            None => EnqueueOutcome::DroppedIncoming,
        }
    }

    /// Highest non-empty lane first, FIFO within it.
    pub fn dequeue(&mut self) -> Option<Envelope> {
        for lane in self.lanes.iter_mut().rev() {
            if let Some(envelope) = lane.pop_front() {
                return Some(envelope);
            }
        }
        None
    }
}
