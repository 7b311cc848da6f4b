//! Lock-free actor mesh: priority mailboxes, envelope routing with
//! request/reply correlation, gossip-based peer views, and the actor
//! system that owns them.

pub mod config;
pub mod envelope;
pub mod error;
pub mod events;
pub mod gossip;
pub mod mailbox;
pub mod router;
pub mod system;

pub use config::MeshConfig;
pub use envelope::{Envelope, EnvelopeKind};
pub use error::MeshError;
pub use events::RouterEvent;
pub use gossip::{PeerStatus, PeerView};
pub use mailbox::PriorityMailbox;
pub use router::{AskOptions, MeshRouter};
pub use system::{ActorRef, ActorSystem, Behavior, BehaviorResult};
