//! Turiya: the budget-aware contextual router layered on top of
//! Marga's stateless decision (`tier` is the currency both speak).

pub mod arm;
pub mod config;
pub mod context;
pub mod router;
pub mod tier;

pub use arm::ArmStats;
pub use config::TuriyaConfig;
pub use context::{extract_context, DecisionContext};
pub use router::{CascadeResult, TierStat, TuriyaClassification, TuriyaRouter, TuriyaState, TuriyaStats};
pub use tier::{Tier, TIERS};
