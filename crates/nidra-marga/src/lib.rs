//! Marga, the stateless routing decision, and Turiya, the budget-aware
//! contextual router layered on top of it.

pub mod bindings;
pub mod decide;
pub mod pravritti;
pub mod turiya;
pub mod types;
pub mod vichara;

pub use decide::decide;
pub use types::{
    BindingStrategy, Complexity, MargaDecideRequest, MargaDecision, ModelRef, Resolution, TaskType,
    DECISION_VERSION,
};
