use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthState {
    Stopped,
    Healthy,
    Degraded,
    Crashed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Severity a broadcast collaborator is told about a health transition.
pub fn severity_of(next: HealthState) -> Severity {
    match next {
        HealthState::Crashed => Severity::Critical,
        HealthState::Degraded => Severity::Warning,
        HealthState::Healthy | HealthState::Stopped => Severity::Info,
    }
}
