//! Request/response shapes for the stateless routing decision.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The current shape/semantics version of [`MargaDecision`]. Bump whenever
/// a field is added, removed, or reinterpreted.
pub const DECISION_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    CodeGen,
    Reasoning,
    Chat,
    Smalltalk,
    ToolExec,
    Vision,
    Search,
    Memory,
    FileOp,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Trivial,
    Simple,
    Medium,
    Complex,
    Expert,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Resolution {
    Llm,
    ToolOnly,
    LocalCompute,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BindingStrategy {
    Local,
    Cloud,
    Hybrid,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelRef {
    pub provider_id: String,
    pub model_id: String,
}

impl ModelRef {
    pub fn new(provider_id: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self { provider_id: provider_id.into(), model_id: model_id.into() }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MargaDecideRequest {
    pub message: String,
    #[serde(default)]
    pub has_tools: bool,
    #[serde(default)]
    pub has_images: bool,
    #[serde(default = "default_binding_strategy")]
    pub binding_strategy: BindingStrategy,
    /// Advisory `providerId -> isHealthy` map. Never changes the selection,
    /// only whether a warning hint is attached.
    #[serde(default)]
    pub provider_health: Option<HashMap<String, bool>>,
}

fn default_binding_strategy() -> BindingStrategy {
    BindingStrategy::Hybrid
}

impl MargaDecideRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            has_tools: false,
            has_images: false,
            binding_strategy: BindingStrategy::Hybrid,
            provider_health: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MargaDecision {
    pub decision_version: u32,
    pub provider_id: String,
    pub model_id: String,
    pub task_type: TaskType,
    pub resolution: Resolution,
    pub complexity: Complexity,
    pub skip_llm: bool,
    pub escalation_chain: Vec<ModelRef>,
    pub rationale: String,
    pub confidence: f64,
    pub decision_time_ms: f64,
    pub secondary_task_type: Option<TaskType>,
    pub checkin_subtype: Option<String>,
    pub abstain: bool,
    pub abstain_reason: Option<String>,
    pub provider_health_hints: Option<Vec<String>>,
    pub temperature: Option<f64>,
}
