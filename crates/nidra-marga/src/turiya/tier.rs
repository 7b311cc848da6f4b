//! The four budget tiers Turiya chooses between.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    NoLlm,
    Haiku,
    Sonnet,
    Opus,
}

pub const TIERS: [Tier; 4] = [Tier::NoLlm, Tier::Haiku, Tier::Sonnet, Tier::Opus];

impl Tier {
    pub fn index(self) -> usize {
        TIERS.iter().position(|t| *t == self).unwrap()
    }

    /// Rough relative cost per call, used for the Lagrangian budget term
    /// and the opus-baseline savings comparison.
    pub fn unit_cost(self) -> f64 {
        match self {
            Tier::NoLlm => 0.0,
            Tier::Haiku => 1.0,
            Tier::Sonnet => 5.0,
            Tier::Opus => 25.0,
        }
    }

    pub fn next(self) -> Option<Tier> {
        TIERS.get(self.index() + 1).copied()
    }
}
