//! Startup validation errors
//!
//! Gameplay itself never fails: out-of-order commands are ignored and bad
//! frame times are clamped. Only malformed data is rejected, and only before
//! a run can begin.

use thiserror::Error;

use crate::sim::DifficultyTier;

#[derive(Debug, Error)]
pub enum SimError {
    /// A tier has nothing to spawn, which would stall the scheduler forever
    #[error("no spawn patterns available for difficulty tier {tier}")]
    EmptyPool { tier: DifficultyTier },

    #[error("spawn pattern `{name}` has no steps")]
    EmptyPattern { name: &'static str },

    #[error("spawn pattern `{name}` step {step} spawns nothing")]
    EmptyStep { name: &'static str, step: usize },

    #[error("spawn pattern `{name}` step {step} blocks every lane")]
    CrowdedStep { name: &'static str, step: usize },

    /// Tier 1 must always leave two lanes open
    #[error("tier 1 pattern `{name}` step {step} spawns more than one obstacle")]
    MultiLaneTierOne { name: &'static str, step: usize },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to parse tuning: {0}")]
    Config(#[from] serde_json::Error),
}
