//! Difficulty progression
//!
//! Pure functions from distance traveled (and the tier it implies) to the
//! numbers the spawner works with. Distances here are magnitudes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{TIER_THREE_DISTANCE, TIER_TWO_DISTANCE};
use crate::tuning::Tuning;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum DifficultyTier {
    #[default]
    One,
    Two,
    Three,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] =
        [DifficultyTier::One, DifficultyTier::Two, DifficultyTier::Three];

    /// Tier implied by an absolute distance
    pub fn for_distance(distance: f32) -> Self {
        if distance >= TIER_THREE_DISTANCE {
            DifficultyTier::Three
        } else if distance >= TIER_TWO_DISTANCE {
            DifficultyTier::Two
        } else {
            DifficultyTier::One
        }
    }

    /// 1-based level
    pub fn level(self) -> u8 {
        match self {
            DifficultyTier::One => 1,
            DifficultyTier::Two => 2,
            DifficultyTier::Three => 3,
        }
    }

    /// Levels above the first, as a multiplier for per-tier steps
    #[inline]
    fn steps_above_first(self) -> f32 {
        f32::from(self.level() - 1)
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// Per-tick obstacle speed for a fresh spawn
pub fn obstacle_speed(tuning: &Tuning, tier: DifficultyTier, distance: f32) -> f32 {
    let tier_bonus = (tuning.tier_speed_step * tier.steps_above_first()).min(tuning.tier_speed_cap);
    let distance_bonus =
        (tuning.distance_speed_slope * distance.abs()).min(tuning.distance_speed_cap);
    tuning.obstacle_base_speed + tier_bonus + distance_bonus
}

/// Depth gap between consecutive spawn steps
pub fn spawn_interval(tuning: &Tuning, tier: DifficultyTier, distance: f32) -> f32 {
    let distance_reduction =
        (tuning.distance_interval_slope * distance.abs()).min(tuning.distance_interval_cap);
    let tier_reduction = tuning.tier_interval_step * tier.steps_above_first();
    let interval = tuning.spawn_interval_base - distance_reduction - tier_reduction;
    interval.max(tuning.spawn_interval_min)
}

/// Minimum time between the starts of two patterns (seconds)
pub fn pattern_delay(tuning: &Tuning, tier: DifficultyTier, distance: f32) -> f32 {
    let distance_reduction = (tuning.distance_pattern_delay_slope * distance.abs())
        .min(tuning.distance_pattern_delay_cap);
    let tier_reduction = tuning.tier_pattern_delay_step * tier.steps_above_first();
    (tuning.pattern_delay_base - distance_reduction - tier_reduction).max(tuning.pattern_delay_min)
}

/// Time until the next scheduling attempt, normalized by obstacle speed so
/// steps stay evenly spaced in time however fast they travel
pub fn spawn_delay(tuning: &Tuning, interval: f32, speed: f32) -> f32 {
    interval / speed.max(f32::EPSILON) * tuning.spawn_delay_scale
}
