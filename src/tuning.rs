//! Data-driven game balance
//!
//! Every designer-facing number lives here so a run can be retuned from a
//! JSON file without touching the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::REFERENCE_HZ;
use crate::error::SimError;

/// How obstacles advance each tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionModel {
    /// `z += speed` once per tick, whatever the frame time
    #[default]
    FixedStep,
    /// `z += speed * dt * reference_hz`, frame-rate independent
    TimeScaled { reference_hz: f32 },
}

impl MotionModel {
    /// Frame-rate independent motion at the rate speeds were tuned for
    pub fn time_scaled() -> Self {
        MotionModel::TimeScaled {
            reference_hz: REFERENCE_HZ,
        }
    }

    /// Distance covered this tick by something moving at `speed`
    #[inline]
    pub fn displacement(&self, speed: f32, dt: f32) -> f32 {
        match *self {
            MotionModel::FixedStep => speed,
            MotionModel::TimeScaled { reference_hz } => speed * dt * reference_hz,
        }
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Jump apex above ground level
    pub jump_height: f32,
    /// Total air time of one jump (seconds)
    pub jump_duration: f32,
    /// Minimum time between jump launches (seconds)
    pub jump_cooldown: f32,
    /// Lane change animation length (seconds)
    pub lane_transition_duration: f32,

    // === Obstacle speed (per tick) ===
    pub obstacle_base_speed: f32,
    /// Added per tier above 1
    pub tier_speed_step: f32,
    pub tier_speed_cap: f32,
    /// Added per unit of distance traveled
    pub distance_speed_slope: f32,
    pub distance_speed_cap: f32,
    pub motion: MotionModel,
    /// Obstacles past this depth leave the field
    pub despawn_z: f32,

    // === Spawn spacing ===
    pub spawn_interval_base: f32,
    pub spawn_interval_min: f32,
    /// Subtracted per tier above 1
    pub tier_interval_step: f32,
    pub distance_interval_slope: f32,
    pub distance_interval_cap: f32,
    /// Seconds of delay per tick an obstacle needs to cover one interval
    pub spawn_delay_scale: f32,
    /// Deepest point the spawn cursor may recede to
    pub spawn_horizon_z: f32,
    /// Delay before the scheduler first runs in a fresh run (seconds)
    pub first_spawn_delay: f32,

    // === Pattern pacing (seconds) ===
    pub pattern_delay_base: f32,
    pub pattern_delay_min: f32,
    pub tier_pattern_delay_step: f32,
    pub distance_pattern_delay_slope: f32,
    pub distance_pattern_delay_cap: f32,

    // === Progress ===
    /// Corridor scroll speed (distance units per second)
    pub environment_speed: f32,
    /// Distance is folded in at this granularity (seconds)
    pub progress_sample_interval: f32,

    // === Clock ===
    /// Longest frame the simulation will integrate in one tick (seconds)
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            jump_height: 3.5,
            jump_duration: 0.5,
            jump_cooldown: 0.5,
            lane_transition_duration: 0.2,

            obstacle_base_speed: 0.3,
            tier_speed_step: 0.05,
            tier_speed_cap: 0.1,
            distance_speed_slope: 0.0005,
            distance_speed_cap: 0.15,
            motion: MotionModel::FixedStep,
            despawn_z: 10.0,

            spawn_interval_base: 20.0,
            spawn_interval_min: 15.0,
            tier_interval_step: 1.0,
            distance_interval_slope: 0.01,
            distance_interval_cap: 4.0,
            spawn_delay_scale: 1.0 / REFERENCE_HZ,
            spawn_horizon_z: -160.0,
            first_spawn_delay: 2.0,

            pattern_delay_base: 1.2,
            pattern_delay_min: 0.4,
            tier_pattern_delay_step: 0.2,
            distance_pattern_delay_slope: 0.002,
            distance_pattern_delay_cap: 0.5,

            environment_speed: 18.0,
            progress_sample_interval: 0.1,

            max_frame_dt: 0.25,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Downward acceleration giving an apex of `jump_height` after half the air time
    pub fn gravity(&self) -> f32 {
        -8.0 * self.jump_height / (self.jump_duration * self.jump_duration)
    }

    /// Launch velocity that lands exactly `jump_duration` after take-off
    pub fn jump_force(&self) -> f32 {
        -self.gravity() * self.jump_duration / 2.0
    }

    /// Check value constraints
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = [
            ("jump_height", self.jump_height),
            ("jump_duration", self.jump_duration),
            ("lane_transition_duration", self.lane_transition_duration),
            ("obstacle_base_speed", self.obstacle_base_speed),
            ("spawn_interval_min", self.spawn_interval_min),
            ("spawn_delay_scale", self.spawn_delay_scale),
            ("progress_sample_interval", self.progress_sample_interval),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("jump_cooldown", self.jump_cooldown),
            ("tier_speed_step", self.tier_speed_step),
            ("tier_speed_cap", self.tier_speed_cap),
            ("distance_speed_slope", self.distance_speed_slope),
            ("distance_speed_cap", self.distance_speed_cap),
            ("tier_interval_step", self.tier_interval_step),
            ("distance_interval_slope", self.distance_interval_slope),
            ("distance_interval_cap", self.distance_interval_cap),
            ("first_spawn_delay", self.first_spawn_delay),
            ("pattern_delay_min", self.pattern_delay_min),
            ("tier_pattern_delay_step", self.tier_pattern_delay_step),
            ("distance_pattern_delay_slope", self.distance_pattern_delay_slope),
            ("distance_pattern_delay_cap", self.distance_pattern_delay_cap),
            ("environment_speed", self.environment_speed),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidTuning(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if !(self.despawn_z.is_finite() && self.spawn_horizon_z.is_finite()) {
            return Err(SimError::InvalidTuning(
                "despawn_z and spawn_horizon_z must be finite".to_string(),
            ));
        }
        if self.spawn_horizon_z >= self.despawn_z {
            return Err(SimError::InvalidTuning(
                "spawn_horizon_z must lie before despawn_z".to_string(),
            ));
        }
        if self.spawn_interval_base < self.spawn_interval_min {
            return Err(SimError::InvalidTuning(
                "spawn_interval_base is below spawn_interval_min".to_string(),
            ));
        }
        if self.pattern_delay_base < self.pattern_delay_min {
            return Err(SimError::InvalidTuning(
                "pattern_delay_base is below pattern_delay_min".to_string(),
            ));
        }
        if let MotionModel::TimeScaled { reference_hz } = self.motion {
            if !(reference_hz.is_finite() && reference_hz > 0.0) {
                return Err(SimError::InvalidTuning(format!(
                    "reference_hz must be positive, got {reference_hz}"
                )));
            }
        }
        Ok(())
    }
}
