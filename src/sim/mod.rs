//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - Time comes from the caller, never from a wall clock
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod lane;
pub mod obstacle;
pub mod pattern;
pub mod player;
pub mod progress;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, obstacle_hit};
pub use difficulty::DifficultyTier;
pub use lane::Lane;
pub use obstacle::{Obstacle, ObstacleArena};
pub use pattern::{BUILTIN_PATTERNS, PatternTable, SpawnPattern};
pub use player::{JumpPhase, LaneTransition, PlayerState};
pub use progress::{ProgressTracker, ProgressUpdate};
pub use spawner::{ObstacleSpawner, SpawnOutcome};
pub use state::{GameEvent, RemovalReason, RunPhase, RunSession};
pub use tick::{RunController, TickInput};
