//! Lane Runner - simulation core for a three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, spawning, collisions)
//! - `tuning`: Data-driven game balance
//! - `error`: Startup validation errors
//! - `web`: Browser binding for the render loop (wasm32 only)

pub mod error;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::SimError;
pub use tuning::{MotionModel, Tuning};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Simulation rate the per-tick obstacle speeds were tuned against
    pub const REFERENCE_HZ: f32 = 60.0;
    /// Fixed frame time of the headless runner
    pub const SIM_DT: f32 = 1.0 / REFERENCE_HZ;

    /// Lane world offsets along X
    pub const LANE_OFFSET_LEFT: f32 = -4.0;
    pub const LANE_OFFSET_CENTER: f32 = 0.0;
    pub const LANE_OFFSET_RIGHT: f32 = 4.0;

    /// Player rest height (bottom of the run corridor is y = 0)
    pub const GROUND_LEVEL: f32 = 1.0;
    /// Player depth; obstacles travel toward +Z and pass this plane
    pub const PLAYER_Z: f32 = 4.0;

    /// Player bounds relative to its anchor (body, head and glow shell)
    pub const PLAYER_BOUNDS_MIN: Vec3 = Vec3::new(-0.8, -0.8, -0.8);
    pub const PLAYER_BOUNDS_MAX: Vec3 = Vec3::new(0.8, 1.4, 0.8);

    /// Obstacle anchor height above the floor
    pub const OBSTACLE_BASE_Y: f32 = 0.25;
    /// Obstacle bounds relative to its anchor (base, spike and glow shell)
    pub const OBSTACLE_BOUNDS_MIN: Vec3 = Vec3::new(-1.0, -1.0, -1.0);
    pub const OBSTACLE_BOUNDS_MAX: Vec3 = Vec3::new(1.0, 2.25, 1.0);

    /// Depths of the pre-seeded obstacle field for a fresh run
    pub const INITIAL_OBSTACLE_Z: [f32; 3] = [-80.0, -60.0, -40.0];
    /// First scheduled spawn depth
    pub const FIRST_SPAWN_Z: f32 = -100.0;

    /// Difficulty thresholds (absolute distance)
    pub const TIER_TWO_DISTANCE: f32 = 150.0;
    pub const TIER_THREE_DISTANCE: f32 = 300.0;
}

/// Quadratic ease-in-out on [0, 1]
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Offset a relative bounds pair by an anchor position
#[inline]
pub fn bounds_at(anchor: Vec3, min: Vec3, max: Vec3) -> (Vec3, Vec3) {
    (anchor + min, anchor + max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-6);
        // Out-of-range input is clamped
        assert_eq!(ease_in_out_quad(2.0), 1.0);
        assert_eq!(ease_in_out_quad(-1.0), 0.0);
    }

    #[test]
    fn test_bounds_at() {
        let (min, max) = bounds_at(Vec3::new(4.0, 1.0, 0.0), Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(min, Vec3::new(3.0, 0.0, -1.0));
        assert_eq!(max, Vec3::new(5.0, 2.0, 1.0));
    }
}
