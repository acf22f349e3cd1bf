//! Bounding-volume collision
//!
//! Player and obstacles are both axis-aligned boxes. A hit needs the boxes to
//! overlap *and* the player's feet to be below the top of the obstacle, so a
//! high enough jump clears it.

use glam::Vec3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box at `anchor` with bounds given relative to it
    pub fn around(anchor: Vec3, rel_min: Vec3, rel_max: Vec3) -> Self {
        let (min, max) = crate::bounds_at(anchor, rel_min, rel_max);
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Closed-interval overlap on every axis (touching faces count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y
            || other.max.z < self.min.z
            || other.min.z > self.max.z)
    }
}

/// Does the obstacle hurt the player this tick?
#[inline]
pub fn obstacle_hit(player: &Aabb, obstacle: &Aabb) -> bool {
    player.intersects(obstacle) && player.min.y < obstacle.max.y
}
