//! Obstacles and the arena that owns them

use glam::Vec3;

use super::collision::Aabb;
use super::lane::Lane;
use crate::consts::{OBSTACLE_BASE_Y, OBSTACLE_BOUNDS_MAX, OBSTACLE_BOUNDS_MIN};
use crate::tuning::MotionModel;

/// A single obstacle travelling toward the player (+Z)
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub lane: Lane,
    pub z: f32,
    /// Per-tick speed, fixed at spawn
    pub speed: f32,
    alive: bool,
}

impl Obstacle {
    pub fn new(id: u32, lane: Lane, z: f32, speed: f32) -> Self {
        Self {
            id,
            lane,
            z,
            speed,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn x(&self) -> f32 {
        self.lane.offset()
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x(), OBSTACLE_BASE_Y, self.z)
    }

    pub fn collider(&self) -> Aabb {
        Aabb::around(self.position(), OBSTACLE_BOUNDS_MIN, OBSTACLE_BOUNDS_MAX)
    }

    /// Move one tick; true once the obstacle is past `despawn_z`
    pub fn advance(&mut self, motion: MotionModel, dt: f32, despawn_z: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.z += motion.displacement(self.speed, dt);
        self.z > despawn_z
    }

    /// Take the obstacle out of play; false if it already was
    pub fn remove(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}

/// Live obstacles in spawn order, keyed by stable id
///
/// Removal marks an entry dead; [`ObstacleArena::compact`] drops the dead
/// ones in a separate pass so nothing shifts under an iterator.
#[derive(Debug, Clone)]
pub struct ObstacleArena {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl Default for ObstacleArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleArena {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate an id and insert; returns the new id
    pub fn spawn(&mut self, lane: Lane, z: f32, speed: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(id, lane, z, speed));
        id
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles
            .binary_search_by_key(&id, |o| o.id)
            .ok()
            .map(|i| &self.obstacles[i])
    }

    /// Mark an obstacle dead; false if unknown or already removed
    pub fn remove(&mut self, id: u32) -> bool {
        match self.obstacles.binary_search_by_key(&id, |o| o.id) {
            Ok(i) => self.obstacles[i].remove(),
            Err(_) => false,
        }
    }

    /// Advance every live obstacle and mark those past `despawn_z`.
    /// Returns the ids marked this call, in spawn order.
    pub fn advance(&mut self, motion: MotionModel, dt: f32, despawn_z: f32) -> Vec<u32> {
        let mut expired = Vec::new();
        for obstacle in &mut self.obstacles {
            if obstacle.advance(motion, dt, despawn_z) && obstacle.remove() {
                expired.push(obstacle.id);
            }
        }
        expired
    }

    /// Drop dead entries
    pub fn compact(&mut self) {
        self.obstacles.retain(|o| o.alive);
    }

    /// Mark everything dead and drop it at once; returns the ids that were live
    pub fn clear(&mut self) -> Vec<u32> {
        let ids = self.alive().map(|o| o.id).collect();
        self.obstacles.clear();
        ids
    }

    /// Live obstacles in spawn order
    pub fn alive(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.alive)
    }

    pub fn len(&self) -> usize {
        self.alive().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
