//! Obstacle scheduling
//!
//! The spawner never sleeps or re-arms itself: it keeps a "next attempt due
//! at" time and the controller offers it the clock once per tick. When due it
//! emits one step of the current pattern, starting a new pattern first if the
//! old one is used up and the pattern delay has passed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::difficulty::{self, DifficultyTier};
use super::lane::Lane;
use super::obstacle::ObstacleArena;
use super::pattern::{PatternTable, SpawnPattern};
use crate::consts::{FIRST_SPAWN_Z, INITIAL_OBSTACLE_Z};
use crate::tuning::Tuning;

/// What a scheduling attempt did
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnOutcome {
    /// Next attempt is not due yet
    Idle,
    /// Due, but the next pattern may not start yet
    Deferred,
    /// One pattern step was placed
    Spawned {
        pattern: &'static str,
        ids: Vec<u32>,
    },
}

#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    table: PatternTable,
    rng: Pcg32,
    next_spawn_z: f32,
    current: Option<&'static SpawnPattern>,
    step_index: usize,
    last_pattern_time: f32,
    next_attempt_at: f32,
    /// Lane of the last step when it was a single obstacle
    last_single_lane: Option<Lane>,
}

impl ObstacleSpawner {
    pub fn new(table: PatternTable, seed: u64) -> Self {
        Self {
            table,
            rng: Pcg32::seed_from_u64(seed),
            next_spawn_z: FIRST_SPAWN_Z,
            current: None,
            step_index: 0,
            last_pattern_time: f32::NEG_INFINITY,
            next_attempt_at: 0.0,
            last_single_lane: None,
        }
    }

    /// Rewind for a fresh run starting at sim time `now`
    pub fn reset(&mut self, seed: u64, now: f32, tuning: &Tuning) {
        self.rng = Pcg32::seed_from_u64(seed);
        self.next_spawn_z = FIRST_SPAWN_Z;
        self.current = None;
        self.step_index = 0;
        self.last_pattern_time = f32::NEG_INFINITY;
        self.next_attempt_at = now + tuning.first_spawn_delay;
        self.last_single_lane = None;
    }

    pub fn next_spawn_z(&self) -> f32 {
        self.next_spawn_z
    }

    pub fn next_attempt_at(&self) -> f32 {
        self.next_attempt_at
    }

    pub fn current_pattern(&self) -> Option<&'static SpawnPattern> {
        self.current
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Place the opening field of a run directly, bypassing the scheduler.
    /// One obstacle per depth, so every row is dodgeable.
    pub fn seed_initial_field(&mut self, arena: &mut ObstacleArena, tuning: &Tuning) -> Vec<u32> {
        let speed = difficulty::obstacle_speed(tuning, DifficultyTier::One, 0.0);
        INITIAL_OBSTACLE_Z
            .iter()
            .map(|&z| {
                let lane = Lane::ALL[self.rng.random_range(0..Lane::ALL.len())];
                arena.spawn(lane, z, speed)
            })
            .collect()
    }

    /// One scheduling attempt at sim time `now`
    pub fn update(
        &mut self,
        now: f32,
        tier: DifficultyTier,
        distance: f32,
        tuning: &Tuning,
        arena: &mut ObstacleArena,
    ) -> SpawnOutcome {
        if now < self.next_attempt_at {
            return SpawnOutcome::Idle;
        }

        let pattern = match self.current {
            Some(pattern) if self.step_index < pattern.steps.len() => pattern,
            _ => {
                let delay = difficulty::pattern_delay(tuning, tier, distance);
                if now - self.last_pattern_time < delay {
                    return SpawnOutcome::Deferred;
                }
                let avoid = match tier {
                    DifficultyTier::One => self.last_single_lane,
                    _ => None,
                };
                let pattern = self.table.sample(tier, avoid, &mut self.rng);
                log::debug!("Tier {tier}: starting pattern `{}` at t={now:.2}", pattern.name);
                self.current = Some(pattern);
                self.step_index = 0;
                self.last_pattern_time = now;
                pattern
            }
        };

        let lanes = pattern.steps[self.step_index];
        let speed = difficulty::obstacle_speed(tuning, tier, distance);
        let ids: Vec<u32> = lanes
            .iter()
            .map(|&lane| arena.spawn(lane, self.next_spawn_z, speed))
            .collect();
        self.last_single_lane = match lanes {
            [lane] => Some(*lane),
            _ => None,
        };
        self.step_index += 1;

        let interval = difficulty::spawn_interval(tuning, tier, distance);
        self.next_spawn_z = (self.next_spawn_z - interval).max(tuning.spawn_horizon_z);
        self.next_attempt_at = now + difficulty::spawn_delay(tuning, interval, speed);

        SpawnOutcome::Spawned {
            pattern: pattern.name,
            ids,
        }
    }
}
