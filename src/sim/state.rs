//! Run state and the events it emits
//!
//! Everything a run mutates lives in one [`RunSession`] owned by the
//! controller; there is no ambient state.

use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyTier;
use super::lane::Lane;
use super::obstacle::ObstacleArena;
use super::pattern::PatternTable;
use super::player::PlayerState;
use super::progress::ProgressTracker;
use super::spawner::ObstacleSpawner;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Menu, before the first start or after leaving a run
    #[default]
    Idle,
    Running,
    /// Simulation frozen until restart or back-to-menu
    GameOver,
}

/// Why an obstacle left the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// Passed the player without contact
    Despawned,
    /// Consumed by the collision that ended the run
    Collided,
    /// Cleared by start/restart/menu regardless of lifecycle
    Forced,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    RunStarted { seed: u64 },
    DistanceUpdated { distance: f32 },
    TierChanged { tier: DifficultyTier },
    ObstacleSpawned { id: u32, lane: Lane, x: f32, z: f32 },
    ObstacleRemoved { id: u32, reason: RemovalReason },
    GameOver { final_score: u32 },
}

/// All mutable state of one run
#[derive(Debug, Clone)]
pub struct RunSession {
    pub phase: RunPhase,
    /// Seed the current run's spawner was started with
    pub seed: u64,
    /// Monotonic sim clock (seconds since start)
    pub clock: f32,
    pub ticks: u64,
    pub player: PlayerState,
    pub progress: ProgressTracker,
    pub spawner: ObstacleSpawner,
    pub obstacles: ObstacleArena,
    events: Vec<GameEvent>,
    final_score: Option<u32>,
}

impl RunSession {
    pub fn new(tuning: &Tuning, table: PatternTable, seed: u64) -> Self {
        Self {
            phase: RunPhase::Idle,
            seed,
            clock: 0.0,
            ticks: 0,
            player: PlayerState::new(tuning),
            progress: ProgressTracker::new(tuning.progress_sample_interval),
            spawner: ObstacleSpawner::new(table, seed),
            obstacles: ObstacleArena::new(),
            events: Vec::new(),
            final_score: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn tier(&self) -> DifficultyTier {
        self.progress.tier()
    }

    /// Score of the finished run, once it has ended
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop every obstacle immediately, reporting each as forced out
    pub fn clear_obstacles(&mut self) {
        for id in self.obstacles.clear() {
            self.events.push(GameEvent::ObstacleRemoved {
                id,
                reason: RemovalReason::Forced,
            });
        }
    }

    /// Record the end of the run; only the first call has any effect
    pub fn finish(&mut self) -> bool {
        if self.final_score.is_some() {
            return false;
        }
        let final_score = self.progress.score();
        self.final_score = Some(final_score);
        self.phase = RunPhase::GameOver;
        self.events.push(GameEvent::GameOver { final_score });
        true
    }

    /// Rewind to a fresh run at t = 0
    pub(crate) fn reset(&mut self, seed: u64, tuning: &Tuning) {
        self.seed = seed;
        self.clock = 0.0;
        self.ticks = 0;
        self.player.reset();
        self.progress.reset();
        self.spawner.reset(seed, 0.0, tuning);
        self.final_score = None;
    }
}
