//! Run controller and the per-frame tick
//!
//! Order within a tick: progress, player, obstacles (advance then collect),
//! spawning, collisions. The first collision in spawn order ends the run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::obstacle_hit;
use super::difficulty::DifficultyTier;
use super::pattern::PatternTable;
use super::spawner::SpawnOutcome;
use super::state::{GameEvent, RemovalReason, RunPhase, RunSession};
use crate::error::SimError;
use crate::tuning::Tuning;

/// Logical input for one tick
///
/// Flags mirror held keys: a held key reasserts its command every tick, and
/// the player ignores it while the command is not currently valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

/// Owns the session and drives it from an external frame clock
#[derive(Debug, Clone)]
pub struct RunController {
    tuning: Tuning,
    table: PatternTable,
    /// Source of per-run seeds
    seeds: Pcg32,
    session: RunSession,
}

impl RunController {
    /// Validate tuning and the built-in pattern table
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, SimError> {
        Self::with_patterns(tuning, PatternTable::builtin()?, seed)
    }

    pub fn with_patterns(tuning: Tuning, table: PatternTable, seed: u64) -> Result<Self, SimError> {
        tuning.validate()?;
        let session = RunSession::new(&tuning, table, seed);
        Ok(Self {
            tuning,
            table,
            seeds: Pcg32::seed_from_u64(seed),
            session,
        })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.table
    }

    pub fn session(&self) -> &RunSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut RunSession {
        &mut self.session
    }

    pub fn phase(&self) -> RunPhase {
        self.session.phase
    }

    pub fn tier(&self) -> DifficultyTier {
        self.session.tier()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    /// Begin a fresh run from any phase
    pub fn start(&mut self) {
        let seed = self.seeds.random::<u64>();
        let session = &mut self.session;
        session.clear_obstacles();
        session.reset(seed, &self.tuning);

        let ids = session
            .spawner
            .seed_initial_field(&mut session.obstacles, &self.tuning);
        session.phase = RunPhase::Running;
        session.push_event(GameEvent::RunStarted { seed });
        for id in ids {
            push_spawned(session, id);
        }
        log::info!("Run started (seed {seed:#x})");
    }

    /// Start over, dropping any in-flight obstacles on the spot
    pub fn restart(&mut self) {
        log::info!(
            "Restarting from {:?} with {} obstacles in play",
            self.session.phase,
            self.session.obstacles.len()
        );
        self.start();
    }

    /// Leave the run for the menu
    pub fn back_to_menu(&mut self) {
        self.session.clear_obstacles();
        self.session.player.reset();
        self.session.phase = RunPhase::Idle;
        log::info!("Back to menu");
    }

    /// Advance one frame of `dt` seconds; no-op unless running
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        if self.session.phase != RunPhase::Running {
            return;
        }
        let dt = self.sanitize_dt(dt);
        let tuning = &self.tuning;
        let session = &mut self.session;

        session.clock += dt;
        session.ticks += 1;
        let now = session.clock;

        // Progress
        let update = session.progress.advance(dt, tuning.environment_speed);
        if update.distance_changed {
            session.push_event(GameEvent::DistanceUpdated {
                distance: session.progress.traveled(),
            });
        }
        if let Some(tier) = update.tier_raised {
            log::info!(
                "Difficulty tier {tier} at distance {:.1}",
                session.progress.traveled()
            );
            session.push_event(GameEvent::TierChanged { tier });
        }

        // Player
        if input.move_left {
            session.player.move_left();
        }
        if input.move_right {
            session.player.move_right();
        }
        if input.jump {
            session.player.jump(now);
        }
        session.player.advance(dt, now);

        // Obstacles
        let expired = session
            .obstacles
            .advance(tuning.motion, dt, tuning.despawn_z);
        session.obstacles.compact();
        for id in expired {
            log::debug!("Obstacle {id} despawned");
            session.push_event(GameEvent::ObstacleRemoved {
                id,
                reason: RemovalReason::Despawned,
            });
        }

        // Spawning
        let tier = session.progress.tier();
        let traveled = session.progress.traveled();
        if let SpawnOutcome::Spawned { pattern, ids } =
            session
                .spawner
                .update(now, tier, traveled, tuning, &mut session.obstacles)
        {
            log::debug!("Pattern `{pattern}` placed {} obstacle(s)", ids.len());
            for id in ids {
                push_spawned(session, id);
            }
        }

        // Collisions
        let player_box = session.player.collider();
        let hit = session
            .obstacles
            .alive()
            .find(|o| obstacle_hit(&player_box, &o.collider()))
            .map(|o| o.id);
        if let Some(id) = hit {
            session.obstacles.remove(id);
            session.obstacles.compact();
            session.push_event(GameEvent::ObstacleRemoved {
                id,
                reason: RemovalReason::Collided,
            });
            if session.finish() {
                log::info!(
                    "Game over: hit obstacle {id} after {:.1} units (score {})",
                    session.progress.traveled(),
                    session.progress.score()
                );
            }
        }
    }

    /// Negative or NaN frame times become zero; long frames are capped
    fn sanitize_dt(&self, dt: f32) -> f32 {
        if dt.is_nan() || dt < 0.0 {
            log::warn!("Clamping invalid frame time {dt} to zero");
            return 0.0;
        }
        if dt > self.tuning.max_frame_dt {
            log::debug!("Capping frame time {dt:.3}s");
            return self.tuning.max_frame_dt;
        }
        dt
    }
}

fn push_spawned(session: &mut RunSession, id: u32) {
    let Some(obstacle) = session.obstacles.get(id) else {
        return;
    };
    let event = GameEvent::ObstacleSpawned {
        id,
        lane: obstacle.lane,
        x: obstacle.x(),
        z: obstacle.z,
    };
    session.push_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{INITIAL_OBSTACLE_Z, SIM_DT};
    use crate::sim::{JumpPhase, Lane};

    fn running() -> RunController {
        let mut controller = RunController::new(Tuning::default(), 12345).unwrap();
        controller.start();
        controller
    }

    #[test]
    fn test_idle_until_started() {
        let mut controller = RunController::new(Tuning::default(), 1).unwrap();
        assert_eq!(controller.phase(), RunPhase::Idle);
        controller.tick(&TickInput::default(), SIM_DT);
        assert_eq!(controller.session().ticks, 0);
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_start_seeds_field() {
        let mut controller = running();
        assert_eq!(controller.phase(), RunPhase::Running);
        assert_eq!(controller.tier(), DifficultyTier::One);
        assert_eq!(controller.session().obstacles.len(), INITIAL_OBSTACLE_Z.len());

        let events = controller.drain_events();
        assert!(matches!(events[0], GameEvent::RunStarted { .. }));
        let spawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
            .count();
        assert_eq!(spawned, INITIAL_OBSTACLE_Z.len());
    }

    #[test]
    fn test_invalid_dt_is_clamped_to_zero() {
        let mut controller = running();
        controller.tick(&TickInput { jump: true, ..Default::default() }, SIM_DT);
        let before = controller.session().clone();

        controller.tick(&TickInput::default(), f32::NAN);
        controller.tick(&TickInput::default(), -1.0);

        let after = controller.session();
        assert_eq!(after.clock, before.clock);
        assert_eq!(after.player.vertical_pos(), before.player.vertical_pos());
        assert_eq!(after.player.vertical_velocity(), before.player.vertical_velocity());
        assert!(after.player.vertical_pos().is_finite());
    }

    #[test]
    fn test_zero_dt_tick_still_runs() {
        let mut controller = running();
        controller.tick(
            &TickInput {
                move_left: true,
                jump: true,
                ..Default::default()
            },
            0.0,
        );
        let session = controller.session();
        assert_eq!(session.ticks, 1);
        assert_eq!(session.clock, 0.0);
        assert_eq!(session.player.lane(), Lane::Left);
        assert_eq!(session.player.phase(), JumpPhase::Ascending);
        // Fixed-step motion is per tick, not per second
        let depths: Vec<f32> = session.obstacles.alive().map(|o| o.z).collect();
        let expected: Vec<f32> = INITIAL_OBSTACLE_Z.iter().map(|z| z + 0.3).collect();
        assert_eq!(depths, expected);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut controller = running();
        controller.tick(&TickInput::default(), 10.0);
        assert_eq!(controller.session().clock, controller.tuning().max_frame_dt);
    }

    #[test]
    fn test_input_reaches_player() {
        let mut controller = running();
        controller.tick(
            &TickInput {
                move_right: true,
                jump: true,
                ..Default::default()
            },
            SIM_DT,
        );
        let player = &controller.session().player;
        assert_eq!(player.lane(), Lane::Right);
        assert_eq!(player.phase(), JumpPhase::Ascending);
    }

    #[test]
    fn test_collision_ends_run_once() {
        let mut controller = running();
        controller.session_mut().clear_obstacles();
        let id = controller
            .session_mut()
            .obstacles
            .spawn(Lane::Center, 3.0, 0.3);
        controller.drain_events();

        controller.tick(&TickInput::default(), SIM_DT);
        assert_eq!(controller.phase(), RunPhase::GameOver);
        assert!(controller.session().obstacles.get(id).is_none());

        // Frozen afterwards
        let clock = controller.session().clock;
        controller.tick(&TickInput::default(), SIM_DT);
        assert_eq!(controller.session().clock, clock);

        let events = controller.drain_events();
        assert!(events.contains(&GameEvent::ObstacleRemoved {
            id,
            reason: RemovalReason::Collided
        }));
        let overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_first_collision_in_spawn_order_wins() {
        let mut controller = running();
        controller.session_mut().clear_obstacles();
        let first = controller.session_mut().obstacles.spawn(Lane::Center, 3.5, 0.3);
        let second = controller.session_mut().obstacles.spawn(Lane::Center, 4.0, 0.3);
        controller.drain_events();

        controller.tick(&TickInput::default(), SIM_DT);
        let obstacles = &controller.session().obstacles;
        assert!(obstacles.get(first).is_none());
        // The second one was never evaluated and is still in the field
        assert!(obstacles.get(second).is_some());
    }

    #[test]
    fn test_restart_forces_removal_and_resets() {
        let mut controller = running();
        controller.session_mut().progress.add_distance(320.0);
        controller.session_mut().obstacles.spawn(Lane::Center, 3.0, 0.3);
        controller.tick(&TickInput::default(), SIM_DT);
        assert_eq!(controller.phase(), RunPhase::GameOver);
        let leftover = controller.session().obstacles.len();
        controller.drain_events();

        controller.restart();
        let events = controller.drain_events();
        let forced = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::ObstacleRemoved {
                        reason: RemovalReason::Forced,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(forced, leftover);
        assert_eq!(controller.phase(), RunPhase::Running);
        assert_eq!(controller.tier(), DifficultyTier::One);
        assert_eq!(controller.session().progress.traveled(), 0.0);
        assert_eq!(controller.session().final_score(), None);
        assert_eq!(controller.session().obstacles.len(), INITIAL_OBSTACLE_Z.len());
    }

    #[test]
    fn test_back_to_menu() {
        let mut controller = running();
        controller.back_to_menu();
        assert_eq!(controller.phase(), RunPhase::Idle);
        assert!(controller.session().obstacles.is_empty());
    }

    #[test]
    fn test_rejects_invalid_tuning() {
        let tuning = Tuning {
            jump_duration: -1.0,
            ..Tuning::default()
        };
        assert!(matches!(
            RunController::new(tuning, 1),
            Err(SimError::InvalidTuning(_))
        ));
    }

    #[test]
    fn test_determinism() {
        let run = |seed| {
            let mut controller = RunController::new(Tuning::default(), seed).unwrap();
            controller.start();
            for i in 0..600 {
                let input = TickInput {
                    move_left: i % 90 == 0,
                    move_right: i % 130 == 0,
                    jump: i % 45 == 0,
                };
                controller.tick(&input, SIM_DT);
            }
            controller.drain_events()
        };
        assert_eq!(run(77), run(77));
    }
}
