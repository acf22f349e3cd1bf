//! Player kinematics: lane changes and jumping
//!
//! Lateral movement is a short eased tween between lane offsets. Vertical
//! movement is ballistic, with gravity and launch speed derived from the
//! jump's apex height and air time so every jump lasts the same time at any
//! frame rate.

use glam::Vec3;

use super::collision::Aabb;
use super::lane::Lane;
use crate::consts::{GROUND_LEVEL, PLAYER_BOUNDS_MAX, PLAYER_BOUNDS_MIN, PLAYER_Z};
use crate::ease_in_out_quad;
use crate::tuning::Tuning;

/// Vertical state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Ascending,
    Descending,
    /// Landed, but the jump cooldown has not run out yet
    CooldownOnly,
}

impl JumpPhase {
    pub fn is_airborne(self) -> bool {
        matches!(self, JumpPhase::Ascending | JumpPhase::Descending)
    }
}

/// An in-flight lane change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneTransition {
    pub target: Lane,
    from_x: f32,
    to_x: f32,
    elapsed: f32,
    duration: f32,
}

impl LaneTransition {
    /// Fraction of the tween completed, in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).min(1.0)
    }
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Logical lane (the target while a transition is running)
    lane: Lane,
    transition: Option<LaneTransition>,
    x: f32,
    vertical_pos: f32,
    vertical_velocity: f32,
    phase: JumpPhase,
    /// Sim time before which a new jump is refused
    cooldown_until: f32,

    gravity: f32,
    jump_force: f32,
    jump_cooldown: f32,
    transition_duration: f32,
}

impl PlayerState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lane: Lane::Center,
            transition: None,
            x: Lane::Center.offset(),
            vertical_pos: GROUND_LEVEL,
            vertical_velocity: 0.0,
            phase: JumpPhase::Grounded,
            cooldown_until: f32::NEG_INFINITY,
            gravity: tuning.gravity(),
            jump_force: tuning.jump_force(),
            jump_cooldown: tuning.jump_cooldown,
            transition_duration: tuning.lane_transition_duration,
        }
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    /// Lane being moved into, if a transition is running
    pub fn target_lane(&self) -> Option<Lane> {
        self.transition.map(|t| t.target)
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn vertical_pos(&self) -> f32 {
        self.vertical_pos
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.vertical_pos, PLAYER_Z)
    }

    /// World-space bounds for collision
    pub fn collider(&self) -> Aabb {
        Aabb::around(self.position(), PLAYER_BOUNDS_MIN, PLAYER_BOUNDS_MAX)
    }

    /// Can a jump start at sim time `now`?
    pub fn can_jump(&self, now: f32) -> bool {
        !self.phase.is_airborne() && now >= self.cooldown_until
    }

    /// Launch a jump; ignored while airborne or cooling down
    pub fn jump(&mut self, now: f32) -> bool {
        if !self.can_jump(now) {
            return false;
        }
        self.vertical_velocity = self.jump_force;
        self.phase = JumpPhase::Ascending;
        self.cooldown_until = now + self.jump_cooldown;
        true
    }

    /// Start moving one lane left; ignored mid-transition or at the edge
    pub fn move_left(&mut self) -> bool {
        match self.lane.left() {
            Some(target) => self.begin_transition(target),
            None => false,
        }
    }

    /// Start moving one lane right; ignored mid-transition or at the edge
    pub fn move_right(&mut self) -> bool {
        match self.lane.right() {
            Some(target) => self.begin_transition(target),
            None => false,
        }
    }

    fn begin_transition(&mut self, target: Lane) -> bool {
        if self.transition.is_some() {
            return false;
        }
        self.transition = Some(LaneTransition {
            target,
            from_x: self.x,
            to_x: target.offset(),
            elapsed: 0.0,
            duration: self.transition_duration,
        });
        self.lane = target;
        true
    }

    /// Integrate one tick; `now` is the tick's clock sample
    pub fn advance(&mut self, dt: f32, now: f32) {
        if let Some(transition) = self.transition.as_mut() {
            transition.elapsed += dt;
            let t = transition.progress();
            if t >= 1.0 {
                // Snap to avoid residual drift
                self.x = transition.to_x;
                self.transition = None;
            } else {
                let span = transition.to_x - transition.from_x;
                self.x = transition.from_x + span * ease_in_out_quad(t);
            }
        }

        match self.phase {
            JumpPhase::Ascending | JumpPhase::Descending => {
                self.vertical_velocity += self.gravity * dt;
                self.vertical_pos += self.vertical_velocity * dt;
                if self.phase == JumpPhase::Ascending && self.vertical_velocity <= 0.0 {
                    self.phase = JumpPhase::Descending;
                }
                // Still rising on an empty frame is not a landing
                if self.vertical_velocity <= 0.0 && self.vertical_pos <= GROUND_LEVEL {
                    self.land(now);
                }
            }
            JumpPhase::CooldownOnly => {
                if now >= self.cooldown_until {
                    self.phase = JumpPhase::Grounded;
                }
            }
            JumpPhase::Grounded => {}
        }
    }

    fn land(&mut self, now: f32) {
        self.vertical_pos = GROUND_LEVEL;
        self.vertical_velocity = 0.0;
        self.phase = if now < self.cooldown_until {
            JumpPhase::CooldownOnly
        } else {
            JumpPhase::Grounded
        };
    }

    /// Back to the start pose between runs
    pub fn reset(&mut self) {
        self.lane = Lane::Center;
        self.transition = None;
        self.x = Lane::Center.offset();
        self.vertical_pos = GROUND_LEVEL;
        self.vertical_velocity = 0.0;
        self.phase = JumpPhase::Grounded;
        self.cooldown_until = f32::NEG_INFINITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    /// Jump at t = 0 and step with `dts` (cycled) until back on the ground.
    /// Returns the air time.
    fn air_time(tuning: &Tuning, dts: &[f32]) -> f32 {
        let mut player = PlayerState::new(tuning);
        assert!(player.jump(0.0));
        let mut now = 0.0;
        for dt in dts.iter().cycle().take(10_000) {
            now += dt;
            player.advance(*dt, now);
            if !player.phase().is_airborne() {
                return now;
            }
        }
        panic!("player never landed");
    }

    #[test]
    fn test_jump_lands_after_duration() {
        let tuning = Tuning::default();
        let t = air_time(&tuning, &[DT]);
        assert!((t - tuning.jump_duration).abs() <= DT + 1e-3, "air time {t}");
    }

    #[test]
    fn test_jump_reaches_apex() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        player.jump(0.0);
        let mut now = 0.0;
        let mut apex = GROUND_LEVEL;
        while player.phase().is_airborne() {
            now += DT;
            player.advance(DT, now);
            apex = apex.max(player.vertical_pos());
            assert!(player.vertical_pos() >= GROUND_LEVEL);
        }
        assert!((apex - GROUND_LEVEL - tuning.jump_height).abs() < 0.5);
    }

    #[test]
    fn test_second_jump_during_cooldown_is_ignored() {
        let tuning = Tuning::default();
        let mut single = PlayerState::new(&tuning);
        let mut double = PlayerState::new(&tuning);
        single.jump(0.0);
        double.jump(0.0);

        let mut now = 0.0;
        for tick in 1..=60 {
            now += DT;
            if tick == 6 {
                // ~100ms after launch
                assert!(!double.jump(now));
            }
            single.advance(DT, now);
            double.advance(DT, now);
            assert_eq!(single.phase(), double.phase());
            assert_eq!(single.vertical_pos(), double.vertical_pos());
            assert_eq!(single.vertical_velocity(), double.vertical_velocity());
        }
    }

    #[test]
    fn test_cooldown_outlasts_landing() {
        let mut tuning = Tuning::default();
        tuning.jump_cooldown = 1.0;
        let mut player = PlayerState::new(&tuning);
        player.jump(0.0);
        let mut now = 0.0;
        while player.phase().is_airborne() {
            now += DT;
            player.advance(DT, now);
        }
        assert_eq!(player.phase(), JumpPhase::CooldownOnly);
        assert_eq!(player.vertical_velocity(), 0.0);
        assert!(!player.jump(now));

        while now < 1.0 {
            now += DT;
            player.advance(DT, now);
        }
        assert_eq!(player.phase(), JumpPhase::Grounded);
        assert!(player.jump(now));
    }

    #[test]
    fn test_jump_allowed_once_cooldown_expires_after_landing() {
        let mut tuning = Tuning::default();
        tuning.jump_cooldown = 0.6;
        let mut player = PlayerState::new(&tuning);
        player.jump(0.0);
        let mut now = 0.0;
        while player.phase().is_airborne() {
            now += DT;
            player.advance(DT, now);
        }
        assert_eq!(player.phase(), JumpPhase::CooldownOnly);
        assert!(!player.can_jump(now));

        // No advance in between: the command arrives before this tick's step
        assert!(player.can_jump(0.7));
        assert!(player.jump(0.7));
        assert_eq!(player.phase(), JumpPhase::Ascending);
    }

    #[test]
    fn test_zero_dt_does_not_land_a_fresh_jump() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        assert!(player.jump(0.0));
        player.advance(0.0, 0.0);
        assert_eq!(player.phase(), JumpPhase::Ascending);
        assert_eq!(player.vertical_velocity(), tuning.jump_force());
    }

    #[test]
    fn test_lane_transition_snaps_to_target() {
        let tuning = Tuning::default();
        let moves: [(fn(&mut PlayerState) -> bool, Lane, Lane); 4] = [
            (PlayerState::move_left, Lane::Center, Lane::Left),
            (PlayerState::move_right, Lane::Center, Lane::Right),
            (PlayerState::move_right, Lane::Left, Lane::Center),
            (PlayerState::move_left, Lane::Right, Lane::Center),
        ];
        for (step, from, to) in moves {
            let mut player = PlayerState::new(&tuning);
            // Walk to the starting lane first
            match from {
                Lane::Left => {
                    player.move_left();
                }
                Lane::Right => {
                    player.move_right();
                }
                Lane::Center => {}
            }
            let mut now = 0.0;
            for _ in 0..30 {
                now += DT;
                player.advance(DT, now);
            }
            assert_eq!(player.lane(), from);

            assert!(step(&mut player));
            assert_eq!(player.lane(), to);
            assert_eq!(player.target_lane(), Some(to));
            for _ in 0..30 {
                now += 0.007;
                player.advance(0.007, now);
            }
            assert!(!player.is_transitioning());
            assert_eq!(player.x(), to.offset());
        }
    }

    #[test]
    fn test_move_during_transition_is_ignored() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        assert!(player.move_left());
        player.advance(0.05, 0.05);
        assert!(!player.move_right());
        assert!(!player.move_left());
        assert_eq!(player.lane(), Lane::Left);
        // Mid-tween the body sits between the lanes
        assert!(player.x() < 0.0 && player.x() > Lane::Left.offset());
    }

    #[test]
    fn test_edge_lane_moves_are_noops() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        player.move_left();
        player.advance(1.0, 1.0);
        assert!(!player.move_left());
        assert!(!player.is_transitioning());
    }

    #[test]
    fn test_reset() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        player.move_right();
        player.jump(0.0);
        player.advance(0.1, 0.1);
        player.reset();
        assert_eq!(player.lane(), Lane::Center);
        assert_eq!(player.phase(), JumpPhase::Grounded);
        assert_eq!(player.vertical_pos(), GROUND_LEVEL);
        assert_eq!(player.vertical_velocity(), 0.0);
        assert!(!player.is_transitioning());
        assert!(player.can_jump(0.0));
    }

    proptest! {
        #[test]
        fn prop_air_time_independent_of_fixed_rate(hz in 20.0f32..240.0) {
            let tuning = Tuning::default();
            let dt = 1.0 / hz;
            let t = air_time(&tuning, &[dt]);
            prop_assert!((t - tuning.jump_duration).abs() <= dt + 1e-3, "air time {} at {} Hz", t, hz);
        }

        #[test]
        fn prop_air_time_independent_of_variable_rate(dts in proptest::collection::vec(0.004f32..0.05, 1..16)) {
            let tuning = Tuning::default();
            let max_dt = dts.iter().cloned().fold(0.0f32, f32::max);
            let t = air_time(&tuning, &dts);
            prop_assert!((t - tuning.jump_duration).abs() <= max_dt + 1e-3, "air time {}", t);
        }
    }
}
