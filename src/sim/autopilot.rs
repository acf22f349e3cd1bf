//! Attract-mode autopilot
//!
//! Produces the same [`TickInput`] a player would, so a demo run goes through
//! the regular command path. It sidesteps the nearest obstacle in its lane
//! when a neighbouring lane is clear, and jumps otherwise.

use super::lane::Lane;
use super::obstacle::Obstacle;
use super::state::RunSession;
use super::tick::{RunController, TickInput};
use crate::consts::PLAYER_Z;

/// How far ahead of the player obstacles are considered
const LOOKAHEAD: f32 = 18.0;
/// Distance at which a jump is committed when no lane is free
const JUMP_TRIGGER: f32 = 5.0;

/// Nearest obstacle in `lane` that can still reach the player
fn threat(session: &RunSession, lane: Lane) -> Option<&Obstacle> {
    // Obstacles travel toward +Z; one is behind the player once its near
    // face is past the player's far face
    let player_back = session.player.collider().max.z;
    session
        .obstacles
        .alive()
        .filter(|o| o.lane == lane)
        .filter(|o| o.collider().min.z <= player_back && o.z >= PLAYER_Z - LOOKAHEAD)
        .max_by(|a, b| a.z.total_cmp(&b.z))
}

/// Input for the next tick
pub fn plan(controller: &RunController) -> TickInput {
    let session = controller.session();
    let mut input = TickInput::default();
    if !session.is_running() {
        return input;
    }

    let lane = session.player.lane();
    let Some(obstacle) = threat(session, lane) else {
        return input;
    };

    if !session.player.is_transitioning() {
        let escape = [lane.left(), lane.right()]
            .into_iter()
            .flatten()
            .find(|&side| threat(session, side).is_none());
        match escape {
            Some(side) if side.offset() < lane.offset() => {
                input.move_left = true;
                return input;
            }
            Some(_) => {
                input.move_right = true;
                return input;
            }
            None => {}
        }
    }

    if PLAYER_Z - obstacle.z <= JUMP_TRIGGER {
        input.jump = true;
    }
    input
}
