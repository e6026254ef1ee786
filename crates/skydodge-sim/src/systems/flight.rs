//! Player flight: applies held controls to the player's transform.

use hecs::{Entity, World};

use skydodge_core::commands::InputState;
use skydodge_core::components::{Player, PositionHistory};
use skydodge_core::types::Transform;

use crate::registry::record_trail;

/// Turn, roll and fly the player forward one frame.
pub fn run(world: &mut World, player: Entity, input: &InputState) {
    let Ok((transform, state, history)) =
        world.query_one_mut::<(&mut Transform, &mut Player, &mut PositionHistory)>(player)
    else {
        return;
    };

    let plane = state.plane;
    let yaw = axis(input.yaw_left, input.yaw_right, -1.0) * plane.turn_rate;
    // Nose up is a negative rotation about local x.
    let pitch = axis(input.pitch_down, input.pitch_up, 1.0) * plane.turn_rate;
    let roll = axis(input.roll_right, input.roll_left, -1.0) * plane.roll_rate;
    transform.rotate_local(yaw, pitch, roll);

    state.boosting = input.boost;
    let speed = if input.boost {
        plane.boost_speed
    } else {
        plane.cruise_speed
    };
    transform.translate_forward(speed);

    record_trail(history, transform.position);
}

/// +1, -1 or 0 for a pair of opposing controls, `both` when both are held.
/// Right yaw, pitch down and left roll win a tie.
fn axis(positive: bool, negative: bool, both: f64) -> f64 {
    match (positive, negative) {
        (true, true) => both,
        (true, false) => 1.0,
        (false, true) => -1.0,
        (false, false) => 0.0,
    }
}
