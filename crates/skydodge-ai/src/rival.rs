//! Rival flee steering.
//!
//! Pure function over plain data: the caller supplies the rival's transform,
//! the player's position and candidate obstacle positions, and applies the
//! returned update. No ECS dependency.

use glam::DVec3;

use skydodge_core::constants::*;
use skydodge_core::geometry;
use skydodge_core::types::Transform;

/// Input to the steering step.
pub struct RivalContext {
    pub transform: Transform,
    pub player_position: DVec3,
}

/// Result of one steering step.
pub struct RivalUpdate {
    pub transform: Transform,
    pub panicking: bool,
    /// Distance to the player before the rival moved.
    pub distance_to_player: f64,
    /// Obstacles that contributed a repulsion push.
    pub threats: usize,
}

/// Flee from the player while pushing off nearby obstacles.
///
/// The obstacle scan stops after `RIVAL_AVOIDANCE_MAX_THREATS` hits; it is a
/// cheap nudge, not an exhaustive search.
pub fn steer<I>(ctx: &RivalContext, obstacles: I) -> RivalUpdate
where
    I: IntoIterator<Item = DVec3>,
{
    let position = ctx.transform.position;
    let distance_to_player = position.distance(ctx.player_position);

    let flee = geometry::direction(ctx.player_position, position)
        .unwrap_or_else(|| ctx.transform.forward());

    let mut avoidance = DVec3::ZERO;
    let mut threats = 0;
    for obstacle in obstacles {
        if !geometry::within(position, obstacle, RIVAL_AVOIDANCE_DISTANCE) {
            continue;
        }
        if let Some(push) = geometry::direction(obstacle, position) {
            avoidance += push;
        }
        threats += 1;
        if threats >= RIVAL_AVOIDANCE_MAX_THREATS {
            break;
        }
    }

    let desired = if threats > 0 {
        (flee + avoidance).try_normalize().unwrap_or(flee)
    } else {
        flee
    };

    let panicking = distance_to_player < RIVAL_PANIC_DISTANCE;
    let speed = if panicking {
        RIVAL_ESCAPE_SPEED
    } else {
        RIVAL_CRUISE_SPEED
    };

    let mut transform = ctx.transform;
    if let Some(target) = geometry::look_rotation(desired) {
        transform.orientation = transform
            .orientation
            .slerp(target, RIVAL_TURN_RATE)
            .normalize();
    }
    transform.translate_forward(speed);

    RivalUpdate {
        transform,
        panicking,
        distance_to_player,
        threats,
    }
}
