//! World streaming: keeps a fixed population of obstacles and decoys around
//! the player, despawning what falls behind and spawning replacements ahead.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skydodge_core::components::{Decoy, Obstacle};
use skydodge_core::constants::*;
use skydodge_core::types::{Transform, Velocity};

use crate::world_setup;

/// Drift, despawn and refill hazards around `player`.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    player: &Transform,
    despawn_buffer: &mut Vec<Entity>,
) {
    drift(world);
    cull::<Obstacle>(world, player.position, despawn_buffer);
    cull::<Decoy>(world, player.position, despawn_buffer);

    let obstacles = world.query::<&Obstacle>().iter().count();
    for _ in obstacles..OBSTACLE_COUNT {
        let (obstacle, velocity) = world_setup::roll_obstacle(rng);
        let position = spawn_point(rng, player);
        world_setup::spawn_obstacle(world, position, obstacle, velocity);
    }

    let decoys = world.query::<&Decoy>().iter().count();
    for _ in decoys..DECOY_COUNT {
        let position = spawn_point(rng, player);
        world_setup::spawn_decoy(world, rng, position);
    }
}

fn drift(world: &mut World) {
    for (_entity, (transform, velocity, _obstacle)) in
        world.query_mut::<(&mut Transform, &Velocity, &Obstacle)>()
    {
        transform.position += velocity.0;
    }
    for (_entity, (transform, _decoy)) in world.query_mut::<(&mut Transform, &Decoy)>() {
        transform.translate_forward(DECOY_SPEED);
    }
}

/// Remove every `C` entity beyond the despawn radius.
fn cull<C: hecs::Component>(world: &mut World, center: DVec3, despawn_buffer: &mut Vec<Entity>) {
    let radius_sq = STREAM_DESPAWN_RADIUS * STREAM_DESPAWN_RADIUS;
    for (entity, (transform, _marker)) in world.query_mut::<(&Transform, &C)>() {
        if transform.position.distance_squared(center) > radius_sq {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Random point in the spawn cube centered ahead of the player.
fn spawn_point(rng: &mut ChaCha8Rng, player: &Transform) -> DVec3 {
    let center = player.position + player.forward() * STREAM_SPAWN_RADIUS;
    let half = STREAM_SPAWN_VOLUME / 2.0;
    center
        + DVec3::new(
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
        )
}
