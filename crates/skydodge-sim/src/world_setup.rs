//! Entity spawn factories for setting up and repopulating the world.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::{DQuat, DVec3};
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skydodge_ai::boss;
use skydodge_core::components::*;
use skydodge_core::constants::*;
use skydodge_core::enums::{BossKind, ExplosionKind};
use skydodge_core::events::SimEvent;
use skydodge_core::geometry;
use skydodge_core::types::{Transform, Velocity};

use crate::registry::EntityRegistry;

/// Attempts at finding a hazard position outside the spawn safe zone.
const PLACEMENT_ATTEMPTS: usize = 32;

/// Populate the initial hazard field around the origin and place the rival.
pub fn setup_session(registry: &mut EntityRegistry, rng: &mut ChaCha8Rng) {
    for _ in 0..OBSTACLE_COUNT {
        let (obstacle, velocity) = roll_obstacle(rng);
        let position = initial_position(rng, obstacle.radius);
        spawn_obstacle(&mut registry.world, position, obstacle, velocity);
    }
    for _ in 0..DECOY_COUNT {
        let position = initial_position(rng, DECOY_RADIUS);
        spawn_decoy(&mut registry.world, rng, position);
    }
    registry.rival = Some(spawn_rival(&mut registry.world, rng));
}

/// Uniform point in the world box, kept clear of the player spawn.
fn initial_position(rng: &mut ChaCha8Rng, radius: f64) -> DVec3 {
    let [sx, sy, sz] = WORLD_SIZE;
    let clearance = SAFE_SPAWN_RADIUS + radius;
    let mut position = DVec3::ZERO;
    for _ in 0..PLACEMENT_ATTEMPTS {
        position = DVec3::new(
            rng.gen_range(-sx / 2.0..sx / 2.0),
            rng.gen_range(-sy / 2.0..sy / 2.0),
            rng.gen_range(-sz / 2.0..sz / 2.0),
        );
        if !geometry::within(position, DVec3::ZERO, clearance) {
            return position;
        }
    }
    // Push the last roll out to the edge of the safe zone.
    geometry::direction(DVec3::ZERO, position).unwrap_or(DVec3::Y) * clearance
}

/// Roll a new obstacle's size tier, drift and bonus flag.
pub fn roll_obstacle(rng: &mut ChaCha8Rng) -> (Obstacle, Velocity) {
    let tier: f64 = rng.gen();
    let base = if tier > 0.95 {
        rng.gen_range(120.0..300.0)
    } else if tier > 0.7 {
        rng.gen_range(50.0..150.0)
    } else {
        rng.gen_range(15.0..55.0)
    };
    let scale = DVec3::new(
        base * rng.gen_range(0.8..1.2),
        base * rng.gen_range(0.8..1.2),
        base * rng.gen_range(0.8..1.2),
    );
    let drift = OBSTACLE_MAX_SPEED / 2.0;
    let velocity = Velocity(DVec3::new(
        rng.gen_range(-drift..drift),
        rng.gen_range(-drift..drift),
        rng.gen_range(-drift..drift),
    ));
    let bonus = rng.gen::<f64>() < OBSTACLE_BONUS_CHANCE;
    let obstacle = Obstacle {
        radius: scale.max_element() * OBSTACLE_HITBOX_FACTOR,
        scale,
        bonus,
    };
    (obstacle, velocity)
}

pub fn spawn_obstacle(
    world: &mut World,
    position: DVec3,
    obstacle: Obstacle,
    velocity: Velocity,
) -> Entity {
    world.spawn((Transform::at(position), velocity, obstacle))
}

/// Spawn a decoy on a random level heading.
pub fn spawn_decoy(world: &mut World, rng: &mut ChaCha8Rng, position: DVec3) -> Entity {
    let heading = rng.gen_range(0.0..TAU);
    world.spawn((
        Transform::new(position, DQuat::from_rotation_y(heading)),
        Decoy,
    ))
}

/// Spawn the rival far from the origin, facing away from it.
pub fn spawn_rival(world: &mut World, rng: &mut ChaCha8Rng) -> Entity {
    let theta = rng.gen_range(0.0..TAU);
    let phi = rng.gen_range(-RIVAL_SPAWN_ELEVATION..RIVAL_SPAWN_ELEVATION);
    // Elevation above the horizon, azimuth measured from +x toward +z.
    let position =
        geometry::from_spherical(RIVAL_SPAWN_DISTANCE, FRAC_PI_2 - phi, FRAC_PI_2 - theta);
    let mut transform = Transform::at(position);
    transform.face(position);
    world.spawn((transform, Rival::default(), PositionHistory::default()))
}

/// Spawn a boss `BOSS_SPAWN_DISTANCE` ahead of the player.
pub fn spawn_boss(registry: &mut EntityRegistry, kind: BossKind) -> Entity {
    let player = registry.player_transform();
    let position = player.position + player.forward() * BOSS_SPAWN_DISTANCE;
    let state = boss::behavior(kind).spawn_state();
    let entity = registry.world.spawn((Transform::at(position), state));
    registry.boss = Some(entity);
    entity
}

/// Spawn a projectile travelling along `velocity`.
pub fn spawn_projectile(
    world: &mut World,
    position: DVec3,
    velocity: DVec3,
    remaining_life: i32,
    hostile: bool,
) -> Entity {
    let mut transform = Transform::at(position);
    transform.face(velocity);
    world.spawn((
        transform,
        Velocity(velocity),
        Projectile {
            remaining_life,
            hostile,
        },
    ))
}

/// Spawn an explosion effect and report it.
pub fn spawn_explosion(
    world: &mut World,
    events: &mut Vec<SimEvent>,
    kind: ExplosionKind,
    position: DVec3,
    scale: f64,
) -> Entity {
    events.push(SimEvent::Explosion {
        kind,
        position,
        scale,
    });
    world.spawn((
        Transform::at(position),
        Explosion {
            kind,
            scale,
            life: 1.0,
        },
    ))
}
