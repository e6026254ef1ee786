//! Snapshot system: queries the ECS world and builds a complete FrameSnapshot.
//!
//! This system is read-only: it never modifies the world.

use hecs::World;

use skydodge_ai::boss;
use skydodge_core::components::*;
use skydodge_core::events::SimEvent;
use skydodge_core::state::*;
use skydodge_core::types::{SimTime, Transform};

use crate::camera::ChaseCamera;
use crate::encounter::Encounter;
use crate::registry::EntityRegistry;

/// Build a complete FrameSnapshot from the current world state.
pub fn build_snapshot(
    registry: &EntityRegistry,
    time: &SimTime,
    encounter: &Encounter,
    camera: &ChaseCamera,
    events: Vec<SimEvent>,
) -> FrameSnapshot {
    let boss = registry.boss_state();

    FrameSnapshot {
        time: *time,
        phase: encounter.phase,
        outcome: encounter.outcome,
        score: encounter.score,
        high_score: encounter.high_score,
        new_high_score: encounter.new_high_score,
        distance_to_target: encounter.distance_to_target,
        boss: boss.as_ref().and_then(build_boss_status),
        target_cue: encounter.target_cue,
        player: build_player(registry, camera),
        rival: build_rival(registry),
        boss_body: boss.zip(registry.boss_position()).map(|(b, position)| BossView {
            kind: b.kind,
            position,
            spin_y: b.spin_y,
            spin_z: b.spin_z,
            revealed: b.revealed,
        }),
        obstacles: build_obstacles(&registry.world),
        decoys: build_decoys(&registry.world),
        projectiles: build_projectiles(&registry.world),
        explosions: build_explosions(&registry.world),
        events,
    }
}

/// Health bar: only once the boss has been revealed.
fn build_boss_status(state: &Boss) -> Option<BossStatus> {
    state.revealed.then(|| BossStatus {
        hp: state.hit_points.max(0),
        max_hp: state.max_hit_points,
        name: boss::behavior(state.kind).display_name().to_string(),
    })
}

fn build_player(registry: &EntityRegistry, camera: &ChaseCamera) -> PlayerView {
    let transform = registry.player_transform();
    let state = registry.player_state();
    let trail: Vec<_> = registry
        .world
        .get::<&PositionHistory>(registry.player)
        .map(|h| h.positions.iter().copied().collect())
        .unwrap_or_default();

    PlayerView {
        plane_id: state.map(|p| p.plane.id.to_string()).unwrap_or_default(),
        position: transform.position,
        orientation: transform.orientation,
        boosting: state.is_some_and(|p| p.boosting),
        camera: camera.position,
        trail,
    }
}

fn build_rival(registry: &EntityRegistry) -> Option<RivalView> {
    let entity = registry.rival?;
    let mut query = registry
        .world
        .query_one::<(&Transform, &Rival, &PositionHistory)>(entity)
        .ok()?;
    let (transform, rival, history) = query.get()?;
    Some(RivalView {
        position: transform.position,
        orientation: transform.orientation,
        panicking: rival.panicking,
        trail: history.positions.iter().copied().collect(),
    })
}

fn build_obstacles(world: &World) -> Vec<ObstacleView> {
    world
        .query::<(&Transform, &Obstacle)>()
        .iter()
        .map(|(_, (t, o))| ObstacleView {
            position: t.position,
            scale: o.scale,
            bonus: o.bonus,
        })
        .collect()
}

fn build_decoys(world: &World) -> Vec<DecoyView> {
    world
        .query::<(&Transform, &Decoy)>()
        .iter()
        .map(|(_, (t, _))| DecoyView {
            position: t.position,
            orientation: t.orientation,
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Transform, &Projectile)>()
        .iter()
        .map(|(_, (t, p))| ProjectileView {
            position: t.position,
            hostile: p.hostile,
        })
        .collect()
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    world
        .query::<(&Transform, &Explosion)>()
        .iter()
        .map(|(_, (t, e))| ExplosionView {
            kind: e.kind,
            position: t.position,
            scale: e.scale,
            life: e.life,
        })
        .collect()
}
