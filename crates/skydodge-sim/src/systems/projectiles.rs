//! Projectile subsystem: player fire, flight, expiry and hit resolution.

use glam::DVec3;
use hecs::Entity;

use skydodge_ai::boss::{self, HitResult};
use skydodge_core::commands::InputState;
use skydodge_core::components::{Boss, Decoy, Obstacle, Projectile};
use skydodge_core::constants::*;
use skydodge_core::enums::{CrashCause, EncounterPhase, ExplosionKind};
use skydodge_core::events::SimEvent;
use skydodge_core::geometry;
use skydodge_core::types::{Transform, Velocity};

use crate::camera::ChaseCamera;
use crate::encounter::{self, Encounter};
use crate::registry::EntityRegistry;
use crate::world_setup;

/// Trigger state carried across frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct FireControl {
    last_shot_ms: Option<u64>,
}

impl FireControl {
    fn ready(&self, now_ms: u64) -> bool {
        match self.last_shot_ms {
            Some(last) => now_ms.saturating_sub(last) >= FIRE_COOLDOWN_MS,
            None => true,
        }
    }
}

/// Fire a player projectile toward the cursor if the trigger is held and the
/// cooldown has elapsed.
pub fn fire(
    registry: &mut EntityRegistry,
    camera: &ChaseCamera,
    input: &InputState,
    now_ms: u64,
    fire_control: &mut FireControl,
    events: &mut Vec<SimEvent>,
) {
    if !input.firing() || !fire_control.ready(now_ms) {
        return;
    }

    let player = registry.player_transform();
    let direction = camera
        .aim_point(player.position, input.aim)
        .and_then(|aim| geometry::direction(player.position, aim))
        .unwrap_or_else(|| player.forward());

    world_setup::spawn_projectile(
        &mut registry.world,
        player.position + direction * MUZZLE_OFFSET,
        direction * PROJECTILE_SPEED,
        PROJECTILE_LIFE,
        false,
    );
    fire_control.last_shot_ms = Some(now_ms);
    events.push(SimEvent::ShotFired);
}

/// Move every projectile and burn one frame of life.
pub fn advance(registry: &mut EntityRegistry) {
    for (_entity, (transform, velocity, projectile)) in registry
        .world
        .query_mut::<(&mut Transform, &Velocity, &mut Projectile)>()
    {
        transform.position += velocity.0;
        projectile.remaining_life -= 1;
    }
}

/// Resolve hits for every projectile in flight, then discard expired ones.
///
/// Returns the crash cause if a hostile projectile reached the player.
pub fn resolve_hits(
    registry: &mut EntityRegistry,
    encounter: &mut Encounter,
    events: &mut Vec<SimEvent>,
) -> Option<CrashCause> {
    let in_flight: Vec<(Entity, DVec3, Projectile)> = registry
        .world
        .query::<(&Transform, &Projectile)>()
        .iter()
        .map(|(entity, (t, p))| (entity, t.position, *p))
        .collect();

    let player = registry.player_transform();
    let player_radius = registry.player_radius();

    let mut crash = None;
    for (entity, point, projectile) in in_flight {
        if projectile.hostile {
            if geometry::within(point, player.position, player_radius) {
                registry.queue_despawn(entity);
                crash = Some(CrashCause::TurretFire);
                break;
            }
        } else if strike(registry, encounter, events, point) {
            registry.queue_despawn(entity);
            if encounter.is_terminal() {
                break;
            }
            continue;
        }

        if projectile.remaining_life <= 0 {
            registry.queue_despawn(entity);
        }
    }
    registry.flush();
    crash
}

/// Test a player projectile against targets in priority order. Returns true
/// if it struck something.
fn strike(
    registry: &mut EntityRegistry,
    encounter: &mut Encounter,
    events: &mut Vec<SimEvent>,
    point: DVec3,
) -> bool {
    if encounter.phase == EncounterPhase::Rival {
        let rival_hit = registry.rival_transform().is_some_and(|t| {
            geometry::within(point, t.position, RIVAL_RADIUS * RIVAL_HIT_RADIUS_FACTOR)
        });
        if rival_hit {
            encounter::rival_destroyed(registry, encounter, events);
            return true;
        }
    }

    if strike_boss(registry, encounter, events, point) {
        return true;
    }

    let decoy = registry
        .world
        .query::<(&Transform, &Decoy)>()
        .iter()
        .find(|(_, (t, _))| {
            geometry::within(point, t.position, DECOY_RADIUS + PROJECTILE_TARGET_MARGIN)
        })
        .map(|(entity, (t, _))| (entity, t.position));
    if let Some((entity, position)) = decoy {
        let _ = registry.world.despawn(entity);
        world_setup::spawn_explosion(
            &mut registry.world,
            events,
            ExplosionKind::DecoyWreck,
            position,
            1.0,
        );
        encounter.award(DECOY_SCORE, events);
        return true;
    }

    let asteroid = registry
        .world
        .query::<(&Transform, &Obstacle)>()
        .iter()
        .find(|(_, (t, o))| {
            o.bonus && geometry::within(point, t.position, o.radius + PROJECTILE_TARGET_MARGIN)
        })
        .map(|(entity, (t, _))| (entity, t.position));
    if let Some((entity, position)) = asteroid {
        let _ = registry.world.despawn(entity);
        world_setup::spawn_explosion(
            &mut registry.world,
            events,
            ExplosionKind::AsteroidWreck,
            position,
            1.0,
        );
        encounter.award(OBSTACLE_BONUS_SCORE, events);
        return true;
    }

    false
}

fn strike_boss(
    registry: &mut EntityRegistry,
    encounter: &mut Encounter,
    events: &mut Vec<SimEvent>,
    point: DVec3,
) -> bool {
    let (Some(entity), Some(boss_position)) = (registry.boss, registry.boss_position()) else {
        return false;
    };

    let (kind, result, newly_revealed, hp, max_hp, depleted) = {
        let Ok(mut state) = registry.world.get::<&mut Boss>(entity) else {
            return false;
        };
        let was_revealed = state.revealed;
        let result = boss::behavior(state.kind).on_hit(&mut state, boss_position, point);
        (
            state.kind,
            result,
            !was_revealed && state.revealed,
            state.hit_points,
            state.max_hit_points,
            state.is_depleted(),
        )
    };
    let behavior = boss::behavior(kind);

    if newly_revealed {
        log::debug!("{} revealed by a hit", behavior.display_name());
        events.push(SimEvent::BossRevealed {
            kind,
            name: behavior.display_name().to_string(),
        });
    }

    match result {
        HitResult::Miss => false,
        HitResult::Absorbed { explosion, scale } => {
            world_setup::spawn_explosion(&mut registry.world, events, explosion, point, scale);
            true
        }
        HitResult::Damaged {
            explosion, scale, ..
        } => {
            world_setup::spawn_explosion(&mut registry.world, events, explosion, point, scale);
            events.push(SimEvent::BossDamaged {
                kind,
                hp: hp.max(0),
                max_hp,
            });
            if depleted {
                encounter::boss_depleted(registry, encounter, events, kind, boss_position);
            }
            true
        }
    }
}
