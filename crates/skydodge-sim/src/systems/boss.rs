//! Boss system: proximity reveal, spin and turret fire.

use rand_chacha::ChaCha8Rng;

use skydodge_ai::boss::{self, BossTickContext};
use skydodge_core::components::Boss;
use skydodge_core::constants::TURRET_PROJECTILE_LIFE;
use skydodge_core::events::SimEvent;

use crate::registry::EntityRegistry;
use crate::world_setup;

pub fn run(
    registry: &mut EntityRegistry,
    rng: &mut ChaCha8Rng,
    frame: u64,
    events: &mut Vec<SimEvent>,
) {
    let Some(entity) = registry.boss else {
        return;
    };
    let Some(boss_position) = registry.boss_position() else {
        return;
    };
    let player_position = registry.player_transform().position;

    let shot = {
        let Ok(mut state) = registry.world.get::<&mut Boss>(entity) else {
            return;
        };
        let behavior = boss::behavior(state.kind);

        if boss::reveal_by_proximity(&mut state, boss_position, player_position) {
            let name = behavior.display_name();
            log::debug!("{name} revealed by proximity");
            events.push(SimEvent::BossRevealed {
                kind: state.kind,
                name: name.to_string(),
            });
        }

        let ctx = BossTickContext {
            boss_position,
            player_position,
            frame,
        };
        behavior.on_tick(&mut state, &ctx, rng)
    };

    if let Some(shot) = shot {
        log::debug!("Turret fired from {:?}", shot.origin);
        world_setup::spawn_projectile(
            &mut registry.world,
            shot.origin,
            shot.velocity,
            TURRET_PROJECTILE_LIFE,
            true,
        );
        events.push(SimEvent::TurretFired {
            origin: shot.origin,
        });
    }
}
