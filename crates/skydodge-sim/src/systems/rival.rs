//! Rival system: feeds world state into the flee steering and applies it.

use skydodge_ai::rival::{steer, RivalContext};
use skydodge_core::components::{Obstacle, PositionHistory, Rival};
use skydodge_core::types::Transform;

use crate::registry::{record_trail, EntityRegistry};

pub fn run(registry: &mut EntityRegistry) {
    let Some(entity) = registry.rival else {
        return;
    };
    let Some(transform) = registry.rival_transform() else {
        return;
    };
    let ctx = RivalContext {
        transform,
        player_position: registry.player_transform().position,
    };

    let update = {
        let mut query = registry.world.query::<(&Transform, &Obstacle)>();
        let obstacles = query.iter().map(|(_, (t, _))| t.position);
        steer(&ctx, obstacles)
    };

    if let Ok((transform, rival, history)) = registry
        .world
        .query_one_mut::<(&mut Transform, &mut Rival, &mut PositionHistory)>(entity)
    {
        if rival.panicking != update.panicking {
            log::debug!("Rival panicking: {}", update.panicking);
        }
        *transform = update.transform;
        rival.panicking = update.panicking;
        record_trail(history, transform.position);
    }
}
