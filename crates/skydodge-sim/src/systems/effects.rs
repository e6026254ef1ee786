//! Explosion decay.

use hecs::{Entity, World};

use skydodge_core::components::Explosion;
use skydodge_core::constants::EXPLOSION_DECAY;

/// Age every explosion by one frame and remove the spent ones.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for (entity, explosion) in world.query_mut::<&mut Explosion>() {
        explosion.life -= EXPLOSION_DECAY;
        if explosion.life <= 0.0 {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
