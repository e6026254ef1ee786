//! Player collision checks against obstacles, decoys and the rival.

use hecs::World;

use skydodge_core::components::{Decoy, Obstacle, Rival};
use skydodge_core::constants::{DECOY_RADIUS, RIVAL_RADIUS};
use skydodge_core::enums::CrashCause;
use skydodge_core::geometry;
use skydodge_core::types::Transform;

/// First thing the player is touching, if any.
pub fn player_crash(world: &World, player: &Transform, player_radius: f64) -> Option<CrashCause> {
    let p = player.position;

    let hit_obstacle = world
        .query::<(&Transform, &Obstacle)>()
        .iter()
        .any(|(_, (t, o))| geometry::spheres_overlap(p, player_radius, t.position, o.radius));
    if hit_obstacle {
        return Some(CrashCause::Obstacle);
    }

    let hit_decoy = world
        .query::<(&Transform, &Decoy)>()
        .iter()
        .any(|(_, (t, _))| geometry::spheres_overlap(p, player_radius, t.position, DECOY_RADIUS));
    if hit_decoy {
        return Some(CrashCause::Decoy);
    }

    let hit_rival = world
        .query::<(&Transform, &Rival)>()
        .iter()
        .any(|(_, (t, _))| geometry::spheres_overlap(p, player_radius, t.position, RIVAL_RADIUS));
    if hit_rival {
        return Some(CrashCause::Rival);
    }

    None
}
