//! Entity registry: the hecs world plus handles to the singleton entities.
//!
//! The player, rival and boss are looked up by handle rather than by query,
//! since each phase has at most one of them.

use glam::DVec3;
use hecs::{Entity, World};

use skydodge_core::components::{Boss, Player, PositionHistory};
use skydodge_core::constants::TRAIL_MAX_POINTS;
use skydodge_core::planes::PlaneConfig;
use skydodge_core::types::Transform;

/// Owns every live entity of one session.
pub struct EntityRegistry {
    pub world: World,
    pub player: Entity,
    pub rival: Option<Entity>,
    pub boss: Option<Entity>,
    /// Entities queued for removal. Systems that walk the world push here
    /// and drain it before returning.
    pub despawn_buffer: Vec<Entity>,
}

impl EntityRegistry {
    /// Fresh world holding only the player, at the origin facing +z.
    pub fn new(plane: PlaneConfig) -> Self {
        let mut world = World::new();
        let player = world.spawn((
            Transform::default(),
            Player {
                plane,
                boosting: false,
            },
            PositionHistory::default(),
        ));
        Self {
            world,
            player,
            rival: None,
            boss: None,
            despawn_buffer: Vec::new(),
        }
    }

    pub fn player_transform(&self) -> Transform {
        self.world
            .get::<&Transform>(self.player)
            .map(|t| *t)
            .unwrap_or_default()
    }

    pub fn player_state(&self) -> Option<Player> {
        self.world.get::<&Player>(self.player).ok().map(|p| *p)
    }

    /// The player's collision radius.
    pub fn player_radius(&self) -> f64 {
        self.player_state()
            .map(|p| p.plane.collision_radius)
            .unwrap_or_default()
    }

    pub fn rival_transform(&self) -> Option<Transform> {
        let rival = self.rival?;
        self.world.get::<&Transform>(rival).ok().map(|t| *t)
    }

    pub fn boss_position(&self) -> Option<DVec3> {
        let boss = self.boss?;
        self.world.get::<&Transform>(boss).ok().map(|t| t.position)
    }

    pub fn boss_state(&self) -> Option<Boss> {
        let boss = self.boss?;
        self.world.get::<&Boss>(boss).ok().map(|b| (*b).clone())
    }

    /// Position of the current pursuit target: the rival, else the boss.
    pub fn target_position(&self) -> Option<DVec3> {
        self.rival_transform()
            .map(|t| t.position)
            .or_else(|| self.boss_position())
    }

    pub fn remove_rival(&mut self) {
        if let Some(rival) = self.rival.take() {
            let _ = self.world.despawn(rival);
        }
    }

    pub fn remove_boss(&mut self) {
        if let Some(boss) = self.boss.take() {
            let _ = self.world.despawn(boss);
        }
    }

    /// Number of live entities carrying component `C`.
    pub fn count<C: hecs::Component>(&self) -> usize {
        self.world.query::<&C>().iter().count()
    }

    /// Queue an entity for removal at the next `flush`.
    pub fn queue_despawn(&mut self, entity: Entity) {
        self.despawn_buffer.push(entity);
    }

    /// Despawn everything queued. Already-removed entities are skipped.
    pub fn flush(&mut self) {
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }
    }
}

/// Append a trail point, keeping at most `TRAIL_MAX_POINTS`.
pub fn record_trail(history: &mut PositionHistory, position: DVec3) {
    history.positions.push_back(position);
    while history.positions.len() > TRAIL_MAX_POINTS {
        history.positions.pop_front();
    }
}
