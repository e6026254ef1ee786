//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the entity registry, folds queued input, runs all
//! systems in a fixed order and produces `FrameSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skydodge_core::commands::{InputEvent, InputState};
use skydodge_core::constants::{RIVAL_PANIC_DISTANCE, TARGET_LOCK_DISTANCE};
use skydodge_core::enums::{EncounterPhase, ExplosionKind, SessionOutcome, TargetCue};
use skydodge_core::events::SimEvent;
use skydodge_core::geometry;
use skydodge_core::planes::{self, PlaneConfig};
use skydodge_core::state::FrameSnapshot;
use skydodge_core::types::SimTime;

use crate::camera::ChaseCamera;
use crate::encounter::Encounter;
use crate::registry::EntityRegistry;
use crate::systems;
use crate::systems::projectiles::FireControl;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Craft preset id from `planes::CATALOG`.
    pub plane_id: String,
    /// Best score so far, for new-high-score detection.
    pub high_score: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            plane_id: planes::default_plane().id.to_string(),
            high_score: 0,
        }
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    registry: EntityRegistry,
    encounter: Encounter,
    time: SimTime,
    rng: ChaCha8Rng,
    input: InputState,
    input_queue: VecDeque<InputEvent>,
    camera: ChaseCamera,
    fire_control: FireControl,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Start a session: player at the origin, hazard field and rival placed.
    pub fn new(config: SimConfig) -> Self {
        let plane = resolve_plane(&config.plane_id);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut registry = EntityRegistry::new(plane);
        world_setup::setup_session(&mut registry, &mut rng);
        let camera = ChaseCamera::behind(&registry.player_transform());

        log::info!(
            "Session started: plane={} seed={} high_score={}",
            plane.id,
            config.seed,
            config.high_score
        );

        Self {
            registry,
            encounter: Encounter::new(config.high_score),
            time: SimTime::default(),
            rng,
            input: InputState::default(),
            input_queue: VecDeque::new(),
            camera,
            fire_control: FireControl::default(),
            events: vec![SimEvent::PhaseStarted {
                phase: EncounterPhase::Rival,
            }],
        }
    }

    /// Queue an input event for the next frame boundary.
    pub fn queue_input(&mut self, event: InputEvent) {
        self.input_queue.push_back(event);
    }

    /// Queue multiple input events.
    pub fn queue_inputs(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.input_queue.extend(events);
    }

    /// Advance one frame and return the resulting snapshot. `now_ms` is the
    /// wall-clock time used for the fire cooldown.
    ///
    /// Once the session has ended, frames are no longer stepped and the
    /// snapshot is frozen.
    pub fn tick(&mut self, now_ms: u64) -> FrameSnapshot {
        self.process_inputs();

        if !self.encounter.is_terminal() {
            self.run_systems(now_ms);
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.registry,
            &self.time,
            &self.encounter,
            &self.camera,
            events,
        )
    }

    pub fn phase(&self) -> EncounterPhase {
        self.encounter.phase
    }

    pub fn outcome(&self) -> SessionOutcome {
        self.encounter.outcome
    }

    pub fn score(&self) -> u32 {
        self.encounter.score
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn plane(&self) -> Option<PlaneConfig> {
        self.registry.player_state().map(|p| p.plane)
    }

    /// Get a read-only reference to the entity registry.
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Spawn a projectile at an exact spot (for tests).
    #[cfg(test)]
    pub fn spawn_test_projectile(
        &mut self,
        position: glam::DVec3,
        velocity: glam::DVec3,
        remaining_life: i32,
        hostile: bool,
    ) -> hecs::Entity {
        world_setup::spawn_projectile(
            &mut self.registry.world,
            position,
            velocity,
            remaining_life,
            hostile,
        )
    }

    /// Spawn a motionless obstacle (for tests).
    #[cfg(test)]
    pub fn spawn_test_obstacle(&mut self, position: glam::DVec3, radius: f64, bonus: bool) {
        let obstacle = skydodge_core::components::Obstacle {
            radius,
            scale: glam::DVec3::splat(radius),
            bonus,
        };
        world_setup::spawn_obstacle(
            &mut self.registry.world,
            position,
            obstacle,
            skydodge_core::types::Velocity::default(),
        );
    }

    /// Spawn a decoy heading along +z (for tests).
    #[cfg(test)]
    pub fn spawn_test_decoy(&mut self, position: glam::DVec3) -> hecs::Entity {
        self.registry.world.spawn((
            skydodge_core::types::Transform::at(position),
            skydodge_core::components::Decoy,
        ))
    }

    /// Remove every obstacle and decoy (for tests needing a clear sky).
    /// Streaming refills them ahead of the player on the next frame.
    #[cfg(test)]
    pub fn clear_hazards(&mut self) {
        use skydodge_core::components::{Decoy, Obstacle};
        let world = &mut self.registry.world;
        let mut doomed: Vec<hecs::Entity> =
            world.query::<&Obstacle>().iter().map(|(e, _)| e).collect();
        doomed.extend(world.query::<&Decoy>().iter().map(|(e, _)| e));
        for entity in doomed {
            let _ = world.despawn(entity);
        }
    }

    /// Teleport the player (for tests).
    #[cfg(test)]
    pub fn place_player(&mut self, position: glam::DVec3) {
        let player = self.registry.player;
        if let Ok(transform) = self
            .registry
            .world
            .query_one_mut::<&mut skydodge_core::types::Transform>(player)
        {
            transform.position = position;
        }
    }

    /// Fold all queued input into the control state.
    fn process_inputs(&mut self) {
        while let Some(event) = self.input_queue.pop_front() {
            if let InputEvent::Resize { width, height } = event {
                self.camera.resize(width, height);
            }
            self.input.apply(&event);
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, now_ms: u64) {
        // 1. Player flight
        systems::flight::run(&mut self.registry.world, self.registry.player, &self.input);
        let player = self.registry.player_transform();

        // 2. World streaming
        systems::streaming::run(
            &mut self.registry.world,
            &mut self.rng,
            &player,
            &mut self.registry.despawn_buffer,
        );

        // 3. Player collisions
        let crash = systems::collision::player_crash(
            &self.registry.world,
            &player,
            self.registry.player_radius(),
        );
        if let Some(cause) = crash {
            self.player_destroyed(cause);
            return;
        }

        // 4. Rival and boss behavior
        systems::rival::run(&mut self.registry);
        systems::boss::run(
            &mut self.registry,
            &mut self.rng,
            self.time.frame,
            &mut self.events,
        );

        // 5. Projectiles: fire, fly, resolve
        systems::projectiles::fire(
            &mut self.registry,
            &self.camera,
            &self.input,
            now_ms,
            &mut self.fire_control,
            &mut self.events,
        );
        systems::projectiles::advance(&mut self.registry);
        let hit = systems::projectiles::resolve_hits(
            &mut self.registry,
            &mut self.encounter,
            &mut self.events,
        );
        if let Some(cause) = hit {
            self.player_destroyed(cause);
            return;
        }

        // 6. Distance report
        self.report_distance();

        // 7. Effects and camera
        systems::effects::run(
            &mut self.registry.world,
            &mut self.registry.despawn_buffer,
        );
        self.camera.follow(&self.registry.player_transform());
    }

    fn player_destroyed(&mut self, cause: skydodge_core::enums::CrashCause) {
        let position = self.registry.player_transform().position;
        world_setup::spawn_explosion(
            &mut self.registry.world,
            &mut self.events,
            ExplosionKind::PlayerWreck,
            position,
            2.0,
        );
        self.encounter.game_over(cause, &mut self.events);
    }

    /// Update distance to the current target and the HUD cue. The last
    /// distance is kept while no target exists.
    fn report_distance(&mut self) {
        let player = self.registry.player_transform().position;
        if let Some(target) = self.registry.target_position() {
            self.encounter.distance_to_target = geometry::whole_meters(player.distance(target));
        }

        self.encounter.target_cue = match self.registry.rival_transform() {
            Some(rival) => {
                let distance = player.distance(rival.position);
                if distance < TARGET_LOCK_DISTANCE {
                    TargetCue::Lock
                } else if distance < RIVAL_PANIC_DISTANCE {
                    TargetCue::Escaping
                } else {
                    TargetCue::None
                }
            }
            None => TargetCue::None,
        };
    }
}

fn resolve_plane(id: &str) -> PlaneConfig {
    match planes::find(id) {
        Some(plane) => *plane,
        None => {
            let fallback = planes::default_plane();
            log::warn!("Unknown plane id {id:?}, using {}", fallback.id);
            *fallback
        }
    }
}
