//! Encounter progression: phase, score and session outcome.
//!
//! Stored on `SimulationEngine`, not as ECS entities. The transition helpers
//! at the bottom apply phase changes to the registry.

use glam::DVec3;

use skydodge_ai::boss;
use skydodge_core::constants::RIVAL_SCORE;
use skydodge_core::enums::*;
use skydodge_core::events::SimEvent;

use crate::registry::EntityRegistry;
use crate::world_setup;

/// Session counters and progression.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub phase: EncounterPhase,
    pub outcome: SessionOutcome,
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    /// Last reported distance to the pursuit target, whole meters.
    pub distance_to_target: u32,
    pub target_cue: TargetCue,
}

impl Encounter {
    pub fn new(high_score: u32) -> Self {
        Self {
            phase: EncounterPhase::default(),
            outcome: SessionOutcome::InProgress,
            score: 0,
            high_score,
            new_high_score: false,
            distance_to_target: 0,
            target_cue: TargetCue::None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn award(&mut self, points: u32, events: &mut Vec<SimEvent>) {
        self.score = self.score.saturating_add(points);
        events.push(SimEvent::ScoreChanged { score: self.score });
    }

    /// Move to the next phase. Returns the new phase, `None` after the last.
    pub fn advance(&mut self, events: &mut Vec<SimEvent>) -> Option<EncounterPhase> {
        let next = self.phase.next()?;
        debug_assert!(next > self.phase);
        log::info!("Encounter phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        events.push(SimEvent::PhaseStarted { phase: next });
        Some(next)
    }

    pub fn game_over(&mut self, cause: CrashCause, events: &mut Vec<SimEvent>) {
        if self.is_terminal() {
            return;
        }
        let final_score = self.score;
        log::info!("Game over ({cause:?}) with score {final_score}");
        self.outcome = SessionOutcome::GameOver { final_score };
        events.push(SimEvent::GameOver { final_score, cause });
        self.settle_high_score(events);
    }

    pub fn win(&mut self, events: &mut Vec<SimEvent>) {
        if self.is_terminal() {
            return;
        }
        let final_score = self.score;
        log::info!("Mission complete with score {final_score}");
        self.outcome = SessionOutcome::Win { final_score };
        events.push(SimEvent::Win { final_score });
        self.settle_high_score(events);
    }

    fn settle_high_score(&mut self, events: &mut Vec<SimEvent>) {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_high_score = true;
            events.push(SimEvent::NewHighScore { score: self.score });
        }
    }
}

/// Rival shot down: score it, clear it and bring in the first boss.
pub fn rival_destroyed(
    registry: &mut EntityRegistry,
    encounter: &mut Encounter,
    events: &mut Vec<SimEvent>,
) {
    if let Some(transform) = registry.rival_transform() {
        world_setup::spawn_explosion(
            &mut registry.world,
            events,
            ExplosionKind::RivalWreck,
            transform.position,
            2.5,
        );
    }
    registry.remove_rival();
    events.push(SimEvent::RivalDestroyed);
    encounter.award(RIVAL_SCORE, events);

    if let Some(kind) = encounter.advance(events).and_then(EncounterPhase::boss_kind) {
        world_setup::spawn_boss(registry, kind);
    }
}

/// Boss out of hit points: score it and either spawn the next one or win.
pub fn boss_depleted(
    registry: &mut EntityRegistry,
    encounter: &mut Encounter,
    events: &mut Vec<SimEvent>,
    kind: BossKind,
    position: DVec3,
) {
    let depletion = boss::behavior(kind).on_depleted();
    world_setup::spawn_explosion(
        &mut registry.world,
        events,
        depletion.explosion,
        position,
        depletion.scale,
    );
    registry.remove_boss();
    events.push(SimEvent::BossDestroyed { kind });
    encounter.award(depletion.score, events);

    match depletion.next {
        Some(next) => {
            if encounter.advance(events) == Some(next.phase()) {
                world_setup::spawn_boss(registry, next);
            }
        }
        None => encounter.win(events),
    }
}
