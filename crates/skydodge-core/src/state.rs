//! Frame snapshot: everything the presentation layer sees after each frame.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::SimTime;

/// Complete visible state published after each frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub phase: EncounterPhase,
    pub outcome: SessionOutcome,
    pub score: u32,
    pub high_score: u32,
    /// Set once the final score has beaten `high_score`.
    pub new_high_score: bool,
    /// Whole meters to the rival or current boss.
    pub distance_to_target: u32,
    /// Present only while a revealed boss is alive.
    pub boss: Option<BossStatus>,
    pub target_cue: TargetCue,
    pub player: PlayerView,
    pub rival: Option<RivalView>,
    pub boss_body: Option<BossView>,
    pub obstacles: Vec<ObstacleView>,
    pub decoys: Vec<DecoyView>,
    pub projectiles: Vec<ProjectileView>,
    pub explosions: Vec<ExplosionView>,
    pub events: Vec<SimEvent>,
}

/// Boss health bar contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossStatus {
    pub hp: i32,
    pub max_hp: i32,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub plane_id: String,
    pub position: DVec3,
    pub orientation: DQuat,
    pub boosting: bool,
    /// Chase camera position, for aiming overlays.
    pub camera: DVec3,
    pub trail: Vec<DVec3>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RivalView {
    pub position: DVec3,
    pub orientation: DQuat,
    pub panicking: bool,
    pub trail: Vec<DVec3>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub kind: BossKind,
    pub position: DVec3,
    pub spin_y: f64,
    pub spin_z: f64,
    pub revealed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub position: DVec3,
    pub scale: DVec3,
    pub bonus: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecoyView {
    pub position: DVec3,
    pub orientation: DQuat,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: DVec3,
    pub hostile: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub kind: ExplosionKind,
    pub position: DVec3,
    pub scale: f64,
    pub life: f64,
}
