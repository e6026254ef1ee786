//! Events emitted by the simulation for audio, effects and UI feedback.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Something noteworthy that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// The player fired a projectile.
    ShotFired,
    /// An explosion effect was spawned.
    Explosion {
        kind: ExplosionKind,
        position: DVec3,
        scale: f64,
    },
    /// Score changed.
    ScoreChanged { score: u32 },
    /// The rival was shot down.
    RivalDestroyed,
    /// A new encounter phase started.
    PhaseStarted { phase: EncounterPhase },
    /// A boss's name and health became visible.
    BossRevealed { kind: BossKind, name: String },
    /// A boss took damage.
    BossDamaged { kind: BossKind, hp: i32, max_hp: i32 },
    /// A boss was destroyed.
    BossDestroyed { kind: BossKind },
    /// A turret fired at the player.
    TurretFired { origin: DVec3 },
    /// The player was destroyed.
    GameOver { final_score: u32, cause: CrashCause },
    /// The final boss fell.
    Win { final_score: u32 },
    /// The final score beat the stored high score.
    NewHighScore { score: u32 },
}
