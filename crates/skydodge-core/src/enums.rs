//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Encounter progression. Only ever moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EncounterPhase {
    /// Chase the fleeing rival ace.
    #[default]
    Rival,
    /// Stationary armored sphere.
    DeathStar,
    /// Planet with a mansion weak point and a turret ring.
    Planet,
}

impl EncounterPhase {
    /// The phase that follows this one, `None` after the last.
    pub fn next(self) -> Option<Self> {
        match self {
            EncounterPhase::Rival => Some(EncounterPhase::DeathStar),
            EncounterPhase::DeathStar => Some(EncounterPhase::Planet),
            EncounterPhase::Planet => None,
        }
    }

    /// The boss that owns this phase, if any.
    pub fn boss_kind(self) -> Option<BossKind> {
        match self {
            EncounterPhase::Rival => None,
            EncounterPhase::DeathStar => Some(BossKind::DeathStar),
            EncounterPhase::Planet => Some(BossKind::Planet),
        }
    }
}

/// Boss variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    DeathStar,
    Planet,
}

impl BossKind {
    pub fn phase(self) -> EncounterPhase {
        match self {
            BossKind::DeathStar => EncounterPhase::DeathStar,
            BossKind::Planet => EncounterPhase::Planet,
        }
    }
}

/// Session result. Terminal variants carry the frozen final score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionOutcome {
    #[default]
    InProgress,
    GameOver { final_score: u32 },
    Win { final_score: u32 },
}

impl SessionOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionOutcome::InProgress)
    }

    pub fn final_score(&self) -> Option<u32> {
        match *self {
            SessionOutcome::InProgress => None,
            SessionOutcome::GameOver { final_score } | SessionOutcome::Win { final_score } => {
                Some(final_score)
            }
        }
    }
}

/// What blew up. Presentation picks colors and particle counts from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    PlayerWreck,
    RivalWreck,
    BossImpact,
    BossWreck,
    PlanetSurface,
    WeakPointImpact,
    PlanetWreck,
    DecoyWreck,
    AsteroidWreck,
}

/// HUD cue while chasing the rival.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetCue {
    #[default]
    None,
    /// Rival is close and running: boost to catch it.
    Escaping,
    /// Rival is inside firing range.
    Lock,
}

/// Cause of a game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Obstacle,
    Decoy,
    Rival,
    TurretFire,
}
