//! Combat-intel line shown beside the HUD, driven by encounter events.

use skydodge_core::enums::BossKind;
use skydodge_core::events::SimEvent;

pub const RIVAL_OBJECTIVE: &str =
    "OBJECTIVE: Chase the Rival Ace. Aim with mouse and click to fire when in range!";
pub const DEATH_STAR_TACTIC: &str = "TACTIC: The hull is heavily armored. Focus all fire on the \
central sphere structure to destroy it.";
pub const SECTOR_CLEAR: &str = "Analyzing sector... Proceed to the planetary surface.";
pub const PLANET_TACTIC: &str = "TACTIC: The planet is indestructible. Locate and destroy the \
Mansion structure on the North Pole.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatIntel {
    line: &'static str,
}

impl Default for CombatIntel {
    fn default() -> Self {
        Self {
            line: RIVAL_OBJECTIVE,
        }
    }
}

impl CombatIntel {
    pub fn line(&self) -> &'static str {
        self.line
    }

    /// Fold one frame's events. Returns true if the line changed.
    pub fn observe(&mut self, events: &[SimEvent]) -> bool {
        let before = self.line;
        for event in events {
            match event {
                SimEvent::BossRevealed {
                    kind: BossKind::DeathStar,
                    ..
                } => self.line = DEATH_STAR_TACTIC,
                SimEvent::BossRevealed {
                    kind: BossKind::Planet,
                    ..
                } => self.line = PLANET_TACTIC,
                SimEvent::BossDestroyed {
                    kind: BossKind::DeathStar,
                } => self.line = SECTOR_CLEAR,
                _ => {}
            }
        }
        before != self.line
    }
}
