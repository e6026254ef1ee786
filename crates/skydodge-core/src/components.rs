//! ECS components for hecs entities.
//!
//! Components are plain data. Behavior lives in the AI crate and in the
//! simulation systems. `Transform` and `Velocity` from `types` are used as
//! components too.

use std::collections::VecDeque;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::{BossKind, ExplosionKind};
use crate::planes::PlaneConfig;

/// The player's craft.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub plane: PlaneConfig,
    /// Whether boost was engaged on the last stepped frame.
    pub boosting: bool,
}

/// The fleeing rival ace.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Rival {
    pub panicking: bool,
}

/// A surface structure on a boss that takes damage, in the boss's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeakPoint {
    pub local_offset: DVec3,
    pub hit_radius: f64,
}

/// A decorative gun emplacement on a boss, in the boss's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Turret {
    pub local_offset: DVec3,
}

/// Boss state. Bosses never move; they spin cosmetically about their axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub kind: BossKind,
    pub hit_points: i32,
    pub max_hit_points: i32,
    /// Once true, stays true for the boss's lifetime.
    pub revealed: bool,
    /// Accumulated spin (radians) about y and z.
    pub spin_y: f64,
    pub spin_z: f64,
    pub weak_point: Option<WeakPoint>,
    pub turrets: Vec<Turret>,
}

impl Boss {
    pub fn is_depleted(&self) -> bool {
        self.hit_points <= 0
    }
}

/// A drifting asteroid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    /// Collision radius (largest scale axis, shrunk).
    pub radius: f64,
    /// Per-axis size, for rendering.
    pub scale: DVec3,
    /// Destructible for bonus score.
    pub bonus: bool,
}

/// Marks an entity as a decoy aircraft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Decoy;

/// A bullet in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    /// Frames left before the projectile is discarded.
    pub remaining_life: i32,
    /// Fired by a boss; damages only the player.
    pub hostile: bool,
}

/// Cosmetic explosion effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    pub kind: ExplosionKind,
    pub scale: f64,
    /// 1.0 at birth, removed at or below zero.
    pub life: f64,
}

/// Recent positions for trail rendering (newest last).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionHistory {
    pub positions: VecDeque<DVec3>,
}
