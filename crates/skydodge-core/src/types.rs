//! Fundamental spatial and simulation types.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// World-space pose of an entity.
/// y = Up, +z = the canonical forward axis of an unrotated entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec3,
    pub orientation: DQuat,
}

/// Linear velocity in world units per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec3);

/// Simulation time tracking. Frames are not fixed-duration: every per-frame
/// quantity in the simulation is expressed per frame, not per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames stepped in this session.
    pub frame: u64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn new(position: DVec3, orientation: DQuat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Unrotated transform at `position`.
    pub fn at(position: DVec3) -> Self {
        Self::new(position, DQuat::IDENTITY)
    }

    /// Unit vector the entity is facing.
    pub fn forward(&self) -> DVec3 {
        self.orientation * DVec3::Z
    }

    /// Move along the facing direction.
    pub fn translate_forward(&mut self, distance: f64) {
        self.position += self.forward() * distance;
    }

    /// Apply yaw, pitch and roll increments (radians) about the local axes,
    /// in that order.
    pub fn rotate_local(&mut self, yaw: f64, pitch: f64, roll: f64) {
        self.orientation = (self.orientation
            * DQuat::from_rotation_y(yaw)
            * DQuat::from_rotation_x(pitch)
            * DQuat::from_rotation_z(roll))
        .normalize();
    }

    /// Re-orient so `forward()` points along `direction`.
    /// Zero-length directions leave the orientation untouched.
    pub fn face(&mut self, direction: DVec3) {
        if let Some(rotation) = crate::geometry::look_rotation(direction) {
            self.orientation = rotation;
        }
    }
}

impl SimTime {
    /// Advance by one frame.
    pub fn advance(&mut self) {
        self.frame += 1;
    }
}
