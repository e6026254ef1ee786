//! Chase camera, tracked so cursor aiming matches what the player sees.

use glam::DVec3;

use skydodge_core::constants::*;
use skydodge_core::types::Transform;

#[derive(Debug, Clone, Copy)]
pub struct ChaseCamera {
    pub position: DVec3,
    /// Viewport width over height.
    pub aspect: f64,
}

impl ChaseCamera {
    /// Camera already settled behind `player`.
    pub fn behind(player: &Transform) -> Self {
        Self {
            position: Self::target(player),
            aspect: DEFAULT_ASPECT,
        }
    }

    fn target(player: &Transform) -> DVec3 {
        player.position + player.orientation * DVec3::from_array(CAMERA_OFFSET)
    }

    /// Ease toward the chase offset behind `player`.
    pub fn follow(&mut self, player: &Transform) {
        self.position = self.position.lerp(Self::target(player), CAMERA_FOLLOW);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f64 / height as f64;
        }
    }

    /// Point `AIM_DISTANCE` along the ray from the camera through the cursor.
    /// The camera looks at `look_at` with world +y as up.
    pub fn aim_point(&self, look_at: DVec3, cursor: [f64; 2]) -> Option<DVec3> {
        let forward = (look_at - self.position).try_normalize()?;
        let right = forward
            .cross(DVec3::Y)
            .try_normalize()
            .unwrap_or(DVec3::NEG_X);
        let up = right.cross(forward);

        let half_height = (CAMERA_FOV_DEGREES.to_radians() / 2.0).tan();
        let half_width = half_height * self.aspect;
        let ray = (forward + right * cursor[0] * half_width + up * cursor[1] * half_height)
            .try_normalize()?;
        Some(self.position + ray * AIM_DISTANCE)
    }
}
