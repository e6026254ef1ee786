//! Vector and orientation helpers shared by every crate.
//!
//! All proximity tests compare squared distances against squared radii so the
//! hot paths never take a square root.

use glam::{DQuat, DVec3};

/// Point at `radius` from the origin, with polar angle `phi` measured from +y
/// and azimuth `theta` measured from +z toward +x.
pub fn from_spherical(radius: f64, phi: f64, theta: f64) -> DVec3 {
    let sin_phi = phi.sin();
    DVec3::new(
        radius * sin_phi * theta.sin(),
        radius * phi.cos(),
        radius * sin_phi * theta.cos(),
    )
}

/// Unit vector from `from` toward `to`, or `None` when the points coincide.
pub fn direction(from: DVec3, to: DVec3) -> Option<DVec3> {
    (to - from).try_normalize()
}

/// True when `a` and `b` are closer than `radius`.
pub fn within(a: DVec3, b: DVec3, radius: f64) -> bool {
    a.distance_squared(b) < radius * radius
}

/// True when two spheres overlap.
pub fn spheres_overlap(a: DVec3, radius_a: f64, b: DVec3, radius_b: f64) -> bool {
    within(a, b, radius_a + radius_b)
}

/// Rotation that turns the canonical forward axis (+z) onto `direction`.
pub fn look_rotation(direction: DVec3) -> Option<DQuat> {
    let dir = direction.try_normalize()?;
    Some(DQuat::from_rotation_arc(DVec3::Z, dir))
}

/// Distance as whole meters for display: floored and never negative.
pub fn whole_meters(distance: f64) -> u32 {
    if distance.is_finite() && distance > 0.0 {
        distance.floor().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Rotate `offset` about +y by `angle` radians.
pub fn rotate_about_y(offset: DVec3, angle: f64) -> DVec3 {
    DQuat::from_rotation_y(angle) * offset
}
