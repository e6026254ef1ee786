//! Selectable craft presets.

use serde::Serialize;

/// Flight characteristics of a player craft. Chosen once before a session
/// starts and never mutated while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaneConfig {
    pub id: &'static str,
    pub display_name: &'static str,
    /// Forward distance per frame without boost.
    pub cruise_speed: f64,
    /// Forward distance per frame while boosting.
    pub boost_speed: f64,
    /// Yaw/pitch increment per frame (radians).
    pub turn_rate: f64,
    /// Roll increment per frame (radians).
    pub roll_rate: f64,
    pub collision_radius: f64,
    pub description: &'static str,
}

/// The craft catalog. The first entry is the default.
pub const CATALOG: [PlaneConfig; 3] = [
    PlaneConfig {
        id: "intercept",
        display_name: "X-15 INTERCEPTOR",
        cruise_speed: 2.2,
        boost_speed: 6.0,
        turn_rate: 0.045,
        roll_rate: 0.08,
        collision_radius: 65.0,
        description: "Balanced performance for all-round combat.",
    },
    PlaneConfig {
        id: "viper",
        display_name: "V-22 VIPER",
        cruise_speed: 2.8,
        boost_speed: 7.5,
        turn_rate: 0.035,
        roll_rate: 0.06,
        collision_radius: 60.0,
        description: "High top speed, lower maneuverability. Built for chasing.",
    },
    PlaneConfig {
        id: "phantom",
        display_name: "F-99 PHANTOM",
        cruise_speed: 1.9,
        boost_speed: 5.0,
        turn_rate: 0.065,
        roll_rate: 0.12,
        collision_radius: 62.0,
        description: "Superior agility for tight dodging. Slower engines.",
    },
];

/// Look up a preset by id.
pub fn find(id: &str) -> Option<&'static PlaneConfig> {
    CATALOG.iter().find(|plane| plane.id == id)
}

/// The default preset.
pub fn default_plane() -> &'static PlaneConfig {
    &CATALOG[0]
}
