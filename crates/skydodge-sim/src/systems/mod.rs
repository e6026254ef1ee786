//! ECS systems that operate on the simulation world each frame.
//!
//! Systems are free functions over the world or the registry. They do not
//! own state: everything lives in components or on the engine.

pub mod boss;
pub mod collision;
pub mod effects;
pub mod flight;
pub mod projectiles;
pub mod rival;
pub mod snapshot;
pub mod streaming;
