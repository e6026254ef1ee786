//! Simulation engine for SKY DODGE.
//!
//! Owns the hecs ECS world, runs systems once per frame in a fixed order,
//! and produces FrameSnapshots for the presentation layer.

pub mod camera;
pub mod encounter;
pub mod engine;
pub mod registry;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use skydodge_core as core;
