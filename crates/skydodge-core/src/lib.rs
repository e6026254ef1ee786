//! Core types and definitions for the SKY DODGE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry helpers, components, input events, snapshots, emitted events,
//! the craft catalog and tuning constants. It has no dependency on the ECS
//! or on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod planes;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
