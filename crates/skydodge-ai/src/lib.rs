//! Opponent behavior for SKY DODGE.
//!
//! Rival flee steering and boss behaviors, expressed as pure functions over
//! core data so the simulation crate owns all entity bookkeeping.

pub mod boss;
pub mod rival;

pub use skydodge_core as core;
