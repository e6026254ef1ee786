//! SKY DODGE application layer.
//!
//! Runs simulation sessions on a frame loop thread, persists the best score
//! and fetches mission text with offline fallbacks.

pub mod config;
pub mod flavor;
pub mod game_loop;
pub mod high_score;
pub mod intel;
pub mod logging;
pub mod session;
pub mod state;

pub use skydodge_core as core;
