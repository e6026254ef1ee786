//! State shared between the session owner and the frame loop thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use skydodge_core::commands::InputEvent;
use skydodge_core::state::FrameSnapshot;

use crate::intel;

/// Commands sent to the frame loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Forward an input event to the engine.
    Input(InputEvent),
    /// Stop the loop and drop its engine.
    Shutdown,
}

/// Handles the frame loop writes into. Cloned into each loop thread.
#[derive(Debug, Clone)]
pub struct LoopShared {
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    pub combat_intel: Arc<Mutex<String>>,
    /// Generation of the session allowed to step.
    pub generation: Arc<AtomicU64>,
}

/// Shared application state.
///
/// `mpsc::Sender` is not `Sync`, so it sits behind a `Mutex`.
pub struct AppState {
    /// `None` while no session is deployed.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the loop after each frame.
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    /// Current combat-intel line for the HUD.
    pub combat_intel: Arc<Mutex<String>>,
    pub generation: Arc<AtomicU64>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            combat_intel: Arc::new(Mutex::new(String::new())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loop_shared(&self) -> LoopShared {
        LoopShared {
            latest_snapshot: Arc::clone(&self.latest_snapshot),
            combat_intel: Arc::clone(&self.combat_intel),
            generation: Arc::clone(&self.generation),
        }
    }

    /// Invalidate any running loop and return the new generation.
    pub fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Forget the previous session's published state.
    pub fn reset_published(&self) {
        if let Ok(mut lock) = self.latest_snapshot.lock() {
            *lock = None;
        }
        if let Ok(mut lock) = self.combat_intel.lock() {
            *lock = intel::RIVAL_OBJECTIVE.to_string();
        }
    }

    pub fn latest_snapshot(&self) -> Option<FrameSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }

    pub fn combat_intel(&self) -> String {
        self.combat_intel
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot().is_none());
        assert_eq!(state.generation.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_generations_increase() {
        let state = AppState::new();
        assert_eq!(state.next_generation(), 1);
        assert_eq!(state.next_generation(), 2);
        assert_eq!(state.loop_shared().generation.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reset_clears_snapshot_and_restores_objective() {
        let state = AppState::new();
        *state.latest_snapshot.lock().unwrap() = Some(FrameSnapshot::default());
        *state.combat_intel.lock().unwrap() = "stale".into();

        state.reset_published();
        assert!(state.latest_snapshot().is_none());
        assert_eq!(state.combat_intel(), intel::RIVAL_OBJECTIVE);
    }
}
