//! Session lifecycle: briefing, deploy, input, outcome, debrief.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use skydodge_core::commands::InputEvent;
use skydodge_core::enums::SessionOutcome;
use skydodge_core::state::FrameSnapshot;
use skydodge_sim::{SimConfig, SimulationEngine};

use crate::config::AppConfig;
use crate::flavor::{FlavorService, MissionBriefing};
use crate::game_loop::{self, LoopReport, LoopSettings};
use crate::high_score;
use crate::state::{AppState, GameLoopCommand};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no session is deployed")]
    NotDeployed,
    #[error("the frame loop has stopped")]
    LoopStopped,
    #[error("could not start the frame loop: {0}")]
    Spawn(#[from] std::io::Error),
}

/// When a deployed loop should stop on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeployOptions {
    pub max_frames: Option<u64>,
    pub stop_on_outcome: bool,
}

/// What the pilot sees before launch.
#[derive(Debug, Clone)]
pub struct Deployment {
    pub briefing: MissionBriefing,
    pub seed: u64,
    pub plane_id: String,
    pub high_score: u32,
}

/// A finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub frames: u64,
    pub outcome: SessionOutcome,
    pub score: u32,
    /// The final score beat the stored best and was saved.
    pub new_high_score: bool,
}

/// Owns at most one running session at a time.
pub struct SessionManager {
    config: AppConfig,
    flavor: Arc<FlavorService>,
    state: AppState,
    running: Option<JoinHandle<LoopReport>>,
}

impl SessionManager {
    pub fn new(config: AppConfig, flavor: FlavorService) -> Self {
        Self {
            config,
            flavor: Arc::new(flavor),
            state: AppState::new(),
            running: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Start a fresh session, replacing any running one.
    pub fn deploy(&mut self, options: DeployOptions) -> Result<Deployment, SessionError> {
        let generation = self.state.next_generation();
        self.shutdown();
        self.state.reset_published();

        let high_score = high_score::load_or_zero(&self.config.high_score_path);
        let briefing = self.flavor.mission_briefing();
        let seed = self.config.seed.unwrap_or_else(clock_seed);
        let engine = SimulationEngine::new(SimConfig {
            seed,
            plane_id: self.config.plane_id.clone(),
            high_score,
        });
        let plane_id = engine
            .plane()
            .map(|p| p.id.to_string())
            .unwrap_or_else(|| self.config.plane_id.clone());

        let settings = LoopSettings {
            frame_rate_hz: self.config.frame_rate_hz,
            generation,
            max_frames: options.max_frames,
            stop_on_outcome: options.stop_on_outcome,
        };
        let (tx, handle) = game_loop::spawn_game_loop(engine, settings, self.state.loop_shared())?;
        if let Ok(mut lock) = self.state.command_tx.lock() {
            *lock = Some(tx);
        }
        self.running = Some(handle);

        log::info!("Deployed {} as {}", briefing.name, briefing.pilot_callsign);
        Ok(Deployment {
            briefing,
            seed,
            plane_id,
            high_score,
        })
    }

    /// Forward an input event to the running session.
    pub fn send_input(&self, event: InputEvent) -> Result<(), SessionError> {
        let lock = self
            .state
            .command_tx
            .lock()
            .map_err(|_| SessionError::LoopStopped)?;
        match lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::Input(event))
                .map_err(|_| SessionError::LoopStopped),
            None => Err(SessionError::NotDeployed),
        }
    }

    pub fn latest_snapshot(&self) -> Option<FrameSnapshot> {
        self.state.latest_snapshot()
    }

    pub fn combat_intel(&self) -> String {
        self.state.combat_intel()
    }

    /// Block until the running loop stops by itself, then settle the score.
    pub fn wait(&mut self) -> Result<SessionReport, SessionError> {
        let handle = self.running.take().ok_or(SessionError::NotDeployed)?;
        let report = handle.join().map_err(|_| SessionError::LoopStopped)?;
        self.clear_sender();
        Ok(self.settle(report))
    }

    /// Stop the running loop, if any, and drop its engine.
    pub fn shutdown(&mut self) {
        if let Ok(lock) = self.state.command_tx.lock() {
            if let Some(tx) = lock.as_ref() {
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
        }
        if let Some(handle) = self.running.take() {
            match handle.join() {
                Ok(report) => {
                    self.settle(report);
                }
                Err(_) => log::warn!("Frame loop panicked during shutdown"),
            }
        }
        self.clear_sender();
    }

    /// Fetch the end-of-session line off the caller's thread.
    ///
    /// Returns `None` while the session is undecided.
    pub fn debrief(&self, outcome: SessionOutcome) -> Option<JoinHandle<String>> {
        if !outcome.is_terminal() {
            return None;
        }
        let flavor = Arc::clone(&self.flavor);
        let line = move || match outcome {
            SessionOutcome::Win { final_score } => flavor.win_message(final_score),
            SessionOutcome::GameOver { final_score } => flavor.game_over_taunt(final_score),
            SessionOutcome::InProgress => String::new(),
        };
        std::thread::Builder::new()
            .name("skydodge-debrief".into())
            .spawn(line)
            .map_err(|e| log::warn!("Could not start debrief: {}", e))
            .ok()
    }

    fn clear_sender(&self) {
        if let Ok(mut lock) = self.state.command_tx.lock() {
            *lock = None;
        }
    }

    /// Persist a decided session's score if it beats the stored best.
    fn settle(&self, report: LoopReport) -> SessionReport {
        let new_high_score = match report.outcome.final_score() {
            Some(score) => {
                log::info!("Session decided: {:?}", report.outcome);
                high_score::save_if_higher(&self.config.high_score_path, score)
                    .unwrap_or_else(|e| {
                        log::warn!("Could not save high score: {}", e);
                        false
                    })
            }
            None => false,
        };
        SessionReport {
            frames: report.frames,
            outcome: report.outcome,
            score: report.score,
            new_high_score,
        }
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::{FlavorError, FlavorText};
    use crate::intel;
    use std::path::Path;

    struct Unreachable;

    impl FlavorText for Unreachable {
        fn mission_briefing(&self) -> Result<MissionBriefing, FlavorError> {
            Err(FlavorError::MissingApiKey("TEST".into()))
        }
        fn game_over_taunt(&self, _score: u32) -> Result<String, FlavorError> {
            Err(FlavorError::EmptyResponse)
        }
        fn win_message(&self, _score: u32) -> Result<String, FlavorError> {
            Err(FlavorError::EmptyResponse)
        }
    }

    fn manager(dir: &Path) -> SessionManager {
        let config = AppConfig {
            frame_rate_hz: 1000,
            seed: Some(7),
            high_score_path: dir.join("best.json"),
            ..AppConfig::default()
        };
        SessionManager::new(config, FlavorService::new(Box::new(Unreachable)))
    }

    fn limited(frames: u64) -> DeployOptions {
        DeployOptions {
            max_frames: Some(frames),
            stop_on_outcome: true,
        }
    }

    #[test]
    fn test_deploys_with_fallback_briefing() {
        let dir = tempfile::tempdir().unwrap();
        let mut sessions = manager(dir.path());

        let deployment = sessions.deploy(limited(10)).unwrap();
        assert_eq!(deployment.briefing, MissionBriefing::fallback());
        assert_eq!(deployment.seed, 7);
        assert_eq!(deployment.plane_id, "intercept");
        assert_eq!(deployment.high_score, 0);

        let report = sessions.wait().unwrap();
        assert_eq!(report.frames, 10);
        assert_eq!(report.outcome, SessionOutcome::InProgress);
        assert!(!report.new_high_score);
        assert_eq!(sessions.combat_intel(), intel::RIVAL_OBJECTIVE);
    }

    #[test]
    fn test_input_without_session_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = manager(dir.path());
        assert!(matches!(
            sessions.send_input(InputEvent::PointerDown),
            Err(SessionError::NotDeployed)
        ));
    }

    #[test]
    fn test_wait_without_session_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut sessions = manager(dir.path());
        assert!(matches!(sessions.wait(), Err(SessionError::NotDeployed)));
    }

    #[test]
    fn test_redeploy_replaces_the_running_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut sessions = manager(dir.path());

        sessions.deploy(DeployOptions::default()).unwrap();
        sessions.send_input(InputEvent::PointerDown).unwrap();
        sessions.deploy(limited(5)).unwrap();

        let report = sessions.wait().unwrap();
        assert_eq!(report.frames, 5);
        let snapshot = sessions.latest_snapshot().unwrap();
        assert_eq!(snapshot.time.frame, 5);
    }

    #[test]
    fn test_unknown_plane_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut sessions = manager(dir.path());
        sessions.config.plane_id = "zeppelin".into();
        let deployment = sessions.deploy(limited(1)).unwrap();
        assert_eq!(deployment.plane_id, "intercept");
        sessions.wait().unwrap();
    }

    #[test]
    fn test_stored_high_score_is_handed_to_the_engine() {
        let dir = tempfile::tempdir().unwrap();
        let mut sessions = manager(dir.path());
        high_score::save_if_higher(&sessions.config.high_score_path, 1200).unwrap();

        let deployment = sessions.deploy(limited(1)).unwrap();
        assert_eq!(deployment.high_score, 1200);
        sessions.wait().unwrap();
        assert_eq!(sessions.latest_snapshot().unwrap().high_score, 1200);
    }

    #[test]
    fn test_decided_scores_are_settled() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = manager(dir.path());
        let path = sessions.config.high_score_path.clone();
        let report = |outcome, score| LoopReport {
            frames: 100,
            outcome,
            score,
            exit: game_loop::LoopExit::Decided,
        };

        let won = sessions.settle(report(SessionOutcome::Win { final_score: 7500 }, 7500));
        assert!(won.new_high_score);
        assert_eq!(high_score::load(&path).unwrap(), 7500);

        let lost = sessions.settle(report(SessionOutcome::GameOver { final_score: 500 }, 500));
        assert!(!lost.new_high_score);
        assert_eq!(high_score::load(&path).unwrap(), 7500);

        let open = sessions.settle(report(SessionOutcome::InProgress, 9000));
        assert!(!open.new_high_score);
        assert_eq!(high_score::load(&path).unwrap(), 7500);
    }

    #[test]
    fn test_debrief_uses_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = manager(dir.path());

        assert!(sessions.debrief(SessionOutcome::InProgress).is_none());

        let taunt = sessions
            .debrief(SessionOutcome::GameOver { final_score: 20 })
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(taunt, "Simulation terminated. Check your vectors and try again.");

        let win = sessions
            .debrief(SessionOutcome::Win { final_score: 7500 })
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(win, "Target neutralized. Excellent work, pilot. Return to base.");
    }
}
