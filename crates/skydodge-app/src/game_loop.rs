//! Frame loop thread: steps the simulation engine at a fixed rate and
//! publishes snapshots.
//!
//! The engine is moved into the thread and dropped when the loop ends.
//! Commands arrive via `mpsc`. A loop whose generation is no longer current
//! exits before stepping again.

use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skydodge_core::enums::SessionOutcome;
use skydodge_sim::SimulationEngine;

use crate::intel::CombatIntel;
use crate::state::{GameLoopCommand, LoopShared};

/// How a loop should run.
#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    pub frame_rate_hz: u32,
    /// The generation this loop belongs to.
    pub generation: u64,
    /// Stop after this many frames.
    pub max_frames: Option<u64>,
    /// Stop once the session is decided instead of idling on a frozen frame.
    pub stop_on_outcome: bool,
}

impl LoopSettings {
    fn frame_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.frame_rate_hz.max(1)))
    }
}

/// Why a loop ended and where the session stood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    pub frames: u64,
    pub outcome: SessionOutcome,
    pub score: u32,
    pub exit: LoopExit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Shutdown,
    Superseded,
    FrameLimit,
    Decided,
}

/// Spawns the frame loop in a new thread.
///
/// Returns the command sender and the handle yielding the final report.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    settings: LoopSettings,
    shared: LoopShared,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopReport>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name(format!("skydodge-frame-loop-{}", settings.generation))
        .spawn(move || run_game_loop(engine, settings, cmd_rx, &shared))?;

    Ok((cmd_tx, handle))
}

/// The frame loop. Runs until shutdown, supersession, disconnect or one of
/// the configured stop conditions.
fn run_game_loop(
    mut engine: SimulationEngine,
    settings: LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    shared: &LoopShared,
) -> LoopReport {
    let frame = settings.frame_duration();
    let started = Instant::now();
    let mut next_frame_time = started;
    let mut intel = CombatIntel::default();
    let mut frames = 0;

    let exit = loop {
        if shared.generation.load(Ordering::SeqCst) != settings.generation {
            log::debug!("Frame loop {} superseded", settings.generation);
            break LoopExit::Superseded;
        }

        // 1. Drain all pending commands
        let mut stop = None;
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Input(event)) => engine.queue_input(event),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    stop = Some(LoopExit::Shutdown);
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }
        if let Some(exit) = stop {
            break exit;
        }

        // 2. Advance one frame
        let now_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let snapshot = engine.tick(now_ms);
        frames += 1;

        // 3. Publish
        if intel.observe(&snapshot.events) {
            log::info!("Combat intel: {}", intel.line());
            if let Ok(mut lock) = shared.combat_intel.lock() {
                *lock = intel.line().to_string();
            }
        }
        let decided = snapshot.outcome.is_terminal();
        if let Ok(mut lock) = shared.latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if settings.stop_on_outcome && decided {
            break LoopExit::Decided;
        }
        if settings.max_frames.is_some_and(|max| frames >= max) {
            break LoopExit::FrameLimit;
        }

        // 4. Sleep until next frame
        next_frame_time += frame;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame * 2 {
            // Too far behind: reset to avoid catch-up spiral
            next_frame_time = now;
        }
    };

    LoopReport {
        frames,
        outcome: engine.outcome(),
        score: engine.score(),
        exit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use skydodge_core::commands::{Control, InputEvent};
    use skydodge_sim::SimConfig;

    fn settings(generation: u64) -> LoopSettings {
        LoopSettings {
            frame_rate_hz: 1000,
            generation,
            max_frames: Some(20),
            stop_on_outcome: true,
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Input(InputEvent::PointerDown))
            .unwrap();
        tx.send(GameLoopCommand::Input(InputEvent::KeyDown {
            control: Control::Boost,
        }))
        .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Input(InputEvent::PointerDown)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_frame_duration() {
        let mut s = settings(1);
        s.frame_rate_hz = 60;
        assert_eq!(s.frame_duration().as_nanos(), 1_000_000_000u128 / 60);
        s.frame_rate_hz = 0;
        assert_eq!(s.frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_runs_to_frame_limit_and_publishes() {
        let state = AppState::new();
        let generation = state.next_generation();
        let engine = SimulationEngine::new(SimConfig::default());

        let (_tx, handle) = spawn_game_loop(engine, settings(generation), state.loop_shared())
            .unwrap();
        let report = handle.join().unwrap();

        assert_eq!(report.frames, 20);
        assert_eq!(report.exit, LoopExit::FrameLimit);
        let snapshot = state.latest_snapshot().unwrap();
        assert_eq!(snapshot.time.frame, 20);
    }

    #[test]
    fn test_stale_generation_never_steps() {
        let state = AppState::new();
        let generation = state.next_generation();
        state.next_generation();
        let engine = SimulationEngine::new(SimConfig::default());

        let (_tx, handle) = spawn_game_loop(engine, settings(generation), state.loop_shared())
            .unwrap();
        let report = handle.join().unwrap();

        assert_eq!(report.exit, LoopExit::Superseded);
        assert_eq!(report.frames, 0);
        assert!(state.latest_snapshot().is_none());
    }

    #[test]
    fn test_shutdown_stops_the_loop() {
        let state = AppState::new();
        let generation = state.next_generation();
        let engine = SimulationEngine::new(SimConfig::default());
        let mut s = settings(generation);
        s.max_frames = None;
        s.frame_rate_hz = 60;

        let (tx, handle) = spawn_game_loop(engine, s, state.loop_shared()).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();
        let report = handle.join().unwrap();
        assert_eq!(report.exit, LoopExit::Shutdown);
    }

    #[test]
    fn test_dropped_sender_stops_the_loop() {
        let state = AppState::new();
        let generation = state.next_generation();
        let engine = SimulationEngine::new(SimConfig::default());
        let mut s = settings(generation);
        s.max_frames = None;

        let (tx, handle) = spawn_game_loop(engine, s, state.loop_shared()).unwrap();
        drop(tx);
        assert_eq!(handle.join().unwrap().exit, LoopExit::Shutdown);
    }

    #[test]
    fn test_inputs_reach_the_engine() {
        let state = AppState::new();
        let generation = state.next_generation();
        let engine = SimulationEngine::new(SimConfig::default());
        let mut s = settings(generation);
        s.max_frames = None;

        let (tx, handle) = spawn_game_loop(engine, s, state.loop_shared()).unwrap();
        tx.send(GameLoopCommand::Input(InputEvent::PointerDown))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut fired = false;
        while Instant::now() < deadline {
            if state
                .latest_snapshot()
                .is_some_and(|snap| !snap.projectiles.is_empty())
            {
                fired = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        let _ = tx.send(GameLoopCommand::Shutdown);
        handle.join().unwrap();
        assert!(fired);
    }
}
