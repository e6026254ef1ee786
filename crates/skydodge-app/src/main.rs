use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;

use skydodge_app::config::{AppConfig, CONFIG_FILE};
use skydodge_app::flavor::FlavorService;
use skydodge_app::session::{DeployOptions, SessionManager};
use skydodge_app::logging;
use skydodge_core::commands::{Control, InputEvent};
use skydodge_core::enums::SessionOutcome;

/// Fly a headless SKY DODGE session and print the debrief
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Craft preset id
    #[arg(short, long)]
    plane: Option<String>,
    /// RNG seed; overrides the config file
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many frames
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Settings file
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,
    /// Hold the trigger for the whole flight
    #[arg(long)]
    fire: bool,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = AppConfig::load(&args.config);
    if let Some(plane) = args.plane {
        config.plane_id = plane;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let flavor = FlavorService::from_config(&config.flavor);
    let mut sessions = SessionManager::new(config, flavor);

    let deployment = sessions
        .deploy(DeployOptions {
            max_frames: Some(args.frames),
            stop_on_outcome: true,
        })
        .context("failed to deploy session")?;
    println!("{}", deployment.briefing.name);
    println!("  {}", deployment.briefing.objective);
    println!(
        "  pilot {} | craft {} | seed {} | best {}",
        deployment.briefing.pilot_callsign,
        deployment.plane_id,
        deployment.seed,
        deployment.high_score
    );

    if args.fire {
        sessions
            .send_input(InputEvent::KeyDown {
                control: Control::Fire,
            })
            .context("failed to pull the trigger")?;
    }

    let report = sessions.wait().context("session ended abnormally")?;
    match report.outcome {
        SessionOutcome::InProgress => {
            println!("Frame limit reached after {} frames, score {}", report.frames, report.score);
        }
        SessionOutcome::GameOver { final_score } => println!("GAME OVER: {final_score}"),
        SessionOutcome::Win { final_score } => println!("MISSION COMPLETE: {final_score}"),
    }
    if report.new_high_score {
        println!("New high score!");
    }
    if let Some(debrief) = sessions.debrief(report.outcome) {
        let line = debrief
            .join()
            .map_err(|_| anyhow!("debrief thread panicked"))?;
        println!("> {line}");
    }
    Ok(())
}
