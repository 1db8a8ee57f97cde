//! Froggit headless runner
//!
//! Loads a level, lets the seeded autopilot play it at a fixed timestep and
//! logs how the session went. Set `RUST_LOG=debug` to follow every hop.
//!
//! ```text
//! froggit [LEVEL.json] [--hitboxes FILE] [--tuning FILE] [--seed N] [--seconds S]
//!         [--dump FILE]
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use froggit::audio::{AudioManager, LogSink};
use froggit::autopilot::Autopilot;
use froggit::consts::SIM_DT;
use froggit::sim::{Level, tick};
use froggit::snapshot::FrameSnapshot;
use froggit::{ConfigError, HitboxTable, LevelConfig, Tuning};

const DEFAULT_LEVEL: &str = include_str!("../levels/default.json");
const DEFAULT_HITBOXES: &str = include_str!("../levels/hitboxes.json");

#[derive(Debug, Error)]
enum RunError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot serialize snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

#[derive(Parser, Debug, Clone)]
#[command(name = "froggit")]
#[command(about = "Play a Froggit level headless with a seeded autopilot")]
struct Cli {
    /// Level file (defaults to the bundled level)
    level: Option<PathBuf>,

    /// Hitbox table for obstacles and frog frames
    #[arg(long)]
    hitboxes: Option<PathBuf>,

    /// Tuning overrides (durations, lives, frame counts)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Autopilot seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Time limit in simulated seconds
    #[arg(long, default_value_t = 120.0, value_parser = parse_seconds)]
    seconds: f32,

    /// Write the final frame snapshot as JSON
    #[arg(long)]
    dump: Option<PathBuf>,
}

fn parse_seconds(raw: &str) -> Result<f32, String> {
    let seconds: f32 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if seconds > 0.0 && seconds.is_finite() {
        Ok(seconds)
    } else {
        Err(format!("`{raw}` must be a positive duration"))
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Won,
    GameOver,
    OutOfTime,
}

fn read(path: &Path) -> Result<String, RunError> {
    std::fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load(options: &Cli) -> Result<Level, RunError> {
    let level_json = match &options.level {
        Some(path) => read(path)?,
        None => DEFAULT_LEVEL.to_owned(),
    };
    let hitbox_json = match &options.hitboxes {
        Some(path) => read(path)?,
        None => DEFAULT_HITBOXES.to_owned(),
    };
    let tuning = match &options.tuning {
        Some(path) => Tuning::from_json(&read(path)?)?,
        None => Tuning::default(),
    };

    let config = LevelConfig::from_json(&level_json)?;
    let hitboxes = HitboxTable::from_json(&hitbox_json)?;
    Ok(Level::new(&config, &hitboxes, tuning)?)
}

/// Play until the level is won, lives run out or time is up
fn play(level: &mut Level, seed: u64, seconds: f32) -> (Outcome, f32) {
    let mut pilot = Autopilot::new(seed);
    let mut audio = AudioManager::new(LogSink);
    let mut elapsed = 0.0;

    while elapsed < seconds {
        let input = pilot.next_input(level);
        tick(level, &input, SIM_DT);
        audio.play_events(&level.drain_events());
        elapsed += SIM_DT;

        if level.game_won() && level.exit_settled() {
            return (Outcome::Won, elapsed);
        }
        if level.paused() {
            if level.is_game_over() {
                return (Outcome::GameOver, elapsed);
            }
            level.continue_game();
        } else if level.exit_settled() {
            let tally = level.tally();
            log::info!("Exit reached ({}/{})", tally.occupied, tally.total);
            level.continue_game();
        }
    }
    (Outcome::OutOfTime, elapsed)
}

fn run(options: Cli) -> Result<Outcome, RunError> {
    let mut level = load(&options)?;
    log::info!("Autopilot seed {}, time limit {:.0}s", options.seed, options.seconds);

    let (outcome, elapsed) = play(&mut level, options.seed, options.seconds);
    let tally = level.tally();
    log::info!(
        "{outcome:?} after {elapsed:.1}s: {}/{} exits, {} lives left",
        tally.occupied,
        tally.total,
        level.lives()
    );

    if let Some(path) = &options.dump {
        let json = FrameSnapshot::capture(&level).to_json()?;
        std::fs::write(path, json).map_err(|source| RunError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("Snapshot written to {}", path.display());
    }
    Ok(outcome)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Froggit (headless) starting...");

    match run(Cli::parse()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
