#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless hedge maze session.

mod presentation;
mod tour;

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use hedge_maze_system_bootstrap::{LevelConfig, Session};
use hedge_maze_world::query;
use tracing_subscriber::EnvFilter;

use self::presentation::{present, TerminalChime, TerminalScoreboard};
use self::tour::{touched_collectibles, Tour};

const FRAME: Duration = Duration::from_millis(16);

/// Walks a scripted player through a hedge maze level.
#[derive(Debug, Parser)]
#[command(name = "hedge-maze", version)]
struct Args {
    /// Level description in TOML; the reference maze is used when omitted.
    #[arg(long)]
    level: Option<PathBuf>,
    /// Seed for collectible placement; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of frames to simulate.
    #[arg(long, default_value_t = 5_000)]
    ticks: u32,
    /// Distance the player walks per frame, in world units.
    #[arg(long, default_value_t = 0.5, value_parser = parse_speed)]
    speed: f32,
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    log: String,
}

/// Entry point for the hedge maze command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log)?;

    let config = load_level(args.level.as_deref())?;
    let level = config.validate().context("level configuration is invalid")?;
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut chime = TerminalChime::new(io::stdout());
    let mut scoreboard = TerminalScoreboard::new(io::stdout());

    let mut events = Vec::new();
    let mut session =
        Session::start(&level, seed, &mut events).context("failed to start session")?;
    println!("{}", query::welcome_banner(session.world()));
    present(&events, &mut chime, &mut scoreboard);

    let plan = session.plan();
    let transform = session.transform();
    let start = transform.cell_to_world(plan.entrance_cell());
    let waypoints: Vec<_> = plan
        .collectible_cells()
        .iter()
        .copied()
        .chain(std::iter::once(plan.goal_cell()))
        .map(|cell| transform.cell_to_world(cell))
        .collect();
    let mut tour = Tour::new(start, waypoints, args.speed);

    let mut frames = 0;
    while frames < args.ticks {
        let mut events = Vec::new();
        if let Some(position) = tour.step() {
            session.move_player(position, &mut events);
            for entity in touched_collectibles(session.world(), position) {
                session.pick_up(entity, &mut events);
            }
        }
        session.tick(FRAME, &mut events);
        present(&events, &mut chime, &mut scoreboard);
        frames += 1;

        if tour.is_finished() && query::goal_reached(session.world()) {
            break;
        }
    }

    let score = session.score();
    println!(
        "Finished after {frames} frames: {}/{} candy canes, goal {}.",
        score.score(),
        score.win_threshold(),
        if query::goal_reached(session.world()) {
            "reached"
        } else {
            "not reached"
        }
    );
    io::stdout().flush().context("failed to flush stdout")?;
    Ok(())
}

fn parse_speed(raw: &str) -> Result<f32, String> {
    let speed: f32 = raw
        .parse()
        .map_err(|error| format!("`{raw}` is not a number: {error}"))?;
    if !speed.is_finite() || speed <= 0.0 {
        return Err(format!("speed must be a positive finite number, got `{raw}`"));
    }
    Ok(speed)
}

fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .with_context(|| format!("invalid log filter `{default_filter}`"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn load_level(path: Option<&Path>) -> Result<LevelConfig> {
    let Some(path) = path else {
        return Ok(LevelConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse level file at {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_reference_level_matches_default() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("levels/reference.toml");
        let loaded = load_level(Some(&path)).expect("bundled level parses");
        let expected = LevelConfig::default();

        assert_eq!(loaded.maze, expected.maze);
        assert_eq!(loaded.entrance, expected.entrance);
        assert_eq!(loaded.exit, expected.exit);
        assert_eq!(loaded.collectibles, expected.collectibles);
    }

    #[test]
    fn missing_level_file_reports_path() {
        let error = load_level(Some(Path::new("does/not/exist.toml")))
            .expect_err("missing file must fail");
        assert!(format!("{error:#}").contains("does/not/exist.toml"));
    }

    #[test]
    fn arguments_default_to_reference_run() {
        let args = Args::parse_from(["hedge-maze"]);
        assert!(args.level.is_none());
        assert_eq!(args.ticks, 5_000);
        assert!((args.speed - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn degenerate_speeds_are_rejected() {
        for speed in ["0", "-1", "NaN", "inf", "fast"] {
            let result = Args::try_parse_from(["hedge-maze", "--speed", speed]);
            assert!(result.is_err(), "speed `{speed}` must be rejected");
        }

        let args = Args::try_parse_from(["hedge-maze", "--speed", "2.5"]).expect("valid speed");
        assert!((args.speed - 2.5).abs() < f32::EPSILON);
    }
}
