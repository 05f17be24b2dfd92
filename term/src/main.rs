use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use concentration_core::{ConfigError, Coord, Coord2, GameConfig, GameSession, SessionStats};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing_subscriber::EnvFilter;

use crate::clock::FrameClock;
use crate::input::TerminalInput;
use crate::renderer::{TerminalRenderer, cells_for};

mod clock;
mod input;
mod renderer;

/// Terminal cells per tile edge, horizontally.
const TILE_SIZE: u16 = 4;
const GAP_SIZE: u16 = 2;
const MARGIN: u16 = 2;

#[derive(Parser, Debug)]
#[command(version, about = "Match pairs of hidden icons with the mouse", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Board columns
    #[arg(long, default_value_t = 10)]
    width: Coord,

    /// Board rows
    #[arg(long, default_value_t = 7)]
    height: Coord,

    /// Log destination, the terminal itself is taken by the game
    #[arg(long, default_value = "concentration.log")]
    log_file: PathBuf,
}

fn init_logging(args: &Args) -> Result<()> {
    let file = File::create(&args.log_file)
        .with_context(|| format!("Could not create log file {}", args.log_file.display()))?;
    let level = args.verbose.log_level_filter().as_str().to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// Default pacing and timings on a board scaled down to terminal cells.
fn terminal_config(size: Coord2) -> Result<GameConfig, ConfigError> {
    let mut config = GameConfig::new(size)?
        .with_geometry(TILE_SIZE, GAP_SIZE)
        .fit_window(MARGIN);
    config.reveal_speed = 1;
    config.validate()?;
    Ok(config)
}

fn play(renderer: &mut TerminalRenderer, config: GameConfig, seed: u64) -> Result<SessionStats> {
    let clock = FrameClock::new(config.frame_duration());
    let rng = SmallRng::seed_from_u64(seed);
    let mut session = GameSession::new(config, &mut *renderer, TerminalInput, clock, rng)?;
    session.start();
    let stats = session.run()?;
    drop(session);

    if let Some(err) = renderer.take_failure() {
        return Err(err).context("Terminal output failed");
    }
    Ok(stats)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = terminal_config((args.width, args.height))?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");

    let (cols, rows) = cells_for(config.window);
    match crossterm::terminal::size() {
        Ok((have_cols, have_rows)) if have_cols < cols || have_rows < rows => {
            log::warn!("Terminal is {have_cols}x{have_rows}, the board needs {cols}x{rows}");
        }
        Ok(_) => {}
        Err(err) => log::warn!("Could not read terminal size: {err}"),
    }

    let mut renderer = TerminalRenderer::new(&config);
    renderer.enter().context("Could not set up the terminal")?;
    let result = play(&mut renderer, config, seed);
    if let Err(err) = renderer.exit() {
        log::error!("Could not restore the terminal: {err}");
    }

    let stats = result?;
    println!(
        "{} rounds won, {} matches and {} misses over {} turns (seed {seed})",
        stats.rounds_won, stats.matches, stats.mismatches, stats.turns
    );
    Ok(())
}
