//! Pang entry point
//!
//! Headless native runner: loads settings, lets the autopilot play and logs
//! what a renderer would show.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
use pang::{GameLoop, LogRenderer, Settings};

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Pang simulation with a demo autopilot", long_about = None)]
struct Args {
    /// JSON settings file (unknown keys are rejected)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks even if the game is not over
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Run as fast as possible instead of pacing ticks
    #[arg(long)]
    fast: bool,
    /// Print the final game state as JSON
    #[arg(long)]
    dump_state: bool,
    /// Log the status line every N ticks
    #[arg(long, default_value_t = 100)]
    status_every: u64,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Pang (native) starting...");

    let mut settings = match &args.config {
        Some(path) => {
            Settings::load(path).with_context(|| format!("load settings {}", path.display()))?
        }
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    settings.validate().context("validate settings")?;

    let mut game =
        GameLoop::new(settings, LogRenderer::new(args.status_every)).with_autopilot(true);
    let ticks = game.run(args.max_ticks, !args.fast);

    let state = game.into_state();
    if state.is_complete() {
        log::info!("Game complete after {} ticks", ticks);
    }
    if args.dump_state {
        let json = serde_json::to_string_pretty(&state).context("serialize game state")?;
        println!("{json}");
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the wasm surface
}
