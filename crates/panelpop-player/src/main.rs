//! Panelpop - panel-swapping puzzle game
//!
//! Usage:
//!   panelpop [--config <path>] [--fullscreen] [--font <path>]
//!
//! Hotkeys: Alt+Enter toggles fullscreen, Ctrl+F toggles the FPS overlay.

use anyhow::{Context, Result};
use clap::Parser;
use panelpop_player::{logging, PanelPopModes, SoftbufferDisplay, WinitInput};
use panelpop_runtime::{AppContext, MonotonicClock, Orchestrator, TomlConfigStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "panelpop")]
#[command(about = "Panel-swapping puzzle game")]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,

    /// TTF font for menu and overlay text
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init();

    let store = match &args.config {
        Some(path) => TomlConfigStore::open(path),
        None => TomlConfigStore::open_default(),
    }
    .context("Failed to load config")?;

    let mut window_config = store.window().clone();
    if args.fullscreen {
        window_config.fullscreen = true;
    }
    if let Some(font) = args.font {
        window_config.font = Some(font);
    }
    tracing::info!(path = %store.path().display(), "using config");

    let (input, window) = WinitInput::new(&window_config).context("Failed to open window")?;
    let display =
        SoftbufferDisplay::new(window, &window_config).context("Failed to create display")?;

    let factory = PanelPopModes::new(window_config.width as usize, window_config.height as usize);
    let context = AppContext::new(
        input,
        display,
        Box::new(store),
        Box::new(MonotonicClock::new()),
    );

    let mut orchestrator = Orchestrator::new(context, Box::new(factory));
    orchestrator.run();

    Ok(())
}
