//! Tic-tac-toe GUI
//!
//! A graphical interface for playing 3x3 or 5x5 against the solver or another player.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tictactoe::ui::TicTacToeApp;
use tictactoe::{EngineConfig, Variant};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play tic-tac-toe on a 3x3 or 5x5 board
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board to start on (3x3 or 5x5)
    #[arg(short, long, default_value = "3x3")]
    variant: Variant,

    /// TOML file overriding the solver settings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    let mut configs = Variant::ALL.map(EngineConfig::for_variant);
    if let Some(path) = &args.config {
        for (config, variant) in configs.iter_mut().zip(Variant::ALL) {
            *config = EngineConfig::from_file(path, variant)
                .with_context(|| format!("loading {} config for {variant}", path.display()))?;
        }
    }
    info!(variant = %args.variant, "Starting GUI");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Tic-Tac-Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(move |cc| Ok(Box::new(TicTacToeApp::new(cc, args.variant, configs)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
