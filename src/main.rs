use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use torus_snake::config::{AppConfig, ConfigOverrides};
use torus_snake::logging;
use torus_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a wrap-around board, drawn in the terminal")]
struct Cli {
    /// TOML config file (defaults to .torus-snake.toml in the working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side of one grid cell in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Viewport width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Viewport height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Starting speed in ticks per second
    #[arg(long)]
    speed: Option<u32>,

    /// Seed for reproducible food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Cli> for ConfigOverrides {
    fn from(cli: Cli) -> Self {
        Self {
            config_file: cli.config,
            cell_size: cli.cell_size,
            width: cli.width,
            height: cli.height,
            speed: cli.speed,
            seed: cli.seed,
            log_file: cli.log_file,
            log_level: cli.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.into())?;
    config.game.validate().context("Invalid game configuration")?;

    // Held until exit so buffered log lines get flushed
    let _log_guard = logging::init(&config.logging)?;
    info!(?config, "configuration loaded");

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
