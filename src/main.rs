use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cube_snake::game::GameConfig;
use cube_snake::modes::HumanMode;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cube_snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field width in world units
    #[arg(long)]
    width: Option<i32>,

    /// Field height in world units
    #[arg(long)]
    height: Option<i32>,

    /// Side of one grid cell in world units
    #[arg(long)]
    segment_size: Option<i32>,

    /// Milliseconds per simulation tick
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for fruit placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log (the terminal is taken by the game)
    #[arg(long, default_value = "cube_snake.log")]
    log_file: PathBuf,

    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    /// Defaults, then the config file, then individual flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.game_width = width;
        }
        if let Some(height) = self.height {
            config.game_height = height;
        }
        if let Some(segment_size) = self.segment_size {
            config.segment_size = segment_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }

        config.validate().context("Invalid command line settings")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    info!(
        "Starting cube_snake: {}x{} world, segment {}, tick {}ms",
        config.game_width, config.game_height, config.segment_size, config.tick_interval_ms
    );

    let mut human_mode = HumanMode::new(config, cli.seed)?;
    human_mode.run().await?;

    info!("Exiting");
    Ok(())
}
