use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use snake_arcade::clock::GameClock;
use snake_arcade::game::config::{MAX_BASE_SPEED, MIN_BASE_SPEED};
use snake_arcade::game::{Background, BoardSize, GameConfig};
use snake_arcade::logging;
use snake_arcade::modes::PlayMode;
use snake_arcade::store::{HighScoreStore, JsonFileStore, MemoryStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Terminal Snake with weighted food and rising speed")]
struct Cli {
    /// Board size (small 15x15, medium 20x20, large 25x25 cells)
    #[arg(long, default_value = "medium")]
    size: SizeArg,

    /// Starting speed in moves per second
    #[arg(
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(u32)
            .range(i64::from(MIN_BASE_SPEED)..=i64::from(MAX_BASE_SPEED))
    )]
    speed: u32,

    /// Board background colour
    #[arg(long, default_value = "classic")]
    background: BackgroundArg,

    /// Where to keep the high score (defaults to the user data directory)
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Keep the high score in memory only
    #[arg(long, conflicts_with = "high_score_file")]
    no_persist: bool,

    /// Log file (defaults to the user data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SizeArg {
    Small,
    Medium,
    Large,
}

impl From<SizeArg> for BoardSize {
    fn from(arg: SizeArg) -> Self {
        match arg {
            SizeArg::Small => BoardSize::Small,
            SizeArg::Medium => BoardSize::Medium,
            SizeArg::Large => BoardSize::Large,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum BackgroundArg {
    Classic,
    Midnight,
    Violet,
    Forest,
}

impl From<BackgroundArg> for Background {
    fn from(arg: BackgroundArg) -> Self {
        match arg {
            BackgroundArg::Classic => Background::Classic,
            BackgroundArg::Midnight => Background::Midnight,
            BackgroundArg::Violet => Background::Violet,
            BackgroundArg::Forest => Background::Forest,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = match cli.log_file {
        Some(path) => path,
        None => logging::default_log_path()?,
    };
    logging::init_logger(&log_path)?;

    // Create game configuration from CLI arguments
    let config = GameConfig::new(cli.size.into(), cli.speed, cli.background.into());
    config.validate().context("Invalid game settings")?;

    let store: Box<dyn HighScoreStore> = if cli.no_persist {
        Box::new(MemoryStore::default())
    } else {
        match cli.high_score_file {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(JsonFileStore::in_data_dir()?),
        }
    };

    info!("starting with {:?}", config);

    let mut play_mode = PlayMode::new(GameClock::new(config, store));
    play_mode.run().await?;

    Ok(())
}
