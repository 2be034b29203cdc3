use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use log::info;
use stackfall_engine::{Difficulty, EngineConfig, PieceSeed};

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;
mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Starting speed: facile, normale, difficile or impossibile.
    /// Unrecognized names play as normale. Without this flag a selection
    /// menu is shown.
    #[clap(long, value_name = "NAME")]
    difficulty: Option<String>,
    /// Engine configuration file (JSON); missing fields keep their defaults
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed for the piece sequence, as 32 hex digits
    #[clap(long, value_name = "HEX")]
    seed: Option<PieceSeed>,
    /// Do not draw the landing position of the falling piece
    #[clap(long)]
    no_ghost: bool,
    /// Write log messages to this file (filter with `RUST_LOG`)
    #[clap(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        difficulty,
        config,
        seed,
        no_ghost,
        log_file,
    } = arg;

    if let Some(path) = log_file {
        init_logging(path)?;
    }

    let mut config = match config {
        Some(path) => read_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_seed(*seed);
    }
    config.validate().context("invalid engine configuration")?;

    let difficulty = difficulty
        .as_deref()
        .map(|name| Difficulty::from_name(Some(name)));
    info!("starting with {config:?}, difficulty {difficulty:?}");

    let mut app = PlayApp::new(config, difficulty, !*no_ghost);
    Tui::new().run(&mut app)?;

    if let Some(stats) = app.into_result()? {
        println!(
            "Score: {}  Lines: {}  Level: {}",
            stats.score(),
            stats.total_cleared_lines(),
            stats.level()
        );
    }
    Ok(())
}

fn read_config(path: &Path) -> anyhow::Result<EngineConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to install logger")?;
    Ok(())
}
