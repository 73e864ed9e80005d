use std::path::PathBuf;

use anyhow::Context as _;
use log::info;
use tetrion_engine::{EngineConfig, GameController};

use crate::{leaderboard::JsonLeaderboard, tui::Tui, util};

use self::app::PlayApp;

mod app;
mod name_entry;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Number of columns of the board [default: 10]
    #[clap(long)]
    board_width: Option<usize>,
    /// Number of rows of the board [default: 20]
    #[clap(long)]
    board_height: Option<usize>,
    /// Time between two automatic drops, in milliseconds [default: 1000]
    #[clap(long)]
    drop_interval_ms: Option<u64>,
    /// JSON engine configuration file (`boardWidth`, `boardHeight`, `initialDropIntervalMs`)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible piece sequence
    #[clap(long)]
    seed: Option<u64>,
    /// Path of the leaderboard file
    #[clap(long, default_value = super::DEFAULT_LEADERBOARD_PATH)]
    leaderboard: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            board_width: None,
            board_height: None,
            drop_interval_ms: None,
            config: None,
            seed: None,
            leaderboard: PathBuf::from(super::DEFAULT_LEADERBOARD_PATH),
        }
    }
}

impl PlayArg {
    /// Builds the engine configuration.
    ///
    /// Command line options override the configuration file, which overrides
    /// the defaults.
    fn resolve_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("engine configuration", path)?,
            None => EngineConfig::default(),
        };
        if let Some(width) = self.board_width {
            config.board_width = width;
        }
        if let Some(height) = self.board_height {
            config.board_height = height;
        }
        if let Some(interval) = self.drop_interval_ms {
            config.initial_drop_interval_ms = interval;
        }
        config
            .validate()
            .context("Invalid engine configuration")?;
        Ok(config)
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = arg.resolve_config()?;
    info!("starting game with {config:?}");

    let source = JsonLeaderboard::new(&arg.leaderboard);
    let controller = match arg.seed {
        Some(seed) => GameController::with_seed(config, seed, source),
        None => GameController::new(config, source),
    }
    .context("Invalid engine configuration")?;

    let mut app = PlayApp::new(controller);
    Tui::new().run(&mut app)
}
