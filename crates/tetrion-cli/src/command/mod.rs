use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logger::{self, LogLevel};

use self::{leaderboard::LeaderboardArg, play::PlayArg};

mod leaderboard;
mod play;

/// Default location of the leaderboard file.
const DEFAULT_LEADERBOARD_PATH: &str = "./data/leaderboard.json";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    /// Append log records to this file (logging is disabled without it)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Minimum level of the records written to the log file
    #[clap(long, global = true, value_enum, default_value_t = LogLevel::default())]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the game in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the saved best scores
    Leaderboard(#[clap(flatten)] LeaderboardArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logger::init(args.log_file.as_deref(), args.log_level)?;
    match args.mode.unwrap_or_else(|| Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Leaderboard(arg) => leaderboard::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_play() {
        let args = CommandArgs::try_parse_from(["tetrion"]).unwrap();
        assert!(args.mode.is_none());
        assert_eq!(args.log_level, LogLevel::Info);
        assert_eq!(args.log_file, None);
    }

    #[test]
    fn test_global_log_options_after_subcommand() {
        let args = CommandArgs::try_parse_from([
            "tetrion",
            "play",
            "--seed",
            "7",
            "--log-file",
            "tetrion.log",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.log_level, LogLevel::Debug);
        assert_eq!(args.log_file, Some(PathBuf::from("tetrion.log")));
        assert!(matches!(args.mode, Some(Mode::Play(_))));
    }

    #[test]
    fn test_leaderboard_limit() {
        let args = CommandArgs::try_parse_from(["tetrion", "leaderboard", "--limit", "3"]).unwrap();
        let Some(Mode::Leaderboard(arg)) = args.mode else {
            panic!("expected leaderboard mode");
        };
        assert_eq!(arg.limit, 3);
        assert_eq!(arg.leaderboard, PathBuf::from(DEFAULT_LEADERBOARD_PATH));
    }
}
