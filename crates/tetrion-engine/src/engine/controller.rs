use std::{convert::Infallible, time::Duration};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, EngineConfig};

use super::{Command, GameSession, PieceFactory, SessionSnapshot, TickOutcome};

/// A leaderboard row offered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: usize,
}

impl ScoreEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, score: usize) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Where the controller reads the current best scores from.
///
/// Storing new scores is up to the implementation; the engine only reads.
pub trait LeaderboardSource {
    type Error: std::error::Error;

    /// Returns the stored scores.
    fn top_scores(&mut self) -> Result<Vec<ScoreEntry>, Self::Error>;
}

/// Owns the current [`GameSession`] and the leaderboard shown next to it.
///
/// Routes input commands to the session, except [`Command::Reset`] which
/// replaces the session with a fresh one in any status. The leaderboard is
/// loaded when a session starts; a failing source is logged and shows as an
/// empty list.
///
/// # Example
///
/// ```
/// use tetrion_engine::{Command, EngineConfig, GameController, MemoryLeaderboard};
///
/// let mut board = MemoryLeaderboard::new();
/// board.submit("alice", 1200);
///
/// let mut controller = GameController::with_seed(EngineConfig::default(), 3, board).unwrap();
/// assert_eq!(controller.leaderboard()[0].name, "alice");
///
/// controller.handle_command(Command::HardDrop);
/// assert_eq!(controller.session().stats().completed_pieces(), 1);
///
/// controller.handle_command(Command::Reset);
/// assert_eq!(controller.session().stats().completed_pieces(), 0);
/// ```
#[derive(Debug)]
pub struct GameController<L> {
    config: EngineConfig,
    seed: Option<u64>,
    sessions_started: u64,
    session: GameSession,
    leaderboard: Vec<ScoreEntry>,
    source: L,
}

impl<L> GameController<L>
where
    L: LeaderboardSource,
{
    pub fn new(config: EngineConfig, source: L) -> Result<Self, ConfigError> {
        Self::build(config, None, source)
    }

    /// Creates a controller whose sessions draw reproducible piece sequences.
    ///
    /// The `n`-th session (counting from 0) is seeded with `seed + n`.
    pub fn with_seed(config: EngineConfig, seed: u64, source: L) -> Result<Self, ConfigError> {
        Self::build(config, Some(seed), source)
    }

    fn build(config: EngineConfig, seed: Option<u64>, source: L) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = GameSession::from_validated(config.clone(), factory_for(seed, 0));
        let mut controller = Self {
            config,
            seed,
            sessions_started: 1,
            session,
            leaderboard: vec![],
            source,
        };
        controller.reload_leaderboard();
        Ok(controller)
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Scores loaded for the current session, best first.
    #[must_use]
    pub fn leaderboard(&self) -> &[ScoreEntry] {
        &self.leaderboard
    }

    #[must_use]
    pub fn source(&self) -> &L {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut L {
        &mut self.source
    }

    /// The score to offer for saving, once the session is over.
    #[must_use]
    pub fn final_score(&self) -> Option<usize> {
        self.session
            .status()
            .is_game_over()
            .then(|| self.session.score())
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn reload_leaderboard(&mut self) {
        self.leaderboard = match self.source.top_scores() {
            Ok(mut entries) => {
                entries.sort_by(|a, b| b.score.cmp(&a.score));
                entries
            }
            Err(err) => {
                warn!("failed to load leaderboard: {err}");
                vec![]
            }
        };
    }

    /// Applies an input command and returns whether anything changed.
    pub fn handle_command(&mut self, command: Command) -> bool {
        if command == Command::Reset {
            self.reset();
            return true;
        }
        self.session.handle_command(command)
    }

    pub fn tick(&mut self, elapsed: Duration) -> TickOutcome {
        self.session.tick(elapsed)
    }

    /// Discards the current session and starts a new one.
    pub fn reset(&mut self) {
        let factory = factory_for(self.seed, self.sessions_started);
        self.sessions_started += 1;
        self.session = GameSession::from_validated(self.config.clone(), factory);
        info!("session reset ({} sessions started)", self.sessions_started);
        self.reload_leaderboard();
    }
}

fn factory_for(seed: Option<u64>, session_index: u64) -> PieceFactory {
    match seed {
        Some(seed) => PieceFactory::from_seed(seed.wrapping_add(session_index)),
        None => PieceFactory::new(),
    }
}

/// In-process leaderboard, kept sorted by descending score.
#[derive(Debug, Clone, Default)]
pub struct MemoryLeaderboard {
    entries: Vec<ScoreEntry>,
}

impl MemoryLeaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Inserts a score after all entries with the same or a higher score.
    pub fn submit(&mut self, name: impl Into<String>, score: usize) {
        let index = self.entries.partition_point(|entry| entry.score >= score);
        self.entries.insert(index, ScoreEntry::new(name, score));
    }
}

impl LeaderboardSource for MemoryLeaderboard {
    type Error = Infallible;

    fn top_scores(&mut self) -> Result<Vec<ScoreEntry>, Self::Error> {
        Ok(self.entries.clone())
    }
}
