//! Game rules and session state.
//!
//! This module builds the playable game on top of the [`core`](crate::core) types:
//!
//! - [`PieceFactory`] - uniform random piece generation
//! - [`DropScheduler`] - elapsed-time based automatic drop
//! - [`GameStats`] - score and line clear counters
//! - [`GameSession`] - the state machine of a single game
//! - [`SessionSnapshot`] - read-only view handed to renderers
//! - [`GameController`] - owns the session, handles reset and loads the leaderboard
//!
//! # Game Flow
//!
//! 1. The next piece is promoted to the falling piece at the top center
//! 2. Input commands move or rotate it; the scheduler drops it one row per interval
//! 3. When it cannot move down (or on hard drop) it is locked into the grid
//! 4. Full rows are cleared and scored at 100 points each
//! 5. Repeat until a newly spawned piece collides (game over)
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tetrion_engine::{Command, EngineConfig, GameController, MemoryLeaderboard, TickOutcome};
//!
//! let mut controller =
//!     GameController::with_seed(EngineConfig::default(), 0, MemoryLeaderboard::new()).unwrap();
//!
//! controller.handle_command(Command::MoveLeft);
//! controller.handle_command(Command::Rotate);
//!
//! // Host loop: report elapsed time at any cadence
//! for _ in 0..100 {
//!     if let TickOutcome::Locked(lock) = controller.tick(Duration::from_millis(250)) {
//!         println!("locked, {} lines cleared", lock.cleared_lines);
//!     }
//! }
//!
//! if let Some(score) = controller.final_score() {
//!     println!("Game over! Final score: {score}");
//! }
//! ```

pub use self::{
    controller::*, drop_scheduler::*, game_session::*, game_stats::*, piece_generator::*,
    snapshot::*,
};

mod controller;
mod drop_scheduler;
mod game_session;
mod game_stats;
mod piece_generator;
mod snapshot;
