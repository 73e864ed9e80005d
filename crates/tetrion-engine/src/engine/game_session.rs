use std::{mem, time::Duration};

use log::{debug, info};
use serde::Serialize;

use crate::{
    CommandError, ConfigError, EngineConfig, PieceCollisionError,
    core::{FallingPiece, Grid, PieceDefinition},
};

use super::{DropScheduler, GameStats, PieceFactory, SessionSnapshot};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display, derive_more::IsVariant,
)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    #[display("Running")]
    Running,
    #[display("Paused")]
    Paused,
    #[display("Game Over")]
    GameOver,
}

/// A discrete command delivered by an input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    /// Start over with a brand-new session.
    ///
    /// Only [`GameController`](super::GameController) acts on it; a bare
    /// [`GameSession`] cannot replace itself.
    Reset,
}

/// Result of locking the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockResult {
    pub cleared_lines: usize,
    /// Whether the following piece collided at its spawn position.
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// No drop step was due, or the session is not running.
    Idle,
    /// The falling piece moved one row down.
    Moved,
    /// The falling piece could not move down and was locked.
    Locked(LockResult),
}

/// A single game from the first spawn to game over.
///
/// The session exclusively owns the grid, the falling and next pieces, the
/// score and the drop scheduler. Every mutation goes through its methods:
///
/// - movement and rotation commands (`try_*`), rejected when the result
///   would collide or when the session is not running
/// - [`hard_drop`](Self::hard_drop), which locks immediately
/// - [`tick`](Self::tick), the automatic drop driven by elapsed time
///
/// Locking a piece clears full rows, adds 100 points per cleared row and
/// spawns the next piece. A spawn that collides ends the game; after that
/// the grid and the falling piece never change again.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tetrion_engine::{EngineConfig, GameSession, PieceFactory, TickOutcome};
///
/// let config = EngineConfig::default();
/// let mut session = GameSession::with_factory(config, PieceFactory::from_seed(7)).unwrap();
///
/// session.try_move_left().unwrap();
/// assert_eq!(session.tick(Duration::from_millis(1000)), TickOutcome::Moved);
///
/// let lock = session.hard_drop().unwrap();
/// assert_eq!(lock.cleared_lines, 0);
/// assert_eq!(session.stats().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: EngineConfig,
    grid: Grid,
    falling_piece: FallingPiece,
    next_piece: PieceDefinition,
    factory: PieceFactory,
    stats: GameStats,
    scheduler: DropScheduler,
    status: SessionStatus,
}

impl GameSession {
    /// Starts a session with an OS-seeded piece factory.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_factory(config, PieceFactory::new())
    }

    pub fn with_factory(config: EngineConfig, factory: PieceFactory) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config, factory))
    }

    pub(crate) fn from_validated(config: EngineConfig, mut factory: PieceFactory) -> Self {
        let grid = Grid::new(config.board_width, config.board_height);
        let falling_piece = FallingPiece::spawn(factory.next_piece(), grid.width());
        let next_piece = factory.next_piece();
        let scheduler = DropScheduler::new(config.initial_drop_interval());
        let mut session = Self {
            config,
            grid,
            falling_piece,
            next_piece,
            factory,
            stats: GameStats::new(),
            scheduler,
            status: SessionStatus::Running,
        };
        info!(
            "session started on a {}x{} board",
            session.grid.width(),
            session.grid.height()
        );
        if session.grid.is_piece_colliding(&session.falling_piece) {
            session.enter_game_over();
        }
        session
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> &FallingPiece {
        &self.falling_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> &PieceDefinition {
        &self.next_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn scheduler(&self) -> &DropScheduler {
        &self.scheduler
    }

    /// Captures everything a renderer needs to draw the session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }

    /// Replaces the falling piece if it fits on the grid.
    pub fn set_falling_piece(&mut self, piece: FallingPiece) -> Result<(), CommandError> {
        self.ensure_running()?;
        if self.grid.is_piece_colliding(&piece) {
            return Err(CommandError::PieceCollision(PieceCollisionError));
        }
        self.falling_piece = piece;
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), CommandError> {
        let piece = self.falling_piece.left();
        self.set_falling_piece(piece)
    }

    pub fn try_move_right(&mut self) -> Result<(), CommandError> {
        let piece = self.falling_piece.right();
        self.set_falling_piece(piece)
    }

    pub fn try_soft_drop(&mut self) -> Result<(), CommandError> {
        let piece = self.falling_piece.down();
        self.set_falling_piece(piece)
    }

    /// Rotates the falling piece clockwise in place.
    ///
    /// There are no wall kicks: a rotation that would collide is rejected.
    pub fn try_rotate(&mut self) -> Result<(), CommandError> {
        let piece = self.falling_piece.rotated_clockwise();
        self.set_falling_piece(piece)
    }

    /// Moves the falling piece down as far as it goes and locks it.
    pub fn hard_drop(&mut self) -> Result<LockResult, CommandError> {
        self.ensure_running()?;
        while self.try_soft_drop().is_ok() {}
        Ok(self.lock_falling_piece())
    }

    /// Advances the drop scheduler by `elapsed`.
    ///
    /// When a drop step is due the falling piece moves down one row, or is
    /// locked if it cannot.
    pub fn tick(&mut self, elapsed: Duration) -> TickOutcome {
        if !self.status.is_running() || !self.scheduler.advance(elapsed) {
            return TickOutcome::Idle;
        }
        if self.try_soft_drop().is_ok() {
            return TickOutcome::Moved;
        }
        TickOutcome::Locked(self.lock_falling_piece())
    }

    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            SessionStatus::Running => {
                self.scheduler.stop();
                SessionStatus::Paused
            }
            SessionStatus::Paused => {
                self.scheduler.start();
                SessionStatus::Running
            }
            SessionStatus::GameOver => SessionStatus::GameOver,
        };
    }

    /// Applies an input command and returns whether the session changed.
    ///
    /// Rejected commands are silent no-ops.
    pub fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.try_move_left().is_ok(),
            Command::MoveRight => self.try_move_right().is_ok(),
            Command::SoftDrop => self.try_soft_drop().is_ok(),
            Command::Rotate => self.try_rotate().is_ok(),
            Command::HardDrop => self.hard_drop().is_ok(),
            Command::TogglePause => {
                let before = self.status;
                self.toggle_pause();
                self.status != before
            }
            Command::Reset => false,
        }
    }

    fn ensure_running(&self) -> Result<(), CommandError> {
        if self.status.is_running() {
            Ok(())
        } else {
            Err(CommandError::NotRunning)
        }
    }

    fn lock_falling_piece(&mut self) -> LockResult {
        let written = self.grid.fill_piece(&self.falling_piece);
        let cleared_lines = self.grid.clear_lines();
        self.stats.complete_piece_drop(cleared_lines);
        debug!(
            "locked {:?} at ({}, {}): {written} cells written, {cleared_lines} lines cleared",
            self.falling_piece.kind(),
            self.falling_piece.x(),
            self.falling_piece.y(),
        );
        let game_over = !self.spawn_next_piece();
        LockResult {
            cleared_lines,
            game_over,
        }
    }

    fn spawn_next_piece(&mut self) -> bool {
        let next = mem::replace(&mut self.next_piece, self.factory.next_piece());
        self.falling_piece = FallingPiece::spawn(next, self.grid.width());
        if self.grid.is_piece_colliding(&self.falling_piece) {
            self.enter_game_over();
            return false;
        }
        self.scheduler.start();
        true
    }

    fn enter_game_over(&mut self) {
        self.scheduler.stop();
        self.status = SessionStatus::GameOver;
        info!(
            "game over: score {}, {} lines, {} pieces",
            self.stats.score(),
            self.stats.total_cleared_lines(),
            self.stats.completed_pieces()
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::{Cell, PieceKind, core::to_coord};

    use super::*;

    const INTERVAL: Duration = Duration::from_millis(1000);

    fn new_session() -> GameSession {
        GameSession::with_factory(EngineConfig::default(), PieceFactory::from_seed(42)).unwrap()
    }

    fn fill_row_except(grid: &mut Grid, y: usize, holes: &[usize]) {
        for x in (0..grid.width()).filter(|x| !holes.contains(x)) {
            assert!(grid.set_cell(x, y, Cell::Filled(PieceKind::I)));
        }
    }

    fn place(session: &mut GameSession, kind: PieceKind, x: i32, y: i32) {
        session
            .set_falling_piece(FallingPiece::new(PieceDefinition::new(kind), x, y))
            .unwrap();
    }

    fn spawn_x(piece: &FallingPiece) -> i32 {
        5 - to_coord(piece.shape().width() / 2)
    }

    #[test]
    fn test_new_session_spawns_first_piece() {
        let session = new_session();
        assert!(session.status().is_running());
        assert_eq!(session.score(), 0);
        assert_eq!(session.grid().filled_count(), 0);
        let piece = session.falling_piece();
        assert_eq!((piece.x(), piece.y()), (spawn_x(piece), 0));
    }

    #[test]
    fn test_new_session_rejects_invalid_config() {
        let config = EngineConfig {
            board_width: 2,
            ..EngineConfig::default()
        };
        assert!(matches!(
            GameSession::new(config),
            Err(ConfigError::BoardWidth { value: 2, .. })
        ));
    }

    #[test]
    fn test_moves_update_anchor() {
        let mut session = new_session();
        let (x, y) = (session.falling_piece().x(), session.falling_piece().y());
        session.try_move_left().unwrap();
        assert_eq!(session.falling_piece().x(), x - 1);
        session.try_move_right().unwrap();
        session.try_move_right().unwrap();
        assert_eq!(session.falling_piece().x(), x + 1);
        session.try_soft_drop().unwrap();
        assert_eq!(session.falling_piece().y(), y + 1);
    }

    #[test]
    fn test_rejected_move_leaves_state_untouched() {
        let mut session = new_session();
        place(&mut session, PieceKind::O, 0, 5);
        let before = session.falling_piece().clone();
        assert_eq!(
            session.try_move_left(),
            Err(CommandError::PieceCollision(PieceCollisionError))
        );
        assert_eq!(session.falling_piece(), &before);
        assert!(!session.handle_command(Command::MoveLeft));
        assert_eq!(session.falling_piece(), &before);
    }

    #[test]
    fn test_rotation_without_wall_kick() {
        let mut session = new_session();
        place(&mut session, PieceKind::I, 3, 5);
        session.try_rotate().unwrap();
        assert_eq!(session.falling_piece().shape().width(), 1);
        assert_eq!(session.falling_piece().shape().height(), 4);

        let at_wall = FallingPiece::new(PieceDefinition::new(PieceKind::I), 9, 5).rotated_clockwise();
        session.set_falling_piece(at_wall.clone()).unwrap();
        assert!(session.try_rotate().is_err());
        assert_eq!(session.falling_piece(), &at_wall);
    }

    #[test]
    fn test_tick_drops_after_interval() {
        let mut session = new_session();
        assert_eq!(
            session.tick(INTERVAL - Duration::from_millis(1)),
            TickOutcome::Idle
        );
        assert_eq!(session.falling_piece().y(), 0);
        assert_eq!(
            session.tick(Duration::from_millis(1)),
            TickOutcome::Moved
        );
        assert_eq!(session.falling_piece().y(), 1);
    }

    #[test]
    fn test_hard_drop_locks_at_bottom() {
        let mut session = new_session();
        place(&mut session, PieceKind::I, 3, 0);
        let lock = session.hard_drop().unwrap();
        assert_eq!(
            lock,
            LockResult {
                cleared_lines: 0,
                game_over: false
            }
        );
        for x in 3..7 {
            assert_eq!(session.grid().cell(x, 19), Some(Cell::Filled(PieceKind::I)));
        }
        assert_eq!(session.grid().filled_count(), 4);
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(session.falling_piece().y(), 0);
    }

    #[test]
    fn test_score_accumulates_across_clears() {
        let mut session = new_session();

        fill_row_except(&mut session.grid, 19, &[0, 1]);
        place(&mut session, PieceKind::O, 0, 0);
        assert_eq!(session.hard_drop().unwrap().cleared_lines, 1);
        assert_eq!(session.score(), 100);

        session.grid = Grid::new(10, 20);
        fill_row_except(&mut session.grid, 18, &[0, 1]);
        fill_row_except(&mut session.grid, 19, &[0, 1]);
        place(&mut session, PieceKind::O, 0, 0);
        assert_eq!(session.hard_drop().unwrap().cleared_lines, 2);
        assert_eq!(session.score(), 300);
        assert_eq!(session.stats().total_cleared_lines(), 3);
    }

    #[test]
    fn test_o_piece_clears_bottom_row_through_ticks() {
        let mut session = new_session();
        fill_row_except(&mut session.grid, 19, &[0, 1]);
        place(&mut session, PieceKind::O, 0, 0);

        let mut steps = 0;
        let lock = loop {
            match session.tick(INTERVAL) {
                TickOutcome::Moved => steps += 1,
                TickOutcome::Locked(lock) => break lock,
                TickOutcome::Idle => panic!("tick of a full interval must fire"),
            }
        };
        assert_eq!(steps, 18);
        assert_eq!(
            lock,
            LockResult {
                cleared_lines: 1,
                game_over: false
            }
        );
        assert_eq!(session.score(), 100);

        // upper half of the O shifted into the bottom row
        let bottom: Vec<_> = session.grid().rows().last().unwrap().to_vec();
        assert_eq!(bottom[0], Cell::Filled(PieceKind::O));
        assert_eq!(bottom[1], Cell::Filled(PieceKind::O));
        assert!(bottom[2..].iter().all(|cell| cell.is_empty()));
        assert_eq!(session.grid().filled_count(), 2);

        let piece = session.falling_piece();
        assert_eq!((piece.x(), piece.y()), (spawn_x(piece), 0));
    }

    #[test]
    fn test_spawn_collision_ends_game_and_freezes_state() {
        let mut session = new_session();
        for y in 0..4 {
            for x in 2..8 {
                session.grid.set_cell(x, y, Cell::Filled(PieceKind::T));
            }
        }
        place(&mut session, PieceKind::O, 0, 0);
        let lock = session.hard_drop().unwrap();
        assert!(lock.game_over);
        assert!(session.status().is_game_over());
        assert!(session.scheduler().state().is_stopped());

        let grid = session.grid().clone();
        let piece = session.falling_piece().clone();
        for command in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::Rotate,
            Command::HardDrop,
            Command::TogglePause,
            Command::Reset,
        ] {
            assert!(!session.handle_command(command), "{command:?}");
        }
        assert_eq!(session.try_move_left(), Err(CommandError::NotRunning));
        assert_eq!(session.hard_drop(), Err(CommandError::NotRunning));
        assert_eq!(session.tick(INTERVAL * 10), TickOutcome::Idle);
        assert_eq!(session.grid(), &grid);
        assert_eq!(session.falling_piece(), &piece);
        assert!(session.status().is_game_over());
    }

    #[test]
    fn test_pause_stops_drops_and_commands() {
        let mut session = new_session();
        session.tick(Duration::from_millis(900));
        assert!(session.handle_command(Command::TogglePause));
        assert!(session.status().is_paused());
        assert_eq!(session.tick(INTERVAL * 5), TickOutcome::Idle);
        assert_eq!(session.try_move_left(), Err(CommandError::NotRunning));
        assert_eq!(session.falling_piece().y(), 0);

        session.toggle_pause();
        assert!(session.status().is_running());
        // pending time from before the pause is gone
        assert_eq!(session.tick(Duration::from_millis(100)), TickOutcome::Idle);
        assert_eq!(session.tick(Duration::from_millis(900)), TickOutcome::Moved);
    }

    #[test]
    fn test_status_display_and_serialization() {
        assert_eq!(SessionStatus::GameOver.to_string(), "Game Over");
        assert_eq!(
            serde_json::to_string(&SessionStatus::GameOver).unwrap(),
            r#""gameOver""#
        );
    }
}
