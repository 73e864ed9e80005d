/// Points awarded for each cleared line.
///
/// Scoring is flat: clearing `n` lines at once is worth `n * POINTS_PER_LINE`.
pub const POINTS_PER_LINE: usize = 100;

/// Game statistics tracking score, lines cleared, and piece count.
///
/// Tracks various metrics during a game session:
///
/// - **Score**: Points earned from line clears
/// - **Completed pieces**: Total number of pieces locked
/// - **Line clear distribution**: Count of locks by number of lines cleared
///
/// # Scoring
///
/// Every cleared line is worth [`POINTS_PER_LINE`]:
/// - No combo bonuses
/// - No level multiplier
/// - No bonus for multi-line clears
///
/// # Example
///
/// ```
/// use tetrion_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(1);
/// stats.complete_piece_drop(2);
///
/// assert_eq!(stats.score(), 300);
/// assert_eq!(stats.total_cleared_lines(), 3);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines cleared.
    ///
    /// Index `n` counts the locks that cleared exactly `n` lines (0-4).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece lock that cleared `cleared_lines` lines.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        self.score += cleared_lines * POINTS_PER_LINE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_scoring() {
        for (lines, score) in [(0, 0), (1, 100), (2, 200), (3, 300), (4, 400)] {
            let mut stats = GameStats::new();
            stats.complete_piece_drop(lines);
            assert_eq!(stats.score(), score, "{lines} lines");
        }
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = GameStats::new();
        for lines in [0, 1, 0, 4, 1] {
            stats.complete_piece_drop(lines);
        }
        assert_eq!(stats.completed_pieces(), 5);
        assert_eq!(stats.total_cleared_lines(), 6);
        assert_eq!(stats.line_cleared_counter(), &[2, 2, 0, 0, 1]);
        assert_eq!(stats.score(), 600);
    }
}
