use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use tetrion_engine::{GameStats, ScoreEntry, SessionSnapshot, SessionStatus};

use crate::ui::widgets::{
    BoardDisplay, GameOverDisplay, LeaderboardDisplay, PieceDisplay, SessionStatsDisplay, color,
    style,
};

/// Rows shown in the leaderboard panel.
const LEADERBOARD_ROWS: usize = 10;

/// The whole game screen: stats, board, next piece and leaderboard.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: &'a SessionSnapshot,
    stats: &'a GameStats,
    leaderboard: &'a [ScoreEntry],
    game_over: Option<GameOverDisplay<'a>>,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(
        snapshot: &'a SessionSnapshot,
        stats: &'a GameStats,
        leaderboard: &'a [ScoreEntry],
    ) -> Self {
        Self {
            snapshot,
            stats,
            leaderboard,
            game_over: None,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    /// Popup drawn over the board when the game is over.
    pub fn game_over(self, game_over: GameOverDisplay<'a>) -> Self {
        Self {
            game_over: Some(game_over),
            ..self
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.snapshot.status {
            SessionStatus::Running => color::WHITE,
            SessionStatus::Paused => color::YELLOW,
            SessionStatus::GameOver => color::RED,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board = BoardDisplay::new(self.snapshot).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let next_panel = PieceDisplay::new(&self.snapshot.next).block(panel("NEXT"));
        let session_stats =
            SessionStatsDisplay::new(self.stats, self.snapshot.status).block(panel("STATS"));
        let leaderboard =
            LeaderboardDisplay::new(self.leaderboard, LEADERBOARD_ROWS).block(panel("TOP 10"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(u16::max(next_panel.width(), leaderboard.width())),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let stats_area = stats_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(session_stats.width())]).flex(Flex::End),
        )[0];

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);

        let [next_area, leaderboard_area] = Layout::vertical([
            Constraint::Length(next_panel.height()),
            Constraint::Length(leaderboard.height()),
        ])
        .spacing(1)
        .areas(right_column);
        let next_area = next_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(next_panel.width())]),
        )[0];

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);
        leaderboard.render(leaderboard_area, buf);

        match (self.snapshot.status, self.game_over) {
            (SessionStatus::Running, _) => {}
            (SessionStatus::Paused, _) => {
                render_banner("PAUSED", style::PAUSED, board_area, game_board_width, buf);
            }
            (SessionStatus::GameOver, Some(popup)) => {
                let area = board_area.centered(
                    Constraint::Length(game_board_width),
                    Constraint::Length(GameOverDisplay::height()),
                );
                popup.render(area, buf);
            }
            (SessionStatus::GameOver, None) => {
                render_banner("GAME OVER", style::GAME_OVER, board_area, game_board_width, buf);
            }
        }
    }
}

fn render_banner(text: &str, style: Style, board_area: Rect, width: u16, buf: &mut Buffer) {
    let area = board_area.centered(Constraint::Length(width), Constraint::Length(3));
    let block = Block::new().style(style);
    let inner = block.inner(area);
    Clear.render(area, buf);
    block.render(area, buf);
    Text::styled(text, style)
        .centered()
        .render(inner.centered_vertically(Constraint::Length(1)), buf);
}
