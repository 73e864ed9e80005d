use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Stylize as _,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::style;

/// What the game over popup asks of the player.
#[derive(Debug, Clone, Copy)]
pub enum GameOverPrompt<'a> {
    /// The player is typing a name for the leaderboard.
    NameEntry {
        name: &'a str,
        error: Option<&'a str>,
    },
    /// The score was saved or skipped.
    Closed { notice: Option<&'a str> },
}

/// Popup shown over the board once the game is over.
#[derive(Debug)]
pub struct GameOverDisplay<'a> {
    score: usize,
    prompt: GameOverPrompt<'a>,
}

impl<'a> GameOverDisplay<'a> {
    pub fn new(score: usize, prompt: GameOverPrompt<'a>) -> Self {
        Self { score, prompt }
    }

    pub fn height() -> u16 {
        9
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::from("GAME OVER").bold(),
            Line::from(format!("Final score: {}", self.score)),
            Line::default(),
        ];
        match self.prompt {
            GameOverPrompt::NameEntry { name, error } => {
                lines.push(Line::from("Save your score"));
                lines.push(Line::from(format!("Name: {name}_")));
                lines.push(Line::from(error.unwrap_or("Enter: save | Esc: skip")));
            }
            GameOverPrompt::Closed { notice } => {
                lines.push(Line::from(notice.unwrap_or_default()));
                lines.push(Line::from("R: play again | Q: quit"));
            }
        }
        lines
    }
}

impl Widget for GameOverDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::new()
            .style(style::GAME_OVER)
            .padding(Padding::uniform(1));
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        Text::from(self.lines())
            .style(style::GAME_OVER)
            .centered()
            .render(inner, buf);
    }
}
