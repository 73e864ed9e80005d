use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetrion_engine::ScoreEntry;

use crate::ui::widgets::style;

/// Ranked list of the best scores.
pub struct LeaderboardDisplay<'a> {
    entries: &'a [ScoreEntry],
    rows: usize,
    block: Option<BlockWidget<'a>>,
}

impl<'a> LeaderboardDisplay<'a> {
    pub fn new(entries: &'a [ScoreEntry], rows: usize) -> Self {
        Self {
            entries,
            rows,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        24 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::to_u16(self.rows) + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for LeaderboardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let style = style::DEFAULT;

        if self.entries.is_empty() {
            Line::styled("No scores yet", style::EMPTY_DOT)
                .centered()
                .render(area, buf);
            return;
        }

        let rows_areas =
            Layout::vertical((0..self.rows).map(|_| Constraint::Length(1))).split(area);
        for (rank, (entry, area)) in self.entries.iter().zip(rows_areas.iter()).enumerate() {
            let [name_area, score_area] = area.layout(&Layout::horizontal([
                Constraint::Fill(1),
                Constraint::Length(7),
            ]));
            Line::styled(format!("{:>2}. {}", rank + 1, entry.name), style)
                .left_aligned()
                .render(name_area, buf);
            Line::styled(entry.score.to_string(), style)
                .right_aligned()
                .render(score_area, buf);
        }
    }
}
