use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetrion_engine::{GameStats, SessionStatus};

use crate::ui::widgets::style;

pub struct SessionStatsDisplay<'a> {
    stats: &'a GameStats,
    status: SessionStatus,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(stats: &'a GameStats, status: SessionStatus) -> Self {
        Self {
            stats,
            status,
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
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::to_u16(ROWS.len()) + super::block_vertical_margin(self.block.as_ref())
    }
}

type Value = fn(&GameStats, SessionStatus) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(Value),
    LabelValue(&'static str, Value),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(|stats, _| stats.score().to_string()),
    Row::FullLabel("STATUS:"),
    Row::FullValue(|_, status| status.to_string()),
    Row::Empty,
    Row::LabelValue("LINES:", |stats, _| stats.total_cleared_lines().to_string()),
    Row::LabelValue("PIECES:", |stats, _| stats.completed_pieces().to_string()),
    Row::Empty,
    Row::LabelValue("SINGLES:", |stats, _| {
        stats.line_cleared_counter()[1].to_string()
    }),
    Row::LabelValue("DOUBLES:", |stats, _| {
        stats.line_cleared_counter()[2].to_string()
    }),
    Row::LabelValue("TRIPLES:", |stats, _| {
        stats.line_cleared_counter()[3].to_string()
    }),
    Row::LabelValue("QUADS:", |stats, _| {
        stats.line_cleared_counter()[4].to_string()
    }),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.stats, self.status), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.stats, self.status), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
