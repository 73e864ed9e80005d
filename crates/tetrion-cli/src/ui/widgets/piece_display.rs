use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetrion_engine::PieceSnapshot;

use crate::ui::widgets::{CellDisplay, to_u16};

/// A single piece centered in a panel, such as the next piece preview.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: &'a PieceSnapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new(piece: &'a PieceSnapshot) -> Self {
        Self { piece, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let piece = self.piece;
        let (w, h) = (to_u16(piece.shape.width()), to_u16(piece.shape.height()));
        let piece_area = area.centered(
            Constraint::Length(w * CellDisplay::width()),
            Constraint::Length(h * CellDisplay::height()),
        );

        let col_constraints = (0..w).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..h).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let empty_cell = CellDisplay::from_color(None, false);
        let occupied_cell = CellDisplay::from_color(Some(piece.color), false);
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if piece.shape.is_occupied(x, y) {
                    Widget::render(&occupied_cell, grid_cell, buf);
                } else {
                    Widget::render(&empty_cell, grid_cell, buf);
                }
            }
        }
    }
}
