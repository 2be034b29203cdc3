use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::PieceKind;

use crate::ui::widgets::{BlockDisplay, cells_u16};

/// Preview of a piece kind in its spawn orientation, trimmed to its
/// occupied cells. Used for the NEXT and HOLD panels.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: Option<PieceKind>) -> Self {
        Self { piece, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Occupied cells of the spawn shape as `(row, col)`, shifted so the
/// bounding box starts at the origin, plus the box size `(height, width)`.
fn trimmed_cells(kind: PieceKind) -> (Vec<(usize, usize)>, (usize, usize)) {
    let cells = kind.canonical_shape().occupied_cells().collect::<Vec<_>>();
    let top = cells.iter().map(|(r, _)| *r).min().unwrap_or(0);
    let left = cells.iter().map(|(_, c)| *c).min().unwrap_or(0);
    let cells = cells
        .into_iter()
        .map(|(r, c)| (r - top, c - left))
        .collect::<Vec<_>>();
    let height = cells.iter().map(|(r, _)| r + 1).max().unwrap_or(0);
    let width = cells.iter().map(|(_, c)| c + 1).max().unwrap_or(0);
    (cells, (height, width))
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

        let empty_block = BlockDisplay::empty(false);
        empty_block.render(area, buf);

        let Some(piece) = self.piece else {
            return;
        };
        let (cells, (height, width)) = trimmed_cells(piece);
        let piece_area = area.centered(
            Constraint::Length(cells_u16(width) * BlockDisplay::width()),
            Constraint::Length(cells_u16(height) * BlockDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal))
            .collect::<Vec<_>>();

        let occupied_block = BlockDisplay::piece(piece);
        for (r, c) in cells {
            if let Some(grid_cell) = grid_rows.get(r).and_then(|row| row.get(c)) {
                Widget::render(&occupied_block, *grid_cell, buf);
            }
        }
    }
}
