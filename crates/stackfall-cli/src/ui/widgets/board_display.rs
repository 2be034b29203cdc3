use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};
use stackfall_engine::{ActivePiece, Grid};

use crate::ui::widgets::{BlockDisplay, cells_u16};

/// The play grid with locked cells, the falling piece and its ghost.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    falling_piece: Option<&'a ActivePiece>,
    ghost_row: Option<i32>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            falling_piece: None,
            ghost_row: None,
            block: None,
        }
    }

    pub fn falling_piece(self, piece: &'a ActivePiece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    /// Draws an outline of the falling piece at `row`.
    pub fn ghost(self, row: i32) -> Self {
        Self {
            ghost_row: Some(row),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        cells_u16(self.grid.columns()) * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        cells_u16(self.grid.rows()) * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    /// Resolves what each grid cell shows, row-major.
    fn blocks(&self) -> Vec<BlockDisplay> {
        let mut blocks = self
            .grid
            .iter_rows()
            .flatten()
            .map(|cell| BlockDisplay::from_cell(*cell, true))
            .collect::<Vec<_>>();
        let Some(piece) = self.falling_piece else {
            return blocks;
        };

        // positions above the grid are not drawn
        let position = |row: i32, col: i32| {
            let row = usize::try_from(row).ok()?;
            let col = usize::try_from(col).ok()?;
            self.grid.cell(row, col).map(|cell| (row * self.grid.columns() + col, cell))
        };
        if let Some(ghost_row) = self.ghost_row {
            let offset = ghost_row - piece.row();
            for (row, col) in piece.occupied_positions() {
                if let Some((i, cell)) = position(row + offset, col)
                    && cell.is_empty()
                {
                    blocks[i] = BlockDisplay::ghost(piece.kind());
                }
            }
        }
        for (row, col) in piece.occupied_positions() {
            if let Some((i, _)) = position(row, col) {
                blocks[i] = BlockDisplay::piece(piece.kind());
            }
        }
        blocks
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.grid.columns()).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..self.grid.rows()).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .flat_map(|row| row.layout_vec(&horizontal));

        for (grid_cell, block) in grid_cells.zip(self.blocks()) {
            block.render(grid_cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use stackfall_engine::{EngineConfig, GameSession, PieceKind, PieceSeed};

    use super::*;
    use crate::ui::widgets::{color, style};

    fn render(board: &BoardDisplay) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, board.width(), board.height()));
        board.render(buf.area, &mut buf);
        buf
    }

    #[test]
    fn test_size_follows_grid() {
        let grid = Grid::new(12, 16).unwrap();
        let board = BoardDisplay::new(&grid);
        assert_eq!((board.width(), board.height()), (24, 16));
        let board = board.block(BlockWidget::bordered());
        assert_eq!((board.width(), board.height()), (26, 18));
    }

    #[test]
    fn test_locked_cells_use_kind_color() {
        let grid = Grid::from_ascii(4, 3, "S..L");
        let buf = render(&BoardDisplay::new(&grid));
        assert_eq!(buf[(0, 2)].bg, color::piece(PieceKind::S));
        assert_eq!(buf[(1, 2)].bg, color::piece(PieceKind::S));
        assert_eq!(buf[(6, 2)].bg, color::piece(PieceKind::L));
        assert_eq!(buf[(2, 2)].bg, color::BLACK);
        assert_eq!(buf[(0, 0)].bg, color::BLACK);
    }

    #[test]
    fn test_falling_piece_and_ghost() {
        let mut session =
            GameSession::new(EngineConfig::default().with_seed(PieceSeed::from_bytes([1; 16])))
                .unwrap();
        session.new_game();
        let piece = session.falling_piece().unwrap();
        let ghost_row = session.ghost_row().unwrap();
        let board = BoardDisplay::new(session.grid())
            .falling_piece(piece)
            .ghost(ghost_row);
        let buf = render(&board);

        let ghost_style = style::ghost(piece.kind());
        for (row, col) in piece.occupied_positions() {
            let x = u16::try_from(col).unwrap() * 2;
            let y = u16::try_from(row).unwrap();
            assert_eq!(buf[(x, y)].bg, color::piece(piece.kind()));

            let ghost_y = u16::try_from(row + ghost_row - piece.row()).unwrap();
            assert_eq!(buf[(x, ghost_y)].fg, ghost_style.fg.unwrap());
            assert_eq!(buf[(x, ghost_y)].bg, color::BLACK);
        }
    }

    #[test]
    fn test_ghost_requires_falling_piece() {
        let grid = Grid::new(4, 4).unwrap();
        let board = BoardDisplay::new(&grid).ghost(2);
        assert!(
            board
                .blocks()
                .iter()
                .all(|block| *block == BlockDisplay::empty(true))
        );
    }
}
