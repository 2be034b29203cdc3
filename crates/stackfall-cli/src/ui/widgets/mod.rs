use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, key_binding_display::*, piece_display::*,
    session_display::*, stats_display::*,
};

mod block_display;
mod board_display;
mod key_binding_display;
mod piece_display;
mod session_display;
mod stats_display;

pub mod color {
    use ratatui::style::Color;
    use stackfall_engine::PieceKind;

    pub const YELLOW: Color = Color::Rgb(255, 235, 59);
    pub const RED: Color = Color::Rgb(255, 82, 82);
    pub const DARK_GRAY: Color = Color::Rgb(60, 60, 60);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    /// Terminal color of a piece kind.
    pub const fn piece(kind: PieceKind) -> Color {
        let c = kind.color();
        Color::Rgb(c.r, c.g, c.b)
    }
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};
    use stackfall_engine::PieceKind;

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::BLACK);
    pub const SELECTED: Style = fg_bg(color::BLACK, color::WHITE);

    pub const fn piece(kind: PieceKind) -> Style {
        bg_only(color::piece(kind))
    }

    /// Outline of a piece's landing position.
    pub const fn ghost(kind: PieceKind) -> Style {
        fg_bg(color::piece(kind), color::BLACK).add_modifier(Modifier::DIM)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

/// Grid cell count as a terminal length.
fn cells_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[cfg(test)]
fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
