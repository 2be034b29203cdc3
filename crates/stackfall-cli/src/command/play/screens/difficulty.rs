use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::{Line, Text},
    widgets::{Block, Padding, Widget},
};
use stackfall_engine::Difficulty;

use crate::{
    tui::{RenderMode, Tui},
    ui::widgets::{KeyBinding, KeyBindingDisplay, style},
};

/// Choices offered by the menu; `impossibile` is only reachable by flag.
const CHOICES: [Difficulty; 3] = [
    Difficulty::Facile,
    Difficulty::Normale,
    Difficulty::Difficile,
];

const MENU_BINDINGS: &[KeyBinding] = &[
    (&["↑", "↓"], "Select"),
    (&["Enter"], "Start"),
    (&["Esc"], "Normale"),
    (&["Q"], "Quit"),
];

/// Outcome of a key press on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Stay,
    Confirm(Difficulty),
    Quit,
}

#[derive(Debug)]
pub struct DifficultyScreen {
    selected: usize,
}

impl DifficultyScreen {
    pub fn new() -> Self {
        let selected = CHOICES
            .iter()
            .position(|d| *d == Difficulty::default())
            .unwrap_or_default();
        Self { selected }
    }

    pub fn selected(&self) -> Difficulty {
        CHOICES[self.selected]
    }

    pub fn on_active(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(None);
        tui.set_render_mode(RenderMode::OnDirty);
        tui.request_render();
    }

    pub fn handle_event(&mut self, tui: &mut Tui, event: &Event) -> MenuAction {
        if let Event::Resize(..) = event {
            tui.request_render();
        }
        let Some(key) = event.as_key_press_event() else {
            return MenuAction::Stay;
        };
        match key.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(CHOICES.len() - 1),
            KeyCode::Enter => return MenuAction::Confirm(self.selected()),
            // closing the dialog plays the default
            KeyCode::Esc => return MenuAction::Confirm(Difficulty::default()),
            KeyCode::Char('q' | 'Q') => return MenuAction::Quit,
            _ => return MenuAction::Stay,
        }
        tui.request_render();
        MenuAction::Stay
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let lines = CHOICES
            .iter()
            .enumerate()
            .map(|(i, difficulty)| {
                let label = format!(" {:<12}", difficulty.label());
                if i == self.selected {
                    Line::styled(label, style::SELECTED)
                } else {
                    Line::styled(label, style::DEFAULT)
                }
            })
            .collect::<Vec<_>>();
        let menu = Text::from(lines);
        let block = Block::bordered()
            .title(Line::from("DIFFICULTY").centered())
            .padding(Padding::horizontal(2))
            .style(style::DEFAULT);

        let height = u16::try_from(CHOICES.len()).unwrap_or(u16::MAX) + 2;
        let [menu_area, help_area] =
            Layout::vertical([Constraint::Length(height), Constraint::Length(1)])
                .spacing(1)
                .areas(
                    frame
                        .area()
                        .centered_vertically(Constraint::Length(height + 2)),
                );
        let menu_area = menu_area.centered_horizontally(Constraint::Length(21));
        let inner = block.inner(menu_area);
        frame.render_widget(block, menu_area);
        frame.render_widget(menu, inner);
        KeyBindingDisplay::new(MENU_BINDINGS).render(help_area, frame.buffer_mut());
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_normale_is_preselected() {
        assert_eq!(DifficultyScreen::new().selected(), Difficulty::Normale);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut screen = DifficultyScreen::new();
        let mut tui = Tui::new();
        for _ in 0..3 {
            screen.handle_event(&mut tui, &key(KeyCode::Down));
        }
        assert_eq!(screen.selected(), Difficulty::Difficile);
        for _ in 0..3 {
            screen.handle_event(&mut tui, &key(KeyCode::Up));
        }
        assert_eq!(screen.selected(), Difficulty::Facile);
        assert_eq!(
            screen.handle_event(&mut tui, &key(KeyCode::Enter)),
            MenuAction::Confirm(Difficulty::Facile)
        );
    }

    #[test]
    fn test_escape_applies_default() {
        let mut screen = DifficultyScreen::new();
        let mut tui = Tui::new();
        screen.handle_event(&mut tui, &key(KeyCode::Up));
        assert_eq!(
            screen.handle_event(&mut tui, &key(KeyCode::Esc)),
            MenuAction::Confirm(Difficulty::Normale)
        );
    }

    #[test]
    fn test_quit_and_unbound_keys() {
        let mut screen = DifficultyScreen::new();
        let mut tui = Tui::new();
        assert_eq!(
            screen.handle_event(&mut tui, &key(KeyCode::Char('x'))),
            MenuAction::Stay
        );
        assert_eq!(
            screen.handle_event(&mut tui, &key(KeyCode::Char('q'))),
            MenuAction::Quit
        );
    }

    #[test]
    fn test_draw_lists_choices() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let screen = DifficultyScreen::new();
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        let text = format!("{}", terminal.backend());
        for label in ["Facile", "Normale", "Difficile", "DIFFICULTY"] {
            assert!(text.contains(label), "missing {label}");
        }
        assert!(!text.contains("Impossibile"));
    }
}
