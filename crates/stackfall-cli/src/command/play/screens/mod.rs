use ratatui::Frame;

pub use self::{
    difficulty::{DifficultyScreen, MenuAction},
    game::GameScreen,
};
use crate::tui::Tui;

mod difficulty;
mod game;

#[derive(Debug)]
pub enum Screen {
    Difficulty(DifficultyScreen),
    Game(GameScreen),
}

impl Screen {
    pub fn on_active(&mut self, tui: &mut Tui) {
        match self {
            Screen::Difficulty(screen) => screen.on_active(tui),
            Screen::Game(screen) => screen.on_active(tui),
        }
    }

    pub fn is_exiting(&self) -> bool {
        match self {
            Screen::Difficulty(_) => false,
            Screen::Game(screen) => screen.is_exiting(),
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        match self {
            Screen::Difficulty(screen) => screen.draw(frame),
            Screen::Game(screen) => screen.draw(frame),
        }
    }

    pub fn update(&mut self, tui: &mut Tui) {
        match self {
            Screen::Difficulty(_) => {}
            Screen::Game(screen) => screen.update(tui),
        }
    }
}
