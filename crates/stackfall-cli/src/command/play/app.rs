use crossterm::event::Event;
use log::error;
use ratatui::Frame;
use stackfall_engine::{ConfigError, Difficulty, EngineConfig, GameSession, GameStats};

use crate::{
    command::play::screens::{DifficultyScreen, GameScreen, MenuAction, Screen},
    tui::{App, Tui},
};

#[derive(Debug)]
pub struct PlayApp {
    screen: Screen,
    config: EngineConfig,
    show_ghost: bool,
    is_exiting: bool,
    failure: Option<ConfigError>,
}

impl PlayApp {
    /// Starts at the difficulty menu unless a difficulty is already known.
    pub fn new(config: EngineConfig, difficulty: Option<Difficulty>, show_ghost: bool) -> Self {
        let mut app = Self {
            screen: Screen::Difficulty(DifficultyScreen::new()),
            config,
            show_ghost,
            is_exiting: false,
            failure: None,
        };
        if let Some(difficulty) = difficulty {
            app.start_game(difficulty);
        }
        app
    }

    fn start_game(&mut self, difficulty: Difficulty) {
        let config = self.config.clone().with_difficulty(difficulty);
        match GameSession::new(config) {
            Ok(session) => self.screen = Screen::Game(GameScreen::new(session, self.show_ghost)),
            Err(e) => {
                error!("cannot start game: {e}");
                self.failure = Some(e);
                self.is_exiting = true;
            }
        }
    }

    /// Returns the statistics of the last game, if one was started.
    pub fn into_result(self) -> Result<Option<GameStats>, ConfigError> {
        if let Some(e) = self.failure {
            return Err(e);
        }
        match self.screen {
            Screen::Difficulty(_) => Ok(None),
            Screen::Game(screen) => Ok(Some(screen.into_stats())),
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        self.screen.on_active(tui);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting || self.screen.is_exiting()
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        match &mut self.screen {
            Screen::Difficulty(menu) => match menu.handle_event(tui, &event) {
                MenuAction::Stay => {}
                MenuAction::Quit => self.is_exiting = true,
                MenuAction::Confirm(difficulty) => {
                    self.start_game(difficulty);
                    self.screen.on_active(tui);
                }
            },
            Screen::Game(game) => game.handle_event(tui, &event),
        }
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, tui: &mut Tui) {
        self.screen.update(tui);
    }
}
