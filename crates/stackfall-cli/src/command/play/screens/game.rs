use crossterm::event::Event;
use log::debug;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use stackfall_engine::{GameSession, GameStats, TickSignal};

use crate::{
    input::{self, Input, KEY_BINDINGS},
    tui::{RenderMode, Tui},
    ui::widgets::{KeyBindingDisplay, SessionDisplay},
};

const FPS: f64 = 60.0;

/// The game proper: forwards keys and ticks to the session and keeps the
/// tick timer in step with it.
#[derive(Debug)]
pub struct GameScreen {
    session: GameSession,
    show_ghost: bool,
    is_exiting: bool,
}

impl GameScreen {
    pub fn new(session: GameSession, show_ghost: bool) -> Self {
        Self {
            session,
            show_ghost,
            is_exiting: false,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn into_stats(self) -> GameStats {
        self.session.stats().clone()
    }

    pub fn on_active(&mut self, tui: &mut Tui) {
        tui.set_render_mode(RenderMode::throttled_from_rate(FPS));
        self.session.new_game();
        self.sync(tui);
    }

    pub fn handle_event(&mut self, tui: &mut Tui, event: &Event) {
        if let Event::Resize(..) = event {
            tui.request_render();
        }
        let Some(key) = event.as_key_event() else {
            return;
        };
        match input::map_key(&key) {
            Some(Input::Command(command)) => {
                debug!("command: {command}");
                self.session.apply(command);
            }
            Some(Input::Quit) => self.is_exiting = true,
            None => {}
        }
        self.sync(tui);
    }

    pub fn update(&mut self, tui: &mut Tui) {
        self.session.tick();
        self.sync(tui);
    }

    /// Applies pending timer requests and schedules a redraw on change.
    fn sync(&mut self, tui: &mut Tui) {
        if let Some(signal) = self.session.take_tick_signal() {
            match signal {
                TickSignal::Rearm(interval) => tui.set_tick_interval(Some(interval)),
                TickSignal::Stop => tui.set_tick_interval(None),
            }
            debug!("tick timer: {:?}", tui.tick_interval());
        }
        if self.session.take_dirty() {
            tui.request_render();
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display = SessionDisplay::new(&self.session, self.show_ghost);
        let help = KeyBindingDisplay::new(KEY_BINDINGS);

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(23), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help, help_area);
    }
}
