use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick timer elapsed.
    Tick,
    /// Screen render timing (see [`super::RenderMode`]).
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
