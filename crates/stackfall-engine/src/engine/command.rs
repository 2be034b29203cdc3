use std::time::Duration;

/// Discrete player command accepted by [`GameSession::apply`].
///
/// This is the whole input vocabulary of the engine; hosts map raw key
/// events onto it.
///
/// [`GameSession::apply`]: crate::GameSession::apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Command {
    #[display("move left")]
    MoveLeft,
    #[display("move right")]
    MoveRight,
    #[display("soft drop")]
    SoftDropStep,
    #[display("rotate clockwise")]
    RotateCw,
    #[display("rotate counter-clockwise")]
    RotateCcw,
    #[display("hard drop")]
    HardDrop,
    #[display("hold")]
    Hold,
    #[display("pause")]
    PauseToggle,
    #[display("reset")]
    Reset,
}

/// Request from the engine to the host's tick timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickSignal {
    /// Start (or restart) delivering ticks at this interval.
    Rearm(Duration),
    /// Stop delivering ticks.
    Stop,
}
