//! Game rules and session state.
//!
//! - [`GameSession`] - the state machine: piece lifecycle, hold, pause and
//!   game over
//! - [`GameStats`] - score, level and line counters
//! - [`EngineConfig`] / [`Difficulty`] - grid size and fall-interval settings
//! - [`PieceGenerator`] / [`PieceSeed`] - uniform random piece draws
//! - [`Command`] / [`TickSignal`] - the input vocabulary and timer requests
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from an [`EngineConfig`]
//! 2. Call [`GameSession::new_game`] to spawn the first piece
//! 3. Feed player [`Command`]s and timer ticks
//! 4. Each lock writes the piece into the grid, clears full rows, scores
//!    and spawns the next piece
//! 5. The game ends when a freshly spawned piece collides; [`Command::Reset`]
//!    starts over

pub use self::{command::*, config::*, game_session::*, game_stats::*, piece_generator::*};

mod command;
mod config;
mod game_session;
mod game_stats;
mod piece_generator;
