//! Game engine for a single-player falling-block puzzle.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - pieces, shapes and the play grid (geometry, collision, line
//!   compaction)
//! - [`engine`] - the [`GameSession`] state machine that drives the piece
//!   lifecycle, scoring, leveling, hold and pause, plus its configuration
//!
//! The engine is purely synchronous and owns all mutable game state. A host
//! (see the `stackfall` binary) translates input into [`Command`]s, delivers
//! [`GameSession::tick`] at the interval the engine reports, and renders the
//! state through the read-only queries.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Rejected engine configuration.
///
/// Construction fails fast on configurations the collision and line-clear
/// rules cannot run with.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("grid dimensions must be positive, got {columns}x{rows}")]
    EmptyGrid { columns: usize, rows: usize },
    #[display("{columns}x{rows} grid cannot fit the {width}x{height} {kind:?} piece")]
    PieceDoesNotFit {
        kind: PieceKind,
        width: usize,
        height: usize,
        columns: usize,
        rows: usize,
    },
    #[display("minimum fall interval must be positive")]
    ZeroMinInterval,
    #[display("minimum fall interval ({min_ms} ms) exceeds the base interval ({base_ms} ms)")]
    IntervalOrder { min_ms: u64, base_ms: u64 },
}
