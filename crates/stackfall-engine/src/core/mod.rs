//! Core data structures: pieces, shapes and the play grid.
//!
//! These types carry no game rules beyond geometry. Collision checking and
//! line compaction live on [`Grid`]; everything that involves scoring, timing
//! or the piece lifecycle is in [`crate::engine`].

pub use self::{grid::*, piece::*};

pub(crate) mod grid;
pub(crate) mod piece;

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: usize = 10;
/// Default number of grid rows.
pub const DEFAULT_ROWS: usize = 20;
