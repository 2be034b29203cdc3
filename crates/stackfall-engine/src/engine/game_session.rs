use std::{mem, time::Duration};

use log::{debug, info};

use crate::{
    ConfigError,
    core::{
        grid::Grid,
        piece::{ActivePiece, PieceKind, PieceShape, RotationDirection},
    },
};

use super::{
    EngineConfig, GameStats, PieceGenerator,
    command::{Command, TickSignal},
};

/// Column offsets tried, in order, when a rotation collides.
const KICK_OFFSETS: [i32; 5] = [0, 1, -1, 2, -2];

/// Points per row for a soft drop step.
const SOFT_DROP_POINTS: usize = 1;
/// Points per row descended by a hard drop.
const HARD_DROP_POINTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Constructed, waiting for the first [`GameSession::new_game`].
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// A game session: the grid, the falling piece, next/hold, statistics and
/// the run state.
///
/// All gameplay goes through [`Self::apply`] and [`Self::tick`]. Commands
/// that are not possible in the current state (moving into a wall, holding
/// twice, anything while paused) are silently ignored.
///
/// After each call the host should drain [`Self::take_tick_signal`] to keep
/// its timer in step with the fall interval, and redraw when
/// [`Self::take_dirty`] reports a change.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Command, EngineConfig, GameSession, TickSignal};
///
/// let mut session = GameSession::new(EngineConfig::default())?;
/// session.new_game();
/// assert_eq!(
///     session.take_tick_signal(),
///     Some(TickSignal::Rearm(session.fall_interval()))
/// );
///
/// session.apply(Command::MoveLeft);
/// session.apply(Command::RotateCw);
/// session.apply(Command::HardDrop);
/// assert!(session.stats().completed_pieces() == 1);
/// # Ok::<(), stackfall_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: EngineConfig,
    grid: Grid,
    falling_piece: Option<ActivePiece>,
    next_piece: PieceKind,
    held_piece: Option<PieceKind>,
    hold_available: bool,
    stats: GameStats,
    fall_interval: Duration,
    session_state: SessionState,
    generator: PieceGenerator,
    tick_signal: Option<TickSignal>,
    dirty: bool,
}

impl GameSession {
    /// Creates a session in the [`SessionState::NotStarted`] state.
    ///
    /// The fall interval is taken from the configuration once and survives
    /// every later [`Self::new_game`].
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.columns, config.rows)?;
        let mut generator = config
            .seed
            .map_or_else(PieceGenerator::new, PieceGenerator::with_seed);
        let next_piece = generator.next_kind();
        Ok(Self {
            fall_interval: config.start_interval(),
            config,
            grid,
            falling_piece: None,
            next_piece,
            held_piece: None,
            hold_available: true,
            stats: GameStats::new(),
            session_state: SessionState::NotStarted,
            generator,
            tick_signal: None,
            dirty: true,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the falling piece; `None` before the first game.
    ///
    /// After game over this is the piece that could not spawn.
    #[must_use]
    pub fn falling_piece(&self) -> Option<&ActivePiece> {
        self.falling_piece.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next_piece
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.held_piece
    }

    /// Returns whether hold may be used for the current piece.
    #[must_use]
    pub fn can_hold(&self) -> bool {
        self.hold_available
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn total_cleared_lines(&self) -> usize {
        self.stats.total_cleared_lines()
    }

    /// Current interval between natural fall steps.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.session_state.is_running()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.session_state.is_paused()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session_state.is_game_over()
    }

    /// Takes the pending timer request, if any.
    ///
    /// When several requests were raised by one call, the last one wins.
    pub fn take_tick_signal(&mut self) -> Option<TickSignal> {
        self.tick_signal.take()
    }

    /// Returns whether the state changed since the last [`Self::take_dirty`].
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns and clears the render-invalidation flag.
    pub fn take_dirty(&mut self) -> bool {
        mem::take(&mut self.dirty)
    }

    /// Checks whether `shape` fits the grid at `(row, col)`. See
    /// [`Grid::is_valid_placement`].
    #[must_use]
    pub fn is_valid_placement(&self, shape: &PieceShape, row: i32, col: i32) -> bool {
        self.grid.is_valid_placement(shape, row, col)
    }

    /// Row where the falling piece would land if hard-dropped now.
    #[must_use]
    pub fn ghost_row(&self) -> Option<i32> {
        let piece = self.falling_piece.as_ref()?;
        Some(self.grid.drop_row(piece.shape(), piece.row(), piece.col()))
    }

    /// Starts a fresh game.
    ///
    /// Clears the grid, statistics and hold, then spawns the first piece. The
    /// fall interval is kept as it is.
    pub fn new_game(&mut self) {
        self.grid.clear();
        self.stats = GameStats::new();
        self.held_piece = None;
        self.hold_available = true;
        self.session_state = SessionState::Running;
        self.tick_signal = Some(TickSignal::Rearm(self.fall_interval));
        self.next_piece = self.generator.next_kind();
        info!(
            "new game ({}x{}, fall interval {:?})",
            self.grid.columns(),
            self.grid.rows(),
            self.fall_interval
        );
        self.spawn_next();
        self.dirty = true;
    }

    /// Applies a player command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => _ = self.move_by(0, -1),
            Command::MoveRight => _ = self.move_by(0, 1),
            Command::SoftDropStep => _ = self.soft_drop_step(),
            Command::RotateCw => _ = self.rotate(RotationDirection::Clockwise),
            Command::RotateCcw => _ = self.rotate(RotationDirection::CounterClockwise),
            Command::HardDrop => self.hard_drop(),
            Command::Hold => _ = self.hold(),
            Command::PauseToggle => self.toggle_pause(),
            Command::Reset => self.new_game(),
        }
    }

    /// Natural fall step: descends one row, or locks the piece if it cannot.
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }
        if !self.move_by(1, 0) {
            self.lock();
        }
    }

    /// Moves the falling piece by the given offset if the target is free.
    ///
    /// Returns whether the piece moved.
    pub fn move_by(&mut self, d_row: i32, d_col: i32) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = &mut self.falling_piece else {
            return false;
        };
        let (row, col) = (piece.row() + d_row, piece.col() + d_col);
        if !self.grid.is_valid_placement(piece.shape(), row, col) {
            return false;
        }
        piece.set_position(row, col);
        self.dirty = true;
        true
    }

    /// Moves the piece down one row for a point. Never locks.
    pub fn soft_drop_step(&mut self) -> bool {
        if !self.move_by(1, 0) {
            return false;
        }
        self.stats.add_drop_points(SOFT_DROP_POINTS);
        true
    }

    /// Rotates the falling piece a quarter turn.
    ///
    /// A colliding rotation is retried with the piece shifted sideways by
    /// each of [`KICK_OFFSETS`]; the first fit wins. If nothing fits, the
    /// piece is left unchanged. The O piece never rotates.
    pub fn rotate(&mut self, direction: RotationDirection) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = &mut self.falling_piece else {
            return false;
        };
        if piece.kind() == PieceKind::O {
            return false;
        }

        let rotated = piece.shape().rotated(direction);
        let Some(col) = KICK_OFFSETS
            .into_iter()
            .map(|offset| piece.col() + offset)
            .find(|&col| self.grid.is_valid_placement(&rotated, piece.row(), col))
        else {
            return false;
        };
        piece.replace_shape(rotated, col);
        self.dirty = true;
        true
    }

    /// Drops the piece as far as it goes, two points per row, and locks it.
    pub fn hard_drop(&mut self) {
        if !self.is_running() {
            return;
        }
        let Some(piece) = &mut self.falling_piece else {
            return;
        };
        let target = self.grid.drop_row(piece.shape(), piece.row(), piece.col());
        let rows = usize::try_from(target - piece.row()).unwrap_or_default();
        piece.set_position(target, piece.col());
        self.stats.add_drop_points(HARD_DROP_POINTS * rows);
        self.lock();
    }

    /// Puts the falling piece on hold.
    ///
    /// With an empty hold slot the next piece spawns; otherwise the held kind
    /// comes back at the spawn position. Hold is then disabled until the next
    /// piece spawns naturally.
    ///
    /// A swap whose returning piece would collide at the spawn position is
    /// refused.
    pub fn hold(&mut self) -> bool {
        if !self.is_running() || !self.hold_available {
            return false;
        }
        let Some(current) = self.falling_piece.as_ref().map(ActivePiece::kind) else {
            return false;
        };

        match self.held_piece {
            None => {
                self.held_piece = Some(current);
                self.spawn_next();
            }
            Some(held) => {
                let piece = ActivePiece::spawn(held, self.grid.columns());
                if !self
                    .grid
                    .is_valid_placement(piece.shape(), piece.row(), piece.col())
                {
                    debug!("hold swap refused: {held:?} does not fit at spawn");
                    return false;
                }
                self.held_piece = Some(current);
                self.falling_piece = Some(piece);
            }
        }
        debug!("held {current:?}");
        self.hold_available = false;
        self.dirty = true;
        true
    }

    /// Pauses or resumes. Has no effect before the first game or after game
    /// over.
    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Running => {
                self.tick_signal = Some(TickSignal::Stop);
                SessionState::Paused
            }
            SessionState::Paused => {
                self.tick_signal = Some(TickSignal::Rearm(self.fall_interval));
                SessionState::Running
            }
            SessionState::NotStarted | SessionState::GameOver => return,
        };
        self.dirty = true;
    }

    fn lock(&mut self) {
        let Some(piece) = self.falling_piece.take() else {
            return;
        };
        self.grid.fill_piece(&piece);
        let cleared_lines = self.grid.clear_lines();
        debug!(
            "locked {:?} at ({}, {}), cleared {cleared_lines}",
            piece.kind(),
            piece.row(),
            piece.col()
        );

        if let Some(level) = self.stats.complete_piece_drop(cleared_lines) {
            self.fall_interval = self
                .config
                .interval_for_level(level)
                .min(self.fall_interval);
            self.tick_signal = Some(TickSignal::Rearm(self.fall_interval));
            info!("level {level}, fall interval {:?}", self.fall_interval);
        }

        self.spawn_next();
        self.dirty = true;
    }

    fn spawn_next(&mut self) {
        let kind = mem::replace(&mut self.next_piece, self.generator.next_kind());
        let piece = ActivePiece::spawn(kind, self.grid.columns());
        let fits = self
            .grid
            .is_valid_placement(piece.shape(), piece.row(), piece.col());
        self.falling_piece = Some(piece);
        self.hold_available = true;
        self.dirty = true;

        if !fits {
            self.session_state = SessionState::GameOver;
            self.tick_signal = Some(TickSignal::Stop);
            info!(
                "game over: score {}, lines {}, level {}",
                self.stats.score(),
                self.stats.total_cleared_lines(),
                self.stats.level()
            );
            return;
        }
        debug!("spawned {kind:?}, next {:?}", self.next_piece);
    }
}

#[cfg(test)]
mod tests {
    use crate::{Cell, PieceSeed};

    use super::*;

    fn session() -> GameSession {
        let config = EngineConfig::default().with_seed(PieceSeed::from_bytes([42; 16]));
        let mut session = GameSession::new(config).unwrap();
        session.new_game();
        session.take_tick_signal();
        session
    }

    /// Replaces the grid and puts a piece of `kind` at its spawn position.
    fn session_with(grid: Grid, kind: PieceKind) -> GameSession {
        let mut session = session();
        session.falling_piece = Some(ActivePiece::spawn(kind, grid.columns()));
        session.grid = grid;
        session
    }

    fn piece(session: &GameSession) -> &ActivePiece {
        session.falling_piece().unwrap()
    }

    fn empty_grid() -> Grid {
        Grid::new(10, 20).unwrap()
    }

    #[test]
    fn test_new_session_is_not_started() {
        let mut session = GameSession::new(EngineConfig::default()).unwrap();
        assert_eq!(session.session_state(), SessionState::NotStarted);
        assert!(session.falling_piece().is_none());

        session.apply(Command::MoveLeft);
        session.apply(Command::PauseToggle);
        session.tick();
        assert_eq!(session.session_state(), SessionState::NotStarted);
        assert_eq!(session.take_tick_signal(), None);
    }

    #[test]
    fn test_new_rejects_degenerate_config() {
        let config = EngineConfig {
            rows: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            GameSession::new(config),
            Err(ConfigError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_new_game_initial_state() {
        let mut session = GameSession::new(EngineConfig::default()).unwrap();
        session.new_game();
        assert!(session.is_running());
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.total_cleared_lines(), 0);
        assert_eq!(session.held_piece(), None);
        assert!(session.can_hold());
        assert_eq!(
            session.take_tick_signal(),
            Some(TickSignal::Rearm(Duration::from_millis(500)))
        );

        let piece = piece(&session);
        assert_eq!(piece.row(), 0);
        assert_eq!(piece.shape(), &piece.kind().canonical_shape());
        assert!(session.grid().iter_rows().flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn test_spawn_promotes_next_piece() {
        let mut session = session();
        let next = session.next_piece();
        session.apply(Command::HardDrop);
        assert_eq!(piece(&session).kind(), next);
    }

    #[test]
    fn test_move_left_until_wall() {
        let mut session = session_with(empty_grid(), PieceKind::I);
        assert_eq!(piece(&session).col(), 3);
        for expected in (0..3).rev() {
            session.apply(Command::MoveLeft);
            assert_eq!(piece(&session).col(), expected);
        }
        session.apply(Command::MoveLeft);
        assert_eq!(piece(&session).col(), 0);
        assert_eq!(piece(&session).row(), 0);
    }

    #[test]
    fn test_move_right_until_wall() {
        let mut session = session_with(empty_grid(), PieceKind::O);
        for _ in 0..10 {
            session.apply(Command::MoveRight);
        }
        assert_eq!(piece(&session).col(), 8);
    }

    #[test]
    fn test_rotate_o_is_noop() {
        let grid = Grid::from_ascii(
            10,
            20,
            "
            ...##.....
            ..........
            ",
        );
        let mut session = session_with(grid, PieceKind::O);
        let before = piece(&session).clone();
        session.apply(Command::RotateCw);
        session.apply(Command::RotateCcw);
        assert_eq!(piece(&session), &before);
    }

    #[test]
    fn test_rotate_in_open_space() {
        let mut session = session_with(empty_grid(), PieceKind::T);
        session.apply(Command::RotateCw);
        let rotated = PieceKind::T
            .canonical_shape()
            .rotated(RotationDirection::Clockwise);
        assert_eq!(piece(&session).shape(), &rotated);
        assert_eq!(piece(&session).col(), 4);
    }

    #[test]
    fn test_rotate_kicks_off_wall() {
        let mut session = session_with(empty_grid(), PieceKind::I);
        session.apply(Command::RotateCw);
        // vertical I occupies local column 2; push it against the right wall
        while session.move_by(0, 1) {}
        assert_eq!(piece(&session).col(), 7);

        // back to horizontal needs columns 7..=10, so it kicks left by 1
        session.apply(Command::RotateCcw);
        assert_eq!(piece(&session).shape().width(), 4);
        assert_eq!(piece(&session).col(), 6);
    }

    #[test]
    fn test_rotate_fails_without_room() {
        // a vertical I in a one-column shaft cannot turn horizontal
        let grid = Grid::from_ascii(
            10,
            20,
            "
            ####.#####
            ####.#####
            ####.#####
            ####.#####
            ####.#####
            ####.#####
            ",
        );
        let mut session = session_with(grid, PieceKind::I);
        session.apply(Command::RotateCw);
        session.move_by(0, -1); // local column 2 → grid column 4
        while session.move_by(1, 0) {}
        let before = piece(&session).clone();
        assert!(before.row() > 10);

        session.apply(Command::RotateCw);
        assert_eq!(piece(&session), &before);
    }

    #[test]
    fn test_soft_drop_scores_and_never_locks() {
        let mut session = session_with(empty_grid(), PieceKind::O);
        session.apply(Command::SoftDropStep);
        assert_eq!(piece(&session).row(), 1);
        assert_eq!(session.score(), 1);

        while session.soft_drop_step() {}
        assert_eq!(piece(&session).row(), 18);
        assert_eq!(session.score(), 18);

        session.apply(Command::SoftDropStep);
        assert_eq!(session.score(), 18);
        assert_eq!(session.stats().completed_pieces(), 0);
    }

    #[test]
    fn test_tick_descends_then_locks() {
        let mut session = session_with(empty_grid(), PieceKind::O);
        session.tick();
        assert_eq!(piece(&session).row(), 1);
        assert_eq!(session.score(), 0);

        for _ in 0..17 {
            session.tick();
        }
        assert_eq!(piece(&session).row(), 18);
        session.tick();
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(session.grid().cell(19, 4), Some(Cell::Locked(PieceKind::O)));
        assert_eq!(piece(&session).row(), 0);
    }

    #[test]
    fn test_hard_drop_scores_two_per_row() {
        let mut session = session_with(empty_grid(), PieceKind::O);
        session.apply(Command::HardDrop);
        assert_eq!(session.score(), 2 * 18);
        assert_eq!(session.grid().cell(18, 4), Some(Cell::Locked(PieceKind::O)));
        assert_eq!(session.grid().cell(19, 5), Some(Cell::Locked(PieceKind::O)));
        assert!(session.can_hold());
    }

    #[test]
    fn test_ghost_row_matches_hard_drop() {
        let grid = Grid::from_ascii(
            10,
            20,
            "
            ....#.....
            ..........
            ..........
            ",
        );
        let mut session = session_with(grid, PieceKind::O);
        assert_eq!(session.ghost_row(), Some(15));
        assert_eq!(piece(&session).row(), 0);
        session.apply(Command::HardDrop);
        assert_eq!(session.grid().cell(15, 4), Some(Cell::Locked(PieceKind::O)));
        assert_eq!(session.score(), 2 * 15);
    }

    #[test]
    fn test_single_line_clear() {
        let grid = Grid::from_ascii(10, 20, "####.#####");
        let mut session = session_with(grid, PieceKind::I);
        session.apply(Command::RotateCw);
        session.move_by(0, -1);
        let dropped_from = piece(&session).row();
        session.apply(Command::HardDrop);

        let drop_points = 2 * usize::try_from(16 - dropped_from).unwrap();
        assert_eq!(session.total_cleared_lines(), 1);
        assert_eq!(session.score(), drop_points + 100);
        // the three upper cells of the I remain, shifted down by one
        for row in 17..20 {
            assert_eq!(session.grid().cell(row, 4), Some(Cell::Locked(PieceKind::I)));
        }
        assert_eq!(session.grid().cell(19, 0), Some(Cell::Empty));
    }

    #[test]
    fn test_quad_clear_at_level_two() {
        let grid = Grid::from_ascii(
            10,
            20,
            "
            #########.
            #########.
            #########.
            #########.
            ",
        );
        let mut session = session_with(grid, PieceKind::I);
        session.stats = GameStats::new();
        for _ in 0..10 {
            session.stats.complete_piece_drop(1);
        }
        assert_eq!(session.level(), 2);
        let before = session.score();

        session.apply(Command::RotateCw);
        while session.move_by(0, 1) {}
        session.apply(Command::HardDrop);

        assert_eq!(session.total_cleared_lines(), 14);
        assert_eq!(session.score() - before, 2 * 16 + 800 * 2);
        assert!(session.grid().iter_rows().flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn test_level_up_shortens_interval_and_rearms() {
        let grid = Grid::from_ascii(10, 20, "#########.");
        let mut session = session_with(grid, PieceKind::I);
        for _ in 0..9 {
            session.stats.complete_piece_drop(1);
        }
        session.apply(Command::RotateCw);
        while session.move_by(0, 1) {}
        session.apply(Command::HardDrop);

        assert_eq!(session.level(), 2);
        assert_eq!(session.fall_interval(), Duration::from_millis(450));
        assert_eq!(
            session.take_tick_signal(),
            Some(TickSignal::Rearm(Duration::from_millis(450)))
        );
    }

    #[test]
    fn test_level_up_never_slows_fast_start() {
        let config = EngineConfig::default()
            .with_difficulty(crate::Difficulty::Impossibile)
            .with_seed(PieceSeed::from_bytes([3; 16]));
        let mut session = GameSession::new(config).unwrap();
        session.new_game();
        session.grid = Grid::from_ascii(10, 20, "#########.");
        session.falling_piece = Some(ActivePiece::spawn(PieceKind::I, 10));
        for _ in 0..9 {
            session.stats.complete_piece_drop(1);
        }
        session.apply(Command::RotateCw);
        while session.move_by(0, 1) {}
        session.apply(Command::HardDrop);

        assert_eq!(session.level(), 2);
        assert_eq!(session.fall_interval(), Duration::from_millis(150));
    }

    #[test]
    fn test_fall_interval_survives_reset() {
        let mut session = session();
        session.fall_interval = Duration::from_millis(250);
        session.apply(Command::Reset);
        assert_eq!(session.fall_interval(), Duration::from_millis(250));
        assert_eq!(session.level(), 1);
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        // everything below the two spawn rows is filled, leaving column 0 open
        let grid = Grid::from_ascii(10, 20, &".#########\n".repeat(18));
        let mut session = session_with(grid, PieceKind::O);
        session.apply(Command::HardDrop);
        assert!(session.is_game_over());
        assert!(!session.is_running());
        assert_eq!(session.take_tick_signal(), Some(TickSignal::Stop));

        let grid_before = session.grid().clone();
        let score_before = session.score();
        for command in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDropStep,
            Command::RotateCw,
            Command::RotateCcw,
            Command::HardDrop,
            Command::Hold,
            Command::PauseToggle,
        ] {
            session.apply(command);
        }
        session.tick();
        assert!(session.is_game_over());
        assert_eq!(session.grid(), &grid_before);
        assert_eq!(session.score(), score_before);

        session.apply(Command::Reset);
        assert!(session.is_running());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_pause_blocks_everything_but_resume_and_reset() {
        let mut session = session_with(empty_grid(), PieceKind::T);
        session.apply(Command::PauseToggle);
        assert!(session.is_paused());
        assert_eq!(session.take_tick_signal(), Some(TickSignal::Stop));

        let before = piece(&session).clone();
        session.apply(Command::MoveLeft);
        session.apply(Command::SoftDropStep);
        session.apply(Command::RotateCw);
        session.apply(Command::HardDrop);
        session.apply(Command::Hold);
        session.tick();
        assert_eq!(piece(&session), &before);
        assert_eq!(session.held_piece(), None);
        assert_eq!(session.score(), 0);

        session.apply(Command::PauseToggle);
        assert!(session.is_running());
        assert_eq!(
            session.take_tick_signal(),
            Some(TickSignal::Rearm(session.fall_interval()))
        );

        session.apply(Command::PauseToggle);
        session.apply(Command::Reset);
        assert!(session.is_running());
    }

    #[test]
    fn test_hold_first_time_spawns_next() {
        let mut session = session_with(empty_grid(), PieceKind::S);
        let next = session.next_piece();
        assert!(session.hold());
        assert_eq!(session.held_piece(), Some(PieceKind::S));
        assert_eq!(piece(&session).kind(), next);
        assert!(!session.can_hold());

        let state = (piece(&session).clone(), session.next_piece());
        assert!(!session.hold());
        assert_eq!((piece(&session).clone(), session.next_piece()), state);
        assert_eq!(session.held_piece(), Some(PieceKind::S));
    }

    #[test]
    fn test_hold_swap_returns_held_at_spawn() {
        let mut session = session_with(empty_grid(), PieceKind::S);
        session.held_piece = Some(PieceKind::L);
        session.apply(Command::RotateCw);
        session.apply(Command::SoftDropStep);
        let next = session.next_piece();

        session.apply(Command::Hold);
        assert_eq!(session.held_piece(), Some(PieceKind::S));
        assert_eq!(piece(&session), &ActivePiece::spawn(PieceKind::L, 10));
        assert_eq!(session.next_piece(), next);
        assert!(!session.can_hold());

        // hold comes back after the next natural spawn
        session.apply(Command::HardDrop);
        assert!(session.can_hold());
    }

    #[test]
    fn test_hold_swap_refused_when_spawn_blocked() {
        // the held T would cover (0, 5) when it spawns
        let art = format!(".....Z....\n{}", "..........\n".repeat(19));
        let mut session = session_with(Grid::from_ascii(10, 20, &art), PieceKind::I);
        session.held_piece = Some(PieceKind::T);
        while session.move_by(1, 0) {}

        assert!(!session.hold());
        assert_eq!(piece(&session).kind(), PieceKind::I);
        assert_eq!(session.held_piece(), Some(PieceKind::T));
        assert!(session.can_hold());
    }

    #[test]
    fn test_dirty_flag() {
        let mut session = session_with(empty_grid(), PieceKind::T);
        assert!(session.take_dirty());
        assert!(!session.is_dirty());

        // blocked move does not invalidate
        session.apply(Command::PauseToggle);
        session.take_dirty();
        session.apply(Command::MoveLeft);
        assert!(!session.is_dirty());

        session.apply(Command::PauseToggle);
        assert!(session.take_dirty());
        session.apply(Command::MoveLeft);
        assert!(session.take_dirty());
    }
}
