/// Score values for line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Lines needed to advance one level.
const LINES_PER_LEVEL: usize = 10;

/// Game statistics tracking score, level, lines cleared and piece count.
///
/// # Scoring
///
/// - Line clears: `SCORE_TABLE[lines] * level`, using the level in effect
///   before the clear
/// - Soft drop: 1 point per row, hard drop: 2 points per row (see
///   [`Self::add_drop_points`])
/// - No combo, back-to-back or T-spin bonuses
///
/// # Example
///
/// ```
/// use stackfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4); // 4 lines at level 1
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new tracker: all counters at zero, level 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines cleared.
    ///
    /// `[0]` counts locks that cleared nothing, `[1]`..`[4]` count singles,
    /// doubles, triples and quads.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Adds points earned by dropping a piece (soft or hard drop).
    pub const fn add_drop_points(&mut self, points: usize) {
        self.score += points;
    }

    /// Updates statistics after a piece lock.
    ///
    /// Returns the new level when this clear raised it.
    ///
    /// # Arguments
    ///
    /// * `cleared_lines` - Number of lines cleared by this lock. A single
    ///   piece spans at most 4 rows; larger counts score as 4.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> Option<usize> {
        let bucket = cleared_lines.min(SCORE_TABLE.len() - 1);
        self.completed_pieces += 1;
        self.line_cleared_counter[bucket] += 1;
        if cleared_lines == 0 {
            return None;
        }

        self.score += SCORE_TABLE[bucket] * self.level;
        self.total_cleared_lines += cleared_lines;
        let level = self.total_cleared_lines / LINES_PER_LEVEL + 1;
        if level > self.level {
            self.level = level;
            return Some(level);
        }
        None
    }
}
