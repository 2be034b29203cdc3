use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

/// Uniform draw over the 7 kinds, with no history or bag.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in declaration order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    const fn template(self) -> &'static PieceTemplate {
        &TEMPLATES[self as usize]
    }

    /// Returns a fresh copy of the canonical (spawn orientation) shape.
    ///
    /// The returned shape is owned by the caller; rotating it never affects
    /// the template table.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// let shape = PieceKind::T.canonical_shape();
    /// assert_eq!((shape.height(), shape.width()), (3, 3));
    /// assert!(shape.is_occupied(0, 1));
    /// assert!(!shape.is_occupied(0, 0));
    /// ```
    #[must_use]
    pub fn canonical_shape(self) -> PieceShape {
        PieceShape::from_rows(self.template().rows)
    }

    /// Returns the display color of this kind.
    #[must_use]
    pub const fn color(self) -> PieceColor {
        self.template().color
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('S'), Some(PieceKind::S));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// An RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PieceColor {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

struct PieceTemplate {
    rows: &'static [&'static str],
    color: PieceColor,
}

// Indexed by `PieceKind as usize`.
const TEMPLATES: [PieceTemplate; PieceKind::LEN] = [
    PieceTemplate {
        rows: &["....", "####", "....", "...."],
        color: PieceColor::rgb(0, 245, 255),
    },
    PieceTemplate {
        rows: &["##", "##"],
        color: PieceColor::rgb(255, 235, 59),
    },
    PieceTemplate {
        rows: &[".#.", "###", "..."],
        color: PieceColor::rgb(224, 64, 251),
    },
    PieceTemplate {
        rows: &[".##", "##.", "..."],
        color: PieceColor::rgb(105, 240, 174),
    },
    PieceTemplate {
        rows: &["##.", ".##", "..."],
        color: PieceColor::rgb(255, 82, 82),
    },
    PieceTemplate {
        rows: &["#..", "###", "..."],
        color: PieceColor::rgb(68, 138, 255),
    },
    PieceTemplate {
        rows: &["..#", "###", "..."],
        color: PieceColor::rgb(255, 171, 64),
    },
];

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// An owned boolean matrix describing which cells of a piece's bounding box
/// are occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceShape {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl PieceShape {
    fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        let cells = rows
            .iter()
            .flat_map(|row| row.chars().map(|c| c == '#'))
            .collect::<Vec<_>>();
        debug_assert_eq!(cells.len(), width * height, "template rows must be rectangular");
        Self {
            height,
            width,
            cells,
        }
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns whether the cell at local `(row, col)` is occupied.
    ///
    /// Positions outside the bounding box are reported as unoccupied.
    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// Returns an iterator of occupied local positions as `(row, col)`.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(|(i, _)| (i / self.width, i % self.width))
    }

    /// Returns a new shape rotated by a quarter turn.
    ///
    /// An `n×m` shape becomes `m×n`. Clockwise maps `src[r][c]` to
    /// `dst[c][n-1-r]`; counter-clockwise maps it to `dst[m-1-c][r]`.
    #[must_use]
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        let (n, m) = (self.height, self.width);
        let mut cells = vec![false; n * m];
        // the result has `n` columns
        for (r, c) in self.occupied_cells() {
            let (dr, dc) = match direction {
                RotationDirection::Clockwise => (c, n - 1 - r),
                RotationDirection::CounterClockwise => (m - 1 - c, r),
            };
            cells[dr * n + dc] = true;
        }
        Self {
            height: m,
            width: n,
            cells,
        }
    }
}

/// The falling piece: its kind, current (possibly rotated) shape and the
/// grid position of the shape's top-left corner.
///
/// `row` may be negative while the piece straddles the top edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    shape: PieceShape,
    row: i32,
    col: i32,
}

impl ActivePiece {
    /// Creates a piece of `kind` at the spawn anchor of a grid with `columns`
    /// columns: row 0, horizontally centered.
    #[must_use]
    pub fn spawn(kind: PieceKind, columns: usize) -> Self {
        let shape = kind.canonical_shape();
        let col = to_i32(columns / 2) - to_i32(shape.width() / 2);
        Self {
            kind,
            shape,
            row: 0,
            col,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &PieceShape {
        &self.shape
    }

    #[must_use]
    pub fn row(&self) -> i32 {
        self.row
    }

    #[must_use]
    pub fn col(&self) -> i32 {
        self.col
    }

    /// Returns the grid positions `(row, col)` covered by this piece.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_cells()
            .map(|(r, c)| (self.row + to_i32(r), self.col + to_i32(c)))
    }

    pub(crate) fn set_position(&mut self, row: i32, col: i32) {
        self.row = row;
        self.col = col;
    }

    pub(crate) fn replace_shape(&mut self, shape: PieceShape, col: i32) {
        self.shape = shape;
        self.col = col;
    }
}

pub(crate) fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
