//! Grid representation and the roll-accessibility predicate.
//!
//! The warehouse floor is a rectangular grid stored as a flat row-major
//! buffer. Each cell keeps the raw input character; `@` marks a paper roll
//! and every other character is open floor. Removing a roll writes `.`.

use std::fmt;

use rustc_hash::FxHashSet;

/// A grid position as (row, col), both 0-based.
pub type Pos = (usize, usize);

/// The character marking a paper roll.
pub const ROLL: char = '@';

/// The character written where a roll has been removed.
pub const EMPTY: char = '.';

/// A roll with this many (or more) roll neighbors is boxed in and cannot
/// be reached by a forklift.
const BLOCKING_NEIGHBORS: usize = 4;

/// The 8 Moore-neighborhood offsets: up-left, up, up-right, left, right,
/// down-left, down, down-right.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Error raised while constructing a [`Grid`] from text rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows were supplied.
    EmptyInput,
    /// A row's length differs from the first row's.
    InvalidShape {
        /// 0-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::EmptyInput => write!(f, "grid input contains no rows"),
            GridError::InvalidShape {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, expected {} (grid must be rectangular)",
                row, found, expected
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// A rectangular warehouse grid.
///
/// Dimensions are fixed at construction; all post-construction operations
/// are total over valid positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat row-major cell buffer (`cells[row * cols + col]`).
    cells: Vec<char>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Builds a grid from equal-length text rows.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, GridError> {
        let first = lines.first().ok_or(GridError::EmptyInput)?;
        let cols = first.as_ref().chars().count();

        let mut cells = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            let len_before = cells.len();
            cells.extend(line.as_ref().chars());
            let found = cells.len() - len_before;
            if found != cols {
                return Err(GridError::InvalidShape {
                    row,
                    expected: cols,
                    found,
                });
            }
        }

        Ok(Self {
            cells,
            rows: lines.len(),
            cols,
        })
    }

    /// Builds a grid from a text block, one row per line.
    ///
    /// A single trailing newline is tolerated; blank lines elsewhere are
    /// rows of length 0 and fail the rectangularity check.
    pub fn from_text(text: &str) -> Result<Self, GridError> {
        let trimmed = text.strip_suffix('\n').unwrap_or(text);
        if trimmed.is_empty() {
            return Err(GridError::EmptyInput);
        }
        let lines: Vec<&str> = trimmed.split('\n').collect();
        Self::from_lines(&lines)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the in-bounds position holds a roll. Out-of-bounds is false.
    #[inline]
    pub fn is_roll(&self, (row, col): Pos) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col] == ROLL
    }

    /// Signed-coordinate variant used by the neighbor scan, where offsets
    /// may step past either edge.
    #[inline]
    fn is_roll_signed(&self, row: i64, col: i64) -> bool {
        row >= 0
            && col >= 0
            && (row as usize) < self.rows
            && (col as usize) < self.cols
            && self.cells[row as usize * self.cols + col as usize] == ROLL
    }

    /// Counts rolls among the up-to-8 Moore neighbors of a position.
    ///
    /// Neighbors outside the grid are simply absent: no wrap-around, no
    /// virtual padding. Border cells therefore start with fewer potential
    /// blockers, which is what makes erosion eat inward from the edges.
    pub fn roll_neighbors(&self, (row, col): Pos) -> usize {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dr, dc)| self.is_roll_signed(row as i64 + dr, col as i64 + dc))
            .count()
    }

    /// A roll is accessible when fewer than 4 of its neighbors are rolls.
    /// Non-roll and out-of-bounds positions are never accessible.
    pub fn is_accessible(&self, pos: Pos) -> bool {
        self.is_roll(pos) && self.roll_neighbors(pos) < BLOCKING_NEIGHBORS
    }

    /// All currently accessible positions, in row-major order.
    pub fn accessible_positions(&self) -> Vec<Pos> {
        let mut positions = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.is_accessible((row, col)) {
                    positions.push((row, col));
                }
            }
        }
        positions
    }

    /// Number of currently accessible rolls.
    pub fn count_accessible(&self) -> usize {
        self.accessible_positions().len()
    }

    /// Total rolls on the grid.
    pub fn roll_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == ROLL).count()
    }

    /// Clears every listed position in one batch.
    ///
    /// Callers compute the full position set against the pre-batch state
    /// before calling; this method never re-evaluates accessibility.
    pub fn clear_all(&mut self, positions: &[Pos]) {
        for &(row, col) in positions {
            if row < self.rows && col < self.cols {
                self.cells[row * self.cols + col] = EMPTY;
            }
        }
    }

    /// Formats the grid as one line per row, each terminated by `\n`.
    pub fn render(&self) -> String {
        let mut output = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            for col in 0..self.cols {
                output.push(self.cells[row * self.cols + col]);
            }
            output.push('\n');
        }
        output
    }

    /// Formats the grid with the given roll positions wrapped in ANSI
    /// bright red, for terminal traces of cells about to be removed.
    pub fn render_highlighted(&self, highlight: &FxHashSet<Pos>) -> String {
        let mut output = String::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = self.cells[row * self.cols + col];
                if cell == ROLL && highlight.contains(&(row, col)) {
                    output.push_str("\x1b[91m@\x1b[0m");
                } else {
                    output.push(cell);
                }
            }
            output.push('\n');
        }
        output
    }
}
