//! Board geometry for the amazons puzzle: positions, lines and leap moves

use serde::{Deserialize, Serialize};
use std::fmt;

/// A square on the board, `row` and `col` counted from the top left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position shifted by `(d_row, d_col)`, if it stays on a `size x size` board
    pub fn offset(self, d_row: isize, d_col: isize, size: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < size && col < size).then_some(Position { row, col })
    }

    pub fn same_row(self, other: Position) -> bool {
        self.row == other.row
    }

    pub fn same_column(self, other: Position) -> bool {
        self.col == other.col
    }

    /// |Δrow| == |Δcol|
    pub fn same_diagonal(self, other: Position) -> bool {
        self.row.abs_diff(other.row) == self.col.abs_diff(other.col)
    }

    /// Row, column or diagonal shared with `other`
    pub fn attacks_in_line(self, other: Position) -> bool {
        self.same_row(other) || self.same_column(other) || self.same_diagonal(other)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The two fixed-offset jumps of the extended amazon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeapFamily {
    /// (±3, ±2) and (±2, ±3)
    ThreeByTwo,
    /// (±4, ±1) and (±1, ±4)
    FourByOne,
}

impl LeapFamily {
    pub const ALL: [LeapFamily; 2] = [LeapFamily::ThreeByTwo, LeapFamily::FourByOne];

    fn extents(self) -> (isize, isize) {
        match self {
            LeapFamily::ThreeByTwo => (3, 2),
            LeapFamily::FourByOne => (4, 1),
        }
    }

    /// All eight `(d_row, d_col)` jumps of the family
    pub fn offsets(self) -> [(isize, isize); 8] {
        let (long, short) = self.extents();
        [
            (-long, -short),
            (-long, short),
            (long, -short),
            (long, short),
            (-short, -long),
            (-short, long),
            (short, -long),
            (short, long),
        ]
    }

    /// On-board squares reachable from `from` with one jump
    pub fn targets(self, from: Position, size: usize) -> impl Iterator<Item = Position> {
        self.offsets()
            .into_iter()
            .filter_map(move |(d_row, d_col)| from.offset(d_row, d_col, size))
    }

    /// Whether `a` and `b` are one jump of this family apart
    pub fn connects(self, a: Position, b: Position) -> bool {
        let (long, short) = self.extents();
        let d_row = a.row.abs_diff(b.row) as isize;
        let d_col = a.col.abs_diff(b.col) as isize;
        (d_row == long && d_col == short) || (d_row == short && d_col == long)
    }

    /// The family linking `a` and `b`, if any
    pub fn between(a: Position, b: Position) -> Option<LeapFamily> {
        Self::ALL.into_iter().find(|family| family.connects(a, b))
    }
}

impl fmt::Display for LeapFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeapFamily::ThreeByTwo => write!(f, "3x2"),
            LeapFamily::FourByOne => write!(f, "4x1"),
        }
    }
}
