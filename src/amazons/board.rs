//! Occupancy grid for decoded amazons solutions

use super::Position;
use crate::error::{PuzzleError, Result};
use crate::sat::decoder;
use crate::sat::LiteralIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A square board where `true` marks an amazon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub size: usize,
    pub cells: Vec<bool>,
}

impl Board {
    /// Create a new empty board
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Board with an amazon on each of `pieces`
    pub fn with_pieces(size: usize, pieces: &[Position]) -> Result<Self> {
        let mut board = Self::new(size);
        for &piece in pieces {
            board.set(piece, true)?;
        }
        Ok(board)
    }

    /// Decode a solver assignment over `size x size` cell variables
    ///
    /// Only positive literals place amazons; a cell claimed twice is an
    /// [`PuzzleError::InconsistentAssignment`].
    pub fn from_assignment(size: usize, literals: &[i32]) -> Result<Self> {
        let index = LiteralIndex::square(size)?;
        let mut board = Self::new(size);
        for (row, col) in decoder::true_coordinates(&index, literals)? {
            board.set(Position::new(row, col), true)?;
        }
        Ok(board)
    }

    /// One literal per cell variable, positive where an amazon stands
    pub fn to_assignment(&self) -> Result<Vec<i32>> {
        let pieces: Vec<(usize, usize)> =
            self.pieces().into_iter().map(|p| (p.row, p.col)).collect();
        decoder::assignment_from_coordinates(&LiteralIndex::square(self.size)?, &pieces)
    }

    /// Create a board from rows of `0`/`1` characters
    pub fn parse(content: &str) -> Result<Self> {
        let lines: Vec<(usize, &str)> = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();

        let size = lines.len();
        let mut board = Self::new(size);

        for (row, (line_number, line)) in lines.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != size {
                return Err(PuzzleError::InvalidInstance {
                    line: *line_number,
                    message: format!(
                        "row has {} cells, expected {} (boards are square)",
                        symbols.len(),
                        size
                    ),
                });
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                match symbol {
                    '0' => {}
                    '1' => board.set(Position::new(row, col), true)?,
                    other => {
                        return Err(PuzzleError::InvalidInstance {
                            line: *line_number,
                            message: format!("invalid character '{}', only '0' and '1' are allowed", other),
                        })
                    }
                }
            }
        }

        Ok(board)
    }

    /// Load a board from a text file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Rows of `0`/`1` characters, the format read by [`Board::parse`]
    pub fn to_text(&self) -> String {
        let mut result = String::with_capacity(self.size * (self.size + 1));
        for row in 0..self.size {
            for col in 0..self.size {
                result.push(if self.get(Position::new(row, col)) { '1' } else { '0' });
            }
            result.push('\n');
        }
        result
    }

    #[inline]
    fn index(&self, position: Position) -> usize {
        position.row * self.size + position.col
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.size && position.col < self.size
    }

    /// Whether an amazon stands on `position`; off-board squares are empty
    pub fn get(&self, position: Position) -> bool {
        self.contains(position) && self.cells[self.index(position)]
    }

    pub fn set(&mut self, position: Position, value: bool) -> Result<()> {
        if !self.contains(position) {
            return Err(PuzzleError::OutOfBounds {
                primary: position.row,
                secondary: position.col,
                primary_extent: self.size,
                secondary_extent: self.size,
            });
        }
        let idx = self.index(position);
        self.cells[idx] = value;
        Ok(())
    }

    /// All amazon positions in row-major order
    pub fn pieces(&self) -> Vec<Position> {
        let mut pieces = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let position = Position::new(row, col);
                if self.get(position) {
                    pieces.push(position);
                }
            }
        }
        pieces
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Rows of 0/1 integers, the layout the solver scripts printed
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size.max(1))
            .take(self.size)
            .map(|row| row.iter().map(|&cell| cell as u8).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let symbol = if self.get(Position::new(row, col)) { "♛" } else { "·" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
