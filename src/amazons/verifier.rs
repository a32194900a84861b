//! Independent verification of decoded amazons boards
//!
//! The checks work on the raw grid only, so an encoding bug in the compiler
//! or a bad model from the solver shows up as a violation here.

use super::{Board, LeapFamily, Position};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validates decoded boards against the full amazons rules
#[derive(Debug, Clone, Default)]
pub struct SolutionVerifier;

/// A single broken rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    MissingForcedPiece { position: Position },
    RowConflict { row: usize, pieces: usize },
    ColumnConflict { col: usize, pieces: usize },
    PieceCount { expected: usize, actual: usize },
    DiagonalConflict { first: Position, second: Position },
    LeapConflict { family: LeapFamily, first: Position, second: Position },
}

/// Outcome of verifying one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
}

impl SolutionVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Check `board` against every rule, collecting all violations
    pub fn verify(&self, board: &Board, placed: &[Position]) -> VerificationReport {
        let mut violations = Vec::new();

        violations.extend(self.check_forced_pieces(board, placed));
        violations.extend(self.check_lines(board));
        violations.extend(self.check_piece_count(board));

        let pieces = board.pieces();
        for (&first, &second) in pieces.iter().tuple_combinations() {
            if first.same_diagonal(second) {
                violations.push(Violation::DiagonalConflict { first, second });
            }
            if let Some(family) = LeapFamily::between(first, second) {
                violations.push(Violation::LeapConflict {
                    family,
                    first,
                    second,
                });
            }
        }

        if !violations.is_empty() {
            tracing::warn!(violations = violations.len(), "board failed verification");
        }

        VerificationReport {
            is_valid: violations.is_empty(),
            violations,
        }
    }

    fn check_forced_pieces(&self, board: &Board, placed: &[Position]) -> Vec<Violation> {
        placed
            .iter()
            .filter(|&&position| !board.get(position))
            .map(|&position| Violation::MissingForcedPiece { position })
            .collect()
    }

    /// At most one amazon per row and per column
    fn check_lines(&self, board: &Board) -> Vec<Violation> {
        let mut violations = Vec::new();

        for row in 0..board.size {
            let pieces = (0..board.size)
                .filter(|&col| board.get(Position::new(row, col)))
                .count();
            if pieces > 1 {
                violations.push(Violation::RowConflict { row, pieces });
            }
        }

        for col in 0..board.size {
            let pieces = (0..board.size)
                .filter(|&row| board.get(Position::new(row, col)))
                .count();
            if pieces > 1 {
                violations.push(Violation::ColumnConflict { col, pieces });
            }
        }

        violations
    }

    fn check_piece_count(&self, board: &Board) -> Option<Violation> {
        let actual = board.piece_count();
        (actual != board.size).then_some(Violation::PieceCount {
            expected: board.size,
            actual,
        })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingForcedPiece { position } => {
                write!(f, "Forced amazon at position {} is missing", position)
            }
            Violation::RowConflict { row, pieces } => {
                write!(f, "Row {} contains {} amazons", row, pieces)
            }
            Violation::ColumnConflict { col, pieces } => {
                write!(f, "Column {} contains {} amazons", col, pieces)
            }
            Violation::PieceCount { expected, actual } if actual < expected => {
                write!(f, "Some amazons are missing: {} placed, {} required", actual, expected)
            }
            Violation::PieceCount { expected, actual } => {
                write!(f, "There are too many amazons: {} placed, {} allowed", actual, expected)
            }
            Violation::DiagonalConflict { first, second } => {
                write!(f, "Amazons at {} and {} share a diagonal", first, second)
            }
            Violation::LeapConflict {
                family,
                first,
                second,
            } => write!(f, "{} conflict between {} and {}", family, first, second),
        }
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Verification Result: {}",
            if self.is_valid { "VALID" } else { "INVALID" }
        )?;
        for violation in &self.violations {
            writeln!(f, "  - {}", violation)?;
        }
        Ok(())
    }
}
