//! Variable management for SAT encoding
//!
//! Both puzzles use two-dimensional variables: (row, column) for placement
//! boards and (node, color) for graph coloring. [`LiteralIndex`] linearizes
//! them row-major into the 1-based literal space DIMACS solvers expect.

use crate::error::{PuzzleError, Result};

/// Largest variable count a signed 32-bit DIMACS literal can address
pub const MAX_VARIABLES: usize = i32::MAX as usize;

/// Bijective mapping between `(primary, secondary)` coordinates and literals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralIndex {
    primary_extent: usize,
    secondary_extent: usize,
}

impl LiteralIndex {
    /// Create an index over `primary_extent x secondary_extent` variables
    ///
    /// Fails with [`PuzzleError::VariableSpaceTooLarge`] when the space holds
    /// more than [`MAX_VARIABLES`] variables.
    pub fn new(primary_extent: usize, secondary_extent: usize) -> Result<Self> {
        match primary_extent.checked_mul(secondary_extent) {
            Some(count) if count <= MAX_VARIABLES => Ok(Self {
                primary_extent,
                secondary_extent,
            }),
            _ => Err(PuzzleError::VariableSpaceTooLarge {
                primary_extent,
                secondary_extent,
            }),
        }
    }

    /// Index for a square `size x size` board
    pub fn square(size: usize) -> Result<Self> {
        Self::new(size, size)
    }

    /// Flat 0-based offset of a coordinate
    pub fn index(&self, primary: usize, secondary: usize) -> Result<usize> {
        if primary >= self.primary_extent || secondary >= self.secondary_extent {
            return Err(PuzzleError::OutOfBounds {
                primary,
                secondary,
                primary_extent: self.primary_extent,
                secondary_extent: self.secondary_extent,
            });
        }
        Ok(primary * self.secondary_extent + secondary)
    }

    /// Signed literal for a coordinate; `polarity == false` negates it
    pub fn literal_for(&self, primary: usize, secondary: usize, polarity: bool) -> Result<i32> {
        let offset = self.index(primary, secondary)?;
        let var = i32::try_from(offset + 1).map_err(|_| PuzzleError::OutOfBounds {
            primary,
            secondary,
            primary_extent: self.primary_extent,
            secondary_extent: self.secondary_extent,
        })?;
        Ok(if polarity { var } else { -var })
    }

    /// Inverse of [`literal_for`](Self::literal_for); the sign is discarded
    pub fn coord_for(&self, literal: i32) -> Result<(usize, usize)> {
        let magnitude = literal.unsigned_abs() as usize;
        if magnitude == 0 || magnitude > self.variable_count() {
            return Err(PuzzleError::LiteralOutOfRange {
                literal,
                variable_count: self.variable_count(),
            });
        }
        let offset = magnitude - 1;
        Ok((offset / self.secondary_extent, offset % self.secondary_extent))
    }

    /// Total number of variables, never above [`MAX_VARIABLES`]
    pub fn variable_count(&self) -> usize {
        self.primary_extent * self.secondary_extent
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.primary_extent, self.secondary_extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_are_one_based() {
        let index = LiteralIndex::square(4).unwrap();

        assert_eq!(index.literal_for(0, 0, true).unwrap(), 1);
        assert_eq!(index.literal_for(0, 1, true).unwrap(), 2);
        assert_eq!(index.literal_for(1, 0, true).unwrap(), 5);
        assert_eq!(index.literal_for(3, 3, false).unwrap(), -16);
    }

    #[test]
    fn test_round_trip_over_whole_space() {
        let index = LiteralIndex::new(5, 3).unwrap();

        for primary in 0..5 {
            for secondary in 0..3 {
                for polarity in [true, false] {
                    let literal = index.literal_for(primary, secondary, polarity).unwrap();
                    assert_ne!(literal, 0);
                    assert_eq!(literal > 0, polarity);
                    assert_eq!(index.coord_for(literal).unwrap(), (primary, secondary));
                }
            }
        }
    }

    #[test]
    fn test_literals_are_unique() {
        let index = LiteralIndex::new(3, 4).unwrap();
        let mut literals = Vec::new();
        for primary in 0..3 {
            for secondary in 0..4 {
                literals.push(index.literal_for(primary, secondary, true).unwrap());
            }
        }
        literals.sort();
        literals.dedup();
        assert_eq!(literals.len(), index.variable_count());
        assert_eq!(literals, (1..=12).collect::<Vec<i32>>());
    }

    #[test]
    fn test_variable_bounds() {
        let index = LiteralIndex::new(2, 3).unwrap();

        assert!(index.index(1, 2).is_ok());
        assert!(matches!(
            index.index(2, 0),
            Err(PuzzleError::OutOfBounds { primary: 2, .. })
        ));
        assert!(matches!(
            index.index(0, 3),
            Err(PuzzleError::OutOfBounds { secondary: 3, .. })
        ));
    }

    #[test]
    fn test_coord_for_rejects_unknown_literals() {
        let index = LiteralIndex::square(2).unwrap();

        assert!(index.coord_for(0).is_err());
        assert!(index.coord_for(5).is_err());
        assert!(index.coord_for(-5).is_err());
        assert_eq!(index.coord_for(-4).unwrap(), (1, 1));
    }

    #[test]
    fn test_empty_space() {
        let index = LiteralIndex::new(5, 0).unwrap();
        assert_eq!(index.variable_count(), 0);
        assert!(index.literal_for(0, 0, true).is_err());
        assert!(index.coord_for(1).is_err());
    }

    #[test]
    fn test_variable_space_must_fit_in_literals() {
        assert!(matches!(
            LiteralIndex::new(1 << 16, 1 << 16),
            Err(PuzzleError::VariableSpaceTooLarge { .. })
        ));
        assert!(matches!(
            LiteralIndex::new(usize::MAX, 2),
            Err(PuzzleError::VariableSpaceTooLarge { .. })
        ));
        assert!(LiteralIndex::new(0, usize::MAX).is_ok());
    }

    #[test]
    fn test_largest_literal_keeps_its_sign() {
        let index = LiteralIndex::new(1, MAX_VARIABLES).unwrap();
        let last = MAX_VARIABLES - 1;

        let literal = index.literal_for(0, last, true).unwrap();
        assert_eq!(literal, i32::MAX);
        assert_eq!(index.coord_for(literal).unwrap(), (0, last));
        assert_eq!(index.coord_for(-literal).unwrap(), (0, last));
        assert!(index.coord_for(i32::MIN).is_err());
    }
}
