//! Mapping solver assignments back to coordinates

use super::LiteralIndex;
use crate::error::{PuzzleError, Result};
use std::collections::HashSet;

/// Coordinates of every positive literal in `literals`
///
/// Negative literals are skipped. A variable asserted true twice is an
/// [`PuzzleError::InconsistentAssignment`], as is a variable asserted both
/// true and false.
pub fn true_coordinates(index: &LiteralIndex, literals: &[i32]) -> Result<Vec<(usize, usize)>> {
    let mut positive = HashSet::new();
    let mut negative = HashSet::new();
    let mut coords = Vec::new();

    for &literal in literals {
        let coord = index.coord_for(literal)?;
        let var = literal.unsigned_abs();
        if literal > 0 {
            if !positive.insert(var) {
                return Err(PuzzleError::InconsistentAssignment(format!(
                    "variable {} ({}, {}) asserted true more than once",
                    var, coord.0, coord.1
                )));
            }
            coords.push(coord);
        } else {
            negative.insert(var);
        }
    }

    if let Some(var) = positive.intersection(&negative).min() {
        return Err(PuzzleError::InconsistentAssignment(format!(
            "variable {} asserted both true and false",
            var
        )));
    }

    Ok(coords)
}

/// Full assignment (one literal per variable) with exactly `true_coords` set
pub fn assignment_from_coordinates(
    index: &LiteralIndex,
    true_coords: &[(usize, usize)],
) -> Result<Vec<i32>> {
    let mut values = vec![false; index.variable_count()];
    for &(primary, secondary) in true_coords {
        values[index.index(primary, secondary)?] = true;
    }

    Ok(values
        .into_iter()
        .enumerate()
        .map(|(offset, value)| {
            let var = offset as i32 + 1;
            if value { var } else { -var }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_literals_are_decoded() {
        let index = LiteralIndex::square(3).unwrap();
        let coords = true_coordinates(&index, &[-1, 2, -3, 9]).unwrap();
        assert_eq!(coords, vec![(0, 1), (2, 2)]);
    }

    #[test]
    fn test_duplicate_positive_literal() {
        let index = LiteralIndex::square(3).unwrap();
        let err = true_coordinates(&index, &[2, 2]).unwrap_err();
        assert!(matches!(err, PuzzleError::InconsistentAssignment(_)));
    }

    #[test]
    fn test_contradictory_literals() {
        let index = LiteralIndex::square(3).unwrap();
        let err = true_coordinates(&index, &[-4, 4]).unwrap_err();
        assert!(matches!(err, PuzzleError::InconsistentAssignment(_)));
    }

    #[test]
    fn test_literal_outside_index() {
        let index = LiteralIndex::square(2).unwrap();
        assert!(matches!(
            true_coordinates(&index, &[5]),
            Err(PuzzleError::LiteralOutOfRange { literal: 5, .. })
        ));
    }

    #[test]
    fn test_assignment_round_trip() {
        let index = LiteralIndex::new(4, 3).unwrap();
        let coords = vec![(0, 2), (1, 0), (3, 1)];

        let literals = assignment_from_coordinates(&index, &coords).unwrap();
        assert_eq!(literals.len(), 12);
        assert_eq!(true_coordinates(&index, &literals).unwrap(), coords);
    }
}
