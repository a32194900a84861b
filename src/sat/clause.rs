//! Clauses built from two-dimensional coordinates

use super::LiteralIndex;
use crate::error::Result;
use std::fmt;

/// A disjunction of literals bound to one [`LiteralIndex`]
///
/// Literals are kept exactly as added: duplicates and complementary pairs are
/// never removed, so a faulty encoder stays visible in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    index: LiteralIndex,
    var_name: &'static str,
    literals: Vec<i32>,
}

impl Clause {
    /// Create an empty clause with the default variable name `X`
    pub fn new(index: LiteralIndex) -> Self {
        Self::with_name(index, "X")
    }

    pub fn with_name(index: LiteralIndex, var_name: &'static str) -> Self {
        Self {
            index,
            var_name,
            literals: Vec::new(),
        }
    }

    /// Append the literal asserting `(primary, secondary)` is true
    pub fn add_positive(&mut self, primary: usize, secondary: usize) -> Result<&mut Self> {
        let literal = self.index.literal_for(primary, secondary, true)?;
        self.literals.push(literal);
        Ok(self)
    }

    /// Append the literal asserting `(primary, secondary)` is false
    pub fn add_negative(&mut self, primary: usize, secondary: usize) -> Result<&mut Self> {
        let literal = self.index.literal_for(primary, secondary, false)?;
        self.literals.push(literal);
        Ok(self)
    }

    pub fn literals(&self) -> &[i32] {
        &self.literals
    }

    pub fn index(&self) -> LiteralIndex {
        self.index
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Solver text form: literals separated by spaces, without the DIMACS `0`
    pub fn serialize(&self) -> String {
        self.literals
            .iter()
            .map(|literal| literal.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Human readable form, e.g. `X_0_1 or ~X_1_2`
    pub fn render(&self) -> String {
        self.literals
            .iter()
            .map(|&literal| self.render_literal(literal))
            .collect::<Vec<_>>()
            .join(" or ")
    }

    fn render_literal(&self, literal: i32) -> String {
        let negation = if literal < 0 { "~" } else { "" };
        match self.index.coord_for(literal) {
            Ok((primary, secondary)) => {
                format!("{}{}_{}_{}", negation, self.var_name, primary, secondary)
            }
            // literals only enter through the index, so this never happens
            Err(_) => format!("{}{}?{}", negation, self.var_name, literal.unsigned_abs()),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;

    #[test]
    fn test_clause_building() {
        let mut clause = Clause::new(LiteralIndex::square(4).unwrap());
        clause.add_positive(0, 1).unwrap();
        clause.add_negative(1, 2).unwrap();
        clause.add_positive(3, 3).unwrap();

        assert_eq!(clause.literals(), &[2, -7, 16]);
        assert_eq!(clause.serialize(), "2 -7 16");
        assert_eq!(clause.render(), "X_0_1 or ~X_1_2 or X_3_3");
        assert_eq!(clause.len(), 3);
    }

    #[test]
    fn test_rectangular_index() {
        // 5 nodes, 3 colors
        let mut clause = Clause::with_name(LiteralIndex::new(5, 3).unwrap(), "C");
        clause.add_negative(4, 2).unwrap();
        clause.add_positive(1, 0).unwrap();

        assert_eq!(clause.serialize(), "-15 4");
        assert_eq!(clause.to_string(), "~C_4_2 or C_1_0");
    }

    #[test]
    fn test_duplicates_and_tautologies_are_kept() {
        let mut clause = Clause::new(LiteralIndex::square(2).unwrap());
        clause.add_positive(1, 1).unwrap();
        clause.add_positive(1, 1).unwrap();
        clause.add_negative(1, 1).unwrap();

        assert_eq!(clause.literals(), &[4, 4, -4]);
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut clause = Clause::new(LiteralIndex::square(3).unwrap());
        let err = clause.add_positive(3, 0).unwrap_err();

        assert!(matches!(err, PuzzleError::OutOfBounds { primary: 3, .. }));
        assert!(clause.is_empty());
    }

    #[test]
    fn test_empty_clause_rendering() {
        let clause = Clause::new(LiteralIndex::new(2, 0).unwrap());
        assert!(clause.is_empty());
        assert_eq!(clause.serialize(), "");
        assert_eq!(clause.render(), "");
    }
}
