//! CNF formulas: the conjunction of compiled clauses

use super::{Clause, LiteralIndex};
use std::fmt::Write as _;

/// The complete output of a constraint compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    index: LiteralIndex,
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(index: LiteralIndex) -> Self {
        Self {
            index,
            clauses: Vec::new(),
        }
    }

    pub fn push(&mut self, clause: Clause) {
        debug_assert_eq!(clause.index(), self.index);
        self.clauses.push(clause);
    }

    pub fn extend<I: IntoIterator<Item = Clause>>(&mut self, clauses: I) {
        for clause in clauses {
            self.push(clause);
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn index(&self) -> LiteralIndex {
        self.index
    }

    /// Number of variables declared to the solver
    pub fn variable_count(&self) -> usize {
        self.index.variable_count()
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether the formula holds an empty clause, making it UNSAT outright
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// Solver text form of every clause
    pub fn clause_strings(&self) -> Vec<String> {
        self.clauses.iter().map(Clause::serialize).collect()
    }

    /// Render the formula in DIMACS CNF format
    pub fn to_dimacs(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "p cnf {} {}", self.variable_count(), self.clause_count());
        for clause in &self.clauses {
            if clause.is_empty() {
                out.push_str("0\n");
            } else {
                let _ = writeln!(out, "{} 0", clause.serialize());
            }
        }
        out
    }

    /// Human readable listing, one clause per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        for clause in &self.clauses {
            let _ = writeln!(out, "({})", clause.render());
        }
        out
    }

    /// Check whether an assignment satisfies every clause
    ///
    /// Variables missing from `literals` count as false.
    pub fn is_satisfied_by(&self, literals: &[i32]) -> bool {
        let mut values = vec![false; self.variable_count() + 1];
        for &literal in literals {
            let var = literal.unsigned_abs() as usize;
            if var < values.len() {
                values[var] = literal > 0;
            }
        }

        self.clauses.iter().all(|clause| {
            clause.literals().iter().any(|&literal| {
                let value = values[literal.unsigned_abs() as usize];
                if literal > 0 { value } else { !value }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_formula() -> Formula {
        let index = LiteralIndex::square(2).unwrap();
        let mut formula = Formula::new(index);

        let mut first = Clause::new(index);
        first.add_positive(0, 0).unwrap().add_positive(0, 1).unwrap();
        formula.push(first);

        let mut second = Clause::new(index);
        second.add_negative(0, 0).unwrap().add_negative(0, 1).unwrap();
        formula.push(second);

        formula
    }

    #[test]
    fn test_dimacs_output() {
        let formula = sample_formula();
        assert_eq!(formula.to_dimacs(), "p cnf 4 2\n1 2 0\n-1 -2 0\n");
        assert_eq!(formula.clause_strings(), vec!["1 2", "-1 -2"]);
    }

    #[test]
    fn test_empty_clause_detection() {
        let mut formula = sample_formula();
        assert!(!formula.has_empty_clause());

        formula.push(Clause::new(formula.index()));
        assert!(formula.has_empty_clause());
        assert!(formula.to_dimacs().ends_with("\n0\n"));
    }

    #[test]
    fn test_assignment_check() {
        let formula = sample_formula();

        assert!(formula.is_satisfied_by(&[1, -2, -3, -4]));
        assert!(!formula.is_satisfied_by(&[1, 2, -3, -4]));
        assert!(!formula.is_satisfied_by(&[]));
    }

    #[test]
    fn test_rendering() {
        let formula = sample_formula();
        assert_eq!(formula.render(), "(X_0_0 or X_0_1)\n(~X_0_0 or ~X_0_1)\n");
    }
}
