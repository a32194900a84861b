//! SAT solver integration using CaDiCaL

use super::Formula;
use crate::error::{PuzzleError, Result};
use cadical::{Callbacks, Solver};
use std::time::{Duration, Instant};

/// In-process SAT solver backed by CaDiCaL
///
/// Every call to [`solve`](SatSolver::solve) builds a fresh CaDiCaL instance
/// that is dropped before returning, so no state leaks between formulas.
#[derive(Debug, Clone, Default)]
pub struct SatSolver {
    timeout: Option<Duration>,
}

/// Result of SAT solving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverSolution {
    /// One signed literal per variable, sign = truth value
    pub literals: Vec<i32>,
    pub solve_time: Duration,
}

/// Configuration options for the SAT solver
#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    pub timeout: Option<Duration>,
}

/// Terminates the search once the time limit has passed
struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    fn new(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    fn expired(&self) -> bool {
        self.started.elapsed() >= self.limit
    }
}

impl Callbacks for Deadline {
    fn started(&mut self) {
        self.started = Instant::now();
    }

    fn terminate(&mut self) -> bool {
        self.expired()
    }
}

impl SatSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Set solving timeout
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Set solver configuration options
    pub fn configure(&mut self, options: &SolverOptions) {
        self.timeout = options.timeout;
    }

    /// Solve `formula`, returning the model if it is satisfiable
    pub fn solve(&self, formula: &Formula) -> Result<Option<SolverSolution>> {
        let mut solver: Solver<Deadline> = Solver::new();
        if let Some(limit) = self.timeout {
            solver.set_callbacks(Some(Deadline::new(limit)));
        }

        for clause in formula.clauses() {
            solver.add_clause(clause.literals().iter().copied());
        }

        let start_time = Instant::now();
        let result = solver.solve();
        let solve_time = start_time.elapsed();
        tracing::debug!(?result, ?solve_time, "cadical finished");

        match result {
            Some(true) => {
                let literals = (1..=formula.variable_count() as i32)
                    .map(|var| match solver.value(var) {
                        Some(true) => var,
                        _ => -var,
                    })
                    .collect();
                Ok(Some(SolverSolution {
                    literals,
                    solve_time,
                }))
            }
            Some(false) => Ok(None),
            // only the deadline callback interrupts the search
            None => match self.timeout {
                Some(limit) => Err(PuzzleError::SolverTimeout(limit)),
                _ => Err(PuzzleError::MalformedSolverOutput(
                    "cadical returned no verdict".to_string(),
                )),
            },
        }
    }
}

impl SolverSolution {
    /// Literals assigned true
    pub fn true_literals(&self) -> impl Iterator<Item = i32> + '_ {
        self.literals.iter().copied().filter(|&literal| literal > 0)
    }
}

impl std::fmt::Display for SolverSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solution:")?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        writeln!(f, "  Variables assigned: {}", self.literals.len())?;

        write!(f, "  Sample assignments: ")?;
        for (i, literal) in self.literals.iter().take(10).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", literal)?;
        }
        if self.literals.len() > 10 {
            write!(f, ", ...")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::{Clause, LiteralIndex};

    fn formula_from(clauses: &[&[(usize, usize, bool)]]) -> Formula {
        let index = LiteralIndex::square(2).unwrap();
        let mut formula = Formula::new(index);
        for spec in clauses {
            let mut clause = Clause::new(index);
            for &(row, col, polarity) in spec.iter() {
                if polarity {
                    clause.add_positive(row, col).unwrap();
                } else {
                    clause.add_negative(row, col).unwrap();
                }
            }
            formula.push(clause);
        }
        formula
    }

    #[test]
    fn test_simple_satisfiable() {
        // (x1 ∨ x2) ∧ (¬x1 ∨ x2)
        let formula = formula_from(&[
            &[(0, 0, true), (0, 1, true)],
            &[(0, 0, false), (0, 1, true)],
        ]);

        let solution = SatSolver::new().solve(&formula).unwrap().unwrap();

        assert_eq!(solution.literals.len(), 4);
        assert!(solution.literals.contains(&2));
        assert!(formula.is_satisfied_by(&solution.literals));
    }

    #[test]
    fn test_unsatisfiable() {
        let formula = formula_from(&[&[(1, 1, true)], &[(1, 1, false)]]);

        assert!(SatSolver::new().solve(&formula).unwrap().is_none());
    }

    #[test]
    fn test_every_variable_is_reported() {
        let formula = formula_from(&[&[(0, 0, true)]]);

        let solution = SatSolver::new().solve(&formula).unwrap().unwrap();
        assert_eq!(solution.literals.len(), 4);
        assert_eq!(solution.literals[0], 1);
        assert!(solution.true_literals().all(|literal| literal > 0));
    }

    #[test]
    fn test_timeout_option() {
        let mut solver = SatSolver::new();
        solver.configure(&SolverOptions {
            timeout: Some(Duration::from_secs(10)),
        });

        let formula = formula_from(&[&[(0, 0, true), (1, 1, false)]]);
        assert!(solver.solve(&formula).unwrap().is_some());
    }

    /// `pigeons` pigeons into `pigeons - 1` holes; UNSAT and exponential for CDCL
    fn pigeonhole(pigeons: usize) -> Formula {
        let holes = pigeons - 1;
        let index = LiteralIndex::new(pigeons, holes).unwrap();
        let mut formula = Formula::new(index);

        for pigeon in 0..pigeons {
            let mut clause = Clause::new(index);
            for hole in 0..holes {
                clause.add_positive(pigeon, hole).unwrap();
            }
            formula.push(clause);
        }
        for hole in 0..holes {
            for a in 0..pigeons {
                for b in a + 1..pigeons {
                    let mut clause = Clause::new(index);
                    clause.add_negative(a, hole).unwrap();
                    clause.add_negative(b, hole).unwrap();
                    formula.push(clause);
                }
            }
        }
        formula
    }

    #[test]
    fn test_small_pigeonhole_is_unsat() {
        assert!(SatSolver::new().solve(&pigeonhole(4)).unwrap().is_none());
    }

    #[test]
    fn test_timeout_stops_hard_formula() {
        let limit = Duration::from_millis(100);
        let mut solver = SatSolver::new();
        solver.set_timeout(limit);

        let start = Instant::now();
        let err = solver.solve(&pigeonhole(14)).unwrap_err();
        assert!(matches!(err, PuzzleError::SolverTimeout(l) if l == limit));
        assert!(start.elapsed() < Duration::from_secs(30));
    }
}
