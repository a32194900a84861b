//! Factory for creating SAT solver instances based on configuration

use super::external::ExternalSolver;
use super::solver::{SatSolver, SolverOptions, SolverSolution};
use super::Formula;
use crate::config::{SolverBackend, SolverConfig};
use crate::error::Result;
use std::time::Duration;

/// Unified SAT solver interface that can use different backends
#[derive(Debug, Clone)]
pub enum UnifiedSatSolver {
    Cadical(SatSolver),
    External(ExternalSolver),
}

impl UnifiedSatSolver {
    /// Create a solver from the `solver` configuration section
    pub fn from_config(config: &SolverConfig) -> Self {
        let timeout = match config.timeout_seconds {
            0 => None,
            seconds => Some(Duration::from_secs(seconds)),
        };

        match config.backend {
            SolverBackend::Cadical => {
                let mut solver = SatSolver::new();
                solver.configure(&SolverOptions { timeout });
                UnifiedSatSolver::Cadical(solver)
            }
            SolverBackend::External => {
                let mut solver = ExternalSolver::new(&config.binary, config.output_convention);
                if let Some(timeout) = timeout {
                    solver.set_timeout(timeout);
                }
                UnifiedSatSolver::External(solver)
            }
        }
    }

    /// Solve `formula`, returning the model if it is satisfiable
    ///
    /// Formulas holding an empty clause are reported UNSAT without starting
    /// a backend.
    pub fn solve(&self, formula: &Formula) -> Result<Option<SolverSolution>> {
        if formula.has_empty_clause() {
            tracing::debug!("formula contains an empty clause, skipping the solver");
            return Ok(None);
        }

        match self {
            UnifiedSatSolver::Cadical(solver) => solver.solve(formula),
            UnifiedSatSolver::External(solver) => solver.solve(formula),
        }
    }

    /// Get the backend type being used
    pub fn backend(&self) -> SolverBackend {
        match self {
            UnifiedSatSolver::Cadical(_) => SolverBackend::Cadical,
            UnifiedSatSolver::External(_) => SolverBackend::External,
        }
    }
}

impl Default for UnifiedSatSolver {
    fn default() -> Self {
        UnifiedSatSolver::Cadical(SatSolver::new())
    }
}
