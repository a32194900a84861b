//! End-to-end pipeline for one amazons instance

use super::{Board, EncodingStatistics, Instance, PlacementCompiler, SolutionVerifier, VerificationReport};
use crate::config::Settings;
use crate::sat::{Formula, UnifiedSatSolver};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};

/// An amazons instance together with the settings used to solve it
pub struct AmazonsProblem {
    settings: Settings,
    instance: Instance,
}

/// What one solve produced
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum AmazonsOutcome {
    Unsatisfiable {
        #[serde(skip)]
        statistics: EncodingStatistics,
    },
    Satisfiable {
        board: Board,
        report: VerificationReport,
        #[serde(skip)]
        statistics: EncodingStatistics,
        #[serde(skip)]
        solve_time: Duration,
    },
}

impl AmazonsProblem {
    pub fn new(settings: Settings, instance: Instance) -> Self {
        Self { settings, instance }
    }

    /// Create a problem from an instance file
    pub fn from_file(settings: Settings, path: &Path) -> Result<Self> {
        let instance = Instance::from_file(path)
            .with_context(|| format!("Failed to load instance {}", path.display()))?;
        Ok(Self::new(settings, instance))
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Compile the instance without solving it
    pub fn compile(&self) -> Result<(Formula, EncodingStatistics)> {
        let compiler =
            PlacementCompiler::from_instance(&self.instance, self.settings.encoding.threat_encoding)
                .context("Invalid amazons instance")?;
        compiler
            .compile_with_statistics()
            .context("Failed to generate SAT constraints")
    }

    /// Compile, solve, decode and verify
    pub fn solve(&self) -> Result<AmazonsOutcome> {
        tracing::info!(
            size = self.instance.size,
            placed = self.instance.placed.len(),
            encoding = ?self.settings.encoding.threat_encoding,
            "solving amazons instance"
        );

        let (formula, statistics) = self.compile()?;
        tracing::info!(
            variables = formula.variable_count(),
            clauses = formula.clause_count(),
            "generated constraints"
        );

        let solver = UnifiedSatSolver::from_config(&self.settings.solver);
        let start_time = Instant::now();
        let solution = solver.solve(&formula).context("SAT solving failed")?;
        let solve_time = start_time.elapsed();

        let Some(solution) = solution else {
            tracing::info!(?solve_time, "instance is unsatisfiable");
            return Ok(AmazonsOutcome::Unsatisfiable { statistics });
        };

        let board = Board::from_assignment(self.instance.size, &solution.literals)
            .context("Failed to decode solver assignment")?;
        let report = SolutionVerifier::new().verify(&board, &self.instance.placed);
        tracing::info!(?solve_time, valid = report.is_valid, "instance solved");

        Ok(AmazonsOutcome::Satisfiable {
            board,
            report,
            statistics,
            solve_time,
        })
    }
}

impl AmazonsOutcome {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, AmazonsOutcome::Satisfiable { .. })
    }

    pub fn statistics(&self) -> &EncodingStatistics {
        match self {
            AmazonsOutcome::Unsatisfiable { statistics }
            | AmazonsOutcome::Satisfiable { statistics, .. } => statistics,
        }
    }
}
