//! End-to-end pipeline for one coloring instance

use super::{Coloring, ColoringCompiler, ColoringReport, ColoringVerifier, Graph};
use crate::config::Settings;
use crate::sat::{Formula, UnifiedSatSolver};
use anyhow::{Context, Result};
use serde::Serialize;
use std::time::{Duration, Instant};

pub struct ColoringProblem {
    settings: Settings,
    graph: Graph,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ColoringOutcome {
    Unsatisfiable,
    Satisfiable {
        coloring: Coloring,
        report: ColoringReport,
        #[serde(skip)]
        solve_time: Duration,
    },
}

impl ColoringProblem {
    pub fn new(settings: Settings, graph: Graph) -> Self {
        Self { settings, graph }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn compile(&self) -> Result<Formula> {
        ColoringCompiler::new(&self.graph)
            .context("Invalid graph")?
            .compile()
            .context("Failed to generate SAT constraints")
    }

    /// Compile, solve, decode and verify
    pub fn solve(&self) -> Result<ColoringOutcome> {
        tracing::info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edges.len(),
            colors = self.graph.colors,
            "solving coloring instance"
        );

        let formula = self.compile()?;
        let solver = UnifiedSatSolver::from_config(&self.settings.solver);

        let start_time = Instant::now();
        let solution = solver.solve(&formula).context("SAT solving failed")?;
        let solve_time = start_time.elapsed();

        let Some(solution) = solution else {
            tracing::info!(?solve_time, "graph is not colorable");
            return Ok(ColoringOutcome::Unsatisfiable);
        };

        let coloring = Coloring::from_assignment(&self.graph, self.graph.colors, &solution.literals)
            .context("Failed to decode solver assignment")?;
        let report = ColoringVerifier::new().verify(&self.graph, &coloring);
        tracing::info!(?solve_time, valid = report.is_valid, "graph colored");

        Ok(ColoringOutcome::Satisfiable {
            coloring,
            report,
            solve_time,
        })
    }
}

impl ColoringOutcome {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, ColoringOutcome::Satisfiable { .. })
    }
}
