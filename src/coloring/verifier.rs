//! Independent checks for decoded colorings

use super::{Coloring, Graph};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColoringViolation {
    Uncolored { node: usize },
    ColorOutOfRange { node: usize, color: usize, colors: usize },
    UnknownNode { node: usize },
    EdgeConflict { first: usize, second: usize, color: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoringReport {
    pub is_valid: bool,
    pub violations: Vec<ColoringViolation>,
}

/// Validates a coloring against the graph it was computed for
#[derive(Debug, Clone, Default)]
pub struct ColoringVerifier;

impl ColoringVerifier {
    pub fn new() -> Self {
        Self
    }

    pub fn verify(&self, graph: &Graph, coloring: &Coloring) -> ColoringReport {
        let mut violations = Vec::new();

        for &node in &graph.nodes {
            match coloring.color_of(node) {
                None => violations.push(ColoringViolation::Uncolored { node }),
                Some(color) if color >= graph.colors => {
                    violations.push(ColoringViolation::ColorOutOfRange {
                        node,
                        color,
                        colors: graph.colors,
                    })
                }
                Some(_) => {}
            }
        }

        violations.extend(
            coloring
                .colors
                .keys()
                .copied()
                .filter(|node| !graph.nodes.contains(node))
                .map(|node| ColoringViolation::UnknownNode { node }),
        );

        for &(first, second) in &graph.edges {
            if let (Some(a), Some(b)) = (coloring.color_of(first), coloring.color_of(second)) {
                if a == b {
                    violations.push(ColoringViolation::EdgeConflict {
                        first,
                        second,
                        color: a,
                    });
                }
            }
        }

        if !violations.is_empty() {
            tracing::warn!(violations = violations.len(), "coloring failed verification");
        }

        ColoringReport {
            is_valid: violations.is_empty(),
            violations,
        }
    }
}

impl fmt::Display for ColoringViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColoringViolation::Uncolored { node } => write!(f, "Node {} has no color", node),
            ColoringViolation::ColorOutOfRange { node, color, colors } => write!(
                f,
                "Node {} has color {}, only {} colors are available",
                node, color, colors
            ),
            ColoringViolation::UnknownNode { node } => {
                write!(f, "Node {} is colored but not part of the graph", node)
            }
            ColoringViolation::EdgeConflict {
                first,
                second,
                color,
            } => write!(f, "Adjacent nodes {} and {} share color {}", first, second, color),
        }
    }
}

impl fmt::Display for ColoringReport {
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
