//! Decoded node colorings

use super::Graph;
use crate::error::{PuzzleError, Result};
use crate::sat::{decoder, LiteralIndex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Color assigned to each node label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coloring {
    pub colors: BTreeMap<usize, usize>,
}

impl Coloring {
    pub fn new(colors: BTreeMap<usize, usize>) -> Self {
        Self { colors }
    }

    /// Decode a solver assignment over the `(node, color)` variables of `graph`
    ///
    /// A node holding two colors is an [`PuzzleError::InconsistentAssignment`].
    /// Nodes without a positive literal stay uncolored.
    pub fn from_assignment(graph: &Graph, colors: usize, literals: &[i32]) -> Result<Self> {
        let index = LiteralIndex::new(graph.node_count(), colors)?;
        let labels = graph.labels();
        let mut coloring = BTreeMap::new();

        for (position, color) in decoder::true_coordinates(&index, literals)? {
            let node = *labels.get(position).ok_or(PuzzleError::OutOfBounds {
                primary: position,
                secondary: color,
                primary_extent: graph.node_count(),
                secondary_extent: colors,
            })?;
            if let Some(previous) = coloring.insert(node, color) {
                return Err(PuzzleError::InconsistentAssignment(format!(
                    "node {} assigned colors {} and {}",
                    node, previous, color
                )));
            }
        }

        Ok(Self { colors: coloring })
    }

    /// One literal per `(node, color)` variable, positive where assigned
    pub fn to_assignment(&self, graph: &Graph, colors: usize) -> Result<Vec<i32>> {
        let positions = graph.positions();
        let coords = self
            .colors
            .iter()
            .map(|(&node, &color)| {
                positions
                    .get(&node)
                    .map(|&position| (position, color))
                    .ok_or(PuzzleError::UnknownNode { node })
            })
            .collect::<Result<Vec<_>>>()?;
        decoder::assignment_from_coordinates(&LiteralIndex::new(graph.node_count(), colors)?, &coords)
    }

    pub fn color_of(&self, node: usize) -> Option<usize> {
        self.colors.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl fmt::Display for Coloring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, color) in &self.colors {
            writeln!(f, "node {} -> color {}", node, color)?;
        }
        Ok(())
    }
}
