//! Undirected graphs for the coloring puzzle

use crate::error::{PuzzleError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Node set, undirected edges and the number of available colors
///
/// Node labels are arbitrary; the literal index uses their position in
/// ascending label order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: BTreeSet<usize>,
    pub edges: Vec<(usize, usize)>,
    #[serde(default = "default_colors")]
    pub colors: usize,
}

fn default_colors() -> usize {
    3
}

impl Graph {
    pub fn new(nodes: impl IntoIterator<Item = usize>, edges: Vec<(usize, usize)>, colors: usize) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            edges,
            colors,
        }
    }

    /// The five-node graph shipped with the solver
    pub fn sample() -> Self {
        Self::new(0..5, vec![(0, 1), (1, 2), (2, 3), (3, 4), (2, 4)], 3)
    }

    /// Load a graph from a YAML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let graph: Graph = serde_yaml::from_str(&content)?;
        Ok(graph)
    }

    /// Save the graph as YAML
    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    pub fn with_colors(mut self, colors: usize) -> Self {
        self.colors = colors;
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Dense position of every node label
    pub fn positions(&self) -> BTreeMap<usize, usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(position, &node)| (node, position))
            .collect()
    }

    /// Node labels indexed by dense position
    pub fn labels(&self) -> Vec<usize> {
        self.nodes.iter().copied().collect()
    }

    /// Edges with both endpoints resolved to dense positions
    pub fn positioned_edges(&self) -> Result<Vec<(usize, usize)>> {
        let positions = self.positions();
        let lookup = |node: usize| {
            positions
                .get(&node)
                .copied()
                .ok_or(PuzzleError::UnknownNode { node })
        };

        self.edges
            .iter()
            .map(|&(u, v)| Ok((lookup(u)?, lookup(v)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sample_graph() {
        let graph = Graph::sample();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edges.len(), 5);
        assert_eq!(graph.colors, 3);
    }

    #[test]
    fn test_sparse_labels_map_to_dense_positions() {
        let graph = Graph::new([40, 7, 12], vec![(7, 40)], 2);

        assert_eq!(graph.positions()[&7], 0);
        assert_eq!(graph.positions()[&12], 1);
        assert_eq!(graph.positions()[&40], 2);
        assert_eq!(graph.labels(), vec![7, 12, 40]);
        assert_eq!(graph.positioned_edges().unwrap(), vec![(0, 2)]);
    }

    #[test]
    fn test_unknown_endpoint() {
        let graph = Graph::new(0..3, vec![(0, 1), (1, 9)], 2);
        assert!(matches!(
            graph.positioned_edges(),
            Err(PuzzleError::UnknownNode { node: 9 })
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("graphs/sample.yaml");

        let graph = Graph::sample();
        graph.to_file(&path).unwrap();
        assert_eq!(Graph::from_file(&path).unwrap(), graph);
    }

    #[test]
    fn test_colors_default_when_missing() {
        let graph: Graph = serde_yaml::from_str("nodes: [1, 2]\nedges: [[1, 2]]\n").unwrap();
        assert_eq!(graph.colors, 3);
        assert_eq!(graph.edges, vec![(1, 2)]);
    }
}
