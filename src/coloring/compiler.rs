//! Constraint generation for graph coloring over the variables `C_node_color`

use super::Graph;
use crate::error::Result;
use crate::sat::{Clause, Formula, LiteralIndex};
use itertools::Itertools;

const VAR_NAME: &str = "C";

/// Compiles a graph and color count into CNF
///
/// Every node gets exactly one color and no edge joins two nodes of the same
/// color. Variables are indexed by (dense node position, color).
#[derive(Debug, Clone)]
pub struct ColoringCompiler {
    node_count: usize,
    colors: usize,
    edges: Vec<(usize, usize)>,
    index: LiteralIndex,
}

impl ColoringCompiler {
    /// Resolve the graph's edges, failing on endpoints outside the node set
    pub fn new(graph: &Graph) -> Result<Self> {
        let edges = graph.positioned_edges()?;
        Ok(Self {
            node_count: graph.node_count(),
            colors: graph.colors,
            edges,
            index: LiteralIndex::new(graph.node_count(), graph.colors)?,
        })
    }

    pub fn index(&self) -> LiteralIndex {
        self.index
    }

    pub fn compile(&self) -> Result<Formula> {
        let mut formula = Formula::new(self.index);
        formula.extend(self.at_least_one_clauses()?);
        formula.extend(self.at_most_one_clauses()?);
        formula.extend(self.edge_clauses()?);

        tracing::debug!(
            nodes = self.node_count,
            edges = self.edges.len(),
            colors = self.colors,
            clauses = formula.clause_count(),
            "compiled coloring instance"
        );
        Ok(formula)
    }

    /// One clause per node listing all its colors; empty when there are none
    pub fn at_least_one_clauses(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(self.node_count);
        for node in 0..self.node_count {
            let mut clause = Clause::with_name(self.index, VAR_NAME);
            for color in 0..self.colors {
                clause.add_positive(node, color)?;
            }
            clauses.push(clause);
        }
        Ok(clauses)
    }

    /// `¬(n,a) ∨ ¬(n,b)` for every node and unordered color pair
    pub fn at_most_one_clauses(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for node in 0..self.node_count {
            for (a, b) in (0..self.colors).tuple_combinations() {
                let mut clause = Clause::with_name(self.index, VAR_NAME);
                clause.add_negative(node, a)?.add_negative(node, b)?;
                clauses.push(clause);
            }
        }
        Ok(clauses)
    }

    /// `¬(u,c) ∨ ¬(v,c)` for every edge and color
    pub fn edge_clauses(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(self.edges.len() * self.colors);
        for &(u, v) in &self.edges {
            for color in 0..self.colors {
                let mut clause = Clause::with_name(self.index, VAR_NAME);
                clause.add_negative(u, color)?.add_negative(v, color)?;
                clauses.push(clause);
            }
        }
        Ok(clauses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;
    use crate::sat::SatSolver;

    #[test]
    fn test_clause_counts_for_sample() {
        let compiler = ColoringCompiler::new(&Graph::sample()).unwrap();

        assert_eq!(compiler.at_least_one_clauses().unwrap().len(), 5);
        assert_eq!(compiler.at_most_one_clauses().unwrap().len(), 5 * 3);
        assert_eq!(compiler.edge_clauses().unwrap().len(), 5 * 3);
        assert_eq!(compiler.compile().unwrap().variable_count(), 15);
    }

    #[test]
    fn test_clause_shapes() {
        let compiler = ColoringCompiler::new(&Graph::new(0..2, vec![(0, 1)], 2)).unwrap();

        let rendered: Vec<String> = compiler
            .compile()
            .unwrap()
            .clauses()
            .iter()
            .map(Clause::render)
            .collect();
        assert_eq!(
            rendered,
            vec![
                "C_0_0 or C_0_1",
                "C_1_0 or C_1_1",
                "~C_0_0 or ~C_0_1",
                "~C_1_0 or ~C_1_1",
                "~C_0_0 or ~C_1_0",
                "~C_0_1 or ~C_1_1",
            ]
        );
    }

    #[test]
    fn test_sample_satisfiable_with_three_colors() {
        let formula = ColoringCompiler::new(&Graph::sample()).unwrap().compile().unwrap();
        let solution = SatSolver::new().solve(&formula).unwrap();
        assert!(solution.is_some());
        assert!(formula.is_satisfied_by(&solution.unwrap().literals));
    }

    #[test]
    fn test_sample_unsat_with_one_color() {
        let graph = Graph::sample().with_colors(1);
        let formula = ColoringCompiler::new(&graph).unwrap().compile().unwrap();
        assert!(SatSolver::new().solve(&formula).unwrap().is_none());
    }

    #[test]
    fn test_zero_colors_gives_empty_clauses() {
        let graph = Graph::sample().with_colors(0);
        let formula = ColoringCompiler::new(&graph).unwrap().compile().unwrap();

        assert_eq!(formula.variable_count(), 0);
        assert_eq!(formula.clause_count(), 5);
        assert!(formula.has_empty_clause());
    }

    #[test]
    fn test_unknown_node() {
        let graph = Graph::new(0..3, vec![(0, 5)], 3);
        assert!(matches!(
            ColoringCompiler::new(&graph),
            Err(PuzzleError::UnknownNode { node: 5 })
        ));
    }

    #[test]
    fn test_huge_color_count_is_rejected() {
        let graph = Graph::new(0..2, vec![(0, 1)], 1 << 31);
        assert!(matches!(
            ColoringCompiler::new(&graph),
            Err(PuzzleError::VariableSpaceTooLarge { .. })
        ));
    }
}
