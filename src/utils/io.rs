//! Example input files written by the `setup` command

use crate::amazons::{Board, Instance, Position};
use crate::coloring::Graph;
use anyhow::{Context, Result};
use std::path::Path;

/// Write example instances, a solved board and the sample graph into `output_dir`
pub fn create_example_files<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // 10x10 with two pre-placed amazons
    let ten = Instance::new(10, vec![Position::new(0, 1), Position::new(5, 0)]);
    ten.to_file(dir.join("amazons_10.txt"))
        .context("Failed to write amazons_10.txt")?;

    let five = Instance::new(5, vec![Position::new(0, 0)]);
    five.to_file(dir.join("amazons_5.txt"))
        .context("Failed to write amazons_5.txt")?;

    // A verified solution of amazons_10.txt, for the verify command
    let columns = [1, 3, 5, 7, 9, 0, 2, 4, 6, 8];
    let pieces: Vec<Position> = columns
        .iter()
        .enumerate()
        .map(|(row, &col)| Position::new(row, col))
        .collect();
    let board = Board::with_pieces(10, &pieces)?;
    std::fs::write(dir.join("amazons_10_solution.txt"), board.to_text())
        .context("Failed to write amazons_10_solution.txt")?;

    Graph::sample()
        .to_file(&dir.join("sample_graph.yaml"))
        .context("Failed to write sample_graph.yaml")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amazons::SolutionVerifier;
    use tempfile::tempdir;

    #[test]
    fn test_create_example_files() {
        let temp_dir = tempdir().unwrap();
        create_example_files(temp_dir.path()).unwrap();

        let instance = Instance::from_file(temp_dir.path().join("amazons_10.txt")).unwrap();
        assert_eq!(instance.size, 10);
        assert_eq!(instance.placed.len(), 2);

        let board = Board::from_file(temp_dir.path().join("amazons_10_solution.txt")).unwrap();
        let report = SolutionVerifier::new().verify(&board, &instance.placed);
        assert!(report.is_valid, "{}", report);

        let graph = Graph::from_file(&temp_dir.path().join("sample_graph.yaml")).unwrap();
        assert_eq!(graph, Graph::sample());
    }
}
