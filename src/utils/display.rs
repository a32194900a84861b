//! Display and output formatting utilities

use crate::amazons::{AmazonsOutcome, Board, Position};
use crate::coloring::{ColoringOutcome, Graph};
use crate::config::OutputFormat;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Format outcomes for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format an amazons outcome for console output
    pub fn format_amazons(outcome: &AmazonsOutcome, show_statistics: bool) -> String {
        let mut output = String::new();

        match outcome {
            AmazonsOutcome::Unsatisfiable { .. } => output.push_str("Verdict: UNSAT\n"),
            AmazonsOutcome::Satisfiable {
                board,
                report,
                solve_time,
                ..
            } => {
                output.push_str("Verdict: SAT\n");
                output.push_str(&format!("Solve Time: {:.3}s\n", solve_time.as_secs_f64()));
                output.push_str(&format!("Amazons: {}\n\n", board.piece_count()));
                output.push_str(&Self::format_board_with_coords(board));
                output.push('\n');
                output.push_str(&report.to_string());
            }
        }

        if show_statistics {
            output.push('\n');
            output.push_str(&outcome.statistics().to_string());
        }

        output
    }

    /// Format a coloring outcome for console output
    pub fn format_coloring(graph: &Graph, outcome: &ColoringOutcome) -> String {
        let mut output = String::new();

        match outcome {
            ColoringOutcome::Unsatisfiable => {
                output.push_str(&format!("Verdict: UNSAT with {} colors\n", graph.colors));
            }
            ColoringOutcome::Satisfiable {
                coloring,
                report,
                solve_time,
            } => {
                output.push_str("Verdict: SAT\n");
                output.push_str(&format!("Solve Time: {:.3}s\n\n", solve_time.as_secs_f64()));
                output.push_str("Node | Color\n");
                output.push_str("-----|------\n");
                for &node in &graph.nodes {
                    let color = coloring
                        .color_of(node)
                        .map_or_else(|| "-".to_string(), |color| color.to_string());
                    output.push_str(&format!("{:4} | {}\n", node, color));
                }
                output.push('\n');
                output.push_str(&report.to_string());
            }
        }

        output
    }

    /// Format a board with coordinates
    pub fn format_board_with_coords(board: &Board) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..board.size {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..board.size {
            output.push_str(&format!("{:2} ", row));
            for col in 0..board.size {
                output.push_str(if board.get(Position::new(row, col)) { " ♛" } else { " ·" });
            }
            output.push('\n');
        }

        output
    }

    /// Save an amazons outcome under `output_dir` as `<name>.txt` or `<name>.json`
    pub fn save_amazons<P: AsRef<Path>>(
        outcome: &AmazonsOutcome,
        output_dir: P,
        name: &str,
        format: &OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        let path = match format {
            OutputFormat::Text => {
                let path = output_dir.join(format!("{}.txt", name));
                let content = match outcome {
                    AmazonsOutcome::Satisfiable { board, .. } => board.to_text(),
                    AmazonsOutcome::Unsatisfiable { .. } => "UNSAT\n".to_string(),
                };
                std::fs::write(&path, content)?;
                path
            }
            OutputFormat::Json => {
                let path = output_dir.join(format!("{}.json", name));
                std::fs::write(&path, serde_json::to_string_pretty(outcome)?)?;
                path
            }
        };

        Ok(path)
    }

    /// Save a coloring outcome under `output_dir`
    pub fn save_coloring<P: AsRef<Path>>(
        outcome: &ColoringOutcome,
        output_dir: P,
        name: &str,
        format: &OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        let path = match format {
            OutputFormat::Text => {
                let path = output_dir.join(format!("{}.txt", name));
                let content = match outcome {
                    ColoringOutcome::Satisfiable { coloring, .. } => coloring.to_string(),
                    ColoringOutcome::Unsatisfiable => "UNSAT\n".to_string(),
                };
                std::fs::write(&path, content)?;
                path
            }
            OutputFormat::Json => {
                let path = output_dir.join(format!("{}.json", name));
                std::fs::write(&path, serde_json::to_string_pretty(outcome)?)?;
                path
            }
        };

        Ok(path)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amazons::{AmazonsProblem, Instance};
    use crate::coloring::ColoringProblem;
    use crate::config::{Settings, ThreatEncoding};
    use tempfile::tempdir;

    fn solved_five() -> AmazonsOutcome {
        let mut settings = Settings::default();
        settings.encoding.threat_encoding = ThreatEncoding::Pairwise;
        AmazonsProblem::new(settings, Instance::new(5, vec![]))
            .solve()
            .unwrap()
    }

    #[test]
    fn test_board_formatting() {
        let board = Board::parse("010\n000\n001\n").unwrap();
        let with_coords = SolutionFormatter::format_board_with_coords(&board);

        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 0  · ♛ ·"));
        assert_eq!(with_coords.lines().count(), 4);
    }

    #[test]
    fn test_amazons_formatting() {
        let text = SolutionFormatter::format_amazons(&solved_five(), true);
        assert!(text.contains("Verdict: SAT"));
        assert!(text.contains("VALID"));
        assert!(text.contains("Encoding Statistics"));
    }

    #[test]
    fn test_save_amazons_json_and_text() {
        let temp_dir = tempdir().unwrap();
        let outcome = solved_five();

        let json_path =
            SolutionFormatter::save_amazons(&outcome, temp_dir.path(), "five", &OutputFormat::Json)
                .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
        assert_eq!(json["verdict"], "satisfiable");
        assert_eq!(json["report"]["is_valid"], true);

        let text_path =
            SolutionFormatter::save_amazons(&outcome, temp_dir.path(), "five", &OutputFormat::Text)
                .unwrap();
        let board = Board::from_file(text_path).unwrap();
        assert_eq!(board.piece_count(), 5);
    }

    #[test]
    fn test_coloring_formatting_and_saving() {
        let graph = Graph::sample();
        let outcome = ColoringProblem::new(Settings::default(), graph.clone())
            .solve()
            .unwrap();

        let text = SolutionFormatter::format_coloring(&graph, &outcome);
        assert!(text.contains("Node | Color"));

        let temp_dir = tempdir().unwrap();
        let path =
            SolutionFormatter::save_coloring(&outcome, temp_dir.path(), "sample", &OutputFormat::Json)
                .unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains("\"coloring\""));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
