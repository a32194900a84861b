//! Amazons instance files
//!
//! Line 1 holds `<size> <forced_count>`, followed by `forced_count` lines of
//! `<column> <row>` giving the pre-placed amazons. Note the column-first order.

use super::Position;
use crate::error::{PuzzleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Board size and pre-placed amazons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub size: usize,
    pub placed: Vec<Position>,
}

impl Instance {
    pub fn new(size: usize, placed: Vec<Position>) -> Self {
        Self { size, placed }
    }

    /// Load an instance from a text file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Save the instance in the same text format
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_string())?;
        Ok(())
    }
}

fn parse_numbers(line: &str, line_number: usize, expected: usize) -> Result<Vec<usize>> {
    let numbers = line
        .split_whitespace()
        .map(|token| {
            token.parse::<usize>().map_err(|_| PuzzleError::InvalidInstance {
                line: line_number,
                message: format!("'{}' is not a non-negative integer", token),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if numbers.len() != expected {
        return Err(PuzzleError::InvalidInstance {
            line: line_number,
            message: format!("expected {} numbers, found {}", expected, numbers.len()),
        });
    }
    Ok(numbers)
}

impl std::str::FromStr for Instance {
    type Err = PuzzleError;

    fn from_str(content: &str) -> Result<Self> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (header_line, header) = lines.next().ok_or_else(|| PuzzleError::InvalidInstance {
            line: 1,
            message: "missing '<size> <forced_count>' header".to_string(),
        })?;
        let header = parse_numbers(header, header_line, 2)?;
        let (size, forced_count) = (header[0], header[1]);

        let mut placed = Vec::with_capacity(forced_count);
        for _ in 0..forced_count {
            let (line_number, line) = lines.next().ok_or_else(|| PuzzleError::InvalidInstance {
                line: header_line + placed.len() + 1,
                message: format!(
                    "expected {} pre-placed amazons, found {}",
                    forced_count,
                    placed.len()
                ),
            })?;
            let coords = parse_numbers(line, line_number, 2)?;
            placed.push(Position::new(coords[1], coords[0]));
        }

        if let Some((line_number, _)) = lines.next() {
            return Err(PuzzleError::InvalidInstance {
                line: line_number,
                message: "unexpected content after the pre-placed amazons".to_string(),
            });
        }

        Ok(Self { size, placed })
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.size, self.placed.len())?;
        for position in &self.placed {
            writeln!(f, "{} {}", position.col, position.row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_column_first() {
        let instance: Instance = "8 2\n1 3\n0 5\n".parse().unwrap();

        assert_eq!(instance.size, 8);
        assert_eq!(instance.placed, vec![Position::new(3, 1), Position::new(5, 0)]);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let instance: Instance = "\n4 1\n\n  2 0  \n\n".parse().unwrap();
        assert_eq!(instance.placed, vec![Position::new(0, 2)]);
    }

    #[test]
    fn test_no_forced_amazons() {
        let instance: Instance = "10 0\n".parse().unwrap();
        assert_eq!(instance.size, 10);
        assert!(instance.placed.is_empty());
    }

    #[test]
    fn test_malformed_instances() {
        assert!(matches!(
            "".parse::<Instance>(),
            Err(PuzzleError::InvalidInstance { line: 1, .. })
        ));
        assert!(matches!(
            "4 x\n".parse::<Instance>(),
            Err(PuzzleError::InvalidInstance { line: 1, .. })
        ));
        assert!(matches!(
            "4 2\n0 0\n".parse::<Instance>(),
            Err(PuzzleError::InvalidInstance { .. })
        ));
        assert!(matches!(
            "4 1\n0 0 1\n".parse::<Instance>(),
            Err(PuzzleError::InvalidInstance { line: 2, .. })
        ));
        assert!(matches!(
            "4 1\n0 0\n1 1\n".parse::<Instance>(),
            Err(PuzzleError::InvalidInstance { line: 3, .. })
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("instances/small.txt");

        let instance = Instance::new(6, vec![Position::new(2, 4), Position::new(0, 1)]);
        instance.to_file(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "6 2\n4 2\n1 0\n");
        assert_eq!(Instance::from_file(&path).unwrap(), instance);
    }
}
