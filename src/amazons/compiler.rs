//! Constraint generation for the amazons placement puzzle

use super::{Instance, LeapFamily, Position};
use crate::config::ThreatEncoding;
use crate::error::{PuzzleError, Result};
use crate::sat::{Clause, Formula, LiteralIndex};
use itertools::Itertools;
use std::collections::HashSet;
use std::fmt;

/// Compiles an amazons instance into CNF over the cell variables `X_row_col`
///
/// Pre-placed amazons are always pinned with positive unit clauses.
#[derive(Debug, Clone)]
pub struct PlacementCompiler {
    size: usize,
    placed: Vec<Position>,
    threat_encoding: ThreatEncoding,
    index: LiteralIndex,
}

/// Clause counts per constraint family
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodingStatistics {
    pub variables: usize,
    pub row_coverage: usize,
    pub column_coverage: usize,
    pub pinned: usize,
    pub placed_conflicts: usize,
    pub three_by_two: usize,
    pub four_by_one: usize,
    pub line_exclusions: usize,
}

impl PlacementCompiler {
    /// Create a compiler, rejecting off-board or duplicated pre-placed amazons
    pub fn new(size: usize, placed: &[Position], threat_encoding: ThreatEncoding) -> Result<Self> {
        let index = LiteralIndex::square(size)?;

        let mut seen = HashSet::new();
        for &position in placed {
            index.index(position.row, position.col)?;
            if !seen.insert(position) {
                return Err(PuzzleError::DuplicatePlacement {
                    row: position.row,
                    col: position.col,
                });
            }
        }

        Ok(Self {
            size,
            placed: placed.to_vec(),
            threat_encoding,
            index,
        })
    }

    pub fn from_instance(instance: &Instance, threat_encoding: ThreatEncoding) -> Result<Self> {
        Self::new(instance.size, &instance.placed, threat_encoding)
    }

    pub fn index(&self) -> LiteralIndex {
        self.index
    }

    /// Generate the complete formula
    pub fn compile(&self) -> Result<Formula> {
        Ok(self.compile_with_statistics()?.0)
    }

    /// Generate the complete formula together with per-family clause counts
    pub fn compile_with_statistics(&self) -> Result<(Formula, EncodingStatistics)> {
        let mut formula = Formula::new(self.index);
        let mut stats = EncodingStatistics {
            variables: self.index.variable_count(),
            ..Default::default()
        };

        let rows = self.row_coverage_clauses()?;
        stats.row_coverage = rows.len();
        formula.extend(rows);

        let columns = self.column_coverage_clauses()?;
        stats.column_coverage = columns.len();
        formula.extend(columns);

        let pins = self.placement_clauses()?;
        stats.pinned = pins.len();
        formula.extend(pins);

        let conflicts = self.placed_conflict_clauses()?;
        stats.placed_conflicts = conflicts.len();
        formula.extend(conflicts);

        for family in LeapFamily::ALL {
            let clauses = match self.threat_encoding {
                ThreatEncoding::FixedPieces => self.leap_clauses(family)?,
                ThreatEncoding::Pairwise => self.leap_exclusion_clauses(family)?,
            };
            match family {
                LeapFamily::ThreeByTwo => stats.three_by_two = clauses.len(),
                LeapFamily::FourByOne => stats.four_by_one = clauses.len(),
            }
            formula.extend(clauses);
        }

        if self.threat_encoding == ThreatEncoding::Pairwise {
            let exclusions = self.line_exclusion_clauses()?;
            stats.line_exclusions = exclusions.len();
            formula.extend(exclusions);
        }

        tracing::debug!(
            size = self.size,
            placed = self.placed.len(),
            clauses = formula.clause_count(),
            "compiled amazons instance"
        );
        Ok((formula, stats))
    }

    /// At least one amazon in every row
    pub fn row_coverage_clauses(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(self.size);
        for row in 0..self.size {
            let mut clause = Clause::new(self.index);
            for col in 0..self.size {
                clause.add_positive(row, col)?;
            }
            clauses.push(clause);
        }
        Ok(clauses)
    }

    /// At least one amazon in every column
    pub fn column_coverage_clauses(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(self.size);
        for col in 0..self.size {
            let mut clause = Clause::new(self.index);
            for row in 0..self.size {
                clause.add_positive(row, col)?;
            }
            clauses.push(clause);
        }
        Ok(clauses)
    }

    /// Unit clauses pinning every pre-placed amazon
    pub fn placement_clauses(&self) -> Result<Vec<Clause>> {
        self.placed
            .iter()
            .map(|p| {
                let mut clause = Clause::new(self.index);
                clause.add_positive(p.row, p.col)?;
                Ok(clause)
            })
            .collect()
    }

    /// `¬a ∨ ¬b` for pre-placed pairs sharing a row, column or diagonal
    ///
    /// Together with the pins these make an inconsistent instance UNSAT.
    pub fn placed_conflict_clauses(&self) -> Result<Vec<Clause>> {
        self.placed
            .iter()
            .tuple_combinations()
            .filter(|(a, b)| a.attacks_in_line(**b))
            .map(|(a, b)| self.exclusion(*a, *b))
            .collect()
    }

    /// `¬source ∨ target` for every on-board leap from a pre-placed amazon
    pub fn leap_clauses(&self, family: LeapFamily) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for &source in &self.placed {
            for target in family.targets(source, self.size) {
                let mut clause = Clause::new(self.index);
                clause.add_negative(source.row, source.col)?;
                clause.add_positive(target.row, target.col)?;
                clauses.push(clause);
            }
        }
        Ok(clauses)
    }

    /// `¬a ∨ ¬b` for every pair of cells one leap apart
    pub fn leap_exclusion_clauses(&self, family: LeapFamily) -> Result<Vec<Clause>> {
        self.cells()
            .tuple_combinations()
            .filter(|&(a, b)| family.connects(a, b))
            .map(|(a, b)| self.exclusion(a, b))
            .collect()
    }

    /// `¬a ∨ ¬b` for every pair of cells sharing a row, column or diagonal
    pub fn line_exclusion_clauses(&self) -> Result<Vec<Clause>> {
        self.cells()
            .tuple_combinations()
            .filter(|&(a, b)| a.attacks_in_line(b))
            .map(|(a, b)| self.exclusion(a, b))
            .collect()
    }

    fn cells(&self) -> impl Iterator<Item = Position> + Clone {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    fn exclusion(&self, a: Position, b: Position) -> Result<Clause> {
        let mut clause = Clause::new(self.index);
        clause.add_negative(a.row, a.col)?;
        clause.add_negative(b.row, b.col)?;
        Ok(clause)
    }
}

impl fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Encoding Statistics:")?;
        writeln!(f, "  Variables: {}", self.variables)?;
        writeln!(f, "  Row coverage clauses: {}", self.row_coverage)?;
        writeln!(f, "  Column coverage clauses: {}", self.column_coverage)?;
        writeln!(f, "  Pinned amazons: {}", self.pinned)?;
        writeln!(f, "  Pre-placed conflicts: {}", self.placed_conflicts)?;
        writeln!(f, "  3x2 leap clauses: {}", self.three_by_two)?;
        writeln!(f, "  4x1 leap clauses: {}", self.four_by_one)?;
        if self.line_exclusions > 0 {
            writeln!(f, "  Line exclusion clauses: {}", self.line_exclusions)?;
        }
        Ok(())
    }
}
