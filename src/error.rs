//! Error types shared by the compilers, the solver adapters and the decoders

use std::time::Duration;
use thiserror::Error;

/// Errors raised by the compile → solve → decode pipeline.
///
/// Verification failures are not represented here; they are reported through
/// [`crate::amazons::VerificationReport`] instead.
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error(
        "coordinate ({primary}, {secondary}) out of bounds for {primary_extent}x{secondary_extent} variable space"
    )]
    OutOfBounds {
        primary: usize,
        secondary: usize,
        primary_extent: usize,
        secondary_extent: usize,
    },

    #[error(
        "{primary_extent}x{secondary_extent} variable space exceeds the DIMACS literal range"
    )]
    VariableSpaceTooLarge {
        primary_extent: usize,
        secondary_extent: usize,
    },

    #[error("literal {literal} does not name a variable (variable count: {variable_count})")]
    LiteralOutOfRange { literal: i32, variable_count: usize },

    #[error("piece placed twice at row {row}, column {col}")]
    DuplicatePlacement { row: usize, col: usize },

    #[error("edge references node {node} which is not in the node set")]
    UnknownNode { node: usize },

    #[error("invalid instance at line {line}: {message}")]
    InvalidInstance { line: usize, message: String },

    #[error("SAT solver '{binary}' is unavailable: {reason}")]
    SolverUnavailable { binary: String, reason: String },

    #[error("malformed solver output: {0}")]
    MalformedSolverOutput(String),

    #[error("SAT solver exceeded its time limit of {0:?}")]
    SolverTimeout(Duration),

    #[error("inconsistent assignment: {0}")]
    InconsistentAssignment(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
