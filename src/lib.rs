//! Puzzle SAT
//!
//! Compiles the amazons placement puzzle and graph coloring into CNF, solves
//! the formula with a SAT engine, then decodes and independently verifies the
//! result.

pub mod amazons;
pub mod coloring;
pub mod config;
pub mod error;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use error::{PuzzleError, Result};
