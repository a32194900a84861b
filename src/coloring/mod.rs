//! Graph coloring with a fixed number of colors

pub mod compiler;
pub mod graph;
pub mod problem;
pub mod solution;
pub mod verifier;

pub use compiler::ColoringCompiler;
pub use graph::Graph;
pub use problem::{ColoringOutcome, ColoringProblem};
pub use solution::Coloring;
pub use verifier::{ColoringReport, ColoringVerifier, ColoringViolation};
