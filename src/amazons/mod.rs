//! The amazons placement puzzle
//!
//! An amazon moves like a queen and additionally leaps like a 3x2 or 4x1
//! knight. A solution places one amazon per row and column of an `n x n`
//! board with no two attacking each other.

pub mod board;
pub mod compiler;
pub mod instance;
pub mod problem;
pub mod rules;
pub mod verifier;

pub use board::Board;
pub use compiler::{EncodingStatistics, PlacementCompiler};
pub use instance::Instance;
pub use problem::{AmazonsOutcome, AmazonsProblem};
pub use rules::{LeapFamily, Position};
pub use verifier::{SolutionVerifier, VerificationReport, Violation};
