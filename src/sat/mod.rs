//! SAT encoding building blocks and solver backends

pub mod clause;
pub mod decoder;
pub mod external;
pub mod formula;
pub mod solver;
pub mod solver_factory;
pub mod variables;

pub use clause::Clause;
pub use external::ExternalSolver;
pub use formula::Formula;
pub use solver::{SatSolver, SolverOptions, SolverSolution};
pub use solver_factory::UnifiedSatSolver;
pub use variables::LiteralIndex;
