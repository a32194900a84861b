//! Console formatting and example files

pub mod display;
pub mod io;

pub use display::{Color, ColorOutput, SolutionFormatter};
pub use io::create_example_files;
