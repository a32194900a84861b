//! Configuration management for the puzzle solver

pub mod settings;

pub use settings::{
    CliOverrides, EncodingConfig, OutputConfig, OutputConvention, OutputFormat, Settings,
    SolverBackend, SolverConfig, ThreatEncoding,
};
