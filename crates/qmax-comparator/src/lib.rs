//! qmax-comparator - Reversible bit-serial comparator for signed integers
//!
//! This crate provides functionality to:
//! - Encode two signed integers into per-bit qubit triples
//! - Build a comparator circuit from X / CNOT / Toffoli gates
//! - Simulate the circuit and return the larger of the two numbers
//! - Draw, export (OpenQASM 2.0) and persist circuits

pub mod constants;
pub mod config;
pub mod domain;
pub mod infra;
pub mod app;

// Re-export commonly used types
pub use app::compare::{
    ComparatorError, ComparisonOutcome, find_the_largest_number, find_the_largest_number_with,
    less_than, run_comparison,
};
pub use app::verify::{VerificationReport, verify_exhaustive};
pub use config::{ComparatorConfig, ConfigError, EncodingMode};
pub use constants::*;
pub use domain::circuit::{Circuit, CircuitError};
pub use domain::comparator::{ComparatorCircuit, build_comparator};
pub use domain::encoding::{BitPair, encode_operands};
pub use domain::simulator::{Counts, Simulator};
