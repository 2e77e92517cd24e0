//! Domain layer - Pure computational logic
//!
//! This module contains the circuit model, the comparator construction and
//! the simulator, without I/O dependencies.

pub mod circuit;
pub mod circuit_format;
pub mod comparator;
pub mod draw;
pub mod encoding;
pub mod gate;
pub mod qasm;
pub mod simulator;
