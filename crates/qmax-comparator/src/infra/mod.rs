//! Infrastructure layer - I/O and external dependencies
//!
//! This module handles circuit file operations.

pub mod circuit_io;
