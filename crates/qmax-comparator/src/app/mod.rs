//! Application layer - Use case implementations
//!
//! This module coordinates the domain layer to implement use cases.

pub mod compare;
pub mod verify;
