//! # Tracer Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Floor-plan fixtures drawn as ASCII
//! - Reference shortest-path baseline
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod baseline;
pub mod fixtures;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
