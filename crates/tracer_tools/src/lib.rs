//! # Market Tracer Tools
//!
//! Command-line tools around the route planner:
//! - Route planning from floor-plan exports
//! - Floor-plan validation
//! - ASCII overview of a plan and its route

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod render;
pub mod route;
pub mod validate;

pub use error::ToolError;
