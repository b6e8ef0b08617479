//! # Tracer Core
//!
//! Route-planning engine for Market Tracer.
//!
//! Takes a store floor-plan exported by the grid editor, a shopping list and
//! a role, and produces a walkable route from the entrance through every
//! resolved item to the nearest reachable checkout.
//!
//! This crate contains **only** planning logic:
//! - No UI
//! - No persistence
//! - No I/O inside the search (plans and lists are passed in fully parsed)
//! - No shared mutable state (every request builds its own grid)
//!
//! ## Crate Structure
//!
//! - [`floor_plan`] - Floor-plan export parsing and cell records
//! - [`grid`] - Obstacle grid and landmarks built from a floor-plan
//! - [`metrics`] - Euclidean heuristic and path length
//! - [`pathfinding`] - A* search between two cells
//! - [`accessibility`] - Standable points next to shelves and checkouts
//! - [`route`] - Stop ordering and leg stitching
//! - [`planner`] - The route-generation entry point
//! - [`config`] - Planner configuration

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod accessibility;
pub mod config;
pub mod error;
pub mod floor_plan;
pub mod grid;
pub mod metrics;
pub mod pathfinding;
pub mod planner;
pub mod route;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::accessibility::{ResolvedItem, Role, ShoppingPoints, SkipReason, SkippedItem};
    pub use crate::config::PlannerConfig;
    pub use crate::error::{Result, RouteError, TracerError};
    pub use crate::floor_plan::{CellKind, CellRecord, FloorPlan, ProductRef};
    pub use crate::grid::{CellState, Coord, GridBuild, StoreGrid};
    pub use crate::pathfinding::{find_path, CornerCutting, SearchOptions, SearchOutcome};
    pub use crate::planner::{RoutePlan, RoutePlanner};
    pub use crate::route::{OrderingStrategy, EXACT_ORDERING_LIMIT};
}
