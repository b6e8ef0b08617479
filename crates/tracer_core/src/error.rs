//! Error types.
//!
//! [`TracerError`] covers unusable input (files, JSON, RON).
//! [`RouteError`] covers a plan that parsed fine but cannot yield a route.

use thiserror::Error;

use crate::accessibility::SkippedItem;
use crate::grid::Coord;

/// Result type alias using [`TracerError`].
pub type Result<T> = std::result::Result<T, TracerError>;

/// Errors raised while reading planner input.
#[derive(Debug, Error)]
pub enum TracerError {
    /// Input file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Floor-plan export is not valid JSON or has the wrong top-level shape.
    #[error("Failed to parse floor-plan: {0}")]
    FloorPlanParse(#[from] serde_json::Error),

    /// Planner configuration is not valid RON.
    #[error("Failed to parse planner config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    /// Planner configuration parsed but holds an unusable value.
    #[error("Invalid planner config: {0}")]
    InvalidConfig(String),
}

impl TracerError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Reasons a route request fails.
///
/// Every variant is recoverable: the caller reports it and carries on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// The floor-plan has no entrance cell.
    #[error("The floor-plan has no entrance")]
    NoEntrance,

    /// None of the shopping-list items could be placed on the plan.
    #[error("No items from the shopping list were found on this plan")]
    NoItemsFound {
        /// Why each item was dropped.
        skipped: Vec<SkippedItem>,
    },

    /// No checkout has a standable, reachable neighbour.
    #[error("No accessible checkout ({} checkout cells on this plan)", .checkouts.len())]
    NoAccessibleCheckout {
        /// Checkout cells that were considered.
        checkouts: Vec<Coord>,
    },

    /// Two consecutive stops are not connected.
    #[error("No path between stop {from} and stop {to} (leg {leg})")]
    UnreachableLeg {
        /// Index of the failing leg, 0 being entrance to first stop.
        leg: usize,
        /// Leg start.
        from: Coord,
        /// Leg end.
        to: Coord,
    },

    /// The caller cancelled the computation.
    #[error("Route planning was cancelled")]
    Cancelled,
}
