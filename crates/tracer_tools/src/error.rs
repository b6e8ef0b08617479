//! Tool error type.

use thiserror::Error;
use tracer_core::error::{RouteError, TracerError};

/// Errors raised by the command-line tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Floor-plan or planner config could not be used.
    #[error(transparent)]
    Input(#[from] TracerError),

    /// The planner found no route.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// Shopping-list file could not be read.
    #[error("Failed to read shopping list '{path}': {source}")]
    ShoppingList {
        /// List file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Neither `--item` nor `--list` named anything to buy.
    #[error("The shopping list is empty")]
    EmptyShoppingList,

    /// Route export could not be encoded.
    #[error("Failed to encode route: {0}")]
    Encode(#[from] serde_json::Error),

    /// Route export could not be written.
    #[error("Failed to write '{path}': {source}")]
    Output {
        /// Output file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
