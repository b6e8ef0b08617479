//! Planner configuration.
//!
//! Loaded from RON. Every field is optional:
//!
//! ```ron
//! PlannerConfig(
//!     exact_ordering_limit: 5,
//!     corner_cutting: Allow,
//!     cell_size: 0.5,
//!     role: Staff,
//! )
//! ```

use std::path::Path;
use std::sync::atomic::AtomicBool;

use serde::{Deserialize, Serialize};

use crate::accessibility::Role;
use crate::error::{Result, TracerError};
use crate::metrics::DEFAULT_CELL_SIZE;
use crate::pathfinding::{CornerCutting, SearchOptions};
use crate::route::EXACT_ORDERING_LIMIT;

/// Settings for [`crate::planner::RoutePlanner`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Stop count up to which visiting order is searched exhaustively.
    pub exact_ordering_limit: usize,
    /// Diagonal corner policy for every leg.
    pub corner_cutting: CornerCutting,
    /// Real-world length of one cell, used for the reported distance.
    pub cell_size: f64,
    /// Whose route this is.
    pub role: Role,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            exact_ordering_limit: EXACT_ORDERING_LIMIT,
            corner_cutting: CornerCutting::default(),
            cell_size: DEFAULT_CELL_SIZE,
            role: Role::default(),
        }
    }
}

impl PlannerConfig {
    /// Load from a RON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or
    /// fails [`PlannerConfig::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| TracerError::io(path, e))?;
        Self::from_ron_str(&contents)
    }

    /// Parse from a RON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or fails
    /// [`PlannerConfig::validate`].
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        let config: Self = ron::from_str(ron)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`TracerError::InvalidConfig`] if `cell_size` is not a
    /// positive finite number.
    pub fn validate(&self) -> Result<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(TracerError::InvalidConfig(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        Ok(())
    }

    /// Search options for one planning run.
    #[must_use]
    pub fn search_options<'a>(&self, cancel: Option<&'a AtomicBool>) -> SearchOptions<'a> {
        SearchOptions {
            corner_cutting: self.corner_cutting,
            cancel,
        }
    }
}
