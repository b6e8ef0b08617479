//! Floor-plan export parsing.
//!
//! The grid editor exports a plan as JSON:
//!
//! ```json
//! {
//!   "grid_size": 50,
//!   "cells": [
//!     { "row": 0, "col": 3, "type": "Entrée" },
//!     { "row": 2, "col": 2, "type": "Rayon",
//!       "object": { "category": "Fruits", "product": "Pomme" } }
//!   ]
//! }
//! ```
//!
//! A bare array of cells is accepted as well. Individual cells are read
//! permissively: a cell without usable coordinates is dropped, and an
//! unknown or missing `type` is kept as [`CellKind::Unknown`] (walkable).
//! Cells at or beyond [`MAX_GRID_SIDE`] in either direction are dropped too.
//! Only a document that is not JSON, or not one of the two shapes above,
//! is an error.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, TracerError};
use crate::grid::Coord;

/// Category given to products exported without one.
pub const DEFAULT_CATEGORY: &str = "Autre";

/// Exclusive upper bound on a cell's row and column.
pub const MAX_GRID_SIDE: u32 = 1024;

/// Semantic tag of a floor-plan cell.
///
/// Serialized with the editor's tags (`Rayon`, `Mur`, `Caisse`, `Entrée`, `Stock`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum CellKind {
    /// Shelf (`Rayon`). Impassable, may hold a product.
    #[serde(rename = "Rayon")]
    Shelf,
    /// Wall (`Mur`). Impassable.
    #[serde(rename = "Mur")]
    Wall,
    /// Checkout (`Caisse`). Passable landmark.
    #[serde(rename = "Caisse")]
    Checkout,
    /// Entrance (`Entrée`). Passable landmark.
    #[serde(rename = "Entrée")]
    Entrance,
    /// Stockroom (`Stock`). Passable, may hold a product.
    #[serde(rename = "Stock")]
    Stockroom,
    /// Missing or unrecognised tag. Treated as free floor.
    #[default]
    Unknown,
}

impl CellKind {
    /// Map an editor tag to a kind. Unrecognised tags become [`CellKind::Unknown`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Rayon" => Self::Shelf,
            "Mur" => Self::Wall,
            "Caisse" => Self::Checkout,
            "Entrée" => Self::Entrance,
            "Stock" => Self::Stockroom,
            _ => Self::Unknown,
        }
    }

    /// Editor tag for this kind, `None` for [`CellKind::Unknown`].
    #[must_use]
    pub const fn tag(self) -> Option<&'static str> {
        match self {
            Self::Shelf => Some("Rayon"),
            Self::Wall => Some("Mur"),
            Self::Checkout => Some("Caisse"),
            Self::Entrance => Some("Entrée"),
            Self::Stockroom => Some("Stock"),
            Self::Unknown => None,
        }
    }

    /// Returns true if the walker cannot step on this cell.
    #[must_use]
    pub const fn blocks_movement(self) -> bool {
        matches!(self, Self::Shelf | Self::Wall)
    }

    /// Returns true if the editor lets products be placed on this cell.
    #[must_use]
    pub const fn holds_products(self) -> bool {
        matches!(self, Self::Shelf | Self::Stockroom)
    }
}

/// Product stored on a cell.
///
/// The editor writes either a bare product name or a
/// `{ "category": .., "product": .. }` object; both are normalised here so
/// matching code only deals with [`ProductRef::product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProductRef {
    /// Bare product name.
    Name(String),
    /// Product with its category.
    Categorized {
        /// Category label.
        category: String,
        /// Product name.
        product: String,
    },
}

impl ProductRef {
    /// Normalise a raw `object` field. Returns `None` for null, numbers,
    /// or objects without a string `product`.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self::Name(name.clone())),
            Value::Object(map) => {
                let product = map.get("product")?.as_str()?.to_string();
                let category = map
                    .get("category")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_CATEGORY)
                    .to_string();
                Some(Self::Categorized { category, product })
            }
            _ => None,
        }
    }

    /// Product name.
    #[must_use]
    pub fn product(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Categorized { product, .. } => product,
        }
    }

    /// Category, [`DEFAULT_CATEGORY`] for bare names.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Name(_) => DEFAULT_CATEGORY,
            Self::Categorized { category, .. } => category,
        }
    }

    /// Case-insensitive match against a shopping-list entry.
    #[must_use]
    pub fn matches(&self, item: &str) -> bool {
        self.product().to_lowercase() == item.to_lowercase()
    }
}

/// One validated cell of a floor-plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRecord {
    /// Grid row.
    pub row: u32,
    /// Grid column.
    pub col: u32,
    /// Semantic tag.
    pub kind: CellKind,
    /// Product stored on the cell, if any.
    pub product: Option<ProductRef>,
}

impl CellRecord {
    /// Create a cell with no product.
    #[must_use]
    pub const fn new(row: u32, col: u32, kind: CellKind) -> Self {
        Self {
            row,
            col,
            kind,
            product: None,
        }
    }

    /// Attach a product to the cell.
    #[must_use]
    pub fn with_product(mut self, product: ProductRef) -> Self {
        self.product = Some(product);
        self
    }

    /// Cell coordinate.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    /// Returns true if both row and column are below [`MAX_GRID_SIDE`].
    #[must_use]
    pub const fn in_range(&self) -> bool {
        self.row < MAX_GRID_SIDE && self.col < MAX_GRID_SIDE
    }
}

/// Cell as found in the export, before validation.
#[derive(Debug, Deserialize)]
struct RawCell {
    #[serde(default)]
    row: Value,
    #[serde(default)]
    col: Value,
    #[serde(rename = "type", default)]
    kind: Value,
    #[serde(default)]
    object: Value,
}

impl RawCell {
    fn into_record(self) -> Option<CellRecord> {
        let row = u32::try_from(self.row.as_u64()?).ok()?;
        let col = u32::try_from(self.col.as_u64()?).ok()?;
        let kind = self.kind.as_str().map_or(CellKind::Unknown, CellKind::from_tag);
        let record = CellRecord {
            row,
            col,
            kind,
            product: ProductRef::from_json(&self.object),
        };
        record.in_range().then_some(record)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFloorPlan {
    Document {
        #[serde(default)]
        grid_size: Option<u32>,
        cells: Vec<Value>,
    },
    Bare(Vec<Value>),
}

/// A parsed floor-plan export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloorPlan {
    /// Editor cell edge in pixels. Not used for routing.
    pub grid_size: Option<u32>,
    cells: Vec<CellRecord>,
    dropped: usize,
}

impl FloorPlan {
    /// Build a plan from cells. Cells outside [`MAX_GRID_SIDE`] are dropped.
    #[must_use]
    pub fn from_cells(mut cells: Vec<CellRecord>) -> Self {
        let total = cells.len();
        cells.retain(|cell| {
            if !cell.in_range() {
                warn!(row = cell.row, col = cell.col, "Ignoring floor-plan cell out of range");
            }
            cell.in_range()
        });
        Self {
            grid_size: None,
            dropped: total - cells.len(),
            cells,
        }
    }

    /// Parse an editor export.
    ///
    /// # Errors
    ///
    /// Returns [`TracerError::FloorPlanParse`] if the text is not JSON or is
    /// neither a `{ "cells": [...] }` object nor an array of cells.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawFloorPlan = serde_json::from_str(json)?;
        let (grid_size, raw_cells) = match raw {
            RawFloorPlan::Document { grid_size, cells } => (grid_size, cells),
            RawFloorPlan::Bare(cells) => (None, cells),
        };

        let total = raw_cells.len();
        let cells: Vec<CellRecord> = raw_cells
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let record = serde_json::from_value::<RawCell>(value)
                    .ok()
                    .and_then(RawCell::into_record);
                if record.is_none() {
                    warn!(index, "Ignoring floor-plan cell without usable row/col");
                }
                record
            })
            .collect();

        debug!(total, kept = cells.len(), "Parsed floor-plan");
        Ok(Self {
            grid_size,
            dropped: total - cells.len(),
            cells,
        })
    }

    /// Read and parse an editor export from disk.
    ///
    /// # Errors
    ///
    /// Returns [`TracerError::Io`] if the file cannot be read, or
    /// [`TracerError::FloorPlanParse`] as for [`FloorPlan::from_json_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| TracerError::io(path, e))?;
        Self::from_json_str(&contents)
    }

    /// All validated cells, in export order.
    #[must_use]
    pub fn cells(&self) -> &[CellRecord] {
        &self.cells
    }

    /// Number of export cells that were dropped while reading the plan.
    #[must_use]
    pub const fn dropped_cells(&self) -> usize {
        self.dropped
    }

    /// Cells that carry a product.
    pub fn products(&self) -> impl Iterator<Item = (&CellRecord, &ProductRef)> {
        self.cells
            .iter()
            .filter_map(|cell| cell.product.as_ref().map(|product| (cell, product)))
    }
}
