//! Obstacle grid built from a floor-plan.
//!
//! The grid is rebuilt for every route request and only read afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::floor_plan::{CellKind, CellRecord, MAX_GRID_SIDE};

/// A grid cell address.
///
/// Serialized as a `[row, col]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Coord {
    /// Row index (top to bottom).
    pub row: u32,
    /// Column index (left to right).
    pub col: u32,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Coordinate shifted by a signed offset, `None` if it would go negative.
    #[must_use]
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl From<(u32, u32)> for Coord {
    fn from((row, col): (u32, u32)) -> Self {
        Self::new(row, col)
    }
}

impl From<Coord> for (u32, u32) {
    fn from(coord: Coord) -> Self {
        (coord.row, coord.col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Routing state of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    /// Walkable floor.
    #[default]
    Free,
    /// Shelf or wall.
    Blocked,
    /// Store entrance. Walkable.
    Entrance,
    /// Checkout counter. Walkable.
    Checkout,
}

impl CellState {
    /// Returns true if the walker may stand on this cell.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Blocked)
    }
}

/// Routing grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreGrid {
    rows: u32,
    cols: u32,
    cells: Vec<CellState>,
}

/// Output of [`StoreGrid::build`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridBuild {
    /// The obstacle grid.
    pub grid: StoreGrid,
    /// Entrance cell, if the plan has one.
    pub entrance: Option<Coord>,
    /// Checkout cells, in plan order.
    pub checkouts: Vec<Coord>,
}

impl StoreGrid {
    /// Create a grid with every cell free.
    ///
    /// Zero-sized grids are allowed; nothing is in bounds on them. Both
    /// sides are clamped to [`MAX_GRID_SIDE`].
    #[must_use]
    pub fn new(rows: u32, cols: u32) -> Self {
        let rows = rows.min(MAX_GRID_SIDE);
        let cols = cols.min(MAX_GRID_SIDE);
        let cell_count = (rows as usize) * (cols as usize);
        Self {
            rows,
            cols,
            cells: vec![CellState::Free; cell_count],
        }
    }

    /// Build the grid and landmarks from floor-plan cells.
    ///
    /// Dimensions are one more than the largest row and column seen. Shelves
    /// and walls block; every other kind, including unknown ones, is walkable.
    /// If several entrances are tagged the last one wins. Cells outside
    /// [`MAX_GRID_SIDE`] are ignored.
    #[must_use]
    pub fn build(cells: &[CellRecord]) -> GridBuild {
        let usable = || cells.iter().filter(|c| c.in_range());
        let rows = usable().map(|c| c.row + 1).max().unwrap_or(0);
        let cols = usable().map(|c| c.col + 1).max().unwrap_or(0);
        let mut grid = Self::new(rows, cols);
        let mut entrance = None;
        let mut checkouts = Vec::new();

        for cell in cells {
            if !cell.in_range() {
                warn!(row = cell.row, col = cell.col, "Skipping cell out of grid range");
                continue;
            }
            let coord = cell.coord();
            match cell.kind {
                CellKind::Shelf | CellKind::Wall => {
                    grid.set_cell(coord, CellState::Blocked);
                }
                CellKind::Entrance => {
                    if let Some(previous) = entrance {
                        warn!(%previous, replacement = %coord, "Floor-plan has several entrances");
                    }
                    grid.mark_landmark(coord, CellState::Entrance);
                    entrance = Some(coord);
                }
                CellKind::Checkout => {
                    grid.mark_landmark(coord, CellState::Checkout);
                    checkouts.push(coord);
                }
                CellKind::Stockroom | CellKind::Unknown => {}
            }
        }

        debug!(
            rows,
            cols,
            has_entrance = entrance.is_some(),
            checkouts = checkouts.len(),
            "Built store grid"
        );
        GridBuild {
            grid,
            entrance,
            checkouts,
        }
    }

    /// Parse a grid drawn with characters, one string per row.
    ///
    /// `#` is blocked, `E` an entrance, `C` a checkout, anything else free.
    /// Short rows are padded with free cells.
    #[must_use]
    pub fn parse_ascii(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut grid = Self::new(height, width);
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                let state = match ch {
                    '#' => CellState::Blocked,
                    'E' => CellState::Entrance,
                    'C' => CellState::Checkout,
                    _ => CellState::Free,
                };
                grid.set_cell(Coord::new(r as u32, c as u32), state);
            }
        }
        grid
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    fn index(&self, coord: Coord) -> usize {
        (coord.row as usize) * (self.cols as usize) + (coord.col as usize)
    }

    /// Check if a coordinate is inside the grid.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Cell state, `None` if out of bounds.
    #[must_use]
    pub fn get_cell(&self, coord: Coord) -> Option<CellState> {
        if self.in_bounds(coord) {
            Some(self.cells[self.index(coord)])
        } else {
            None
        }
    }

    /// Set a cell state. Returns `false` if out of bounds.
    pub fn set_cell(&mut self, coord: Coord, state: CellState) -> bool {
        if self.in_bounds(coord) {
            let index = self.index(coord);
            self.cells[index] = state;
            true
        } else {
            false
        }
    }

    /// Check if a cell is in bounds and walkable.
    #[must_use]
    pub fn is_passable(&self, coord: Coord) -> bool {
        self.get_cell(coord).is_some_and(CellState::is_passable)
    }

    /// Landmarks never unblock a cell that a shelf or wall already claimed.
    fn mark_landmark(&mut self, coord: Coord, state: CellState) {
        if self.get_cell(coord) != Some(CellState::Blocked) {
            self.set_cell(coord, state);
        }
    }
}
