//! Floor-plan validation.
//!
//! Checks an editor export for problems that would stop or degrade route
//! planning before anyone asks for a route.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracer_core::accessibility::find_accessible_neighbor;
use tracer_core::error::Result;
use tracer_core::floor_plan::{CellKind, FloorPlan, MAX_GRID_SIDE};
use tracer_core::grid::StoreGrid;
use tracing::{info, warn};

/// Outcome of validating one floor-plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Entrance cells.
    pub entrances: usize,
    /// Checkout cells.
    pub checkouts: usize,
    /// Cells carrying a product.
    pub products: usize,
    /// Problems that make routing impossible.
    pub errors: Vec<String>,
    /// Problems that make some items or checkouts unusable.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Returns true if no errors were found.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid: {} x {}", self.rows, self.cols)?;
        writeln!(
            f,
            "Entrances: {}, checkouts: {}, products: {}",
            self.entrances, self.checkouts, self.products
        )?;
        for error in &self.errors {
            writeln!(f, "error: {error}")?;
        }
        for warning in &self.warnings {
            writeln!(f, "warning: {warning}")?;
        }
        Ok(())
    }
}

/// Validate a parsed floor-plan.
#[must_use]
pub fn validate_floor_plan(plan: &FloorPlan) -> ValidationReport {
    let build = StoreGrid::build(plan.cells());
    let grid = &build.grid;
    let mut report = ValidationReport {
        rows: grid.rows(),
        cols: grid.cols(),
        entrances: plan
            .cells()
            .iter()
            .filter(|cell| cell.kind == CellKind::Entrance)
            .count(),
        checkouts: build.checkouts.len(),
        products: plan.products().count(),
        ..ValidationReport::default()
    };

    match report.entrances {
        0 => report.errors.push("no entrance cell".to_string()),
        1 => {}
        n => report.warnings.push(format!(
            "{n} entrance cells; routes start from the last one at {}",
            build
                .entrance
                .map_or_else(|| "?".to_string(), |e| e.to_string())
        )),
    }
    if build.entrance.is_some_and(|entrance| !grid.is_passable(entrance)) {
        report.errors.push("entrance is covered by a wall or shelf".to_string());
    }
    if report.checkouts == 0 {
        report.errors.push("no checkout cell".to_string());
    }
    match plan.dropped_cells() {
        0 => {}
        n => report.warnings.push(format!(
            "{n} cell(s) ignored: missing coordinates or outside the {MAX_GRID_SIDE} x {MAX_GRID_SIDE} limit"
        )),
    }

    for (cell, product) in plan.products() {
        let coord = cell.coord();
        if !cell.kind.holds_products() {
            report.warnings.push(format!(
                "product '{}' at {coord} is on a cell that cannot hold products",
                product.product()
            ));
        } else if find_accessible_neighbor(grid, coord).is_none() {
            report.warnings.push(format!(
                "product '{}' at {coord} has no free cell next to it",
                product.product()
            ));
        }
    }

    for &checkout in &build.checkouts {
        if find_accessible_neighbor(grid, checkout).is_none() {
            report
                .warnings
                .push(format!("checkout at {checkout} has no free cell next to it"));
        }
    }

    for error in &report.errors {
        warn!("Floor-plan error: {error}");
    }
    info!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Floor-plan validated"
    );
    report
}

/// Load and validate a floor-plan export.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed. Problems inside
/// a parsed plan are reported, not returned as errors.
pub fn validate_floor_plan_file(path: &Path) -> Result<ValidationReport> {
    let plan = FloorPlan::load(path)?;
    Ok(validate_floor_plan(&plan))
}
