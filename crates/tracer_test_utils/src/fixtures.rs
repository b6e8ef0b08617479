//! Test fixtures and helpers.
//!
//! Floor-plans are drawn one string per row:
//!
//! | char | cell |
//! |------|------|
//! | `#`  | wall (`Mur`) |
//! | `R`  | shelf (`Rayon`) |
//! | `S`  | stockroom (`Stock`) |
//! | `E`  | entrance (`Entrée`) |
//! | `C`  | checkout (`Caisse`) |
//! | other | untagged floor |
//!
//! Untagged floor is emitted too so the plan keeps the drawn dimensions.

use serde_json::{json, Value};
use tracer_core::floor_plan::{CellKind, CellRecord, FloorPlan, ProductRef};
use tracer_core::grid::Coord;

/// Shorthand for a coordinate.
#[must_use]
pub const fn coord(row: u32, col: u32) -> Coord {
    Coord::new(row, col)
}

/// Shelf stocked with a bare product name.
#[must_use]
pub fn shelf(row: u32, col: u32, product: &str) -> CellRecord {
    CellRecord::new(row, col, CellKind::Shelf).with_product(ProductRef::Name(product.into()))
}

/// Stockroom cell holding a product.
#[must_use]
pub fn stock(row: u32, col: u32, product: &str) -> CellRecord {
    CellRecord::new(row, col, CellKind::Stockroom).with_product(ProductRef::Name(product.into()))
}

/// Cells of an ASCII drawing.
///
/// `products` attaches a product name to the drawn cell at each coordinate.
#[must_use]
pub fn ascii_cells(rows: &[&str], products: &[(Coord, &str)]) -> Vec<CellRecord> {
    let mut cells = Vec::new();
    for (r, line) in rows.iter().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            let kind = match ch {
                '#' => CellKind::Wall,
                'R' => CellKind::Shelf,
                'S' => CellKind::Stockroom,
                'E' => CellKind::Entrance,
                'C' => CellKind::Checkout,
                _ => CellKind::Unknown,
            };
            let mut cell = CellRecord::new(r as u32, c as u32, kind);
            if let Some((_, name)) = products.iter().find(|(at, _)| *at == cell.coord()) {
                cell = cell.with_product(ProductRef::Name((*name).to_string()));
            }
            cells.push(cell);
        }
    }
    cells
}

/// Floor-plan from an ASCII drawing.
#[must_use]
pub fn ascii_plan(rows: &[&str], products: &[(Coord, &str)]) -> FloorPlan {
    FloorPlan::from_cells(ascii_cells(rows, products))
}

/// One cell as the grid editor writes it.
#[must_use]
pub fn export_cell(cell: &CellRecord) -> Value {
    let mut value = json!({ "row": cell.row, "col": cell.col });
    if let Some(tag) = cell.kind.tag() {
        value["type"] = json!(tag);
    }
    if let Some(product) = &cell.product {
        value["object"] = json!({
            "category": product.category(),
            "product": product.product(),
        });
    }
    value
}

/// Editor export document for `cells`.
#[must_use]
pub fn export_json(cells: &[CellRecord], grid_size: u32) -> String {
    let cells: Vec<Value> = cells.iter().map(export_cell).collect();
    json!({ "grid_size": grid_size, "cells": cells }).to_string()
}
