//! Floor-plan import tests: editor exports in, grid and landmarks out.

use std::io::Write;

use tracer_core::prelude::*;
use tracer_test_utils::fixtures::{ascii_cells, coord, export_json};

fn landmarks(cells: &[CellRecord]) -> (Option<Coord>, Vec<Coord>) {
    let build = StoreGrid::build(cells);
    (build.entrance, build.checkouts)
}

#[test]
fn test_landmarks_survive_any_input_order() {
    let cells = ascii_cells(&["E..C", ".R#.", "C..."], &[]);
    let (entrance, mut checkouts) = landmarks(&cells);
    checkouts.sort();
    assert_eq!(entrance, Some(coord(0, 0)));
    assert_eq!(checkouts, vec![coord(0, 3), coord(2, 0)]);

    let mut reversed = cells.clone();
    reversed.reverse();
    let (entrance, mut reversed_checkouts) = landmarks(&reversed);
    reversed_checkouts.sort();
    assert_eq!(entrance, Some(coord(0, 0)));
    assert_eq!(reversed_checkouts, checkouts);

    // Interleave: odd indices first
    let shuffled: Vec<CellRecord> = cells
        .iter()
        .skip(1)
        .step_by(2)
        .chain(cells.iter().step_by(2))
        .cloned()
        .collect();
    let (entrance, mut shuffled_checkouts) = landmarks(&shuffled);
    shuffled_checkouts.sort();
    assert_eq!(entrance, Some(coord(0, 0)));
    assert_eq!(shuffled_checkouts, checkouts);
}

#[test]
fn test_export_round_trip_keeps_grid() {
    let cells = ascii_cells(&["E.S.", "#RR#", "...C"], &[(coord(1, 1), "Pain")]);
    let parsed = FloorPlan::from_json_str(&export_json(&cells, 50)).unwrap();
    assert_eq!(parsed.grid_size, Some(50));

    let direct = StoreGrid::build(&cells);
    let reparsed = StoreGrid::build(parsed.cells());
    assert_eq!(direct, reparsed);
    assert_eq!(reparsed.grid.get_cell(coord(1, 0)), Some(CellState::Blocked));
    assert_eq!(reparsed.grid.get_cell(coord(0, 2)), Some(CellState::Free));
    assert_eq!(reparsed.grid.get_cell(coord(2, 3)), Some(CellState::Checkout));
}

#[test]
fn test_editor_export_shapes() {
    let json = r#"{
        "grid_size": 40,
        "cells": [
            { "row": 0, "col": 0, "type": "Entrée" },
            { "row": 1, "col": 1, "type": "Rayon", "object": "Pain" },
            { "row": 1, "col": 2, "type": "Rayon",
              "object": { "category": "Fruits", "product": "Pomme" } },
            { "row": 1, "col": 3, "type": "Rayon", "object": { "product": "Sel" } },
            { "row": 2, "col": 0, "type": "Toboggan" },
            { "row": -1, "col": 0, "type": "Mur" },
            { "col": 4, "type": "Mur" },
            { "row": 3, "col": 3, "type": "Caisse", "object": null }
        ]
    }"#;
    let plan = FloorPlan::from_json_str(json).unwrap();
    assert_eq!(plan.cells().len(), 6);

    let products: Vec<(&str, &str)> = plan
        .products()
        .map(|(_, product)| (product.category(), product.product()))
        .collect();
    assert_eq!(
        products,
        vec![("Autre", "Pain"), ("Fruits", "Pomme"), ("Autre", "Sel")]
    );
    assert_eq!(plan.cells()[4].kind, CellKind::Unknown);
}

#[test]
fn test_bare_array_export() {
    let json = r#"[
        { "row": 0, "col": 0, "type": "Entrée" },
        { "row": 2, "col": 2, "type": "Caisse" }
    ]"#;
    let plan = FloorPlan::from_json_str(json).unwrap();
    assert_eq!(plan.grid_size, None);
    let (entrance, checkouts) = landmarks(plan.cells());
    assert_eq!(entrance, Some(coord(0, 0)));
    assert_eq!(checkouts, vec![coord(2, 2)]);
}

#[test]
fn test_invalid_exports_are_errors() {
    for bad in ["", "not json", "{\"cells\": 3}", "42", "{\"grid_size\": 10}"] {
        assert!(
            matches!(FloorPlan::from_json_str(bad), Err(TracerError::FloorPlanParse(_))),
            "accepted {bad:?}"
        );
    }
}

#[test]
fn test_load_from_disk() {
    let cells = ascii_cells(&["E.", ".C"], &[]);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(export_json(&cells, 30).as_bytes()).unwrap();

    let plan = FloorPlan::load(file.path()).unwrap();
    assert_eq!(plan.cells().len(), 4);

    let missing = FloorPlan::load(file.path().with_extension("missing"));
    let Err(TracerError::Io { path, .. }) = missing else {
        panic!("expected an I/O error");
    };
    assert!(path.ends_with("missing"));
}

#[test]
fn test_config_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"(exact_ordering_limit: 3, corner_cutting: Disallow)")
        .unwrap();
    let config = PlannerConfig::load(file.path()).unwrap();
    assert_eq!(config.exact_ordering_limit, 3);
    assert_eq!(config.corner_cutting, CornerCutting::Disallow);
    assert_eq!(config.role, Role::Customer);
}
