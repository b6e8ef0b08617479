//! Proptest strategies for grids and stops.
//!
//! Grids are small (at most `max_side` cells per side) with roughly a
//! quarter of the cells blocked, which keeps both reachable and
//! unreachable cases common.

use proptest::prelude::*;
use tracer_core::grid::{CellState, Coord, StoreGrid};

/// Share of cells blocked in generated grids.
const BLOCKED_WEIGHT: f64 = 0.25;

fn grid_from_mask(rows: u32, cols: u32, blocked: &[bool]) -> StoreGrid {
    let mut grid = StoreGrid::new(rows, cols);
    for (i, &is_blocked) in blocked.iter().enumerate() {
        if is_blocked {
            let i = i as u32;
            grid.set_cell(Coord::new(i / cols, i % cols), CellState::Blocked);
        }
    }
    grid
}

fn arb_sized_grid(rows: u32, cols: u32) -> impl Strategy<Value = StoreGrid> {
    proptest::collection::vec(proptest::bool::weighted(BLOCKED_WEIGHT), (rows * cols) as usize)
        .prop_map(move |mask| grid_from_mask(rows, cols, &mask))
}

fn arb_coord_in(rows: u32, cols: u32) -> impl Strategy<Value = Coord> {
    (0..rows, 0..cols).prop_map(|(row, col)| Coord::new(row, col))
}

/// Random grid between 1x1 and `max_side` x `max_side`.
pub fn arb_grid(max_side: u32) -> impl Strategy<Value = StoreGrid> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(rows, cols)| arb_sized_grid(rows, cols))
}

/// Random grid with two endpoints that are in bounds and free.
pub fn arb_route_case(max_side: u32) -> impl Strategy<Value = (StoreGrid, Coord, Coord)> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(rows, cols)| {
        (
            arb_sized_grid(rows, cols),
            arb_coord_in(rows, cols),
            arb_coord_in(rows, cols),
        )
            .prop_map(|(mut grid, start, goal)| {
                grid.set_cell(start, CellState::Free);
                grid.set_cell(goal, CellState::Free);
                (grid, start, goal)
            })
    })
}

/// Random grid with coordinates that may fall outside it.
pub fn arb_loose_case(max_side: u32) -> impl Strategy<Value = (StoreGrid, Coord, Coord)> {
    let reach = max_side + 2;
    (
        arb_grid(max_side),
        arb_coord_in(reach, reach),
        arb_coord_in(reach, reach),
    )
}

/// Random grid with up to `max_stops` free stops, at least two.
pub fn arb_stops_case(
    max_side: u32,
    max_stops: usize,
) -> impl Strategy<Value = (StoreGrid, Vec<Coord>)> {
    (1..=max_side, 1..=max_side).prop_flat_map(move |(rows, cols)| {
        (
            arb_sized_grid(rows, cols),
            proptest::collection::vec(arb_coord_in(rows, cols), 2..=max_stops.max(2)),
        )
            .prop_map(|(mut grid, stops)| {
                for &stop in &stops {
                    grid.set_cell(stop, CellState::Free);
                }
                (grid, stops)
            })
    })
}

/// Random list of points in a `side` x `side` area.
pub fn arb_points(side: u32, max_len: usize) -> impl Strategy<Value = Vec<Coord>> {
    proptest::collection::vec(arb_coord_in(side, side), 0..max_len)
}
