//! Reference shortest-path lengths.
//!
//! A plain Dijkstra over the same move rules as the A* search: eight
//! directions, step cost 1 or √2, blocked cells never entered. It is slow
//! and simple on purpose, so tests can compare the real search against it.

use tracer_core::grid::{Coord, StoreGrid};
use tracer_core::metrics::heuristic;
use tracer_core::pathfinding::CornerCutting;

const MOVES: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn can_step(grid: &StoreGrid, from: Coord, d_row: i32, d_col: i32, policy: CornerCutting) -> bool {
    let Some(to) = from.offset(d_row, d_col) else {
        return false;
    };
    if !grid.is_passable(to) {
        return false;
    }
    if policy == CornerCutting::Allow || d_row == 0 || d_col == 0 {
        return true;
    }
    let beside_row = from.offset(d_row, 0).is_some_and(|c| grid.is_passable(c));
    let beside_col = from.offset(0, d_col).is_some_and(|c| grid.is_passable(c));
    beside_row && beside_col
}

/// Length of the shortest walk from `start` to `goal`, in cells.
///
/// Returns `None` when the goal is unreachable or either endpoint is off
/// the grid.
#[must_use]
pub fn shortest_length(
    grid: &StoreGrid,
    start: Coord,
    goal: Coord,
    policy: CornerCutting,
) -> Option<f64> {
    if !grid.in_bounds(start) || !grid.in_bounds(goal) {
        return None;
    }
    let cols = grid.cols() as usize;
    let count = grid.rows() as usize * cols;
    let index = |c: Coord| c.row as usize * cols + c.col as usize;

    let mut dist = vec![f64::INFINITY; count];
    let mut done = vec![false; count];
    dist[index(start)] = 0.0;

    loop {
        let next = (0..count)
            .filter(|&i| !done[i] && dist[i].is_finite())
            .min_by(|&a, &b| dist[a].total_cmp(&dist[b]))?;
        let here = Coord::new((next / cols) as u32, (next % cols) as u32);
        if here == goal {
            return Some(dist[next]);
        }
        done[next] = true;

        for (d_row, d_col) in MOVES {
            if !can_step(grid, here, d_row, d_col, policy) {
                continue;
            }
            let Some(to) = here.offset(d_row, d_col) else {
                continue;
            };
            let candidate = dist[next] + heuristic(here, to);
            if candidate < dist[index(to)] {
                dist[index(to)] = candidate;
            }
        }
    }
}
