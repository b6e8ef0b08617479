//! Grid-based pathfinding using A* algorithm.
//!
//! Movement is 8-directional. A step costs the Euclidean distance to the
//! neighbour (1 orthogonally, √2 diagonally) and the heuristic is the
//! straight-line distance to the goal. That heuristic is consistent for this
//! move set, so the first time the goal is popped its path is optimal.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::atomic::{self, AtomicBool};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::{Coord, StoreGrid};
use crate::metrics::heuristic;

/// Whether a diagonal step may squeeze between two blocked orthogonal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CornerCutting {
    /// Diagonal steps only need the destination cell to be free.
    #[default]
    Allow,
    /// Diagonal steps also need both orthogonal cells they pass to be free.
    Disallow,
}

/// Knobs for a single search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions<'a> {
    /// Diagonal corner policy.
    pub corner_cutting: CornerCutting,
    /// Checked before every expansion; the search stops once it reads `true`.
    pub cancel: Option<&'a AtomicBool>,
}

impl SearchOptions<'_> {
    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(atomic::Ordering::Relaxed))
    }
}

/// Result of [`search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Path from start to goal, both included.
    Found(Vec<Coord>),
    /// The goal cannot be reached.
    NoPath,
    /// The cancellation flag was raised.
    Cancelled,
}

impl SearchOutcome {
    /// The path, or an empty vector when none was found.
    #[must_use]
    pub fn into_path(self) -> Vec<Coord> {
        match self {
            Self::Found(path) => path,
            Self::NoPath | Self::Cancelled => Vec::new(),
        }
    }
}

/// A search node. Lives in the per-call arena and links to its parent by index.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    coord: Coord,
    /// Cost from start.
    g: f64,
    /// Estimate to goal.
    h: f64,
    parent: Option<usize>,
}

impl SearchNode {
    fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// An entry in the A* open set priority queue.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f_score: f64,
    /// Insertion counter: among equal f-scores the earliest push wins.
    sequence: u64,
    node: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse both keys for min-heap behaviour.
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// Neighbour offsets as (row, col).
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1), // Up-left
    (-1, 0),  // Up
    (-1, 1),  // Up-right
    (0, -1),  // Left
    (0, 1),   // Right
    (1, -1),  // Down-left
    (1, 0),   // Down
    (1, 1),   // Down-right
];

#[inline]
fn is_diagonal_valid(
    grid: &StoreGrid,
    from: Coord,
    d_row: i32,
    d_col: i32,
    policy: CornerCutting,
) -> bool {
    if policy == CornerCutting::Allow || d_row == 0 || d_col == 0 {
        return true;
    }
    let beside_row = from.offset(d_row, 0).is_some_and(|c| grid.is_passable(c));
    let beside_col = from.offset(0, d_col).is_some_and(|c| grid.is_passable(c));
    beside_row && beside_col
}

/// Find the shortest walkable path from `start` to `goal`.
///
/// Returns the path with both endpoints, or an empty vector when the goal
/// cannot be reached. A blocked goal is never reached. Corner cutting is
/// allowed.
#[must_use]
pub fn find_path(grid: &StoreGrid, start: Coord, goal: Coord) -> Vec<Coord> {
    search(grid, start, goal, &SearchOptions::default()).into_path()
}

/// A* search with explicit options.
///
/// The start cell itself is not checked for passability, only the cells
/// stepped onto. Out-of-bounds endpoints yield [`SearchOutcome::NoPath`].
#[must_use]
pub fn search(
    grid: &StoreGrid,
    start: Coord,
    goal: Coord,
    options: &SearchOptions<'_>,
) -> SearchOutcome {
    if !grid.in_bounds(start) || !grid.in_bounds(goal) {
        debug!(%start, %goal, "Search endpoint outside grid");
        return SearchOutcome::NoPath;
    }

    let mut nodes: Vec<SearchNode> = Vec::new();
    let mut open_set: BinaryHeap<OpenEntry> = BinaryHeap::new();
    // Best known cost per cell. Not a closed set: a cell is re-queued
    // whenever a strictly cheaper route to it turns up.
    let mut best_g: HashMap<Coord, f64> = HashMap::new();
    let mut sequence: u64 = 0;

    nodes.push(SearchNode {
        coord: start,
        g: 0.0,
        h: heuristic(start, goal),
        parent: None,
    });
    best_g.insert(start, 0.0);
    open_set.push(OpenEntry {
        f_score: nodes[0].f(),
        sequence,
        node: 0,
    });

    let mut expanded = 0usize;

    while let Some(entry) = open_set.pop() {
        if options.is_cancelled() {
            debug!(expanded, "Search cancelled");
            return SearchOutcome::Cancelled;
        }

        let current = nodes[entry.node];

        // Goal reached
        if current.coord == goal {
            debug!(%start, %goal, expanded, cost = current.g, "Path found");
            return SearchOutcome::Found(reconstruct_path(&nodes, entry.node));
        }

        // Superseded by a cheaper entry for the same cell
        if best_g.get(&current.coord).is_some_and(|&g| current.g > g) {
            continue;
        }
        expanded += 1;

        for &(d_row, d_col) in &DIRECTIONS {
            let Some(next) = current.coord.offset(d_row, d_col) else {
                continue;
            };
            if !grid.is_passable(next) {
                continue;
            }
            if !is_diagonal_valid(grid, current.coord, d_row, d_col, options.corner_cutting) {
                continue;
            }

            let tentative_g = current.g + heuristic(current.coord, next);
            let known_g = best_g.get(&next).copied().unwrap_or(f64::INFINITY);

            if tentative_g < known_g {
                best_g.insert(next, tentative_g);
                nodes.push(SearchNode {
                    coord: next,
                    g: tentative_g,
                    h: heuristic(next, goal),
                    parent: Some(entry.node),
                });
                sequence += 1;
                let node = nodes.len() - 1;
                open_set.push(OpenEntry {
                    f_score: nodes[node].f(),
                    sequence,
                    node,
                });
            }
        }
    }

    debug!(%start, %goal, expanded, "No path");
    SearchOutcome::NoPath
}

/// Walk parent links back to the start.
fn reconstruct_path(nodes: &[SearchNode], goal_node: usize) -> Vec<Coord> {
    let mut path = Vec::new();
    let mut current = Some(goal_node);

    while let Some(index) = current {
        let node = &nodes[index];
        path.push(node.coord);
        current = node.parent;
    }

    path.reverse();
    path
}
