//! Stop ordering and route stitching.
//!
//! Visiting order is scored by straight-line distance only. Small lists are
//! ordered exactly by trying every permutation; larger ones fall back to a
//! nearest-neighbour walk. Walked paths are computed afterwards, one A*
//! search per leg.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RouteError;
use crate::grid::{Coord, StoreGrid};
use crate::metrics::heuristic;
use crate::pathfinding::{search, SearchOptions, SearchOutcome};

/// Largest stop count ordered by exhaustive search (5! = 120 orders).
pub const EXACT_ORDERING_LIMIT: usize = 5;

/// How a visiting order was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderingStrategy {
    /// Every permutation scored; the shortest straight-line tour kept.
    Exact,
    /// Repeatedly the closest remaining stop.
    NearestNeighbor,
}

impl OrderingStrategy {
    /// Strategy for `count` stops given the exact-search limit.
    #[must_use]
    pub const fn for_count(count: usize, exact_limit: usize) -> Self {
        if count <= exact_limit {
            Self::Exact
        } else {
            Self::NearestNeighbor
        }
    }
}

/// Shortest path from `start` to any of `goals`, with the goal it reaches.
///
/// Paths are compared by number of cells; on a tie the earlier goal wins.
/// Returns `None` if no goal is reachable.
#[must_use]
pub fn find_nearest_goal(
    grid: &StoreGrid,
    start: Coord,
    goals: &[Coord],
) -> Option<(Vec<Coord>, Coord)> {
    nearest_goal(grid, start, goals, &SearchOptions::default())
        .ok()
        .flatten()
}

/// [`find_nearest_goal`] with explicit search options.
///
/// # Errors
///
/// Returns [`RouteError::Cancelled`] if a search was cancelled.
pub fn nearest_goal(
    grid: &StoreGrid,
    start: Coord,
    goals: &[Coord],
    options: &SearchOptions<'_>,
) -> Result<Option<(Vec<Coord>, Coord)>, RouteError> {
    let mut best: Option<(Vec<Coord>, Coord)> = None;

    for &goal in goals {
        match search(grid, start, goal, options) {
            SearchOutcome::Found(path) => {
                let shorter = best
                    .as_ref()
                    .map_or(true, |(shortest, _)| path.len() < shortest.len());
                if shorter {
                    best = Some((path, goal));
                }
            }
            SearchOutcome::NoPath => {}
            SearchOutcome::Cancelled => return Err(RouteError::Cancelled),
        }
    }

    Ok(best)
}

/// Order `points` for a walk starting at `start`.
///
/// Returns the strategy used and the points in visiting order, `start`
/// excluded.
#[must_use]
pub fn order_stops(
    start: Coord,
    points: &[Coord],
    exact_limit: usize,
) -> (OrderingStrategy, Vec<Coord>) {
    let (strategy, order) = order_indices(start, points, exact_limit);
    (strategy, order.into_iter().map(|i| points[i]).collect())
}

/// Like [`order_stops`] but yields indices into `points`.
#[must_use]
pub fn order_indices(
    start: Coord,
    points: &[Coord],
    exact_limit: usize,
) -> (OrderingStrategy, Vec<usize>) {
    let strategy = OrderingStrategy::for_count(points.len(), exact_limit);
    let order = match strategy {
        OrderingStrategy::Exact => exact_order(start, points),
        OrderingStrategy::NearestNeighbor => nearest_neighbor_order(start, points),
    };
    debug!(stops = points.len(), ?strategy, "Ordered stops");
    (strategy, order)
}

/// Exhaustive ordering minimising the straight-line tour from `start`.
///
/// Permutations are visited in lexicographic index order and only a
/// strictly shorter tour replaces the best, so ties keep the earliest.
#[must_use]
pub fn exact_order(start: Coord, points: &[Coord]) -> Vec<usize> {
    struct PermutationSearch<'a> {
        points: &'a [Coord],
        used: Vec<bool>,
        current: Vec<usize>,
        best: Vec<usize>,
        best_cost: f64,
    }

    impl PermutationSearch<'_> {
        fn extend(&mut self, at: Coord, cost: f64) {
            // Tour costs only grow, so this branch cannot beat the best
            if cost >= self.best_cost {
                return;
            }
            if self.current.len() == self.points.len() {
                self.best_cost = cost;
                self.best.clone_from(&self.current);
                return;
            }
            for next in 0..self.points.len() {
                if self.used[next] {
                    continue;
                }
                let point = self.points[next];
                self.used[next] = true;
                self.current.push(next);
                self.extend(point, cost + heuristic(at, point));
                self.current.pop();
                self.used[next] = false;
            }
        }
    }

    let mut state = PermutationSearch {
        points,
        used: vec![false; points.len()],
        current: Vec::with_capacity(points.len()),
        best: (0..points.len()).collect(),
        best_cost: f64::INFINITY,
    };
    state.extend(start, 0.0);
    state.best
}

/// Greedy ordering: always walk to the closest remaining point.
///
/// Distance ties go to the point listed first.
#[must_use]
pub fn nearest_neighbor_order(start: Coord, points: &[Coord]) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut order = Vec::with_capacity(points.len());
    let mut current = start;

    while !remaining.is_empty() {
        let mut pick = 0;
        let mut pick_distance = heuristic(current, points[remaining[0]]);
        for (slot, &index) in remaining.iter().enumerate().skip(1) {
            let distance = heuristic(current, points[index]);
            if distance < pick_distance {
                pick = slot;
                pick_distance = distance;
            }
        }
        let index = remaining.remove(pick);
        order.push(index);
        current = points[index];
    }

    order
}

/// Walk through `points` in order, one A* leg per consecutive pair.
///
/// Returns an empty vector if any leg has no path, or if fewer than two
/// points are given.
#[must_use]
pub fn find_full_path(grid: &StoreGrid, points: &[Coord]) -> Vec<Coord> {
    compose_path(grid, points, &SearchOptions::default()).unwrap_or_default()
}

/// [`find_full_path`] reporting which leg failed.
///
/// The first leg is kept whole; each later leg drops its first cell, which
/// is the previous leg's last.
///
/// # Errors
///
/// Returns [`RouteError::UnreachableLeg`] for the first leg without a path,
/// or [`RouteError::Cancelled`].
pub fn compose_path(
    grid: &StoreGrid,
    points: &[Coord],
    options: &SearchOptions<'_>,
) -> Result<Vec<Coord>, RouteError> {
    let mut full_path = Vec::new();

    for (leg, pair) in points.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        let segment = match search(grid, from, to, options) {
            SearchOutcome::Found(path) => path,
            SearchOutcome::NoPath => {
                debug!(leg, %from, %to, "Leg has no path");
                return Err(RouteError::UnreachableLeg { leg, from, to });
            }
            SearchOutcome::Cancelled => return Err(RouteError::Cancelled),
        };
        if leg == 0 {
            full_path.extend(segment);
        } else {
            full_path.extend(segment.into_iter().skip(1));
        }
    }

    Ok(full_path)
}
