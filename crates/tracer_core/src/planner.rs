//! Route-generation entry point.
//!
//! One call turns a floor-plan and a shopping list into a walkable route:
//!
//! 1. Build the obstacle grid and find the entrance and checkouts.
//! 2. Resolve each shopping item to a free cell beside its shelf.
//! 3. Order the stops (exact for short lists, greedy otherwise).
//! 4. Append the checkout nearest to the last stop.
//! 5. Run one A* search per leg and stitch the legs.
//!
//! Nothing is cached between calls; each request works on its own grid.

use std::sync::atomic::AtomicBool;

use serde::Serialize;
use tracing::{debug, info};

use crate::accessibility::{
    find_shopping_points, nearest_accessible_checkout, ResolvedItem, SkippedItem,
};
use crate::config::PlannerConfig;
use crate::error::RouteError;
use crate::floor_plan::FloorPlan;
use crate::grid::{Coord, GridBuild, StoreGrid};
use crate::metrics::path_length;
use crate::route::{compose_path, order_indices, OrderingStrategy};

/// A computed route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    /// Every cell walked, entrance to checkout.
    pub path: Vec<Coord>,
    /// Entrance, each stop in visiting order, then the checkout point.
    pub waypoints: Vec<Coord>,
    /// Collected items in visiting order.
    pub stops: Vec<ResolvedItem>,
    /// Items left out of the route.
    pub skipped: Vec<SkippedItem>,
    /// How the visiting order was chosen.
    pub strategy: OrderingStrategy,
    /// Walked length, scaled by the configured cell size.
    pub total_distance: f64,
}

impl RoutePlan {
    /// Entrance cell.
    #[must_use]
    pub fn entrance(&self) -> Option<Coord> {
        self.waypoints.first().copied()
    }

    /// Standable point next to the chosen checkout.
    #[must_use]
    pub fn checkout(&self) -> Option<Coord> {
        self.waypoints.last().copied()
    }
}

/// Stateless route planner; holds only its configuration.
#[derive(Debug, Clone, Default)]
pub struct RoutePlanner {
    config: PlannerConfig,
}

impl RoutePlanner {
    /// Create a planner.
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Planner configuration.
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a route through `shopping_list` on `plan`.
    ///
    /// # Errors
    ///
    /// Returns the [`RouteError`] describing why no route exists.
    pub fn plan<S: AsRef<str>>(
        &self,
        plan: &FloorPlan,
        shopping_list: &[S],
    ) -> Result<RoutePlan, RouteError> {
        self.run(plan, shopping_list, None)
    }

    /// Like [`RoutePlanner::plan`], stopping early once `cancel` is set.
    ///
    /// # Errors
    ///
    /// As [`RoutePlanner::plan`], plus [`RouteError::Cancelled`].
    pub fn plan_with_cancel<S: AsRef<str>>(
        &self,
        plan: &FloorPlan,
        shopping_list: &[S],
        cancel: &AtomicBool,
    ) -> Result<RoutePlan, RouteError> {
        self.run(plan, shopping_list, Some(cancel))
    }

    fn run<S: AsRef<str>>(
        &self,
        plan: &FloorPlan,
        shopping_list: &[S],
        cancel: Option<&AtomicBool>,
    ) -> Result<RoutePlan, RouteError> {
        let GridBuild {
            grid,
            entrance,
            checkouts,
        } = StoreGrid::build(plan.cells());
        let entrance = entrance.ok_or(RouteError::NoEntrance)?;
        let options = self.config.search_options(cancel);

        let shopping = find_shopping_points(
            plan.cells(),
            shopping_list,
            &grid,
            self.config.role.allowed_kinds(),
        );
        if shopping.resolved.is_empty() {
            return Err(RouteError::NoItemsFound {
                skipped: shopping.skipped,
            });
        }

        let points = shopping.points();
        let (strategy, order) =
            order_indices(entrance, &points, self.config.exact_ordering_limit);
        let mut resolved: Vec<Option<ResolvedItem>> =
            shopping.resolved.into_iter().map(Some).collect();
        let stops: Vec<ResolvedItem> = order
            .iter()
            .filter_map(|&index| resolved[index].take())
            .collect();

        let last_stop = stops.last().map_or(entrance, |item| item.point);
        let checkout = nearest_accessible_checkout(&grid, last_stop, &checkouts, &options)?
            .ok_or_else(|| RouteError::NoAccessibleCheckout {
                checkouts: checkouts.clone(),
            })?;

        let mut waypoints = Vec::with_capacity(stops.len() + 2);
        waypoints.push(entrance);
        waypoints.extend(stops.iter().map(|item| item.point));
        waypoints.push(checkout);
        debug!(?waypoints, "Stops ordered");

        let path = compose_path(&grid, &waypoints, &options)?;
        let total_distance = path_length(&path, self.config.cell_size);

        info!(
            stops = stops.len(),
            skipped = shopping.skipped.len(),
            cells = path.len(),
            total_distance,
            "Route planned"
        );

        Ok(RoutePlan {
            path,
            waypoints,
            stops,
            skipped: shopping.skipped,
            strategy,
            total_distance,
        })
    }
}
