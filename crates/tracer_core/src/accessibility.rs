//! Standable points next to cells the walker cannot, or should not, occupy.
//!
//! Products sit on shelves, which block movement, so a shopping item is
//! collected from a free cell beside its shelf. Checkouts get the same
//! treatment so every route ends next to the counter.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RouteError;
use crate::floor_plan::{CellKind, CellRecord};
use crate::grid::{Coord, StoreGrid};
use crate::pathfinding::SearchOptions;
use crate::route::nearest_goal;

/// Orthogonal neighbours in lookup order: up, down, left, right.
const ACCESS_ORDER: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Who the route is for. Decides where items may be picked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    /// Shopper: shelves only.
    #[default]
    Customer,
    /// Store staff: shelves and stockroom.
    Staff,
}

impl Role {
    /// Cell kinds items may be taken from.
    #[must_use]
    pub const fn allowed_kinds(self) -> &'static [CellKind] {
        match self {
            Self::Customer => &[CellKind::Shelf],
            Self::Staff => &[CellKind::Shelf, CellKind::Stockroom],
        }
    }
}

/// A shopping-list entry placed on the plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedItem {
    /// Name as written in the shopping list.
    pub name: String,
    /// Cell holding the product.
    pub cell: Coord,
    /// Kind of that cell.
    pub kind: CellKind,
    /// Free cell the walker stands on to collect it.
    pub point: Coord,
}

/// Why a shopping-list entry was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// No allowed cell carries this product.
    NotOnPlan,
    /// The product's cell has no free orthogonal neighbour.
    NoAccessibleNeighbor {
        /// Cell holding the product.
        cell: Coord,
        /// Kind of that cell.
        kind: CellKind,
    },
}

/// A shopping-list entry left out of the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    /// Name as written in the shopping list.
    pub name: String,
    /// Why it was dropped.
    pub reason: SkipReason,
}

impl fmt::Display for SkippedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            SkipReason::NotOnPlan => write!(f, "'{}' is not on this plan", self.name),
            SkipReason::NoAccessibleNeighbor { cell, kind } => write!(
                f,
                "'{}' at {cell} ({}) has no free cell next to it",
                self.name,
                kind.tag().unwrap_or("cell")
            ),
        }
    }
}

/// Shopping-list resolution, split into usable and dropped items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingPoints {
    /// Items with a standable point, in list order.
    pub resolved: Vec<ResolvedItem>,
    /// Items left out, in list order.
    pub skipped: Vec<SkippedItem>,
}

impl ShoppingPoints {
    /// Standable points of the resolved items, in list order.
    #[must_use]
    pub fn points(&self) -> Vec<Coord> {
        self.resolved.iter().map(|item| item.point).collect()
    }
}

/// First free orthogonal neighbour of `cell`, checked up, down, left, right.
///
/// Landmarks count as free. Returns `None` when all four are blocked or
/// off the grid.
#[must_use]
pub fn find_accessible_neighbor(grid: &StoreGrid, cell: Coord) -> Option<Coord> {
    ACCESS_ORDER
        .iter()
        .filter_map(|&(d_row, d_col)| cell.offset(d_row, d_col))
        .find(|&neighbor| grid.is_passable(neighbor))
}

/// Standable point of the checkout closest to `start` by walked path.
///
/// Checkouts without a free neighbour are skipped. Returns `None` when none
/// resolves or none of the resolved points is reachable.
#[must_use]
pub fn find_nearest_accessible_checkout(
    grid: &StoreGrid,
    start: Coord,
    checkouts: &[Coord],
) -> Option<Coord> {
    nearest_accessible_checkout(grid, start, checkouts, &SearchOptions::default())
        .ok()
        .flatten()
}

/// [`find_nearest_accessible_checkout`] with explicit search options.
///
/// # Errors
///
/// Returns [`RouteError::Cancelled`] if the search was cancelled.
pub fn nearest_accessible_checkout(
    grid: &StoreGrid,
    start: Coord,
    checkouts: &[Coord],
    options: &SearchOptions<'_>,
) -> Result<Option<Coord>, RouteError> {
    let accessible: Vec<Coord> = checkouts
        .iter()
        .filter_map(|&checkout| {
            let access = find_accessible_neighbor(grid, checkout);
            if access.is_none() {
                warn!(%checkout, "Checkout has no free cell next to it");
            }
            access
        })
        .collect();

    if accessible.is_empty() {
        return Ok(None);
    }
    Ok(nearest_goal(grid, start, &accessible, options)?.map(|(_, goal)| goal))
}

/// Resolve each shopping-list entry to a standable point.
///
/// Only cells whose kind is in `allowed` are searched. The first cell whose
/// product matches (case-insensitively) is used; if it has no free
/// neighbour the entry is skipped rather than trying another cell. Every
/// skip is logged and returned.
pub fn find_shopping_points<S: AsRef<str>>(
    cells: &[CellRecord],
    shopping_list: &[S],
    grid: &StoreGrid,
    allowed: &[CellKind],
) -> ShoppingPoints {
    let mut result = ShoppingPoints::default();

    for item in shopping_list {
        let name = item.as_ref();
        let found = cells.iter().find(|cell| {
            allowed.contains(&cell.kind)
                && cell.product.as_ref().is_some_and(|product| product.matches(name))
        });

        let Some(cell) = found else {
            warn!(item = name, "Item not found on the plan");
            result.skipped.push(SkippedItem {
                name: name.to_string(),
                reason: SkipReason::NotOnPlan,
            });
            continue;
        };

        let coord = cell.coord();
        match find_accessible_neighbor(grid, coord) {
            Some(point) => result.resolved.push(ResolvedItem {
                name: name.to_string(),
                cell: coord,
                kind: cell.kind,
                point,
            }),
            None => {
                warn!(item = name, cell = %coord, "No free cell next to item");
                result.skipped.push(SkippedItem {
                    name: name.to_string(),
                    reason: SkipReason::NoAccessibleNeighbor {
                        cell: coord,
                        kind: cell.kind,
                    },
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor_plan::ProductRef;

    fn c(row: u32, col: u32) -> Coord {
        Coord::new(row, col)
    }

    fn shelf(row: u32, col: u32, product: &str) -> CellRecord {
        CellRecord::new(row, col, CellKind::Shelf).with_product(ProductRef::Name(product.into()))
    }

    #[test]
    fn test_neighbor_lookup_order() {
        let grid = StoreGrid::parse_ascii(&["...", ".#.", "..."]);
        // Up first
        assert_eq!(find_accessible_neighbor(&grid, c(1, 1)), Some(c(0, 1)));

        let grid = StoreGrid::parse_ascii(&[".#.", ".#.", "..."]);
        // Up blocked, down next
        assert_eq!(find_accessible_neighbor(&grid, c(1, 1)), Some(c(2, 1)));

        let grid = StoreGrid::parse_ascii(&[".#.", ".##", ".#."]);
        // Up and down blocked, then left
        assert_eq!(find_accessible_neighbor(&grid, c(1, 1)), Some(c(1, 0)));
    }

    #[test]
    fn test_single_free_neighbor() {
        let grid = StoreGrid::parse_ascii(&["###", "##.", "###"]);
        assert_eq!(find_accessible_neighbor(&grid, c(1, 1)), Some(c(1, 2)));
    }

    #[test]
    fn test_enclosed_cell_has_no_neighbor() {
        let grid = StoreGrid::parse_ascii(&[".#.", "###", ".#."]);
        assert_eq!(find_accessible_neighbor(&grid, c(1, 1)), None);
    }

    #[test]
    fn test_grid_edge_neighbors() {
        let grid = StoreGrid::parse_ascii(&["#.", "##"]);
        assert_eq!(find_accessible_neighbor(&grid, c(0, 0)), Some(c(0, 1)));
        let grid = StoreGrid::parse_ascii(&["#"]);
        assert_eq!(find_accessible_neighbor(&grid, c(0, 0)), None);
    }

    #[test]
    fn test_landmark_counts_as_free() {
        let grid = StoreGrid::parse_ascii(&["#C", "##"]);
        assert_eq!(find_accessible_neighbor(&grid, c(0, 0)), Some(c(0, 1)));
    }

    #[test]
    fn test_nearest_checkout() {
        let grid = StoreGrid::parse_ascii(&[
            "C.....",
            "......",
            "......",
            ".....C",
        ]);
        let checkouts = [c(0, 0), c(3, 5)];
        // Checkout (0,0): up is off-grid, down (1,0) is free
        assert_eq!(
            find_nearest_accessible_checkout(&grid, c(1, 1), &checkouts),
            Some(c(1, 0))
        );
        // Checkout (3,5): up (2,5) is free
        assert_eq!(
            find_nearest_accessible_checkout(&grid, c(2, 4), &checkouts),
            Some(c(2, 5))
        );
    }

    #[test]
    fn test_nearest_checkout_skips_enclosed() {
        let grid = StoreGrid::parse_ascii(&["....#", "...#C", "....#"]);
        let checkouts = [c(1, 4)];
        // (1,4): up (0,4) and down (2,4) are walls, left (1,3) wall, right off-grid
        assert_eq!(find_nearest_accessible_checkout(&grid, c(0, 0), &checkouts), None);
        assert_eq!(find_nearest_accessible_checkout(&grid, c(0, 0), &[]), None);
    }

    #[test]
    fn test_unreachable_checkout() {
        let grid = StoreGrid::parse_ascii(&["..#..", "..#.C", "..#.."]);
        assert_eq!(find_nearest_accessible_checkout(&grid, c(0, 0), &[c(1, 4)]), None);
    }

    #[test]
    fn test_shopping_points_resolution() {
        let cells = vec![
            shelf(1, 1, "Pomme"),
            shelf(1, 3, "Poire"),
            CellRecord::new(3, 3, CellKind::Wall),
        ];
        let grid = StoreGrid::build(&cells).grid;

        let points = find_shopping_points(&cells, &["poire", "POMME"], &grid, &[CellKind::Shelf]);
        assert!(points.skipped.is_empty());
        assert_eq!(points.points(), vec![c(0, 3), c(0, 1)]);
        assert_eq!(points.resolved[0].name, "poire");
        assert_eq!(points.resolved[0].cell, c(1, 3));
    }

    #[test]
    fn test_shopping_points_skips_missing_and_enclosed() {
        let cells = vec![
            CellRecord::new(0, 1, CellKind::Wall),
            CellRecord::new(1, 0, CellKind::Wall),
            CellRecord::new(1, 2, CellKind::Wall),
            CellRecord::new(2, 1, CellKind::Wall),
            shelf(1, 1, "Sel"),
            shelf(3, 3, "Sucre"),
        ];
        let grid = StoreGrid::build(&cells).grid;

        let points = find_shopping_points(
            &cells,
            &["Sel", "Caviar", "Sucre"],
            &grid,
            Role::Customer.allowed_kinds(),
        );
        assert_eq!(points.points(), vec![c(2, 3)]);
        assert_eq!(
            points.skipped,
            vec![
                SkippedItem {
                    name: "Sel".into(),
                    reason: SkipReason::NoAccessibleNeighbor {
                        cell: c(1, 1),
                        kind: CellKind::Shelf,
                    },
                },
                SkippedItem {
                    name: "Caviar".into(),
                    reason: SkipReason::NotOnPlan,
                },
            ]
        );
    }

    #[test]
    fn test_role_restricts_source_cells() {
        let cells = vec![
            CellRecord::new(1, 1, CellKind::Stockroom)
                .with_product(ProductRef::Categorized {
                    category: "Boissons".into(),
                    product: "Eau".into(),
                }),
            CellRecord::new(2, 2, CellKind::Unknown),
        ];
        let grid = StoreGrid::build(&cells).grid;

        let customer = find_shopping_points(&cells, &["eau"], &grid, Role::Customer.allowed_kinds());
        assert!(customer.resolved.is_empty());
        assert_eq!(customer.skipped[0].reason, SkipReason::NotOnPlan);

        let staff = find_shopping_points(&cells, &["eau"], &grid, Role::Staff.allowed_kinds());
        assert_eq!(staff.resolved.len(), 1);
        assert_eq!(staff.resolved[0].kind, CellKind::Stockroom);
        assert_eq!(staff.resolved[0].point, c(0, 1));
    }

    #[test]
    fn test_skipped_item_display() {
        let missing = SkippedItem {
            name: "Caviar".into(),
            reason: SkipReason::NotOnPlan,
        };
        assert_eq!(missing.to_string(), "'Caviar' is not on this plan");

        let enclosed = SkippedItem {
            name: "Sel".into(),
            reason: SkipReason::NoAccessibleNeighbor {
                cell: c(1, 1),
                kind: CellKind::Shelf,
            },
        };
        assert_eq!(
            enclosed.to_string(),
            "'Sel' at (1, 1) (Rayon) has no free cell next to it"
        );
    }
}
