//! The `route` command: plan a route and report it.

use std::fmt;
use std::path::{Path, PathBuf};

use tracer_core::accessibility::Role;
use tracer_core::config::PlannerConfig;
use tracer_core::floor_plan::FloorPlan;
use tracer_core::pathfinding::CornerCutting;
use tracer_core::planner::{RoutePlan, RoutePlanner};
use tracer_core::route::OrderingStrategy;
use tracing::{debug, info};

use crate::error::ToolError;

/// Everything the `route` command was asked for.
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    /// Floor-plan export.
    pub plan: PathBuf,
    /// Items given on the command line.
    pub items: Vec<String>,
    /// Shopping-list file, one item per line.
    pub list: Option<PathBuf>,
    /// Planner config file (RON).
    pub config: Option<PathBuf>,
    /// Role override.
    pub role: Option<Role>,
    /// Cell size override.
    pub cell_size: Option<f64>,
    /// Forbid squeezing diagonally past corners.
    pub no_corner_cutting: bool,
}

impl RouteRequest {
    /// Config file merged with the command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is unusable or an override is
    /// out of range.
    pub fn planner_config(&self) -> Result<PlannerConfig, ToolError> {
        let mut config = match &self.config {
            Some(path) => PlannerConfig::load(path)?,
            None => PlannerConfig::default(),
        };
        if let Some(role) = self.role {
            config.role = role;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if self.no_corner_cutting {
            config.corner_cutting = CornerCutting::Disallow;
        }
        config.validate()?;
        Ok(config)
    }

    /// Items from `--item` followed by those in the list file.
    ///
    /// # Errors
    ///
    /// Returns an error if the list file cannot be read or nothing is left
    /// to buy.
    pub fn shopping_list(&self) -> Result<Vec<String>, ToolError> {
        let mut items: Vec<String> = self
            .items
            .iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        if let Some(path) = &self.list {
            items.extend(load_shopping_list(path)?);
        }
        if items.is_empty() {
            return Err(ToolError::EmptyShoppingList);
        }
        Ok(items)
    }
}

/// Parse a shopping-list file: one item per line, `#` starts a comment.
#[must_use]
pub fn parse_shopping_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a shopping-list file.
///
/// # Errors
///
/// Returns [`ToolError::ShoppingList`] if the file cannot be read.
pub fn load_shopping_list(path: &Path) -> Result<Vec<String>, ToolError> {
    let text = std::fs::read_to_string(path).map_err(|source| ToolError::ShoppingList {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_shopping_list(&text))
}

/// Load the plan and run the planner.
///
/// # Errors
///
/// Returns an error for unusable input or when no route exists.
pub fn plan_route(request: &RouteRequest) -> Result<(FloorPlan, RoutePlan), ToolError> {
    let config = request.planner_config()?;
    let items = request.shopping_list()?;
    let plan = FloorPlan::load(&request.plan)?;
    debug!(cells = plan.cells().len(), items = items.len(), ?config, "Planning route");

    let route = RoutePlanner::new(config).plan(&plan, &items)?;
    Ok((plan, route))
}

/// Write the route as pretty JSON.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_route(route: &RoutePlan, path: &Path) -> Result<(), ToolError> {
    let json = serde_json::to_string_pretty(route)?;
    std::fs::write(path, json).map_err(|source| ToolError::Output {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), "Route written");
    Ok(())
}

/// Human-readable route summary, printed by the `route` command.
#[derive(Debug, Clone, Copy)]
pub struct RouteSummary<'a>(pub &'a RoutePlan);

impl fmt::Display for RouteSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = self.0;
        let strategy = match route.strategy {
            OrderingStrategy::Exact => "exact",
            OrderingStrategy::NearestNeighbor => "nearest-neighbour",
        };
        writeln!(
            f,
            "Route: {} stops, {} cells, distance {:.2} ({strategy} order)",
            route.stops.len(),
            route.path.len(),
            route.total_distance,
        )?;
        if let Some(entrance) = route.entrance() {
            writeln!(f, "  Start at entrance {entrance}")?;
        }
        for (i, stop) in route.stops.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} at {} (stand at {})",
                i + 1,
                stop.name,
                stop.cell,
                stop.point
            )?;
        }
        if let Some(checkout) = route.checkout() {
            writeln!(f, "  Pay at checkout next to {checkout}")?;
        }
        if !route.skipped.is_empty() {
            writeln!(f, "Skipped:")?;
            for item in &route.skipped {
                writeln!(f, "  - {item}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;
    use tracer_core::error::RouteError;
    use tracer_test_utils::fixtures::{ascii_cells, coord, export_json};

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn store_json() -> String {
        let cells = ascii_cells(
            &["E.....", "......", "..R.R.", "......", "....S.", ".....C"],
            &[
                (coord(2, 2), "Pain"),
                (coord(2, 4), "Lait"),
                (coord(4, 4), "Farine"),
            ],
        );
        export_json(&cells, 40)
    }

    #[test]
    fn test_parse_shopping_list() {
        let text = "Pain\n\n  lait  \n# weekly\nOeufs # free range\n";
        assert_eq!(parse_shopping_list(text), vec!["Pain", "lait", "Oeufs"]);
    }

    #[test]
    fn test_shopping_list_merges_sources() {
        let list = temp_file("Lait\nFarine\n");
        let request = RouteRequest {
            items: vec!["Pain".into(), "  ".into()],
            list: Some(list.path().to_path_buf()),
            ..RouteRequest::default()
        };
        assert_eq!(request.shopping_list().unwrap(), vec!["Pain", "Lait", "Farine"]);

        let empty = RouteRequest::default();
        assert!(matches!(empty.shopping_list(), Err(ToolError::EmptyShoppingList)));
    }

    #[test]
    fn test_overrides_beat_config_file() {
        let config = temp_file("(role: Customer, cell_size: 2.0)");
        let request = RouteRequest {
            config: Some(config.path().to_path_buf()),
            role: Some(Role::Staff),
            no_corner_cutting: true,
            ..RouteRequest::default()
        };
        let planner = request.planner_config().unwrap();
        assert_eq!(planner.role, Role::Staff);
        assert_eq!(planner.corner_cutting, CornerCutting::Disallow);
        assert!((planner.cell_size - 2.0).abs() < f64::EPSILON);

        let bad = RouteRequest {
            cell_size: Some(0.0),
            ..RouteRequest::default()
        };
        assert!(matches!(bad.planner_config(), Err(ToolError::Input(_))));
    }

    #[test]
    fn test_plan_route_end_to_end() {
        let plan = temp_file(&store_json());
        let request = RouteRequest {
            plan: plan.path().to_path_buf(),
            items: vec!["lait".into(), "pain".into(), "farine".into()],
            ..RouteRequest::default()
        };
        let (_, route) = plan_route(&request).unwrap();
        assert_eq!(route.stops.len(), 2);
        assert_eq!(route.skipped.len(), 1);

        let text = RouteSummary(&route).to_string();
        assert!(text.contains("1. pain at (2, 2)"));
        assert!(text.contains("2. lait at (2, 4)"));
        assert!(text.contains("'farine' is not on this plan"));
    }

    #[test]
    fn test_route_summary_display() {
        let plan = temp_file(&store_json());
        let request = RouteRequest {
            plan: plan.path().to_path_buf(),
            items: vec!["Pain".into()],
            ..RouteRequest::default()
        };
        let (_, route) = plan_route(&request).unwrap();
        let text = RouteSummary(&route).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Route: 1 stops,"));
        assert!(lines[0].ends_with("(exact order)"));
        assert_eq!(lines[1], "  Start at entrance (0, 0)");
        assert!(lines[2].starts_with("  1. Pain at (2, 2)"));
        assert!(lines[3].starts_with("  Pay at checkout next to"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_plan_route_reports_route_error() {
        let plan = temp_file(&store_json());
        let request = RouteRequest {
            plan: plan.path().to_path_buf(),
            items: vec!["Caviar".into()],
            ..RouteRequest::default()
        };
        assert!(matches!(
            plan_route(&request),
            Err(ToolError::Route(RouteError::NoItemsFound { .. }))
        ));
    }

    #[test]
    fn test_write_route() {
        let plan = temp_file(&store_json());
        let request = RouteRequest {
            plan: plan.path().to_path_buf(),
            items: vec!["Pain".into()],
            ..RouteRequest::default()
        };
        let (_, route) = plan_route(&request).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("route.json");
        write_route(&route, &out).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["path"][0], serde_json::json!([0, 0]));
        assert_eq!(value["stops"][0]["name"], "Pain");
        assert_eq!(value["strategy"], "Exact");
    }
}
