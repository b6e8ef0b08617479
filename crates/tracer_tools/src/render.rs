//! ASCII overview of a floor-plan and, optionally, a route across it.
//!
//! | char | meaning |
//! |------|---------|
//! | `#`  | shelf or wall |
//! | `s`  | stockroom |
//! | `E`  | entrance |
//! | `C`  | checkout |
//! | `*`  | walked cell |
//! | `1`-`9`, `+` | stop in visiting order (`+` past the ninth) |
//! | `.`  | floor |

use tracer_core::floor_plan::{CellKind, FloorPlan};
use tracer_core::grid::Coord;
use tracer_core::planner::RoutePlan;

/// ANSI color codes.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// ASCII rendering options.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Use colored output (ANSI).
    pub use_color: bool,
    /// Append a legend under the map.
    pub show_legend: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            show_legend: true,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Floor,
    Blocked,
    Stock,
    Entrance,
    Checkout,
    Path,
    Stop(usize),
}

impl Glyph {
    fn char(self) -> char {
        match self {
            Self::Floor => '.',
            Self::Blocked => '#',
            Self::Stock => 's',
            Self::Entrance => 'E',
            Self::Checkout => 'C',
            Self::Path => '*',
            Self::Stop(n) => u32::try_from(n)
                .ok()
                .filter(|n| (1..=9).contains(n))
                .and_then(|n| char::from_digit(n, 10))
                .unwrap_or('+'),
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::Floor | Self::Stock => "",
            Self::Blocked => colors::GRAY,
            Self::Entrance | Self::Checkout => colors::CYAN,
            Self::Path => colors::GREEN,
            Self::Stop(_) => colors::YELLOW,
        }
    }
}

fn base_glyph(kind: CellKind) -> Glyph {
    match kind {
        CellKind::Shelf | CellKind::Wall => Glyph::Blocked,
        CellKind::Stockroom => Glyph::Stock,
        CellKind::Entrance => Glyph::Entrance,
        CellKind::Checkout => Glyph::Checkout,
        CellKind::Unknown => Glyph::Floor,
    }
}

/// Render `plan`, overlaying `route` when given.
///
/// Blocked cells keep their glyph when several records share a coordinate,
/// matching how the planner builds its grid. The canvas is bounded by
/// [`tracer_core::floor_plan::MAX_GRID_SIDE`], since a [`FloorPlan`] only
/// holds cells inside it.
#[must_use]
pub fn render(plan: &FloorPlan, route: Option<&RoutePlan>, config: &RenderConfig) -> String {
    let rows = plan.cells().iter().map(|c| c.row as usize + 1).max().unwrap_or(0);
    let cols = plan.cells().iter().map(|c| c.col as usize + 1).max().unwrap_or(0);
    let mut grid = vec![vec![Glyph::Floor; cols]; rows];

    for cell in plan.cells() {
        let slot = &mut grid[cell.row as usize][cell.col as usize];
        if *slot != Glyph::Blocked {
            *slot = base_glyph(cell.kind);
        }
    }

    if let Some(route) = route {
        let mut put = |at: Coord, glyph: Glyph, over_landmarks: bool| {
            if let Some(slot) = grid
                .get_mut(at.row as usize)
                .and_then(|row| row.get_mut(at.col as usize))
            {
                let landmark = matches!(*slot, Glyph::Entrance | Glyph::Checkout);
                if over_landmarks || !landmark {
                    *slot = glyph;
                }
            }
        };
        for &step in &route.path {
            put(step, Glyph::Path, false);
        }
        for (i, stop) in route.stops.iter().enumerate() {
            put(stop.point, Glyph::Stop(i + 1), true);
        }
    }

    let mut output = String::new();
    for row in &grid {
        for &glyph in row {
            let color = glyph.color();
            if config.use_color && !color.is_empty() {
                output.push_str(color);
                output.push(glyph.char());
                output.push_str(colors::RESET);
            } else {
                output.push(glyph.char());
            }
        }
        output.push('\n');
    }

    if config.show_legend {
        if config.use_color {
            output.push_str(colors::BOLD);
        }
        output.push_str("Legend: # shelf/wall  s stock  E entrance  C checkout  * path  1-9 stops");
        if config.use_color {
            output.push_str(colors::RESET);
        }
        output.push('\n');
    }

    output
}
