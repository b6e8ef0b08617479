//! Distance helpers shared by the search and the route composer.

use crate::grid::Coord;

/// Real-world length of one grid cell when none is configured.
pub const DEFAULT_CELL_SIZE: f64 = 1.0;

/// Straight-line distance between two cells, in cells.
///
/// Used as the A* heuristic, as the per-step cost (1 or √2) and to score
/// visiting orders.
#[inline]
#[must_use]
pub fn heuristic(a: Coord, b: Coord) -> f64 {
    let d_row = f64::from(a.row) - f64::from(b.row);
    let d_col = f64::from(a.col) - f64::from(b.col);
    d_row.hypot(d_col)
}

/// Length of a walked path, scaled by `cell_size`.
///
/// Empty and single-point paths have length zero.
#[must_use]
pub fn path_length(path: &[Coord], cell_size: f64) -> f64 {
    path.windows(2)
        .map(|pair| heuristic(pair[0], pair[1]) * cell_size)
        .sum()
}

/// Sum of straight-line distances between consecutive points, in cells.
#[must_use]
pub fn sequence_length(points: &[Coord]) -> f64 {
    points
        .windows(2)
        .map(|pair| heuristic(pair[0], pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_heuristic() {
        assert!((heuristic(Coord::new(0, 0), Coord::new(3, 4)) - 5.0).abs() < EPS);
        assert!((heuristic(Coord::new(2, 2), Coord::new(2, 2))).abs() < EPS);
        assert!(
            (heuristic(Coord::new(1, 1), Coord::new(0, 0)) - std::f64::consts::SQRT_2).abs() < EPS
        );
    }

    #[test]
    fn test_heuristic_is_symmetric() {
        let a = Coord::new(7, 1);
        let b = Coord::new(2, 9);
        assert!((heuristic(a, b) - heuristic(b, a)).abs() < EPS);
    }

    #[test]
    fn test_path_length() {
        let path = [
            Coord::new(0, 0),
            Coord::new(0, 1),
            Coord::new(1, 2),
            Coord::new(2, 2),
        ];
        let expected = 2.0 + std::f64::consts::SQRT_2;
        assert!((path_length(&path, 1.0) - expected).abs() < EPS);
        assert!((path_length(&path, 0.5) - expected * 0.5).abs() < EPS);
    }

    #[test]
    fn test_path_length_degenerate() {
        assert!(path_length(&[], 1.0).abs() < EPS);
        assert!(path_length(&[Coord::new(3, 3)], 2.0).abs() < EPS);
    }

    #[test]
    fn test_sequence_length() {
        let points = [Coord::new(0, 0), Coord::new(0, 4), Coord::new(3, 0)];
        assert!((sequence_length(&points) - 9.0).abs() < EPS);
    }
}
