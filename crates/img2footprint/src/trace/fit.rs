//! Curve fitting over raw pixel contours.
//!
//! Border following yields one vertex per border pixel, a staircase.
//! A few passes of neighbor smoothing knock the staircase down, then
//! kurbo fits an optimized cubic bezier path through the polyline.

use kurbo::{fit_to_bezpath_opt, simplify::SimplifyBezPath, BezPath, Point};

/// Neighbor-smoothing passes applied before fitting. Enough to remove
/// single-pixel staircase noise without rounding real corners away.
const SMOOTH_ITERATIONS: usize = 3;

/// Contours with fewer points than this skip fitting entirely and are
/// kept as straight line chains.
pub const MIN_FIT_POINTS: usize = 8;

/// Fit a closed cubic bezier path through a pixel contour.
///
/// `tolerance` is the maximum fitting error in working pixels; larger
/// values give smoother, sparser curves. Returns an empty path when the
/// contour is too short to fit.
pub fn fit_contour(points: &[(f64, f64)], tolerance: f64) -> BezPath {
    if points.len() < MIN_FIT_POINTS {
        return BezPath::new();
    }

    let smoothed = smooth_closed(points, SMOOTH_ITERATIONS);
    let polyline = points_to_path(&smoothed);
    fit_to_bezpath_opt(
        &SimplifyBezPath::new(polyline.elements().iter().copied()),
        tolerance,
    )
}

/// Laplacian smoothing of a closed ring: each vertex moves halfway
/// toward the average of its two neighbors.
fn smooth_closed(points: &[(f64, f64)], iterations: usize) -> Vec<(f64, f64)> {
    let n = points.len();
    let mut current = points.to_vec();
    for _ in 0..iterations {
        let mut next = Vec::with_capacity(n);
        for i in 0..n {
            let prev = current[(i + n - 1) % n];
            let here = current[i];
            let after = current[(i + 1) % n];
            next.push((
                0.25 * prev.0 + 0.5 * here.0 + 0.25 * after.0,
                0.25 * prev.1 + 0.5 * here.1 + 0.25 * after.1,
            ));
        }
        current = next;
    }
    current
}

fn points_to_path(points: &[(f64, f64)]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(&(x, y)) = iter.next() {
        path.move_to(Point::new(x, y));
        for &(x, y) in iter {
            path.line_to(Point::new(x, y));
        }
        path.close_path();
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape;

    fn circle_points(cx: f64, cy: f64, r: f64, n: usize) -> Vec<(f64, f64)> {
        (0..n)
            .map(|i| {
                let a = i as f64 / n as f64 * std::f64::consts::TAU;
                (cx + r * a.cos(), cy + r * a.sin())
            })
            .collect()
    }

    #[test]
    fn test_short_contour_skipped() {
        let tri = vec![(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)];
        assert!(fit_contour(&tri, 1.0).elements().is_empty());
    }

    #[test]
    fn test_fit_circle_stays_close() {
        let pts = circle_points(50.0, 50.0, 30.0, 120);
        let path = fit_contour(&pts, 1.0);
        assert!(!path.elements().is_empty());
        // Fitted area should be near the circle area; smoothing and
        // fitting tolerance only nibble at the edge.
        let area = path.area().abs();
        let expected = std::f64::consts::PI * 30.0 * 30.0;
        assert!((area - expected).abs() / expected < 0.05);
    }

    #[test]
    fn test_smooth_preserves_count() {
        let pts = circle_points(0.0, 0.0, 10.0, 40);
        assert_eq!(smooth_closed(&pts, 3).len(), 40);
    }

    #[test]
    fn test_smooth_fixed_point_on_straight_run() {
        // Collinear evenly spaced points do not move.
        let pts: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 0.0)).collect();
        let out = smooth_closed(&pts, 1);
        // Interior of the run is unchanged (ends wrap around the ring).
        for i in 2..8 {
            assert!((out[i].0 - pts[i].0).abs() < 1e-12);
            assert!((out[i].1 - pts[i].1).abs() < 1e-12);
        }
    }
}
