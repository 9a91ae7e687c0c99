//! Closed-outline reconstruction from traced paths.
//!
//! A traced path is a start point plus a chain of corner and cubic
//! bezier segments. Reconstruction walks the chain and emits a flat
//! vertex ring, sampling each bezier at a fixed number of points.

use kurbo::Point;

use crate::trace::{Segment, TracedPath};

/// Number of points sampled per cubic bezier segment, endpoints
/// included. Fixed regardless of curve length so that a given trace
/// always reproduces the same vertex list.
pub const CURVE_SAMPLES: usize = 10;

/// Evaluate a cubic bezier at `CURVE_SAMPLES` uniform parameter values
/// over [0, 1], endpoints included.
///
/// `p1` is the curve start, `p4` the end, `p2`/`p3` the control points.
pub fn flatten_cubic(
    p1: Point,
    p2: Point,
    p3: Point,
    p4: Point,
) -> impl Iterator<Item = Point> {
    (0..CURVE_SAMPLES).map(move |i| {
        let t = i as f64 / (CURVE_SAMPLES - 1) as f64;
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        Point::new(
            p1.x * b0 + p2.x * b1 + p3.x * b2 + p4.x * b3,
            p1.y * b0 + p2.y * b1 + p3.y * b2 + p4.y * b3,
        )
    })
}

/// Reconstruct the closed vertex ring of one traced path.
///
/// Corner segments contribute their two points directly; curve segments
/// contribute all flattened samples, including the t=0 sample that
/// duplicates the running current point. The first and last vertices may
/// differ by flattening error; the ring is treated as implicitly closed
/// downstream.
pub fn reconstruct_path(path: &TracedPath) -> Vec<Point> {
    let mut current = path.start;
    let mut points = vec![current];

    for segment in &path.segments {
        match *segment {
            Segment::Corner(c1, c2) => {
                points.push(c1);
                points.push(c2);
                current = c2;
            }
            Segment::CurveTo(c0, c1, c2) => {
                points.extend(flatten_cubic(current, c0, c1, c2));
                current = c2;
            }
        }
    }

    points
}
