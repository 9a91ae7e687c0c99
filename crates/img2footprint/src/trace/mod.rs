//! Bitmap tracer: turns the normalized greyscale raster into signed
//! paths of corner and cubic bezier segments.
//!
//! Border following (`contours`) classifies each closed border as an
//! outline or a hole; curve fitting (`fit`) replaces the pixel
//! staircase with beziers. The result is deterministic for a fixed
//! raster and fixed parameters.

mod contours;
mod fit;

use image::{GrayImage, Luma};
use kurbo::{BezPath, PathEl, Point};
use log::debug;

use self::contours::RawContour;

/// Luma threshold separating ink from background. Pixels darker than
/// this are traced as foreground.
const INK_THRESHOLD: u8 = 128;

/// Whether a traced path is an outer boundary or a hole boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Outer,
    Hole,
}

/// One piece of a traced path chain. The implicit start of each segment
/// is the end point of the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Two line edges through `c1` then `c2`.
    Corner(Point, Point),
    /// Cubic bezier from the current point with controls `c0`, `c1` and
    /// end point `c2`.
    CurveTo(Point, Point, Point),
}

/// A closed traced boundary: start point, continuous segment chain, and
/// the outline/hole sign.
#[derive(Debug, Clone)]
pub struct TracedPath {
    pub start: Point,
    pub segments: Vec<Segment>,
    pub sign: Sign,
}

/// Tracer tuning parameters.
#[derive(Debug, Clone, Copy)]
pub struct TraceParams {
    /// Maximum curve fitting error in working pixels. Larger values
    /// give smoother paths with fewer segments.
    pub curve_tolerance: f64,
    /// Minimum feature size in square pixels; smaller contours are
    /// dropped as speckle.
    pub min_feature_area: f64,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            curve_tolerance: 1.0,
            min_feature_area: 25.0,
        }
    }
}

/// Trace all ink boundaries of a greyscale raster.
///
/// Emission order groups each outline with the holes it encloses: an
/// `Outer` path is always followed by its own `Hole` paths before the
/// next `Outer` appears.
pub fn trace_bitmap(raster: &GrayImage, params: &TraceParams) -> Vec<TracedPath> {
    let binary = binarize(raster);
    let raw = contours::extract(&binary, params.min_feature_area);
    debug!("traced {} contour(s)", raw.len());

    raw.iter()
        .filter_map(|contour| to_traced_path(contour, params))
        .collect()
}

/// Threshold to a binary image with ink as foreground.
fn binarize(raster: &GrayImage) -> GrayImage {
    GrayImage::from_fn(raster.width(), raster.height(), |x, y| {
        if raster.get_pixel(x, y)[0] < INK_THRESHOLD {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

fn to_traced_path(contour: &RawContour, params: &TraceParams) -> Option<TracedPath> {
    let sign = if contour.is_outer {
        Sign::Outer
    } else {
        Sign::Hole
    };

    let fitted = fit::fit_contour(&contour.points, params.curve_tolerance);
    if let Some(path) = path_to_segments(&fitted, sign) {
        return Some(path);
    }

    // Fitting declined (contour too short) or produced nothing usable:
    // keep the raw pixel ring as a corner chain.
    corner_chain(&contour.points, sign)
}

/// Convert a fitted bezier path into the segment chain representation.
fn path_to_segments(path: &BezPath, sign: Sign) -> Option<TracedPath> {
    let mut elements = path.elements().iter();
    let start = match elements.next()? {
        PathEl::MoveTo(p) => *p,
        _ => return None,
    };

    let mut current = start;
    let mut segments = Vec::new();
    for el in elements {
        match *el {
            PathEl::LineTo(p) => {
                segments.push(Segment::Corner(current.midpoint(p), p));
                current = p;
            }
            PathEl::QuadTo(c, p) => {
                // Degree-raise to a cubic.
                let c0 = current + (c - current) * (2.0 / 3.0);
                let c1 = p + (c - p) * (2.0 / 3.0);
                segments.push(Segment::CurveTo(c0, c1, p));
                current = p;
            }
            PathEl::CurveTo(c0, c1, p) => {
                segments.push(Segment::CurveTo(c0, c1, p));
                current = p;
            }
            PathEl::ClosePath => {
                if current.distance(start) > 1e-9 {
                    segments.push(Segment::Corner(current.midpoint(start), start));
                    current = start;
                }
            }
            PathEl::MoveTo(_) => break,
        }
    }

    if segments.is_empty() {
        return None;
    }
    Some(TracedPath {
        start,
        segments,
        sign,
    })
}

/// Straight-line fallback chain for contours below the fitting floor.
fn corner_chain(points: &[(f64, f64)], sign: Sign) -> Option<TracedPath> {
    if points.len() < 3 {
        return None;
    }
    let start = Point::new(points[0].0, points[0].1);
    let mut current = start;
    let mut segments = Vec::with_capacity(points.len());
    for &(x, y) in &points[1..] {
        let p = Point::new(x, y);
        segments.push(Segment::Corner(current.midpoint(p), p));
        current = p;
    }
    segments.push(Segment::Corner(current.midpoint(start), start));
    Some(TracedPath {
        start,
        segments,
        sign,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: u32, h: u32, ink: &[(u32, u32, u32, u32)]) -> GrayImage {
        let mut img = GrayImage::from_pixel(w, h, Luma([255]));
        for &(x0, y0, x1, y1) in ink {
            for y in y0..y1 {
                for x in x0..x1 {
                    img.put_pixel(x, y, Luma([0]));
                }
            }
        }
        img
    }

    #[test]
    fn test_solid_block_traces_one_outline() {
        let img = canvas(80, 80, &[(10, 10, 70, 70)]);
        let paths = trace_bitmap(&img, &TraceParams::default());
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].sign, Sign::Outer);
        assert!(!paths[0].segments.is_empty());
    }

    #[test]
    fn test_ring_traces_outline_then_hole() {
        let mut img = canvas(100, 100, &[(10, 10, 90, 90)]);
        // Punch a light window in the middle.
        for y in 35..65 {
            for x in 35..65 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        let paths = trace_bitmap(&img, &TraceParams::default());
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].sign, Sign::Outer);
        assert_eq!(paths[1].sign, Sign::Hole);
    }

    #[test]
    fn test_speckle_filtered_by_min_area() {
        let img = canvas(80, 80, &[(10, 10, 70, 70), (2, 2, 5, 5)]);
        let paths = trace_bitmap(&img, &TraceParams::default());
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_deterministic() {
        let img = canvas(80, 80, &[(10, 10, 70, 40), (20, 50, 60, 75)]);
        let a = trace_bitmap(&img, &TraceParams::default());
        let b = trace_bitmap(&img, &TraceParams::default());
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.start, pb.start);
            assert_eq!(pa.segments, pb.segments);
        }
    }

    #[test]
    fn test_corner_chain_closes() {
        let tri = vec![(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)];
        let path = corner_chain(&tri, Sign::Outer).unwrap();
        assert_eq!(path.segments.len(), 3);
        match path.segments[2] {
            Segment::Corner(_, c2) => assert_eq!(c2, path.start),
            _ => panic!("expected corner"),
        }
    }
}
