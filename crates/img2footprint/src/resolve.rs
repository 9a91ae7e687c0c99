//! Hole resolution: group reconstructed rings by sign, subtract each
//! group's holes from its outline, and reduce everything to simple
//! (hole-free) rings ready for polygon primitives.

use geo::{BooleanOps, LineString, MultiPolygon, Polygon};
use kurbo::Point;
use log::debug;

use crate::error::ConvertError;
use crate::trace::Sign;

/// One outline with the holes traced inside it.
#[derive(Debug, Clone)]
struct OutlineGroup {
    outer: Vec<Point>,
    holes: Vec<Vec<Point>>,
}

/// Reduce signed rings, in trace emission order, to simple polygons.
///
/// An `Outer` ring opens a new group; a `Hole` ring belongs to the most
/// recently opened group. A hole with no open group means the trace
/// stream is malformed and aborts the run. Groups with holes go through
/// one boolean difference covering all their holes at once; a
/// difference that splits the outline produces several independent
/// rings, all of which are emitted.
pub fn resolve(rings: Vec<(Vec<Point>, Sign)>) -> Result<Vec<Vec<Point>>, ConvertError> {
    let mut groups: Vec<OutlineGroup> = Vec::new();
    for (ring, sign) in rings {
        match sign {
            Sign::Outer => groups.push(OutlineGroup {
                outer: ring,
                holes: Vec::new(),
            }),
            Sign::Hole => match groups.last_mut() {
                Some(group) => group.holes.push(ring),
                None => return Err(ConvertError::HoleBeforeOutline),
            },
        }
    }

    let mut resolved = Vec::new();
    for group in groups {
        if group.holes.is_empty() {
            resolved.push(group.outer);
            continue;
        }

        let outer = MultiPolygon::new(vec![to_geo(&group.outer)?]);
        let holes = MultiPolygon::new(
            group
                .holes
                .iter()
                .map(|h| to_geo(h))
                .collect::<Result<Vec<_>, _>>()?,
        );

        let difference = outer.difference(&holes);
        debug!(
            "subtracted {} hole(s), {} ring(s) remain",
            holes.0.len(),
            difference.0.len()
        );
        for polygon in difference {
            resolved.push(stitch_simple(&polygon));
        }
    }

    Ok(resolved)
}

fn to_geo(ring: &[Point]) -> Result<Polygon, ConvertError> {
    if ring.len() < 3 {
        return Err(ConvertError::DegeneratePolygon(ring.len()));
    }
    let coords: Vec<(f64, f64)> = ring.iter().map(|p| (p.x, p.y)).collect();
    Ok(Polygon::new(LineString::from(coords), vec![]))
}

/// Collapse a polygon's interior rings into its exterior, producing one
/// simple ring.
///
/// Each interior ring is spliced in through a zero-width bridge at the
/// closest vertex pair, the same shape a keyhole slit gives in CAD
/// polygon output. The bridge edges cancel in the signed area, so the
/// stitched ring encloses exactly the outline-minus-holes region.
fn stitch_simple(polygon: &Polygon) -> Vec<Point> {
    let mut ring = open_ring(polygon.exterior());

    for interior in polygon.interiors() {
        let hole = open_ring(interior);
        if hole.is_empty() || ring.is_empty() {
            continue;
        }

        let (mut best_i, mut best_j, mut best_d) = (0usize, 0usize, f64::INFINITY);
        for (i, p) in ring.iter().enumerate() {
            for (j, q) in hole.iter().enumerate() {
                let d = (p.x - q.x) * (p.x - q.x) + (p.y - q.y) * (p.y - q.y);
                if d < best_d {
                    best_d = d;
                    best_i = i;
                    best_j = j;
                }
            }
        }

        let mut next = Vec::with_capacity(ring.len() + hole.len() + 2);
        next.extend_from_slice(&ring[..=best_i]);
        next.extend_from_slice(&hole[best_j..]);
        next.extend_from_slice(&hole[..=best_j]);
        next.extend_from_slice(&ring[best_i..]);
        ring = next;
    }

    ring
}

/// Ring coordinates without the duplicated closing vertex geo stores.
fn open_ring(line: &LineString) -> Vec<Point> {
    let mut points: Vec<Point> = line.coords().map(|c| Point::new(c.x, c.y)).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}
