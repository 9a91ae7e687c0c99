//! Border following over the binary raster.
//!
//! Wraps `imageproc`'s Suzuki-Abe contour finder and re-orders its
//! output so that every outer contour is immediately followed by its
//! hole contours. Downstream grouping relies on that emission order.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType, Contour};

/// One raw contour in working-pixel coordinates.
#[derive(Debug, Clone)]
pub struct RawContour {
    pub points: Vec<(f64, f64)>,
    pub is_outer: bool,
}

/// Extract contours from a binary image (non-zero pixels are
/// foreground). Contours smaller than `min_area` square pixels are
/// suppressed as speckle, holes included.
pub fn extract(binary: &GrayImage, min_area: f64) -> Vec<RawContour> {
    let found: Vec<Contour<i32>> = find_contours(binary);

    let keep: Vec<bool> = found
        .iter()
        .map(|c| c.points.len() >= 3 && signed_area(&as_f64(c)).abs() >= min_area)
        .collect();

    let mut ordered = Vec::new();
    for (i, contour) in found.iter().enumerate() {
        if contour.border_type != BorderType::Outer || !keep[i] {
            continue;
        }
        ordered.push(RawContour {
            points: as_f64(contour),
            is_outer: true,
        });
        for (j, hole) in found.iter().enumerate() {
            if hole.border_type == BorderType::Hole && hole.parent == Some(i) && keep[j] {
                ordered.push(RawContour {
                    points: as_f64(hole),
                    is_outer: false,
                });
            }
        }
    }

    ordered
}

fn as_f64(contour: &Contour<i32>) -> Vec<(f64, f64)> {
    contour
        .points
        .iter()
        .map(|p| (p.x as f64, p.y as f64))
        .collect()
}

/// Signed area via the shoelace formula. Positive for counter-clockwise
/// rings in image coordinates.
pub fn signed_area(points: &[(f64, f64)]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            points[i].0 * points[j].1 - points[j].0 * points[i].1
        })
        .sum::<f64>()
        / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn blank(w: u32, h: u32) -> GrayImage {
        GrayImage::from_pixel(w, h, Luma([0]))
    }

    fn fill(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, v: u8) {
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, Luma([v]));
            }
        }
    }

    #[test]
    fn test_signed_area_square() {
        let square = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        assert!((signed_area(&square).abs() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_solid_block_single_outer() {
        let mut img = blank(60, 60);
        fill(&mut img, 10, 10, 50, 50, 255);
        let contours = extract(&img, 25.0);
        assert_eq!(contours.len(), 1);
        assert!(contours[0].is_outer);
    }

    #[test]
    fn test_hole_follows_its_outer() {
        let mut img = blank(60, 60);
        fill(&mut img, 5, 5, 55, 55, 255);
        fill(&mut img, 20, 20, 40, 40, 0);
        let contours = extract(&img, 25.0);
        assert_eq!(contours.len(), 2);
        assert!(contours[0].is_outer);
        assert!(!contours[1].is_outer);
    }

    #[test]
    fn test_speckle_suppressed() {
        let mut img = blank(60, 60);
        fill(&mut img, 10, 10, 50, 50, 255);
        // 3x3 dot: area under the 25 px^2 floor.
        fill(&mut img, 2, 2, 5, 5, 255);
        let contours = extract(&img, 25.0);
        assert_eq!(contours.len(), 1);
    }
}
