//! Image normalization: alpha flattening, greyscale conversion, the
//! back-side mirror, and the non-uniform resize into canonical space.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, RgbImage};
use log::debug;

use crate::Side;

/// Normalize a decoded image into the canonical working raster.
///
/// Any alpha channel is flattened against a white background before the
/// greyscale conversion, so transparent regions trace as empty rather
/// than as ink. `Side::Back` mirrors the artwork horizontally. The
/// resize applies the independent x/y factors from
/// [`ScaleParameters`](crate::scale::ScaleParameters).
pub fn normalize(image: &DynamicImage, side: Side, sx: f64, sy: f64) -> GrayImage {
    let grey = if image.color().has_alpha() {
        DynamicImage::ImageRgb8(flatten_alpha(image)).to_luma8()
    } else {
        image.to_luma8()
    };

    let grey = match side {
        Side::Front => grey,
        Side::Back => imageops::flip_horizontal(&grey),
    };

    let target_w = ((grey.width() as f64 * sx).round() as u32).max(1);
    let target_h = ((grey.height() as f64 * sy).round() as u32).max(1);
    debug!(
        "normalized raster {}x{} -> {}x{}",
        grey.width(),
        grey.height(),
        target_w,
        target_h
    );
    imageops::resize(&grey, target_w, target_h, FilterType::Triangle)
}

/// Composite the image over opaque white.
fn flatten_alpha(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let mut flat = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let a = pixel[3] as f64 / 255.0;
        let blend = |c: u8| (c as f64 * a + 255.0 * (1.0 - a)).round() as u8;
        flat.put_pixel(x, y, image::Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_resize_applies_independent_factors() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(100, 50, Luma([0])));
        let out = normalize(&img, Side::Front, 2.0, 3.0);
        assert_eq!(out.width(), 200);
        assert_eq!(out.height(), 150);
    }

    #[test]
    fn test_back_mirrors_horizontally() {
        let mut grey = GrayImage::from_pixel(10, 10, Luma([255]));
        // Ink only in the left column.
        for y in 0..10 {
            grey.put_pixel(0, y, Luma([0]));
        }
        let img = DynamicImage::ImageLuma8(grey);
        let out = normalize(&img, Side::Back, 1.0, 1.0);
        assert_eq!(out.get_pixel(9, 5)[0], 0);
        assert_eq!(out.get_pixel(0, 5)[0], 255);
    }

    #[test]
    fn test_transparent_flattens_to_white() {
        let rgba = image::RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        let img = DynamicImage::ImageRgba8(rgba);
        let out = normalize(&img, Side::Front, 1.0, 1.0);
        assert_eq!(out.get_pixel(2, 2)[0], 255);
    }

    #[test]
    fn test_opaque_black_stays_ink() {
        let rgba = image::RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let img = DynamicImage::ImageRgba8(rgba);
        let out = normalize(&img, Side::Front, 1.0, 1.0);
        assert_eq!(out.get_pixel(2, 2)[0], 0);
    }
}
