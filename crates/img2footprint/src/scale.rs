use crate::error::ConvertError;

/// Canonical long-edge size in working pixels. All tracing and polygon
/// work happens at this resolution regardless of the input raster size.
pub const SCALE_LONG: f64 = 2.0 * 1024.0;

/// Round a float to N decimal places.
pub fn round_f64(v: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (v * factor).round() / factor
}

/// Per-run scale factors mapping the input raster into canonical space,
/// plus the canonical-pixel → millimeter conversion used on output.
///
/// The x and y factors are independent: the raster is stretched to the
/// requested physical aspect ratio, whatever its own aspect ratio is.
/// The requested width/height are in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleParameters {
    pub sx: f64,
    pub sy: f64,
    pub ppmm: f64,
}

impl ScaleParameters {
    /// Compute scale factors for a raster of `raster_w` x `raster_h`
    /// pixels and a requested physical size of `width` x `height` inches.
    ///
    /// The canonical long edge is assigned to the larger physical
    /// dimension; the short edge is the long edge divided by the
    /// requested aspect ratio. `ppmm` is rounded to 4 decimal places so
    /// coordinate text downstream stays stable.
    pub fn compute(
        raster_w: u32,
        raster_h: u32,
        width: f64,
        height: f64,
    ) -> Result<Self, ConvertError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(ConvertError::InvalidDimensions { width, height });
        }

        let (sx, sy) = if width > height {
            let ar = width / height;
            let canonical_w = SCALE_LONG;
            let canonical_h = SCALE_LONG / ar;
            (canonical_w / raster_w as f64, canonical_h / raster_h as f64)
        } else {
            let ar = height / width;
            let canonical_h = SCALE_LONG;
            let canonical_w = SCALE_LONG / ar;
            (canonical_w / raster_w as f64, canonical_h / raster_h as f64)
        };

        let long = if width > height { width } else { height };
        let ppi = SCALE_LONG / long;
        let ppmm = round_f64(25.4 / ppi, 4);

        Ok(Self { sx, sy, ppmm })
    }
}
