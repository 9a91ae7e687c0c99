//! KiCad footprint serialization.
//!
//! The consuming CAD tool is byte-sensitive: field order, quoting and
//! the fixed 4-decimal coordinate format all matter, so the writer is a
//! small explicit type with its output pinned by tests.

use kurbo::Point;

/// Name embedded in the footprint record.
pub const FOOTPRINT_NAME: &str = "bzFootprint";

/// Fixed identity stamps carried in the output. The consuming tool only
/// needs them present, not unique, so they are constants rather than
/// per-run values.
pub const FOOTPRINT_TSTAMP: &str = "7a7d5548-24ac-11ed-8354-7a0c86e76eee";
pub const FOOTPRINT_TEDIT: &str = "7a7d5552-24ac-11ed-8354-7a0c86e76eee";
pub const POLY_TSTAMP: &str = "7a7d51f6-24ac-11ed-8354-7a0c86e76eee";

/// A complete footprint document: resolved polygons in canonical pixel
/// space plus the conversion factor and target layer.
///
/// The layer name is copied through verbatim; no validation against the
/// set of known board layers is attempted.
#[derive(Debug, Clone)]
pub struct FootprintDocument {
    layer: String,
    polygons: Vec<Vec<Point>>,
    ppmm: f64,
}

impl FootprintDocument {
    pub fn new(layer: String, polygons: Vec<Vec<Point>>, ppmm: f64) -> Self {
        Self {
            layer,
            polygons,
            ppmm,
        }
    }

    /// Render the full s-expression document.
    ///
    /// Every vertex is converted from canonical pixels to millimeters
    /// and written with exactly four decimal places.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("(footprint \"{FOOTPRINT_NAME}\"\n"));
        out.push_str(&format!("  (layer \"{}\")\n", self.layer));
        out.push_str("  (at 0 0)\n");
        out.push_str("  (attr board_only exclude_from_pos_files exclude_from_bom)\n");
        out.push_str(&format!("  (tstamp \"{FOOTPRINT_TSTAMP}\")\n"));
        out.push_str(&format!("  (tedit \"{FOOTPRINT_TEDIT}\")\n"));
        for polygon in &self.polygons {
            self.render_poly(&mut out, polygon);
        }
        out.push_str(")\n");
        out
    }

    fn render_poly(&self, out: &mut String, polygon: &[Point]) {
        out.push_str("  (fp_poly\n");
        out.push_str("    (pts\n");
        for p in polygon {
            out.push_str(&format!(
                "      (xy {:.4} {:.4})\n",
                p.x * self.ppmm,
                p.y * self.ppmm
            ));
        }
        out.push_str("    )\n");
        out.push_str(&format!("    (layer \"{}\")\n", self.layer));
        out.push_str("    (width 0)\n");
        out.push_str("    (fill solid)\n");
        out.push_str(&format!("    (tstamp \"{POLY_TSTAMP}\")\n"));
        out.push_str("  )\n");
    }
}
