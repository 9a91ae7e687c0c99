//! Convert raster artwork into a KiCad footprint.
//!
//! The pipeline normalizes the image into a fixed-resolution working
//! space, traces ink boundaries into signed corner/bezier paths,
//! reconstructs them as closed rings, subtracts holes from their
//! outlines, and serializes the surviving simple polygons as `fp_poly`
//! primitives scaled to millimeters.

pub mod error;
pub mod footprint;
pub mod outline;
pub mod raster;
pub mod resolve;
pub mod scale;
pub mod trace;

use std::path::Path;

use image::{DynamicImage, GenericImageView};
use kurbo::Point;
use log::{debug, info};

use error::ConvertError;
use footprint::FootprintDocument;
use scale::ScaleParameters;
use trace::{Sign, TraceParams};

/// Which board side the artwork lands on. `Back` mirrors the image
/// horizontally so it reads correctly through the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

/// Conversion options.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Physical width of the footprint in inches.
    pub width: f64,
    /// Physical height of the footprint in inches.
    pub height: f64,
    /// Board layer name, copied into the output verbatim.
    pub layer: String,
    pub side: Side,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            width: 3.5,
            height: 2.0,
            layer: "F.Mask".to_string(),
            side: Side::Front,
        }
    }
}

/// Convert an image file into footprint document text.
///
/// Dimension checks run before the input file is opened, so a bad
/// configuration never costs a decode.
pub fn convert(input: &Path, opts: &ConvertOptions) -> Result<String, ConvertError> {
    if opts.width <= 0.0 || opts.height <= 0.0 {
        return Err(ConvertError::InvalidDimensions {
            width: opts.width,
            height: opts.height,
        });
    }
    let image = image::open(input)?;
    convert_image(&image, opts)
}

/// Convert an already-decoded image into footprint document text.
///
/// Fails before touching pixels when the requested dimensions are not
/// positive. Any later failure aborts the whole conversion; there is no
/// partial output.
pub fn convert_image(image: &DynamicImage, opts: &ConvertOptions) -> Result<String, ConvertError> {
    let params = ScaleParameters::compute(image.width(), image.height(), opts.width, opts.height)?;
    let raster = raster::normalize(image, opts.side, params.sx, params.sy);

    let paths = trace::trace_bitmap(&raster, &TraceParams::default());
    debug!("reconstructing {} traced path(s)", paths.len());

    let rings: Vec<(Vec<Point>, Sign)> = paths
        .iter()
        .map(|p| (outline::reconstruct_path(p), p.sign))
        .collect();
    let polygons = resolve::resolve(rings)?;
    info!("resolved {} polygon(s)", polygons.len());

    let doc = FootprintDocument::new(opts.layer.clone(), polygons, params.ppmm);
    Ok(doc.render())
}

/// Run the full conversion and write the footprint file.
///
/// The document is rendered in memory first; the output path is written
/// in a single operation only after the conversion has fully succeeded.
pub fn convert_to_file(
    input: &Path,
    output: &Path,
    opts: &ConvertOptions,
) -> Result<(), ConvertError> {
    let document = convert(input, opts)?;
    std::fs::write(output, document)?;
    Ok(())
}
