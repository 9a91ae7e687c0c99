use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("invalid footprint dimensions {width} x {height}: both must be positive")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("traced a hole contour with no enclosing outline")]
    HoleBeforeOutline,

    #[error("degenerate polygon with {0} vertices")]
    DegeneratePolygon(usize),
}
