//! Error types for the comfig library

use thiserror::Error;

/// Result type alias for comfig operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Raw pixel buffer length does not match the stated dimensions
    #[error("buffer of {actual} bytes does not hold a {width}x{height} image with {channels} channels")]
    BufferSize {
        actual: usize,
        width: usize,
        height: usize,
        channels: usize,
    },

    /// Cell vector length does not match the stated grid shape
    #[error("{len} cells cannot form a {rows}x{cols} grid")]
    Shape { rows: usize, cols: usize, len: usize },

    /// Centroid requested for a grid without any mass
    #[error("total mass of the grid is zero, the centroid is undefined")]
    ZeroTotalMass,

    /// Weight grid cell outside the non-negative reals
    #[error("invalid weight {value} at ({row}, {col})")]
    InvalidWeight { row: usize, col: usize, value: f64 },

    /// Mass source returned a value outside the non-negative reals
    #[error("invalid mass {value} for color [{color}]")]
    InvalidMass { color: String, value: f64 },

    #[error("invalid scale `{0}`, expected <number>:<number> with a positive ratio")]
    InvalidScale(String),

    /// Console reached end of input before a valid answer was given
    #[error("input closed while waiting for {0}")]
    InputClosed(String),

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
