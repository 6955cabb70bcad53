//! Error types for the Hough engine.
//!
//! Everything the core can reject is an [`InvalidInput`], raised before any
//! accumulation starts. The remaining variants belong to the boundary adapters
//! (configuration files, raster images, the worker pool).

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied value cannot be used to build or run an accumulation.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// Configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// Raster decode/encode failure
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parallel accumulation worker did not complete.
    #[error("worker failed: {0}")]
    Worker(String),
}

impl Error {
    /// True when the error is one of the fail-fast input checks.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// The specific input that was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("point sequence is empty")]
    EmptyPoints,

    #[error("image dimensions must be positive, got {width}x{height}")]
    NonPositiveDimensions { height: u32, width: u32 },

    /// A curve-family constant such as the circle radius.
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveConstant { name: &'static str, value: f64 },

    #[error("voting tolerance must be positive and finite, got {0}")]
    NonPositiveTolerance(f64),

    #[error("parameter axis {axis} has {len} samples")]
    DegenerateGrid { axis: &'static str, len: usize },
}
