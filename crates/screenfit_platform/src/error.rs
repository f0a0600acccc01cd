//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// Device category name not recognized
    #[error("Unknown device category: {0}")]
    UnknownCategory(String),

    /// Dimension string could not be parsed
    #[error("Invalid screen dimensions '{0}': expected WIDTHxHEIGHT or WIDTHxHEIGHT@SCALE")]
    InvalidDimensionString(String),

    /// Screen dimensions are not usable (zero, negative, or non-finite)
    #[error("Invalid screen dimensions: {width}x{height} @{pixel_scale}x")]
    InvalidDimensions {
        /// Logical width in points
        width: f64,
        /// Logical height in points
        height: f64,
        /// Pixel ratio
        pixel_scale: f64,
    },
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
