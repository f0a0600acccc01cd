//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors from validating or loading a configuration
///
/// The engine itself never returns these: a rejected `configure` is a no-op
/// plus a diagnostic. They surface only on the explicit validation and
/// loading paths.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Design size outside (0, 2000] x (0, 3000]
    #[error("Invalid design size {width}x{height}: expected 0 < width <= 2000 and 0 < height <= 3000")]
    InvalidDesignSize {
        /// Requested design width
        width: f64,
        /// Requested design height
        height: f64,
    },

    /// Size string could not be parsed
    #[error("Invalid size '{0}': expected WIDTHxHEIGHT")]
    InvalidSize(String),

    /// No preset with that name
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// No scale type with that name
    #[error("Unknown scale type: {0}")]
    UnknownScaleType(String),

    /// Scale bounds that are inverted once floored and capped
    #[error("Invalid scaling limits [{min}, {max}]: minimum is above maximum")]
    InvalidLimits {
        /// Effective minimum scale
        min: f64,
        /// Effective maximum scale
        max: f64,
    },

    /// Cache lifetime that is negative, not a number, or too large
    #[error("Invalid cache TTL {0}: expected a non-negative number of seconds")]
    InvalidTtl(f64),

    /// Configuration file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`Settings`](crate::settings::Settings)
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
