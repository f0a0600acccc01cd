//! `screenfit.toml` handling
//!
//! ```toml
//! preset = "iphone-13-pro"    # optional starting point
//! design_width = 390.0        # explicit fields override the preset
//! design_height = 844.0
//! min_text_adapt = true
//! split_screen_mode = true
//!
//! [limits]
//! min_scale = 0.5
//! max_scale = 2.0
//!
//! [cache]
//! dimensions_ttl_secs = 30.0
//! safe_area_ttl_secs = 10.0
//! ```
//!
//! Every key is optional. Missing keys fall back to the preset, or to the
//! default configuration when no preset is named.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::CachePolicy;
use crate::config::{Configuration, ConfigurationPreset};
use crate::error::{ConfigError, Result};
use crate::geometry::Size;
use crate::limits::ScalingLimits;

/// Conventional settings file name
pub const SETTINGS_FILE_NAME: &str = "screenfit.toml";

/// Raw contents of a settings file
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub design_width: Option<f64>,
    #[serde(default)]
    pub design_height: Option<f64>,
    #[serde(default)]
    pub min_text_adapt: Option<bool>,
    #[serde(default)]
    pub split_screen_mode: Option<bool>,
    #[serde(default)]
    pub limits: LimitsSection,
    #[serde(default)]
    pub cache: CacheSection,
}

/// `[limits]` table
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LimitsSection {
    #[serde(default)]
    pub min_scale: Option<f64>,
    #[serde(default)]
    pub max_scale: Option<f64>,
}

/// `[cache]` table
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CacheSection {
    #[serde(default)]
    pub dimensions_ttl_secs: Option<f64>,
    #[serde(default)]
    pub safe_area_ttl_secs: Option<f64>,
}

/// Resolved settings: what an engine is built from
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Settings {
    pub configuration: Configuration,
    pub cache_policy: CachePolicy,
}

impl Settings {
    /// Parse and resolve TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(content)?;
        file.resolve()
    }

    /// Read, parse and resolve a settings file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), configuration = %settings.configuration, "loaded settings");
        Ok(settings)
    }
}

impl SettingsFile {
    /// Apply explicit fields on top of the named preset and validate
    pub fn resolve(&self) -> Result<Settings> {
        let base = match &self.preset {
            Some(name) => name.parse::<ConfigurationPreset>()?.configuration(),
            None => Configuration::default(),
        };

        let design_size = Size::new(
            self.design_width.unwrap_or(base.design_size.width),
            self.design_height.unwrap_or(base.design_size.height),
        );
        let limits = ScalingLimits::new(
            self.limits.min_scale.unwrap_or(base.scaling_limits.min_scale()),
            self.limits.max_scale.unwrap_or(base.scaling_limits.max_scale()),
        );
        if limits.min_scale() > limits.max_scale() {
            return Err(ConfigError::InvalidLimits {
                min: limits.min_scale(),
                max: limits.max_scale(),
            });
        }

        let configuration = Configuration {
            design_size,
            min_text_adapt: self.min_text_adapt.unwrap_or(base.min_text_adapt),
            split_screen_mode: self.split_screen_mode.unwrap_or(base.split_screen_mode),
            scaling_limits: limits,
        };
        configuration.validate()?;

        let defaults = CachePolicy::default();
        let cache_policy = CachePolicy {
            dimensions_ttl: ttl(self.cache.dimensions_ttl_secs, defaults.dimensions_ttl)?,
            safe_area_ttl: ttl(self.cache.safe_area_ttl_secs, defaults.safe_area_ttl)?,
        };

        Ok(Settings {
            configuration,
            cache_policy,
        })
    }
}

fn ttl(secs: Option<f64>, default: Duration) -> Result<Duration> {
    match secs {
        None => Ok(default),
        Some(secs) => {
            Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidTtl(secs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.configuration, Configuration::IPHONE_X);
    }

    #[test]
    fn test_full_file() {
        let settings = Settings::from_toml_str(
            r#"
            design_width = 414.0
            design_height = 896.0
            min_text_adapt = false
            split_screen_mode = false

            [limits]
            min_scale = 0.8
            max_scale = 1.5

            [cache]
            dimensions_ttl_secs = 5.0
            safe_area_ttl_secs = 0.5
            "#,
        )
        .unwrap();

        let config = settings.configuration;
        assert_eq!(config.design_size, Size::new(414.0, 896.0));
        assert!(!config.min_text_adapt);
        assert!(!config.split_screen_mode);
        assert_eq!(config.scaling_limits, ScalingLimits::new(0.8, 1.5));
        assert_eq!(settings.cache_policy.dimensions_ttl, Duration::from_secs(5));
        assert_eq!(settings.cache_policy.safe_area_ttl, Duration::from_millis(500));
    }

    #[test]
    fn test_preset_with_overrides() {
        let settings = Settings::from_toml_str(
            r#"
            preset = "ipad-pro-11"
            design_height = 1000.0
            "#,
        )
        .unwrap();

        let config = settings.configuration;
        assert_eq!(config.design_size, Size::new(834.0, 1000.0));
        assert_eq!(config.scaling_limits, ScalingLimits::STRICT);
    }

    #[test]
    fn test_rejections() {
        assert!(matches!(
            Settings::from_toml_str("preset = \"galaxy-fold\""),
            Err(ConfigError::UnknownPreset(_))
        ));
        assert!(matches!(
            Settings::from_toml_str("design_width = 0.0"),
            Err(ConfigError::InvalidDesignSize { .. })
        ));
        assert!(matches!(
            Settings::from_toml_str("[cache]\nsafe_area_ttl_secs = -1.0"),
            Err(ConfigError::InvalidTtl(_))
        ));
        assert!(matches!(
            Settings::from_toml_str("[cache]\ndimensions_ttl_secs = 1e30"),
            Err(ConfigError::InvalidTtl(_))
        ));
        assert!(matches!(
            Settings::from_toml_str("[cache]\nsafe_area_ttl_secs = nan"),
            Err(ConfigError::InvalidTtl(_))
        ));
        assert!(matches!(
            Settings::from_toml_str("design_width = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_limits_inverted_after_capping() {
        // 9.0 is capped to 5.0, leaving the minimum above the maximum
        let err =
            Settings::from_toml_str("[limits]\nmin_scale = 6.0\nmax_scale = 9.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidLimits { min, max } if min == 6.0 && max == 5.0
        ));

        assert!(matches!(
            Settings::from_toml_str("[limits]\nmin_scale = 1.5\nmax_scale = 1.2"),
            Err(ConfigError::InvalidLimits { .. })
        ));

        let settings =
            Settings::from_toml_str("[limits]\nmin_scale = 0.01\nmax_scale = 9.0").unwrap();
        assert_eq!(settings.configuration.scaling_limits, ScalingLimits::new(0.1, 5.0));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::from_toml_file("/nonexistent/screenfit.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
