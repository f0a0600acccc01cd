//! Engine configuration and named presets
//!
//! A [`Configuration`] describes the screen a UI was designed against. It is
//! a plain value: build one, then hand it to
//! [`ScaleEngine::configure`](crate::ScaleEngine::configure), which swaps it
//! in as a whole.
//!
//! # Example
//!
//! ```
//! use screenfit_core::{Configuration, ScalingLimits, Size};
//!
//! let config = Configuration::new(Size::new(390.0, 844.0))
//!     .min_text_adapt(false)
//!     .scaling_limits(ScalingLimits::STRICT);
//! assert!(config.is_valid_design_size());
//!
//! assert!(Configuration::new(Size::new(5000.0, 844.0)).validate().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::geometry::Size;
use crate::limits::ScalingLimits;

/// Largest accepted design width
pub const MAX_DESIGN_WIDTH: f64 = 2000.0;

/// Largest accepted design height
pub const MAX_DESIGN_HEIGHT: f64 = 3000.0;

/// Font sizes at or above this adapt even without `min_text_adapt`
pub const TEXT_ADAPT_THRESHOLD: f64 = 12.0;

/// Design-time reference for deriving scale factors
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Configuration {
    /// Screen size the design was authored against, in points
    pub design_size: Size,
    /// Scale text by the smaller of the width and height factors
    pub min_text_adapt: bool,
    /// Host supports split-screen / multitasking layouts
    pub split_screen_mode: bool,
    /// Clamp policy for every derived factor
    pub scaling_limits: ScalingLimits,
}

impl Configuration {
    /// iPhone 13 Pro, 390x844
    pub const IPHONE_13_PRO: Configuration = Configuration::preset(390.0, 844.0, ScalingLimits::DEFAULT);
    /// iPhone 14 Pro, 393x852
    pub const IPHONE_14_PRO: Configuration = Configuration::preset(393.0, 852.0, ScalingLimits::DEFAULT);
    /// iPhone 15 Pro, 393x852
    pub const IPHONE_15_PRO: Configuration = Configuration::preset(393.0, 852.0, ScalingLimits::DEFAULT);
    /// iPhone X, 375x812
    pub const IPHONE_X: Configuration = Configuration::preset(375.0, 812.0, ScalingLimits::DEFAULT);
    /// iPhone 8, 375x667
    pub const IPHONE_8: Configuration = Configuration::preset(375.0, 667.0, ScalingLimits::DEFAULT);
    /// iPad Pro 11", 834x1194, strict limits
    pub const IPAD_PRO_11: Configuration = Configuration::preset(834.0, 1194.0, ScalingLimits::STRICT);
    /// iPad Pro 12.9", 1024x1366, strict limits
    pub const IPAD_PRO_12_9: Configuration = Configuration::preset(1024.0, 1366.0, ScalingLimits::STRICT);

    const fn preset(width: f64, height: f64, scaling_limits: ScalingLimits) -> Self {
        Self {
            design_size: Size::new(width, height),
            min_text_adapt: true,
            split_screen_mode: true,
            scaling_limits,
        }
    }

    /// Configuration for `design_size` with default flags and limits
    pub fn new(design_size: Size) -> Self {
        Self {
            design_size,
            ..Self::default()
        }
    }

    /// Set whether text follows the smaller axis factor
    pub fn min_text_adapt(mut self, enabled: bool) -> Self {
        self.min_text_adapt = enabled;
        self
    }

    /// Set split-screen mode
    pub fn split_screen_mode(mut self, enabled: bool) -> Self {
        self.split_screen_mode = enabled;
        self
    }

    /// Set the clamp policy
    pub fn scaling_limits(mut self, limits: ScalingLimits) -> Self {
        self.scaling_limits = limits;
        self
    }

    /// Replace the design size. Non-positive sizes are ignored.
    pub fn with_design_size(mut self, size: Size) -> Self {
        if size.width > 0.0 && size.height > 0.0 {
            self.design_size = size;
        }
        self
    }

    /// Whether the design size lies in (0, 2000] x (0, 3000]
    pub fn is_valid_design_size(&self) -> bool {
        let Size { width, height } = self.design_size;
        width > 0.0 && height > 0.0 && width <= MAX_DESIGN_WIDTH && height <= MAX_DESIGN_HEIGHT
    }

    /// Check the design size, reporting why it is rejected
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_valid_design_size() {
            Ok(())
        } else {
            Err(ConfigError::InvalidDesignSize {
                width: self.design_size.width,
                height: self.design_size.height,
            })
        }
    }

    /// Design width divided by design height
    pub fn aspect_ratio(&self) -> f64 {
        self.design_size.aspect_ratio()
    }

    /// Whether a font of `font_size` should be scaled
    pub fn should_adapt_text(&self, font_size: f64) -> bool {
        self.min_text_adapt || font_size >= TEXT_ADAPT_THRESHOLD
    }
}

impl Default for Configuration {
    /// 375x812 design, text adaptation and split-screen on, default limits
    fn default() -> Self {
        Self::IPHONE_X
    }
}

// ============================================================================
// Presets
// ============================================================================

/// Named starting points for common design targets
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigurationPreset {
    /// Standard phone (iPhone 13 Pro)
    PhoneStandard,
    /// Compact phone (iPhone 8)
    PhoneCompact,
    /// Standard tablet (iPad Pro 11")
    TabletStandard,
    /// Caller-supplied configuration
    Custom(Configuration),
}

impl ConfigurationPreset {
    /// The configuration this preset stands for
    pub fn configuration(&self) -> Configuration {
        match self {
            ConfigurationPreset::PhoneStandard => Configuration::IPHONE_13_PRO,
            ConfigurationPreset::PhoneCompact => Configuration::IPHONE_8,
            ConfigurationPreset::TabletStandard => Configuration::IPAD_PRO_11,
            ConfigurationPreset::Custom(config) => *config,
        }
    }
}

/// Every named design target, as `(name, configuration)`
pub const NAMED_PRESETS: &[(&str, Configuration)] = &[
    ("iphone-13-pro", Configuration::IPHONE_13_PRO),
    ("iphone-14-pro", Configuration::IPHONE_14_PRO),
    ("iphone-15-pro", Configuration::IPHONE_15_PRO),
    ("iphone-x", Configuration::IPHONE_X),
    ("iphone-8", Configuration::IPHONE_8),
    ("ipad-pro-11", Configuration::IPAD_PRO_11),
    ("ipad-pro-12.9", Configuration::IPAD_PRO_12_9),
];

impl FromStr for ConfigurationPreset {
    type Err = ConfigError;

    /// Accepts the category names (`phone`, `phone-compact`, `tablet`) and
    /// every device name in [`NAMED_PRESETS`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('_', "-");
        match name.as_str() {
            "phone" | "phone-standard" => Ok(ConfigurationPreset::PhoneStandard),
            "phone-compact" => Ok(ConfigurationPreset::PhoneCompact),
            "tablet" | "tablet-standard" => Ok(ConfigurationPreset::TabletStandard),
            _ => NAMED_PRESETS
                .iter()
                .find(|(preset, _)| *preset == name)
                .map(|(_, config)| ConfigurationPreset::Custom(*config))
                .ok_or_else(|| ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} (text adapt: {}, split screen: {}, limits: [{}, {}])",
            self.design_size.width,
            self.design_size.height,
            self.min_text_adapt,
            self.split_screen_mode,
            self.scaling_limits.min_scale(),
            self.scaling_limits.max_scale()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.design_size, Size::new(375.0, 812.0));
        assert!(config.min_text_adapt);
        assert!(config.split_screen_mode);
        assert_eq!(config.scaling_limits, ScalingLimits::DEFAULT);
    }

    #[test]
    fn test_design_size_bounds() {
        let valid = |w, h| Configuration::new(Size::new(w, h)).is_valid_design_size();
        assert!(valid(390.0, 844.0));
        assert!(valid(2000.0, 3000.0));
        assert!(!valid(0.0, 844.0));
        assert!(!valid(5000.0, 844.0));
        assert!(!valid(390.0, 3000.5));
        assert!(!valid(-1.0, 844.0));
        assert!(!valid(f64::NAN, 844.0));
    }

    #[test]
    fn test_validate_reports_size() {
        let err = Configuration::new(Size::new(0.0, 10.0)).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDesignSize { width, height } if width == 0.0 && height == 10.0
        ));
    }

    #[test]
    fn test_with_design_size_ignores_non_positive() {
        let config = Configuration::default().with_design_size(Size::new(-5.0, 100.0));
        assert_eq!(config.design_size, Size::new(375.0, 812.0));

        let config = config.with_design_size(Size::new(390.0, 844.0));
        assert_eq!(config.design_size, Size::new(390.0, 844.0));
    }

    #[test]
    fn test_should_adapt_text() {
        let config = Configuration::default().min_text_adapt(false);
        assert!(!config.should_adapt_text(11.0));
        assert!(config.should_adapt_text(12.0));
        assert!(config.min_text_adapt(true).should_adapt_text(8.0));
    }

    #[test]
    fn test_presets() {
        assert_eq!(Configuration::IPHONE_13_PRO.design_size, Size::new(390.0, 844.0));
        assert_eq!(Configuration::IPAD_PRO_11.scaling_limits, ScalingLimits::STRICT);
        assert_eq!(
            ConfigurationPreset::PhoneCompact.configuration(),
            Configuration::IPHONE_8
        );
        assert!(NAMED_PRESETS.iter().all(|(_, c)| c.is_valid_design_size()));
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(
            "tablet".parse::<ConfigurationPreset>().unwrap(),
            ConfigurationPreset::TabletStandard
        );
        assert_eq!(
            "iPhone_14_Pro".parse::<ConfigurationPreset>().unwrap().configuration(),
            Configuration::IPHONE_14_PRO
        );
        assert!("nokia-3310".parse::<ConfigurationPreset>().is_err());
    }
}
