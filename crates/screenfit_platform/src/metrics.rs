//! Device metric snapshots
//!
//! Plain value types produced by a [`DeviceMetricsSource`](crate::DeviceMetricsSource)
//! or handed out as copies from a cache. None of them are ever shared mutably.

use std::fmt;
use std::str::FromStr;

use crate::error::PlatformError;

// ============================================================================
// Screen Dimensions
// ============================================================================

/// Logical screen size plus pixel ratio
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenDimensions {
    /// Width in logical points
    pub width: f64,
    /// Height in logical points
    pub height: f64,
    /// Physical pixels per logical point
    pub pixel_scale: f64,
}

impl ScreenDimensions {
    /// Create new screen dimensions
    pub const fn new(width: f64, height: f64, pixel_scale: f64) -> Self {
        Self {
            width,
            height,
            pixel_scale,
        }
    }

    /// Create screen dimensions, rejecting sizes that cannot drive scaling
    pub fn try_new(width: f64, height: f64, pixel_scale: f64) -> Result<Self, PlatformError> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) || !usable(pixel_scale) {
            return Err(PlatformError::InvalidDimensions {
                width,
                height,
                pixel_scale,
            });
        }
        Ok(Self::new(width, height, pixel_scale))
    }

    /// Width in physical pixels
    pub fn native_width(&self) -> f64 {
        self.width * self.pixel_scale
    }

    /// Height in physical pixels
    pub fn native_height(&self) -> f64 {
        self.height * self.pixel_scale
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Wider than tall
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Taller than wide
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    /// The shorter side
    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }

    /// The longer side
    pub fn max_dimension(&self) -> f64 {
        self.width.max(self.height)
    }
}

impl FromStr for ScreenDimensions {
    type Err = PlatformError;

    /// Parses `428x926` (pixel scale 1) or `428x926@3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlatformError::InvalidDimensionString(s.to_string());
        let (size, scale) = match s.trim().split_once('@') {
            Some((size, scale)) => (size, scale.trim().trim_end_matches('x')),
            None => (s.trim(), "1"),
        };
        let (width, height) = size
            .split_once(['x', 'X', '×'])
            .ok_or_else(invalid)?;

        let number = |v: &str| v.trim().parse::<f64>().map_err(|_| invalid());
        Self::try_new(number(width)?, number(height)?, number(scale)?)
    }
}

// ============================================================================
// Safe Area
// ============================================================================

/// Insets of the region not covered by system chrome
///
/// All edges are non-negative; [`SafeAreaInsets::new`] clamps negative or
/// NaN inputs to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SafeAreaInsets {
    /// Top inset (notch, status bar)
    pub top: f64,
    /// Bottom inset (home indicator)
    pub bottom: f64,
    /// Left inset
    pub left: f64,
    /// Right inset
    pub right: f64,
    /// Height of the system status bar
    pub status_bar_height: f64,
}

impl SafeAreaInsets {
    /// No insets at all
    pub const ZERO: SafeAreaInsets = SafeAreaInsets {
        top: 0.0,
        bottom: 0.0,
        left: 0.0,
        right: 0.0,
        status_bar_height: 0.0,
    };

    /// Create safe area insets
    pub fn new(top: f64, bottom: f64, left: f64, right: f64, status_bar_height: f64) -> Self {
        // f64::max returns the non-NaN operand
        Self {
            top: top.max(0.0),
            bottom: bottom.max(0.0),
            left: left.max(0.0),
            right: right.max(0.0),
            status_bar_height: status_bar_height.max(0.0),
        }
    }

    /// Sum of the top and bottom insets
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Sum of the left and right insets
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }
}

// ============================================================================
// Device Category
// ============================================================================

/// Coarse device class reported by the platform
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceCategory {
    /// Handheld phone
    Phone,
    /// Tablet
    Tablet,
    /// Laptop or desktop computer
    Desktop,
    /// Television / set-top box
    Tv,
    /// Wrist-worn device
    Watch,
    /// Platform could not tell
    #[default]
    Unknown,
}

impl DeviceCategory {
    /// All categories, in declaration order
    pub const ALL: [DeviceCategory; 6] = [
        DeviceCategory::Phone,
        DeviceCategory::Tablet,
        DeviceCategory::Desktop,
        DeviceCategory::Tv,
        DeviceCategory::Watch,
        DeviceCategory::Unknown,
    ];

    /// Lowercase name, as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            DeviceCategory::Phone => "phone",
            DeviceCategory::Tablet => "tablet",
            DeviceCategory::Desktop => "desktop",
            DeviceCategory::Tv => "tv",
            DeviceCategory::Watch => "watch",
            DeviceCategory::Unknown => "unknown",
        }
    }

    /// Category of the compilation target
    pub fn for_target() -> Self {
        if cfg!(target_os = "ios") {
            DeviceCategory::Phone
        } else if cfg!(target_os = "android") {
            DeviceCategory::Phone
        } else if cfg!(target_os = "tvos") {
            DeviceCategory::Tv
        } else if cfg!(target_os = "watchos") {
            DeviceCategory::Watch
        } else if cfg!(any(target_os = "macos", target_os = "windows", target_os = "linux")) {
            DeviceCategory::Desktop
        } else {
            DeviceCategory::Unknown
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeviceCategory {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phone" | "iphone" => Ok(DeviceCategory::Phone),
            "tablet" | "ipad" => Ok(DeviceCategory::Tablet),
            "desktop" | "mac" => Ok(DeviceCategory::Desktop),
            "tv" => Ok(DeviceCategory::Tv),
            "watch" => Ok(DeviceCategory::Watch),
            "unknown" => Ok(DeviceCategory::Unknown),
            other => Err(PlatformError::UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_dimensions() {
        let dims = ScreenDimensions::new(428.0, 926.0, 3.0);
        assert_eq!(dims.native_width(), 1284.0);
        assert_eq!(dims.native_height(), 2778.0);
        assert!((dims.aspect_ratio() - 428.0 / 926.0).abs() < 1e-12);
        assert!(dims.is_portrait());
        assert!(!dims.is_landscape());
        assert_eq!(dims.min_dimension(), 428.0);
        assert_eq!(dims.max_dimension(), 926.0);
    }

    #[test]
    fn test_try_new_rejects_unusable_sizes() {
        assert!(ScreenDimensions::try_new(0.0, 800.0, 2.0).is_err());
        assert!(ScreenDimensions::try_new(400.0, f64::NAN, 2.0).is_err());
        assert!(ScreenDimensions::try_new(400.0, 800.0, -1.0).is_err());
        assert!(ScreenDimensions::try_new(400.0, 800.0, 2.0).is_ok());
    }

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(
            "428x926@3".parse::<ScreenDimensions>(),
            Ok(ScreenDimensions::new(428.0, 926.0, 3.0))
        );
        assert_eq!(
            "1920X1080".parse::<ScreenDimensions>(),
            Ok(ScreenDimensions::new(1920.0, 1080.0, 1.0))
        );
        assert!(matches!(
            "wide".parse::<ScreenDimensions>(),
            Err(PlatformError::InvalidDimensionString(_))
        ));
        assert!(matches!(
            "0x926".parse::<ScreenDimensions>(),
            Err(PlatformError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_safe_area_clamps_negative_edges() {
        let insets = SafeAreaInsets::new(-4.0, 34.0, f64::NAN, 0.0, 44.0);
        assert_eq!(insets.top, 0.0);
        assert_eq!(insets.bottom, 34.0);
        assert_eq!(insets.left, 0.0);
        assert_eq!(insets.vertical(), 34.0);
    }

    #[test]
    fn test_category_round_trips_through_name() {
        for category in DeviceCategory::ALL {
            assert_eq!(category.name().parse::<DeviceCategory>(), Ok(category));
        }
        assert_eq!("iPad".parse::<DeviceCategory>(), Ok(DeviceCategory::Tablet));
        assert!("toaster".parse::<DeviceCategory>().is_err());
    }
}
