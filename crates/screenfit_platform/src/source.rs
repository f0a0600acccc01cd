//! Device metrics source trait and built-in sources

use parking_lot::RwLock;

use crate::metrics::{DeviceCategory, SafeAreaInsets, ScreenDimensions};

/// Query interface over the platform's screen APIs
///
/// Implemented by each platform backend. Queries are synchronous and
/// best-effort: a backend that cannot reach its native API returns sensible
/// defaults instead of failing. Implementations must not call back into the
/// engine that owns them.
pub trait DeviceMetricsSource: Send + Sync {
    /// Current logical screen size and pixel ratio
    fn screen_dimensions(&self) -> ScreenDimensions;

    /// Current safe-area insets and status bar height
    fn safe_area_insets(&self) -> SafeAreaInsets;

    /// Coarse device class
    fn device_category(&self) -> DeviceCategory;
}

/// Source returning fixed per-target defaults
///
/// Used when no native backend is registered.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackMetricsSource;

impl FallbackMetricsSource {
    /// Create the fallback source
    pub fn new() -> Self {
        Self
    }
}

impl DeviceMetricsSource for FallbackMetricsSource {
    fn screen_dimensions(&self) -> ScreenDimensions {
        if cfg!(target_os = "ios") {
            ScreenDimensions::new(375.0, 812.0, 3.0)
        } else if cfg!(target_os = "macos") {
            ScreenDimensions::new(1440.0, 900.0, 2.0)
        } else if cfg!(target_os = "tvos") {
            ScreenDimensions::new(1920.0, 1080.0, 1.0)
        } else if cfg!(target_os = "watchos") {
            ScreenDimensions::new(184.0, 224.0, 2.0)
        } else {
            ScreenDimensions::new(375.0, 812.0, 2.0)
        }
    }

    fn safe_area_insets(&self) -> SafeAreaInsets {
        if cfg!(target_os = "ios") {
            SafeAreaInsets::new(44.0, 34.0, 0.0, 0.0, 44.0)
        } else if cfg!(target_os = "macos") {
            SafeAreaInsets::new(0.0, 0.0, 0.0, 0.0, 24.0)
        } else if cfg!(target_os = "tvos") {
            SafeAreaInsets::new(60.0, 60.0, 90.0, 90.0, 0.0)
        } else {
            SafeAreaInsets::ZERO
        }
    }

    fn device_category(&self) -> DeviceCategory {
        DeviceCategory::for_target()
    }
}

/// Source holding explicitly supplied metrics
///
/// Handy for headless tools and tests, and for hosts that push metrics in
/// from their own event loop. Values can be replaced at any time; readers
/// always see a whole snapshot.
#[derive(Debug)]
pub struct StaticMetricsSource {
    state: RwLock<StaticMetrics>,
}

#[derive(Clone, Copy, Debug)]
struct StaticMetrics {
    dimensions: ScreenDimensions,
    safe_area: SafeAreaInsets,
    category: DeviceCategory,
}

impl StaticMetricsSource {
    /// Create a source with the given dimensions, no insets, unknown category
    pub fn new(dimensions: ScreenDimensions) -> Self {
        Self {
            state: RwLock::new(StaticMetrics {
                dimensions,
                safe_area: SafeAreaInsets::ZERO,
                category: DeviceCategory::Unknown,
            }),
        }
    }

    /// Set the safe-area insets
    pub fn with_safe_area(self, safe_area: SafeAreaInsets) -> Self {
        self.state.write().safe_area = safe_area;
        self
    }

    /// Set the device category
    pub fn with_category(self, category: DeviceCategory) -> Self {
        self.state.write().category = category;
        self
    }

    /// Replace the screen dimensions
    pub fn set_dimensions(&self, dimensions: ScreenDimensions) {
        self.state.write().dimensions = dimensions;
    }

    /// Replace the safe-area insets
    pub fn set_safe_area(&self, safe_area: SafeAreaInsets) {
        self.state.write().safe_area = safe_area;
    }
}

impl DeviceMetricsSource for StaticMetricsSource {
    fn screen_dimensions(&self) -> ScreenDimensions {
        self.state.read().dimensions
    }

    fn safe_area_insets(&self) -> SafeAreaInsets {
        self.state.read().safe_area
    }

    fn device_category(&self) -> DeviceCategory {
        self.state.read().category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_usable() {
        let source = FallbackMetricsSource::new();
        let dims = source.screen_dimensions();
        assert!(dims.width > 0.0 && dims.height > 0.0 && dims.pixel_scale > 0.0);
        let insets = source.safe_area_insets();
        assert!(insets.top >= 0.0 && insets.status_bar_height >= 0.0);
    }

    #[test]
    fn test_static_source_updates() {
        let source = StaticMetricsSource::new(ScreenDimensions::new(390.0, 844.0, 3.0))
            .with_category(DeviceCategory::Phone);
        assert_eq!(source.device_category(), DeviceCategory::Phone);
        assert_eq!(source.safe_area_insets(), SafeAreaInsets::ZERO);

        source.set_dimensions(ScreenDimensions::new(844.0, 390.0, 3.0));
        assert!(source.screen_dimensions().is_landscape());
    }
}
