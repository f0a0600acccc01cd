//! screenfit Platform Abstraction Layer
//!
//! This crate provides the platform-facing half of screenfit: the query
//! interface the scaling engine consumes, the metric snapshot types it hands
//! out, and the events that invalidate cached metrics.
//!
//! # Architecture
//!
//! - [`DeviceMetricsSource`] - Screen size, safe area and device category queries
//! - [`MetricsEventHub`] - Orientation / scene-activation notifications
//!
//! Native backends implement [`DeviceMetricsSource`]. Without one,
//! [`FallbackMetricsSource`] returns per-target defaults and
//! [`StaticMetricsSource`] serves explicitly supplied values.
//!
//! # Example
//!
//! ```
//! use screenfit_platform::*;
//!
//! let source = StaticMetricsSource::new(ScreenDimensions::new(428.0, 926.0, 3.0))
//!     .with_category(DeviceCategory::Phone);
//!
//! assert_eq!(source.screen_dimensions().native_width(), 1284.0);
//! assert_eq!(source.device_category(), DeviceCategory::Phone);
//! ```

mod error;
mod event;
mod metrics;
mod source;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use event::{ListenerId, MetricsEvent, MetricsEventHub};
pub use metrics::{DeviceCategory, SafeAreaInsets, ScreenDimensions};
pub use source::{DeviceMetricsSource, FallbackMetricsSource, StaticMetricsSource};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{ListenerId, MetricsEvent, MetricsEventHub};
    pub use crate::metrics::{DeviceCategory, SafeAreaInsets, ScreenDimensions};
    pub use crate::source::{DeviceMetricsSource, FallbackMetricsSource, StaticMetricsSource};
}
