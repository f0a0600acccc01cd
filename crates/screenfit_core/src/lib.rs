//! screenfit Core Engine
//!
//! This crate maps sizes authored against a reference "design" screen onto
//! the device the UI actually runs on:
//!
//! - **Scale Factors**: Width, height and text multipliers derived from the
//!   design size and the live screen size, clamped by a [`ScalingLimits`] policy
//! - **Metric Caches**: Time-bounded caches over screen and safe-area queries,
//!   invalidated by [`MetricsEvent`](screenfit_platform::MetricsEvent)s
//! - **Hot Paths**: [`FastScale`] snapshots and [`BatchScaler`] for code that
//!   scales many values per frame
//! - **Settings**: `screenfit.toml` loading via [`Settings`]
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use screenfit_core::prelude::*;
//! use screenfit_platform::{ScreenDimensions, StaticMetricsSource};
//!
//! let source = Arc::new(StaticMetricsSource::new(ScreenDimensions::new(780.0, 1688.0, 2.0)));
//! let engine = ScaleEngine::builder()
//!     .source(source)
//!     .configuration(Configuration::IPHONE_13_PRO)
//!     .build();
//!
//! assert_eq!(engine.w(100.0), 200.0);
//! assert_eq!(engine.scale_size(Size::new(10.0, 20.0)), Size::new(20.0, 40.0));
//!
//! let widths = engine.batch_widths(&[8, 16, 24]);
//! assert_eq!(widths, vec![16.0, 32.0, 48.0]);
//! ```

pub mod batch;
pub mod cache;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod factors;
pub mod geometry;
pub mod limits;
mod responsive;
pub mod settings;
pub mod snapshot;

pub use batch::BatchScaler;
pub use cache::{
    CachePolicy, SafeAreaCache, ScreenDimensionsCache, TtlCache, DEFAULT_DIMENSIONS_TTL,
    DEFAULT_SAFE_AREA_TTL,
};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{
    Configuration, ConfigurationPreset, MAX_DESIGN_HEIGHT, MAX_DESIGN_WIDTH, NAMED_PRESETS,
    TEXT_ADAPT_THRESHOLD,
};
pub use engine::{compute_factors, ScaleEngine, ScaleEngineBuilder, ScreenMetrics};
pub use error::{ConfigError, Result};
pub use factors::{DerivedState, ScaleFactors, ScaleType, SharedFactors};
pub use geometry::{EdgeInsets, Point, Rect, Size};
pub use limits::{ScalingLimits, MAX_SCALE_CEILING, MIN_SCALE_FLOOR};
pub use settings::{Settings, SettingsFile, SETTINGS_FILE_NAME};
pub use snapshot::FastScale;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::batch::BatchScaler;
    pub use crate::config::{Configuration, ConfigurationPreset};
    pub use crate::engine::{ScaleEngine, ScreenMetrics};
    pub use crate::factors::{ScaleFactors, ScaleType};
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
    pub use crate::limits::ScalingLimits;
    pub use crate::settings::Settings;
    pub use crate::snapshot::FastScale;
}
