//! The scale engine
//!
//! [`ScaleEngine`] owns the active [`Configuration`] and the scale factors
//! derived from it. It is an ordinary value: construct one at start-up, share
//! it by reference or `Arc`, and give each test its own.
//!
//! # Locking
//!
//! - The configuration sits behind a mutex that writers (`configure`,
//!   `refresh_metrics`) hold for validate -> install -> recompute -> store.
//!   Once holding it they re-read the dimensions cache without querying, so
//!   a newer value cached by another writer is never overwritten by an older
//!   one.
//! - Derived factors live in [`SharedFactors`]; readers take only its read
//!   lock (or no lock at all on the unsynchronized tier).
//! - Each metrics cache has its own lock. Screen dimensions are fetched
//!   before the configuration mutex is taken, so a slow platform query never
//!   holds up writers or readers of the factors.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use screenfit_core::{Configuration, ScaleEngine, ScaleType};
//! use screenfit_platform::{ScreenDimensions, StaticMetricsSource};
//!
//! let source = Arc::new(StaticMetricsSource::new(ScreenDimensions::new(428.0, 926.0, 3.0)));
//! let engine = ScaleEngine::builder()
//!     .source(source)
//!     .configuration(Configuration::IPHONE_13_PRO)
//!     .build();
//!
//! let padding = engine.scale(16.0, ScaleType::Width);
//! assert!((padding - 16.0 * 428.0 / 390.0).abs() < 1e-9);
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use screenfit_platform::{
    DeviceCategory, DeviceMetricsSource, FallbackMetricsSource, ListenerId, MetricsEvent,
    MetricsEventHub, SafeAreaInsets, ScreenDimensions,
};

use crate::cache::{CachePolicy, SafeAreaCache, ScreenDimensionsCache};
use crate::clock::{Clock, MonotonicClock};
use crate::config::Configuration;
use crate::factors::{DerivedState, ScaleFactors, ScaleType, SharedFactors};
use crate::settings::Settings;
use crate::snapshot::FastScale;

/// Screen size, pixel ratio and safe area at one point in time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMetrics {
    pub width: f64,
    pub height: f64,
    pub pixel_scale: f64,
    pub safe_area: SafeAreaInsets,
    pub status_bar_height: f64,
}

impl ScreenMetrics {
    fn from_parts(dimensions: ScreenDimensions, safe_area: SafeAreaInsets) -> Self {
        Self {
            width: dimensions.width,
            height: dimensions.height,
            pixel_scale: dimensions.pixel_scale,
            safe_area,
            status_bar_height: safe_area.status_bar_height,
        }
    }
}

/// Derive factors for `config` on a screen of `screen` size
///
/// Always computed from scratch; nothing carries over from earlier factors.
pub fn compute_factors(config: &Configuration, screen: &ScreenDimensions) -> ScaleFactors {
    let scale_width = screen.width / config.design_size.width;
    let scale_height = screen.height / config.design_size.height;
    let scale_text = if config.min_text_adapt {
        scale_width.min(scale_height)
    } else {
        scale_width
    };

    let limits = config.scaling_limits;
    ScaleFactors {
        scale_width: limits.clamp(scale_width),
        scale_height: limits.clamp(scale_height),
        scale_text: limits.clamp(scale_text),
    }
}

/// Builder for [`ScaleEngine`]
pub struct ScaleEngineBuilder {
    configuration: Configuration,
    source: Option<Arc<dyn DeviceMetricsSource>>,
    clock: Option<Arc<dyn Clock>>,
    cache_policy: CachePolicy,
}

impl ScaleEngineBuilder {
    fn new() -> Self {
        Self {
            configuration: Configuration::default(),
            source: None,
            clock: None,
            cache_policy: CachePolicy::default(),
        }
    }

    /// Initial configuration. An invalid one is replaced by the default.
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Where device metrics come from (default: [`FallbackMetricsSource`])
    pub fn source(mut self, source: Arc<dyn DeviceMetricsSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Time source for cache expiry (default: [`MonotonicClock`])
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Cache lifetimes
    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Configuration and cache policy from a loaded settings file
    pub fn settings(self, settings: Settings) -> Self {
        self.configuration(settings.configuration)
            .cache_policy(settings.cache_policy)
    }

    pub fn build(self) -> ScaleEngine {
        let source: Arc<dyn DeviceMetricsSource> = match self.source {
            Some(source) => source,
            None => Arc::new(FallbackMetricsSource::new()),
        };
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(MonotonicClock::new()),
        };

        let configuration = if self.configuration.is_valid_design_size() {
            self.configuration
        } else {
            tracing::error!(
                width = self.configuration.design_size.width,
                height = self.configuration.design_size.height,
                "invalid initial design size, falling back to default configuration"
            );
            Configuration::default()
        };

        let dimensions = ScreenDimensionsCache::new(
            Arc::clone(&source),
            self.cache_policy.dimensions_ttl,
            Arc::clone(&clock),
        );
        let safe_area =
            SafeAreaCache::new(Arc::clone(&source), self.cache_policy.safe_area_ttl, clock);

        // Pre-warm both caches
        let screen = dimensions.get();
        safe_area.get();

        let derived = DerivedState {
            factors: compute_factors(&configuration, &screen),
            screen,
        };

        tracing::debug!(%configuration, factors = ?derived.factors, "scale engine created");

        ScaleEngine {
            device_category: source.device_category(),
            configuration: Mutex::new(configuration),
            derived: SharedFactors::new(derived),
            dimensions,
            safe_area,
        }
    }
}

/// Shared scaling context
pub struct ScaleEngine {
    configuration: Mutex<Configuration>,
    derived: SharedFactors,
    dimensions: ScreenDimensionsCache,
    safe_area: SafeAreaCache,
    device_category: DeviceCategory,
}

impl ScaleEngine {
    /// Engine with default configuration, cache policy and clock
    pub fn new(source: Arc<dyn DeviceMetricsSource>) -> Self {
        Self::builder().source(source).build()
    }

    pub fn builder() -> ScaleEngineBuilder {
        ScaleEngineBuilder::new()
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Install a new configuration and recompute the factors
    ///
    /// A configuration with an out-of-range design size is ignored: the
    /// current configuration and factors stay as they are. Debug builds log
    /// the rejection at error level; release builds drop it silently. Safe to
    /// call from any thread; the last writer wins.
    pub fn configure(&self, config: Configuration) {
        let fetched = self.dimensions.get();

        let mut current = self.configuration.lock();
        if !config.is_valid_design_size() {
            #[cfg(debug_assertions)]
            tracing::error!(
                width = config.design_size.width,
                height = config.design_size.height,
                "configuration rejected: design size out of range"
            );
            return;
        }

        *current = config;
        let screen = self.locked_screen(fetched);
        self.recompute(&current, screen);
        tracing::debug!(configuration = %config, "configuration installed");
    }

    /// Rederive factors from the (possibly cached) screen dimensions
    ///
    /// The configuration is left as is. Calling it twice in a row without a
    /// screen change gives the same factors.
    pub fn refresh_metrics(&self) {
        let fetched = self.dimensions.get();
        let current = self.configuration.lock();
        let screen = self.locked_screen(fetched);
        self.recompute(&current, screen);
    }

    /// Screen dimensions to derive from once the configuration lock is held
    ///
    /// Another writer may have refreshed the cache between `fetched` being
    /// read and the lock being taken; the cached value then wins. Falls back
    /// to `fetched` when the cache has been invalidated in the meantime.
    fn locked_screen(&self, fetched: ScreenDimensions) -> ScreenDimensions {
        self.dimensions.peek().unwrap_or(fetched)
    }

    /// Caller must hold the configuration lock
    fn recompute(&self, config: &Configuration, screen: ScreenDimensions) {
        let factors = compute_factors(config, &screen);
        self.derived.store(DerivedState { factors, screen });
        tracing::trace!(?factors, "scale factors recomputed");
    }

    /// Copy of the active configuration
    pub fn configuration(&self) -> Configuration {
        *self.configuration.lock()
    }

    // ========================================================================
    // Scaling
    // ========================================================================

    /// Map a design value to a device value
    ///
    /// Non-finite input (NaN, ±infinity) yields `0.0`. Negative values scale
    /// linearly and keep their sign.
    #[inline]
    pub fn scale(&self, value: f64, scale_type: ScaleType) -> f64 {
        if !value.is_finite() {
            #[cfg(debug_assertions)]
            tracing::warn!(value, %scale_type, "non-finite value passed to scale, returning 0");
            return 0.0;
        }
        value * self.derived.factors().factor_for(scale_type)
    }

    /// [`scale`](Self::scale) without the finiteness guard
    ///
    /// For hot paths whose input is already known to be finite. Non-finite
    /// input produces an unspecified result. With the `lock-free-reads`
    /// feature this reads the factors without taking any lock.
    #[inline]
    pub fn fast_scale(&self, value: f64, scale_type: ScaleType) -> f64 {
        value * self.hot_factors().factor_for(scale_type)
    }

    #[inline]
    fn hot_factors(&self) -> ScaleFactors {
        #[cfg(feature = "lock-free-reads")]
        {
            self.derived.load_unsynchronized()
        }
        #[cfg(not(feature = "lock-free-reads"))]
        {
            self.derived.factors()
        }
    }

    /// Snapshot of the current factors
    pub fn fast_scaler(&self) -> FastScale {
        FastScale::new(self.derived.factors())
    }

    /// Run `operation` against one snapshot of the current factors
    pub fn with_fast_scale<T>(&self, operation: impl FnOnce(&FastScale) -> T) -> T {
        operation(&self.fast_scaler())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Consistent copy of all three factors
    pub fn factors(&self) -> ScaleFactors {
        self.derived.factors()
    }

    /// Lock-free factor read; the three values may come from different
    /// configurations if a `configure` is running concurrently
    pub fn factors_unsynchronized(&self) -> ScaleFactors {
        self.derived.load_unsynchronized()
    }

    pub fn scale_width(&self) -> f64 {
        self.derived.factors().scale_width
    }

    pub fn scale_height(&self) -> f64 {
        self.derived.factors().scale_height
    }

    pub fn scale_text(&self) -> f64 {
        self.derived.factors().scale_text
    }

    /// Screen width the current factors were derived from
    pub fn screen_width(&self) -> f64 {
        self.derived.load().screen.width
    }

    /// Screen height the current factors were derived from
    pub fn screen_height(&self) -> f64 {
        self.derived.load().screen.height
    }

    pub fn safe_area(&self) -> SafeAreaInsets {
        self.safe_area.get()
    }

    pub fn safe_area_top(&self) -> f64 {
        self.safe_area.get().top
    }

    pub fn safe_area_bottom(&self) -> f64 {
        self.safe_area.get().bottom
    }

    pub fn safe_area_left(&self) -> f64 {
        self.safe_area.get().left
    }

    pub fn safe_area_right(&self) -> f64 {
        self.safe_area.get().right
    }

    pub fn status_bar_height(&self) -> f64 {
        self.safe_area.get().status_bar_height
    }

    /// Device category, queried once at construction
    pub fn device_category(&self) -> DeviceCategory {
        self.device_category
    }

    /// Current screen size, pixel ratio and safe area from the caches
    pub fn screen_metrics(&self) -> ScreenMetrics {
        ScreenMetrics::from_parts(self.dimensions.get(), self.safe_area.get())
    }

    // ========================================================================
    // Invalidation
    // ========================================================================

    /// Invalidate whichever caches `event` affects
    ///
    /// Factors are not recomputed here; call
    /// [`refresh_metrics`](Self::refresh_metrics) once the host has settled.
    pub fn handle_event(&self, event: MetricsEvent) {
        self.dimensions.on_event(event);
        self.safe_area.on_event(event);
    }

    /// Route `hub` events into [`handle_event`](Self::handle_event)
    ///
    /// The listener holds a weak reference. Once the engine is dropped it
    /// does nothing, and the hub removes it on its next prune.
    pub fn subscribe(self: &Arc<Self>, hub: &MetricsEventHub) -> ListenerId {
        let engine: Weak<Self> = Arc::downgrade(self);
        let liveness = Weak::clone(&engine);
        hub.subscribe_while(
            move || liveness.strong_count() > 0,
            move |event| {
                if let Some(engine) = engine.upgrade() {
                    engine.handle_event(event);
                }
            },
        )
    }
}

impl Default for ScaleEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for ScaleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaleEngine")
            .field("configuration", &self.configuration())
            .field("derived", &self.derived)
            .field("device_category", &self.device_category)
            .finish_non_exhaustive()
    }
}
