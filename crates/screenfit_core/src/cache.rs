//! Time-bounded caches over device metric queries
//!
//! Platform screen queries are too slow to make on every layout pass, so the
//! engine reads them through two caches:
//!
//! - [`ScreenDimensionsCache`] - 30 s TTL, cleared on orientation or display
//!   scale changes
//! - [`SafeAreaCache`] - 10 s TTL, cleared on orientation changes and scene
//!   activation
//!
//! Refresh is lazy: a read past the TTL (or after [`invalidate`]) performs the
//! query inline, under the cache's own lock. Nothing runs in the background.
//!
//! [`invalidate`]: TtlCache::invalidate

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use screenfit_platform::{DeviceMetricsSource, MetricsEvent, SafeAreaInsets, ScreenDimensions};

use crate::clock::Clock;

/// Default lifetime of cached screen dimensions
pub const DEFAULT_DIMENSIONS_TTL: Duration = Duration::from_secs(30);

/// Default lifetime of cached safe-area insets
pub const DEFAULT_SAFE_AREA_TTL: Duration = Duration::from_secs(10);

/// Lifetimes for both metric caches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachePolicy {
    /// Lifetime of cached screen dimensions
    pub dimensions_ttl: Duration,
    /// Lifetime of cached safe-area insets
    pub safe_area_ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            dimensions_ttl: DEFAULT_DIMENSIONS_TTL,
            safe_area_ttl: DEFAULT_SAFE_AREA_TTL,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry<T> {
    value: T,
    fetched_at: Duration,
}

/// Single-value cache with a time-to-live
///
/// The expiry check and the store happen under one lock, so concurrent
/// readers either all see the old entry or one of them refreshes it.
pub struct TtlCache<T> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slot: Mutex<Option<Entry<T>>>,
}

impl<T: Copy> TtlCache<T> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached value if younger than the TTL, otherwise call
    /// `fetch`, store its result and return it
    pub fn get_or_refresh(&self, fetch: impl FnOnce() -> T) -> T {
        let mut slot = self.slot.lock();
        let now = self.clock.now();

        if let Some(entry) = slot.as_ref() {
            if now.saturating_sub(entry.fetched_at) < self.ttl {
                return entry.value;
            }
        }

        let value = fetch();
        *slot = Some(Entry {
            value,
            fetched_at: now,
        });
        value
    }

    /// Cached value regardless of age, without refreshing
    pub fn peek(&self) -> Option<T> {
        self.slot.lock().as_ref().map(|entry| entry.value)
    }

    /// Drop the cached value so the next read re-queries
    pub fn invalidate(&self) {
        self.slot.lock().take();
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<T> std::fmt::Debug for TtlCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.ttl)
            .field("populated", &self.slot.lock().is_some())
            .finish()
    }
}

// ============================================================================
// Screen Dimensions
// ============================================================================

/// Cache over [`DeviceMetricsSource::screen_dimensions`]
pub struct ScreenDimensionsCache {
    source: Arc<dyn DeviceMetricsSource>,
    cache: TtlCache<ScreenDimensions>,
}

impl ScreenDimensionsCache {
    pub fn new(source: Arc<dyn DeviceMetricsSource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache: TtlCache::new(ttl, clock),
        }
    }

    /// Current dimensions, re-querying the platform when stale
    pub fn get(&self) -> ScreenDimensions {
        self.cache.get_or_refresh(|| {
            let dimensions = self.source.screen_dimensions();
            tracing::debug!(
                width = dimensions.width,
                height = dimensions.height,
                pixel_scale = dimensions.pixel_scale,
                "queried screen dimensions"
            );
            dimensions
        })
    }

    /// Cached dimensions regardless of age, without querying
    pub fn peek(&self) -> Option<ScreenDimensions> {
        self.cache.peek()
    }

    pub fn invalidate(&self) {
        tracing::debug!("screen dimensions cache invalidated");
        self.cache.invalidate();
    }

    /// Whether `event` makes cached dimensions stale
    pub fn is_invalidated_by(event: MetricsEvent) -> bool {
        matches!(
            event,
            MetricsEvent::OrientationChanged | MetricsEvent::ScaleFactorChanged { .. }
        )
    }

    /// Invalidate if `event` calls for it
    pub fn on_event(&self, event: MetricsEvent) {
        if Self::is_invalidated_by(event) {
            self.invalidate();
        }
    }
}

impl std::fmt::Debug for ScreenDimensionsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenDimensionsCache")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Safe Area
// ============================================================================

/// Cache over [`DeviceMetricsSource::safe_area_insets`]
pub struct SafeAreaCache {
    source: Arc<dyn DeviceMetricsSource>,
    cache: TtlCache<SafeAreaInsets>,
}

impl SafeAreaCache {
    pub fn new(source: Arc<dyn DeviceMetricsSource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache: TtlCache::new(ttl, clock),
        }
    }

    /// Current insets, re-querying the platform when stale
    pub fn get(&self) -> SafeAreaInsets {
        self.cache.get_or_refresh(|| {
            let insets = self.source.safe_area_insets();
            tracing::debug!(
                top = insets.top,
                bottom = insets.bottom,
                status_bar = insets.status_bar_height,
                "queried safe area insets"
            );
            insets
        })
    }

    pub fn invalidate(&self) {
        tracing::debug!("safe area cache invalidated");
        self.cache.invalidate();
    }

    /// Whether `event` makes cached insets stale
    pub fn is_invalidated_by(event: MetricsEvent) -> bool {
        matches!(
            event,
            MetricsEvent::OrientationChanged | MetricsEvent::SceneActivated
        )
    }

    /// Invalidate if `event` calls for it
    pub fn on_event(&self, event: MetricsEvent) {
        if Self::is_invalidated_by(event) {
            self.invalidate();
        }
    }
}

impl std::fmt::Debug for SafeAreaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafeAreaCache")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
