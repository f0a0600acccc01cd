//! Metrics change events and listener registration
//!
//! The platform layer observes orientation changes and scene activation in
//! whatever way the host framework allows, then forwards them here. Anything
//! holding cached metrics registers a plain callback with the hub.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Events that may invalidate cached device metrics
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetricsEvent {
    /// Device rotated; screen size and safe area may both have changed
    OrientationChanged,
    /// A scene/window became active; safe area may have changed
    SceneActivated,
    /// Display scale factor changed
    ScaleFactorChanged {
        /// New scale factor
        scale_factor: f64,
    },
}

/// Handle returned by [`MetricsEventHub::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Arc<dyn Fn(MetricsEvent) + Send + Sync>;
type Liveness = Box<dyn Fn() -> bool + Send + Sync>;

struct Listener {
    id: ListenerId,
    callback: Callback,
    /// `None` for listeners that stay until unsubscribed
    alive: Option<Liveness>,
}

impl Listener {
    fn is_alive(&self) -> bool {
        self.alive.as_ref().map_or(true, |alive| alive())
    }
}

/// Callback registry for [`MetricsEvent`]s
#[derive(Default)]
pub struct MetricsEventHub {
    listeners: RwLock<Vec<Listener>>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for MetricsEventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsEventHub")
            .field("listeners", &self.listeners.read().len())
            .finish()
    }
}

impl MetricsEventHub {
    /// Create an empty hub
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; it runs synchronously on the emitting thread
    pub fn subscribe<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(MetricsEvent) + Send + Sync + 'static,
    {
        self.register(Arc::new(callback), None)
    }

    /// Register a callback that is dropped once `alive` returns false
    ///
    /// Dead listeners are removed on the next `subscribe`, `emit` or
    /// [`prune`](Self::prune), so owners that go away without unsubscribing
    /// do not accumulate.
    pub fn subscribe_while<A, F>(&self, alive: A, callback: F) -> ListenerId
    where
        A: Fn() -> bool + Send + Sync + 'static,
        F: Fn(MetricsEvent) + Send + Sync + 'static,
    {
        self.register(Arc::new(callback), Some(Box::new(alive)))
    }

    fn register(&self, callback: Callback, alive: Option<Liveness>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let mut listeners = self.listeners.write();
        listeners.retain(Listener::is_alive);
        listeners.push(Listener {
            id,
            callback,
            alive,
        });
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|listener| listener.id != id);
        listeners.len() != before
    }

    /// Drop listeners whose owner is gone. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(Listener::is_alive);
        let removed = before - listeners.len();
        if removed > 0 {
            tracing::debug!(removed, "pruned dead metrics listeners");
        }
        removed
    }

    /// Deliver an event to every live listener
    pub fn emit(&self, event: MetricsEvent) {
        self.prune();

        // Clone out so a listener may subscribe/unsubscribe without deadlocking
        let callbacks: Vec<Callback> = self
            .listeners
            .read()
            .iter()
            .map(|listener| Arc::clone(&listener.callback))
            .collect();

        tracing::debug!(?event, listeners = callbacks.len(), "emitting metrics event");

        for callback in callbacks {
            callback(event);
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}
