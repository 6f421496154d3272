//! Loaded widget implementation cache using moka
//!
//! Once a widget implementation has loaded it stays available, so switching
//! back to a role does not load the same implementations again. Concurrent
//! loads of one widget (the same id placed twice, or two renders racing) are
//! coalesced into a single load. Failed loads are not cached.

use dash_widget::{WidgetId, WidgetView};
use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;

use crate::slot::SlotState;

/// Default number of cached implementations
pub const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Cache of loaded widget views keyed by widget id
#[derive(Debug, Clone)]
pub struct ComponentCache {
    inner: Cache<WidgetId, Arc<dyn WidgetView>>,
}

impl ComponentCache {
    /// Create cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Get a loaded view
    #[inline]
    pub async fn get(&self, id: &WidgetId) -> Option<Arc<dyn WidgetView>> {
        self.inner.get(id).await
    }

    /// Get a loaded view or run `load` once for all concurrent callers
    ///
    /// # Errors
    /// Returns the load placeholder produced by `load`; nothing is cached then.
    pub async fn get_or_load<F>(&self, id: &WidgetId, load: F) -> Result<Arc<dyn WidgetView>, SlotState>
    where
        F: Future<Output = Result<Arc<dyn WidgetView>, SlotState>>,
    {
        self.inner
            .try_get_with(id.clone(), load)
            .await
            .map_err(|placeholder| (*placeholder).clone())
    }

    /// Check if a view is cached
    #[inline]
    pub async fn contains(&self, id: &WidgetId) -> bool {
        self.inner.get(id).await.is_some()
    }

    /// Drop every cached view
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Approximate number of cached views
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for ComponentCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
