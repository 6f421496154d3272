//! Dashboard data loader
//!
//! Fetches the aggregate widget data map for the active role and publishes
//! `{ data, loading, error }` through a watch channel.
//!
//! Every load is tagged with a generation. Only the newest generation may
//! commit; a response that arrives after a newer load started is dropped, so
//! a slow fetch for a previous role can never overwrite the current one.

use chrono::{DateTime, Utc};
use dash_roles::RoleCode;
use dash_widget::WidgetDataMap;
use serde::Serialize;
use std::fmt::{self, Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::error::DashboardError;
use crate::source::DashboardDataSource;

/// Recorded aggregate fetch failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    /// Human readable error
    pub message: String,

    /// Whether a manual refresh may help
    pub retryable: bool,
}

impl From<&DashboardError> for LoadFailure {
    fn from(err: &DashboardError) -> Self {
        Self {
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

/// Published loader state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadState {
    /// Role the state belongs to (`None` before the first load)
    pub role: Option<RoleCode>,

    /// Generation of the newest load
    pub generation: u64,

    /// Widget data; empty while a different role loads and after a failure
    pub data: WidgetDataMap,

    /// A fetch is in flight
    pub loading: bool,

    /// Last fetch failed
    pub error: Option<LoadFailure>,

    /// Time of the last successful load
    pub loaded_at: Option<DateTime<Utc>>,
}

impl LoadState {
    /// Check if the state is settled for `role`
    #[must_use]
    pub fn is_settled_for(&self, role: &RoleCode) -> bool {
        !self.loading && self.role.as_ref() == Some(role)
    }
}

/// Result of one load call
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Data committed
    Loaded {
        /// Generation that committed
        generation: u64,
        /// Number of widgets with data
        widgets: usize,
    },

    /// Fetch failed; empty data and the error were committed
    Failed {
        /// Generation that committed
        generation: u64,
        /// Underlying error
        error: DashboardError,
    },

    /// A newer load started first; result dropped
    Stale {
        /// Generation of the dropped load
        generation: u64,
    },

    /// Nothing to refresh yet
    Idle,
}

impl LoadOutcome {
    /// Check if this load's result was committed
    #[inline]
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::Failed { .. })
    }
}

/// Generation-tagged loader over a [`DashboardDataSource`]
pub struct DashboardDataLoader {
    source: Arc<dyn DashboardDataSource>,
    generation: AtomicU64,
    state: watch::Sender<LoadState>,
}

impl DashboardDataLoader {
    /// Create loader
    #[must_use]
    pub fn new(source: Arc<dyn DashboardDataSource>) -> Self {
        let (state, _) = watch::channel(LoadState::default());
        Self {
            source,
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Receiver that sees every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Generation of the newest load
    #[inline]
    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Fetch data for `role` and commit it if no newer load started
    ///
    /// Data is cleared while a different role loads and kept while the same
    /// role reloads.
    pub async fn load(&self, role: &RoleCode) -> LoadOutcome {
        let generation = self.begin(role);
        self.complete(role, generation).await
    }

    /// Fetch for a load started with [`Self::begin`] and commit if still current
    pub(crate) async fn complete(&self, role: &RoleCode, generation: u64) -> LoadOutcome {
        tracing::info!(%role, generation, "loading dashboard data");

        let result = self.source.fetch(role).await;

        if self.current_generation() != generation {
            tracing::debug!(%role, generation, "dropping stale dashboard data");
            return LoadOutcome::Stale { generation };
        }

        match result {
            Ok(data) => {
                let widgets = data.len();
                let committed = self.commit(generation, |state| {
                    state.data = data;
                    state.error = None;
                    state.loaded_at = Some(Utc::now());
                });
                if !committed {
                    return LoadOutcome::Stale { generation };
                }
                tracing::info!(%role, generation, widgets, "dashboard data loaded");
                LoadOutcome::Loaded { generation, widgets }
            }
            Err(error) => {
                let failure = LoadFailure::from(&error);
                let committed = self.commit(generation, |state| {
                    state.data = WidgetDataMap::empty();
                    state.error = Some(failure);
                });
                if !committed {
                    return LoadOutcome::Stale { generation };
                }
                tracing::warn!(%role, generation, %error, "dashboard data fetch failed");
                LoadOutcome::Failed { generation, error }
            }
        }
    }

    /// Re-issue the fetch for the role of the current state
    pub async fn refresh(&self) -> LoadOutcome {
        let role = self.state.borrow().role.clone();
        match role {
            Some(role) => self.load(&role).await,
            None => LoadOutcome::Idle,
        }
    }

    /// Publish `loading` for `role` under a new generation
    pub(crate) fn begin(&self, role: &RoleCode) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            if state.role.as_ref() != Some(role) {
                state.data = WidgetDataMap::empty();
                state.loaded_at = None;
            }
            state.role = Some(role.clone());
            state.generation = generation;
            state.loading = true;
            state.error = None;
        });
        generation
    }

    fn commit(&self, generation: u64, apply: impl FnOnce(&mut LoadState)) -> bool {
        self.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            apply(state);
            state.loading = false;
            true
        })
    }
}

impl Debug for DashboardDataLoader {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardDataLoader")
            .field("generation", &self.current_generation())
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
