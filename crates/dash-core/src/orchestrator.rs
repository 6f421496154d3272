//! Dashboard orchestrator
//!
//! Owns the active role code. Everything else derives from it:
//! 1. Role config, through the [`RoleResolver`]
//! 2. Widget data, through the [`DashboardDataLoader`]
//! 3. The rendered page, through the [`DashboardRenderer`]
//!
//! Changing the role replaces config and data together. Page event streams
//! follow data commits for their role and end as soon as the role changes,
//! abandoning widget loads that are still in flight.

use dash_render::{DashboardRenderer, DashboardView, RenderSettings, SlotUpdate};
use dash_roles::{
    LayoutMode, RoleAssignments, RoleCode, RoleConfigTable, RoleDashboardConfig, RoleResolver,
    RoleSource,
};
use dash_widget::{WidgetDataMap, WidgetRegistry};
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

use crate::error::SwitchError;
use crate::loader::{DashboardDataLoader, LoadFailure, LoadOutcome, LoadState};
use crate::settings::DashboardSettings;
use crate::source::DashboardDataSource;
use crate::switcher::{RoleOption, RoleSwitcher};

/// Page-level notice for a failed aggregate fetch
///
/// Widgets still render (with no data) underneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageBanner {
    /// Error text
    pub message: String,

    /// Whether a refresh may help
    pub retryable: bool,

    /// What the user can do about it
    pub hint: String,
}

impl From<&LoadFailure> for PageBanner {
    fn from(failure: &LoadFailure) -> Self {
        let hint = if failure.retryable {
            "Dashboard data could not be loaded. Refresh to try again."
        } else {
            "Dashboard data could not be loaded. Contact an administrator if this persists."
        };
        Self {
            message: failure.message.clone(),
            retryable: failure.retryable,
            hint: hint.to_string(),
        }
    }
}

/// Everything needed to show the dashboard for the active role
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPage {
    /// Active role
    pub role: RoleCode,

    /// Label of the served config
    pub label: String,

    /// Layout of the served config
    pub layout: LayoutMode,

    /// Role options, absent for single-role users
    pub switcher: Option<Vec<RoleOption>>,

    /// Aggregate fetch failure, if any
    pub banner: Option<PageBanner>,

    /// Aggregate fetch in flight
    pub loading: bool,

    /// Widget grid
    pub view: DashboardView,

    /// Data generation the page was built from
    pub generation: u64,
}

/// Item of a page event stream
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Initial page with skeletons for pending widgets
    Layout(DashboardPage),

    /// One widget settled
    Slot(SlotUpdate),
}

#[derive(Debug, Clone)]
struct Session {
    assignments: RoleAssignments,
    active: RoleCode,
    config: Arc<RoleDashboardConfig>,
}

/// Coordinates role, config, data and rendering
#[derive(Debug)]
pub struct DashboardOrchestrator {
    resolver: RoleResolver,
    renderer: DashboardRenderer,
    loader: DashboardDataLoader,
    session: RwLock<Option<Session>>,
    role_changes: watch::Sender<Option<RoleCode>>,
}

impl DashboardOrchestrator {
    /// Create orchestrator from its parts
    #[must_use]
    pub fn new(
        resolver: RoleResolver,
        renderer: DashboardRenderer,
        source: Arc<dyn DashboardDataSource>,
    ) -> Self {
        let (role_changes, _) = watch::channel(None);
        Self {
            resolver,
            renderer,
            loader: DashboardDataLoader::new(source),
            session: RwLock::new(None),
            role_changes,
        }
    }

    /// Orchestrator over the standard catalog and role table
    #[must_use]
    pub fn standard(settings: &DashboardSettings, source: Arc<dyn DashboardDataSource>) -> Self {
        Self::new(
            RoleResolver::new(Arc::new(RoleConfigTable::standard())),
            DashboardRenderer::with_settings(
                Arc::new(WidgetRegistry::standard()),
                RenderSettings::from(settings.render),
            ),
            source,
        )
    }

    /// Read the user's roles, activate the primary one and load its data
    ///
    /// Users without roles get the `default` dashboard.
    ///
    /// # Errors
    /// Returns `SwitchError::Source` if the role source fails.
    pub async fn initialize(&self, roles: &dyn RoleSource) -> Result<LoadOutcome, SwitchError> {
        let assignments = roles.resolve_roles().await?;
        Ok(self.initialize_with(assignments).await)
    }

    /// Activate the primary role of known assignments and load its data
    pub async fn initialize_with(&self, assignments: RoleAssignments) -> LoadOutcome {
        let active = assignments.primary_code().unwrap_or_default();
        tracing::info!(role = %active, roles = assignments.len(), "initializing dashboard");
        let generation = self.activate(assignments, active.clone());
        self.loader.complete(&active, generation).await
    }

    /// Switch to another of the user's roles
    ///
    /// Selecting the active role again does nothing and returns `Idle`.
    ///
    /// # Errors
    /// - `SwitchError::NotInitialized` before `initialize`
    /// - `SwitchError::Unavailable` for single-role users
    /// - `SwitchError::NotAssigned` for roles the user does not hold
    pub async fn switch_role(&self, raw: &str) -> Result<LoadOutcome, SwitchError> {
        let session = self.session.read().clone().ok_or(SwitchError::NotInitialized)?;
        let switcher = RoleSwitcher::new(&session.assignments, &session.active)
            .ok_or(SwitchError::Unavailable)?;
        let code = switcher.select(raw)?;

        if code == session.active {
            tracing::debug!(role = %code, "role already active");
            return Ok(LoadOutcome::Idle);
        }

        tracing::info!(from = %session.active, to = %code, "switching role");
        let generation = self.activate(session.assignments, code.clone());
        Ok(self.loader.complete(&code, generation).await)
    }

    /// Re-fetch data for the active role
    pub async fn refresh(&self) -> LoadOutcome {
        let started = {
            let session = self.session.read();
            session
                .as_ref()
                .map(|s| (s.active.clone(), self.loader.begin(&s.active)))
        };
        match started {
            Some((role, generation)) => self.loader.complete(&role, generation).await,
            None => LoadOutcome::Idle,
        }
    }

    /// Role switcher, if the user holds more than one role
    #[must_use]
    pub fn switcher(&self) -> Option<RoleSwitcher> {
        let session = self.session.read();
        session
            .as_ref()
            .and_then(|s| RoleSwitcher::new(&s.assignments, &s.active))
    }

    /// Active role
    #[must_use]
    pub fn active_role(&self) -> Option<RoleCode> {
        self.session.read().as_ref().map(|s| s.active.clone())
    }

    /// Config served for the active role
    #[must_use]
    pub fn config(&self) -> Option<Arc<RoleDashboardConfig>> {
        self.session.read().as_ref().map(|s| Arc::clone(&s.config))
    }

    /// Loader state
    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.loader.state()
    }

    /// Receiver of loader state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.loader.subscribe()
    }

    /// Renderer
    #[inline]
    #[must_use]
    pub fn renderer(&self) -> &DashboardRenderer {
        &self.renderer
    }

    /// Initial page: layout with skeletons, nothing mounted
    #[must_use]
    pub fn page(&self) -> Option<DashboardPage> {
        let (session, state) = self.snapshot()?;
        let view = self.renderer.layout(&session.config, &data_for(&session, &state));
        Some(compose(&session, &state, view))
    }

    /// Fully rendered page
    pub async fn render_page(&self) -> Option<DashboardPage> {
        let (session, state) = self.snapshot()?;
        let view = self
            .renderer
            .render(&session.config, &data_for(&session, &state))
            .await;
        Some(compose(&session, &state, view))
    }

    /// Initial page followed by widget updates as they settle
    ///
    /// Every data change for the role re-emits a [`PageEvent::Layout`] and
    /// mounts the widgets again with the new data, so a stream opened while
    /// the fetch is in flight still delivers the committed payload. The
    /// stream ends once the page has settled on committed data, or as soon as
    /// the active role changes.
    #[must_use]
    pub fn page_events(&self) -> Option<BoxStream<'static, PageEvent>> {
        let mut role_changes = self.role_changes.subscribe();
        let session = self.session.read().clone()?;
        let renderer = self.renderer.clone();
        let states = self.loader.subscribe();

        let pages = stream::unfold((states, None::<LoadState>), move |(mut states, previous)| {
            let renderer = renderer.clone();
            let session = session.clone();
            async move {
                if let Some(previous) = previous {
                    if !states.has_changed().unwrap_or(false) {
                        if previous.is_settled_for(&session.active) {
                            return None;
                        }
                        states.changed().await.ok()?;
                    }
                }

                let state = states.borrow_and_update().clone();
                if state.role.as_ref().is_some_and(|role| *role != session.active) {
                    return None;
                }

                let mounted = renderer.mount(&session.config, &data_for(&session, &state));
                let page = compose(&session, &state, mounted.view);
                let mut watcher = states.clone();
                let data_changed = async move {
                    let _ = watcher.changed().await;
                };
                let events = stream::once(async move { PageEvent::Layout(page) })
                    .chain(mounted.updates.map(PageEvent::Slot))
                    .take_until(data_changed);
                Some((events, (states, Some(state))))
            }
        });

        let role_changed = async move {
            let _ = role_changes.changed().await;
        };
        Some(pages.flatten().take_until(role_changed).boxed())
    }

    /// Replace the session and start its load as one step
    ///
    /// Holding the session lock across `begin` keeps the active role and the
    /// loader's role in the same order under concurrent switches.
    fn activate(&self, assignments: RoleAssignments, active: RoleCode) -> u64 {
        let resolved = self.resolver.resolve_code(&active);
        tracing::info!(role = %active, label = %resolved.label, "role activated");

        let mut session = self.session.write();
        *session = Some(Session {
            assignments,
            active: active.clone(),
            config: resolved,
        });
        self.role_changes.send_replace(Some(active.clone()));
        self.loader.begin(&active)
    }

    fn snapshot(&self) -> Option<(Session, LoadState)> {
        let session = self.session.read().clone()?;
        Some((session, self.loader.state()))
    }
}

/// Data for the active role; a state left over from another role counts as none
fn data_for(session: &Session, state: &LoadState) -> WidgetDataMap {
    if state.role.as_ref() == Some(&session.active) {
        state.data.clone()
    } else {
        WidgetDataMap::empty()
    }
}

fn compose(session: &Session, state: &LoadState, view: DashboardView) -> DashboardPage {
    let current = state.role.as_ref() == Some(&session.active);
    DashboardPage {
        role: session.active.clone(),
        label: session.config.label.clone(),
        layout: session.config.layout,
        switcher: RoleSwitcher::new(&session.assignments, &session.active).map(|s| s.options()),
        banner: state
            .error
            .as_ref()
            .filter(|_| current)
            .map(PageBanner::from),
        loading: !current || state.loading,
        view,
        generation: state.generation,
    }
}
