//! Dashboard renderer
//!
//! Turns a [`RoleDashboardConfig`] and a [`WidgetDataMap`] into a
//! [`DashboardView`]:
//! 1. Resolve each placement against the registry (unknown → `NotRegistered`)
//! 2. Pick the effective size and its grid span
//! 3. Build props (placement overrides + `data` from the map)
//! 4. Mount the widget inside its own [`IsolationBoundary`]
//!
//! The initial layout is in placement order. Slots then settle independently
//! and in no particular order.

use dash_roles::RoleDashboardConfig;
use dash_widget::{Resolution, WidgetDataMap, WidgetId, WidgetLoader, WidgetProps, WidgetRegistry, WidgetSize};
use futures::stream::{BoxStream, FuturesUnordered};
use futures::StreamExt;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::boundary::{IsolationBoundary, Suspendable};
use crate::cache::{ComponentCache, DEFAULT_CACHE_CAPACITY};
use crate::grid::GridSpan;
use crate::slot::{DashboardContent, DashboardView, Skeleton, SlotState, SlotUpdate, WidgetSlot};

/// Renderer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Size used when neither placement nor definition name one
    pub default_size: WidgetSize,

    /// Capacity of the loaded implementation cache
    pub cache_capacity: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            default_size: WidgetSize::Medium,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Widget waiting to be mounted
struct MountTask {
    index: usize,
    id: WidgetId,
    loader: Arc<dyn WidgetLoader>,
    props: WidgetProps,
    boundary: IsolationBoundary,
}

/// Initial layout plus the stream of slot updates as widgets settle
pub struct MountedDashboard {
    /// Layout with skeletons for pending widgets
    pub view: DashboardView,

    /// One update per resolved widget, in completion order
    pub updates: BoxStream<'static, SlotUpdate>,
}

impl MountedDashboard {
    /// Drive every widget to completion and return the settled view
    pub async fn settle(mut self) -> DashboardView {
        while let Some(update) = self.updates.next().await {
            self.view.apply(update);
        }
        self.view
    }
}

impl Debug for MountedDashboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedDashboard")
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

/// Renderer over an injected widget registry
#[derive(Debug, Clone)]
pub struct DashboardRenderer {
    registry: Arc<WidgetRegistry>,
    cache: ComponentCache,
    default_size: WidgetSize,
}

impl DashboardRenderer {
    /// Create renderer with default settings
    #[must_use]
    pub fn new(registry: Arc<WidgetRegistry>) -> Self {
        Self::with_settings(registry, RenderSettings::default())
    }

    /// Create renderer with settings
    #[must_use]
    pub fn with_settings(registry: Arc<WidgetRegistry>, settings: RenderSettings) -> Self {
        Self {
            registry,
            cache: ComponentCache::new(settings.cache_capacity),
            default_size: settings.default_size,
        }
    }

    /// Get the registry
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<WidgetRegistry> {
        &self.registry
    }

    /// Get the implementation cache
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &ComponentCache {
        &self.cache
    }

    /// Initial layout: skeletons for resolved widgets, placeholders for the rest
    #[must_use]
    pub fn layout(&self, config: &RoleDashboardConfig, data: &WidgetDataMap) -> DashboardView {
        self.plan(config, data).0
    }

    /// Layout plus a stream that mounts every resolved widget
    #[must_use]
    pub fn mount(&self, config: &RoleDashboardConfig, data: &WidgetDataMap) -> MountedDashboard {
        let (view, tasks) = self.plan(config, data);
        let cache = self.cache.clone();

        let updates: FuturesUnordered<_> = tasks
            .into_iter()
            .map(|task| {
                let cache = cache.clone();
                async move {
                    let state = task.boundary.mount(task.loader, &cache, &task.props).await;
                    SlotUpdate {
                        index: task.index,
                        id: task.id,
                        state,
                    }
                }
            })
            .collect();

        MountedDashboard {
            view,
            updates: updates.boxed(),
        }
    }

    /// Render and wait until every widget settled
    pub async fn render(&self, config: &RoleDashboardConfig, data: &WidgetDataMap) -> DashboardView {
        self.mount(config, data).settle().await
    }

    fn plan(&self, config: &RoleDashboardConfig, data: &WidgetDataMap) -> (DashboardView, Vec<MountTask>) {
        if config.widgets.is_empty() {
            tracing::debug!(role = %config.label, "no widgets configured");
            return (DashboardView::empty(config.layout), Vec::new());
        }

        let mut slots = Vec::with_capacity(config.widgets.len());
        let mut tasks = Vec::new();

        for (index, placement) in config.widgets.iter().enumerate() {
            match self.registry.lookup(placement.id.as_str()) {
                Resolution::NotFound(id) => {
                    tracing::warn!(role = %config.label, widget = id, index, "widget not registered");
                    let size = placement.size.unwrap_or(self.default_size);
                    slots.push(WidgetSlot {
                        index,
                        id: placement.id.clone(),
                        size,
                        span: GridSpan::for_size(size, config.layout),
                        state: SlotState::NotRegistered,
                    });
                }
                Resolution::Found(definition) => {
                    let size = placement
                        .size
                        .or(definition.default_size)
                        .unwrap_or(self.default_size);
                    let span = GridSpan::for_size(size, config.layout);
                    let boundary = IsolationBoundary::new(placement.id.clone(), Skeleton { size, span });

                    slots.push(WidgetSlot {
                        index,
                        id: placement.id.clone(),
                        size,
                        span,
                        state: boundary.fallback(),
                    });
                    tasks.push(MountTask {
                        index,
                        id: placement.id.clone(),
                        loader: Arc::clone(&definition.component),
                        props: WidgetProps::new(
                            placement.props.clone(),
                            data.get(placement.id.as_str()).cloned(),
                        ),
                        boundary,
                    });
                }
            }
        }

        let view = DashboardView {
            layout: config.layout,
            content: DashboardContent::Grid { slots },
        };
        (view, tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_roles::{LayoutMode, WidgetPlacement};
    use dash_widget::{PayloadCard, ReadyLoader, WidgetCategory, WidgetDefinition};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry() -> Arc<WidgetRegistry> {
        let card = |id: &str, size: Option<WidgetSize>| {
            let mut def = WidgetDefinition::new(
                id,
                Arc::new(ReadyLoader::new(PayloadCard::new(id))),
                WidgetCategory::General,
            );
            def.default_size = size;
            def
        };
        Arc::new(
            WidgetRegistry::builder()
                .with(card("welcome-card", Some(WidgetSize::Full)))
                .with(card("task-list", Some(WidgetSize::Small)))
                .with(card("plain", None))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn layout_preserves_order_and_marks_unregistered() {
        let config = RoleDashboardConfig::new("Test", LayoutMode::Dashboard).with_widgets([
            WidgetPlacement::new("welcome-card"),
            WidgetPlacement::new("ghost"),
            WidgetPlacement::new("task-list"),
        ]);
        let view = DashboardRenderer::new(registry()).layout(&config, &WidgetDataMap::empty());

        let ids: Vec<_> = view.slots().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["welcome-card", "ghost", "task-list"]);
        assert!(view.slots()[0].state.is_loading());
        assert_eq!(view.slots()[1].state, SlotState::NotRegistered);
    }

    #[test]
    fn effective_size_precedence() {
        let config = RoleDashboardConfig::new("Test", LayoutMode::Dashboard).with_widgets([
            WidgetPlacement::new("task-list").with_size(WidgetSize::Large),
            WidgetPlacement::new("task-list"),
            WidgetPlacement::new("plain"),
        ]);
        let renderer = DashboardRenderer::with_settings(
            registry(),
            RenderSettings {
                default_size: WidgetSize::Full,
                ..RenderSettings::default()
            },
        );
        let view = renderer.layout(&config, &WidgetDataMap::empty());
        let sizes: Vec<_> = view.slots().iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![WidgetSize::Large, WidgetSize::Small, WidgetSize::Full]);
        assert_eq!(view.slots()[0].span.span, 8);
    }

    #[test]
    fn empty_config_is_explicit_empty_state() {
        let config = RoleDashboardConfig::new("Nothing", LayoutMode::TwoColumn);
        let view = DashboardRenderer::new(registry()).layout(&config, &WidgetDataMap::empty());
        assert!(view.is_empty());
        assert_eq!(view.layout, LayoutMode::TwoColumn);
    }

    #[tokio::test]
    async fn render_injects_data_as_dedicated_field() {
        let config = RoleDashboardConfig::new("Test", LayoutMode::Dashboard).with_widgets([
            WidgetPlacement::new("task-list").with_prop("data", "caller"),
            WidgetPlacement::new("welcome-card"),
        ]);
        let data = WidgetDataMap::from_json(json!({"task-list": {"count": 4}})).unwrap();
        let view = DashboardRenderer::new(registry()).render(&config, &data).await;

        let task = view.slot("task-list").unwrap().frame().unwrap();
        assert_eq!(task.body["payload"], json!({"count": 4}));
        assert_eq!(task.body["props"]["data"], "caller");

        let welcome = view.slot("welcome-card").unwrap().frame().unwrap();
        assert_eq!(welcome.body["state"], "empty");
    }

    #[tokio::test]
    async fn mount_emits_one_update_per_resolved_widget() {
        let config = RoleDashboardConfig::new("Test", LayoutMode::Dashboard).with_widgets([
            WidgetPlacement::new("welcome-card"),
            WidgetPlacement::new("ghost"),
            WidgetPlacement::new("task-list"),
        ]);
        let mounted = DashboardRenderer::new(registry()).mount(&config, &WidgetDataMap::empty());
        let updates: Vec<_> = mounted.updates.collect().await;
        assert_eq!(updates.len(), 2);
        assert!(updates.iter().all(|u| u.state.is_ready()));
    }
}
