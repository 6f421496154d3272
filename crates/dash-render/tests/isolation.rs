//! Widget isolation and streaming tests for the dashboard renderer

use dash_render::{DashboardRenderer, SlotState};
use dash_roles::{LayoutMode, RoleConfigTable, RoleDashboardConfig, RoleResolver, WidgetPlacement};
use dash_widget::{
    DeferredLoader, PayloadCard, ReadyLoader, WidgetCategory, WidgetDataMap, WidgetDefinition,
    WidgetError, WidgetFrame, WidgetProps, WidgetRegistry, WidgetSize, WidgetView,
};
use futures::{FutureExt, StreamExt};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug)]
struct Exploding;

impl WidgetView for Exploding {
    fn render(&self, _props: &WidgetProps) -> Result<WidgetFrame, WidgetError> {
        panic!("chart exploded");
    }
}

fn card(id: &str) -> WidgetDefinition {
    WidgetDefinition::new(
        id,
        Arc::new(ReadyLoader::new(PayloadCard::new(id))),
        WidgetCategory::General,
    )
}

fn placements(ids: &[&str]) -> RoleDashboardConfig {
    RoleDashboardConfig::new("Test", LayoutMode::Dashboard)
        .with_widgets(ids.iter().map(|id| WidgetPlacement::new(*id)))
}

#[tokio::test]
async fn failing_widget_does_not_affect_siblings() {
    let registry = WidgetRegistry::builder()
        .with(card("a"))
        .with(WidgetDefinition::new(
            "boom",
            Arc::new(ReadyLoader::new(Exploding)),
            WidgetCategory::General,
        ))
        .with(WidgetDefinition::new(
            "broken-bundle",
            Arc::new(DeferredLoader::new("broken-bundle", || {
                async { Err::<Arc<dyn WidgetView>, _>(WidgetError::Load("chunk missing".to_string())) }.boxed()
            })),
            WidgetCategory::General,
        ))
        .with(card("b"))
        .build()
        .unwrap();

    let renderer = DashboardRenderer::new(Arc::new(registry));
    let view = renderer
        .render(&placements(&["a", "boom", "broken-bundle", "b"]), &WidgetDataMap::empty())
        .await;

    assert!(view.is_settled());
    assert_eq!(view.ready_count(), 2);
    assert!(view.slot("a").unwrap().state.is_ready());
    assert!(view.slot("b").unwrap().state.is_ready());
    assert_eq!(
        view.slot("boom").unwrap().state.fault_message(),
        Some("panicked: chart exploded")
    );
    assert!(matches!(
        view.slot("broken-bundle").unwrap().state,
        SlotState::LoadFailed { .. }
    ));
}

#[tokio::test]
async fn panicking_loader_is_contained() {
    let registry = WidgetRegistry::builder()
        .with(WidgetDefinition::new(
            "panics-on-load",
            Arc::new(DeferredLoader::new("panics-on-load", || panic!("loader exploded"))),
            WidgetCategory::General,
        ))
        .with(card("a"))
        .build()
        .unwrap();

    let view = DashboardRenderer::new(Arc::new(registry))
        .render(&placements(&["panics-on-load", "a"]), &WidgetDataMap::empty())
        .await;

    assert_eq!(
        view.slots()[0].state,
        SlotState::LoadFailed {
            message: "panicked: loader exploded".to_string()
        }
    );
    assert!(view.slots()[1].state.is_ready());
}

#[tokio::test]
async fn slow_widget_does_not_block_fast_ones() {
    let gate = Arc::new(Notify::new());
    let slow_gate = Arc::clone(&gate);
    let registry = WidgetRegistry::builder()
        .with(WidgetDefinition::new(
            "slow",
            Arc::new(DeferredLoader::new("slow", move || {
                let gate = Arc::clone(&slow_gate);
                async move {
                    gate.notified().await;
                    Ok(Arc::new(PayloadCard::new("slow")) as Arc<dyn WidgetView>)
                }
                .boxed()
            })),
            WidgetCategory::General,
        ))
        .with(card("fast"))
        .build()
        .unwrap();

    let renderer = DashboardRenderer::new(Arc::new(registry));
    let mut mounted = renderer.mount(&placements(&["slow", "fast"]), &WidgetDataMap::empty());

    // Layout order is placement order even though "fast" settles first
    let ids: Vec<_> = mounted.view.slots().iter().map(|s| s.id.to_string()).collect();
    assert_eq!(ids, vec!["slow", "fast"]);
    assert!(mounted.view.slots().iter().all(|s| s.state.is_loading()));

    let first = mounted.updates.next().await.unwrap();
    assert_eq!(first.id.as_str(), "fast");
    mounted.view.apply(first);
    assert!(mounted.view.slots()[0].state.is_loading());
    assert!(mounted.view.slots()[1].state.is_ready());

    gate.notify_one();
    let view = mounted.settle().await;
    assert!(view.is_settled());
    assert_eq!(view.ready_count(), 2);
}

#[tokio::test]
async fn repeated_placement_loads_implementation_once() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let registry = WidgetRegistry::builder()
        .with(WidgetDefinition::new(
            "kpi-overview",
            Arc::new(DeferredLoader::new("kpi-overview", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok(Arc::new(PayloadCard::new("kpi-overview")) as Arc<dyn WidgetView>) }.boxed()
            })),
            WidgetCategory::General,
        ))
        .build()
        .unwrap();

    let renderer = DashboardRenderer::new(Arc::new(registry));
    let config = placements(&["kpi-overview", "kpi-overview"]);

    let view = renderer.render(&config, &WidgetDataMap::empty()).await;
    assert_eq!(view.ready_count(), 2);

    // Second render of the same config hits the cache
    renderer.render(&config, &WidgetDataMap::empty()).await;
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn project_manager_scenario() {
    let resolver = RoleResolver::new(Arc::new(RoleConfigTable::standard()));
    let renderer = DashboardRenderer::new(Arc::new(WidgetRegistry::standard()));
    let config = resolver.resolve(Some("pm"));
    let data = WidgetDataMap::from_json(json!({"task-list": {"count": 4}})).unwrap();

    let view = renderer.render(&config, &data).await;

    let ids: Vec<_> = view.slots().iter().map(|s| s.id.to_string()).collect();
    let expected: Vec<_> = config.widget_ids().iter().map(|id| id.to_string()).collect();
    assert_eq!(ids, expected);
    assert_eq!(view.fault_count(), 0);

    let tasks = view.slot("task-list").unwrap().frame().unwrap();
    assert_eq!(tasks.body["payload"], json!({"count": 4}));

    let welcome = view.slot("welcome-card").unwrap().frame().unwrap();
    assert_eq!(welcome.body["state"], "empty");
}

#[tokio::test]
async fn unregistered_slot_keeps_its_position() {
    let registry = WidgetRegistry::builder().with(card("a")).with(card("b")).build().unwrap();
    let config = RoleDashboardConfig::new("Test", LayoutMode::TwoColumn).with_widgets([
        WidgetPlacement::new("a"),
        WidgetPlacement::new("retired-widget").with_size(WidgetSize::Full),
        WidgetPlacement::new("b"),
    ]);

    let view = DashboardRenderer::new(Arc::new(registry))
        .render(&config, &WidgetDataMap::empty())
        .await;

    let slot = &view.slots()[1];
    assert_eq!(slot.state, SlotState::NotRegistered);
    assert!(slot.span.is_full_row());
    assert_eq!(view.ready_count(), 2);
}

#[tokio::test]
async fn unknown_role_renders_default_dashboard() {
    let resolver = RoleResolver::new(Arc::new(RoleConfigTable::standard()));
    let renderer = DashboardRenderer::new(Arc::new(WidgetRegistry::standard()));

    let unknown = renderer
        .render(&resolver.resolve(Some("astronaut")), &WidgetDataMap::empty())
        .await;
    let none = renderer.render(&resolver.resolve(None), &WidgetDataMap::empty()).await;

    assert_eq!(unknown, none);
    assert!(!unknown.is_empty());
}
