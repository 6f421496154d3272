//! End-to-end orchestrator tests over the fixture registry and role table

use dash_core::{DashboardError, DashboardOrchestrator, DashboardPage, LoadOutcome, PageEvent};
use dash_render::{DashboardRenderer, SlotState};
use dash_roles::{RoleCode, RoleResolver, WatchRoleSource, RoleSnapshot};
use dash_test_utils::{assignments, fixture_registry, fixture_table, ScriptedDataSource};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn orchestrator(source: Arc<ScriptedDataSource>) -> Arc<DashboardOrchestrator> {
    Arc::new(DashboardOrchestrator::new(
        RoleResolver::new(Arc::new(fixture_table())),
        DashboardRenderer::new(Arc::new(fixture_registry())),
        source,
    ))
}

#[tokio::test]
async fn rapid_double_switch_keeps_only_last_role() {
    let source = Arc::new(
        ScriptedDataSource::new()
            .with_data("pm", json!({"alpha": "pm-data"}))
            .with_data("sales", json!({"beta": "sales-data"}))
            .gated("pm")
            .gated("sales"),
    );
    let dashboard = orchestrator(Arc::clone(&source));
    dashboard.initialize_with(assignments(&["quality", "pm", "sales"])).await;

    let to_pm = tokio::spawn({
        let dashboard = Arc::clone(&dashboard);
        async move { dashboard.switch_role("pm").await }
    });
    source.wait_for_calls("pm", 1).await;

    let to_sales = tokio::spawn({
        let dashboard = Arc::clone(&dashboard);
        async move { dashboard.switch_role("sales").await }
    });
    source.wait_for_calls("sales", 1).await;

    // The older response arrives last and must be ignored
    source.release("sales");
    assert!(to_sales.await.unwrap().unwrap().is_committed());
    source.release("pm");
    assert!(matches!(to_pm.await.unwrap().unwrap(), LoadOutcome::Stale { .. }));

    assert_eq!(dashboard.active_role(), Some(RoleCode::new("sales")));
    let state = dashboard.load_state();
    assert_eq!(state.role, Some(RoleCode::new("sales")));
    assert!(state.data.contains("beta"));
    assert!(!state.data.contains("alpha"));

    let page = dashboard.render_page().await.unwrap();
    assert_eq!(page.label, "Sales");
    let beta = page.view.slot("beta").unwrap().frame().unwrap();
    assert_eq!(beta.body["payload"], "sales-data");
}

#[tokio::test]
async fn stale_page_shows_loading_without_old_data() {
    let source = Arc::new(
        ScriptedDataSource::new()
            .with_data("pm", json!({"alpha": 1}))
            .with_data("sales", json!({"beta": 2}))
            .gated("sales"),
    );
    let dashboard = orchestrator(Arc::clone(&source));
    dashboard.initialize_with(assignments(&["pm", "sales"])).await;
    assert!(dashboard.load_state().data.contains("alpha"));

    let switching = tokio::spawn({
        let dashboard = Arc::clone(&dashboard);
        async move { dashboard.switch_role("sales").await }
    });
    source.wait_for_calls("sales", 1).await;

    let page = dashboard.page().unwrap();
    assert_eq!(page.role.as_str(), "sales");
    assert!(page.loading);
    assert!(dashboard.load_state().data.is_empty());

    source.release("sales");
    switching.await.unwrap().unwrap();
    assert!(!dashboard.page().unwrap().loading);
}

#[tokio::test]
async fn switcher_hidden_for_one_role_shown_for_two() {
    let single = orchestrator(Arc::new(ScriptedDataSource::new()));
    single.initialize_with(assignments(&["pm"])).await;
    assert!(single.switcher().is_none());
    assert!(single.page().unwrap().switcher.is_none());

    let multi = orchestrator(Arc::new(ScriptedDataSource::new()));
    multi.initialize_with(assignments(&["pm", "sales"])).await;
    let options = multi.page().unwrap().switcher.unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(multi.switcher().unwrap().active().as_str(), "pm");
}

#[tokio::test]
async fn aggregate_failure_shows_banner_and_renders_widgets_without_data() {
    let source = Arc::new(ScriptedDataSource::new().with_error(
        "pm",
        DashboardError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        },
    ));
    let dashboard = orchestrator(source);
    let outcome = dashboard.initialize_with(assignments(&["pm"])).await;
    assert!(matches!(outcome, LoadOutcome::Failed { .. }));

    let page = dashboard.render_page().await.unwrap();
    let banner = page.banner.unwrap();
    assert!(banner.retryable);
    assert!(banner.message.contains("502"));

    assert_eq!(page.view.ready_count(), 3);
    for slot in page.view.slots() {
        assert_eq!(slot.frame().unwrap().body["state"], "empty");
    }
}

#[tokio::test]
async fn faulty_widgets_are_isolated() {
    let dashboard = orchestrator(Arc::new(ScriptedDataSource::new()));
    dashboard.initialize_with(assignments(&["sales"])).await;

    let page = dashboard.render_page().await.unwrap();
    let states: Vec<_> = page.view.slots().iter().map(|s| s.state.clone()).collect();

    assert!(states[0].is_ready());
    assert_eq!(states[1].fault_message(), Some("panicked: fixture widget panicked"));
    assert_eq!(states[2], SlotState::NotRegistered);
}

#[tokio::test]
async fn role_without_widgets_renders_empty_state() {
    let dashboard = orchestrator(Arc::new(ScriptedDataSource::new()));
    dashboard.initialize_with(assignments(&["QA"])).await;

    let page = dashboard.render_page().await.unwrap();
    assert_eq!(page.role.as_str(), "quality");
    assert!(page.view.is_empty());
}

#[tokio::test]
async fn refresh_refetches_active_role() {
    let source = Arc::new(ScriptedDataSource::new().with_data("pm", json!({"alpha": 1})));
    let dashboard = orchestrator(Arc::clone(&source));

    assert_eq!(dashboard.refresh().await, LoadOutcome::Idle);

    dashboard.initialize_with(assignments(&["pm"])).await;
    let outcome = dashboard.refresh().await;
    assert_eq!(outcome, LoadOutcome::Loaded { generation: 2, widgets: 1 });
    assert_eq!(source.calls("pm"), 2);
}

#[tokio::test]
async fn initialize_waits_for_role_source() {
    let (sender, roles) = WatchRoleSource::channel();
    let dashboard = orchestrator(Arc::new(ScriptedDataSource::new()));

    let init = tokio::spawn({
        let dashboard = Arc::clone(&dashboard);
        async move { dashboard.initialize(&roles).await }
    });
    tokio::task::yield_now().await;
    assert!(dashboard.active_role().is_none());

    sender.send_replace(RoleSnapshot::ready(assignments(&["sales", "pm"])));
    init.await.unwrap().unwrap();
    assert_eq!(dashboard.active_role(), Some(RoleCode::new("sales")));
}

#[tokio::test]
async fn page_events_stream_layout_then_slots() {
    let dashboard = orchestrator(Arc::new(ScriptedDataSource::new()));
    dashboard.initialize_with(assignments(&["pm"])).await;

    let events: Vec<_> = dashboard.page_events().unwrap().collect().await;
    assert_eq!(events.len(), 4);

    let PageEvent::Layout(page) = &events[0] else {
        panic!("first event must be the layout");
    };
    assert!(page.view.slots().iter().all(|s| s.state.is_loading()));
    assert!(events[1..].iter().all(|e| matches!(e, PageEvent::Slot(u) if u.state.is_ready())));
}

#[tokio::test]
async fn page_events_opened_during_fetch_deliver_committed_data() {
    let source = Arc::new(
        ScriptedDataSource::new()
            .with_data("pm", json!({"alpha": "pm-data"}))
            .gated("pm"),
    );
    let dashboard = orchestrator(Arc::clone(&source));

    let init = tokio::spawn({
        let dashboard = Arc::clone(&dashboard);
        async move { dashboard.initialize_with(assignments(&["pm"])).await }
    });
    source.wait_for_calls("pm", 1).await;

    let mut events = dashboard.page_events().unwrap();
    let Some(PageEvent::Layout(first)) = events.next().await else {
        panic!("first event must be the layout");
    };
    assert!(first.loading);

    let collecting = tokio::spawn(events.collect::<Vec<_>>());
    source.release("pm");
    assert!(init.await.unwrap().is_committed());
    let events = collecting.await.unwrap();

    let last_layout: &DashboardPage = events
        .iter()
        .filter_map(|e| match e {
            PageEvent::Layout(page) => Some(page),
            PageEvent::Slot(_) => None,
        })
        .last()
        .unwrap();
    assert!(!last_layout.loading);
    assert!(last_layout.banner.is_none());

    let delivered = events.iter().any(|e| {
        matches!(e, PageEvent::Slot(update)
            if update.id.as_str() == "alpha"
                && matches!(&update.state, SlotState::Ready { frame } if frame.body["payload"] == "pm-data"))
    });
    assert!(delivered);
}
