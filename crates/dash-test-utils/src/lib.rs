//! Testing utilities for the dashboard workspace
//!
//! Shared fixtures: a small registry and role table, misbehaving widgets,
//! and a scripted data source whose responses can be held back per role.

#![allow(missing_docs)]

use async_trait::async_trait;
use dash_core::{DashboardDataSource, DashboardError};
use dash_roles::{
    LayoutMode, RoleAssignments, RoleCode, RoleConfigTable, RoleDashboardConfig,
    UserRoleAssignment, WidgetPlacement,
};
use dash_widget::{
    PayloadCard, ReadyLoader, WidgetCategory, WidgetDataMap, WidgetDefinition, WidgetError,
    WidgetFrame, WidgetLoader, WidgetProps, WidgetRegistry, WidgetSize, WidgetView,
};
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Notify;

/// View that panics while rendering
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingView;

impl WidgetView for PanickingView {
    fn render(&self, _props: &WidgetProps) -> Result<WidgetFrame, WidgetError> {
        panic!("fixture widget panicked");
    }
}

/// View that returns a render error
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingView;

impl WidgetView for FailingView {
    fn render(&self, _props: &WidgetProps) -> Result<WidgetFrame, WidgetError> {
        Err(WidgetError::Render("fixture widget failed".to_string()))
    }
}

/// Loader whose implementation never arrives
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingLoader;

#[async_trait]
impl WidgetLoader for FailingLoader {
    async fn load(&self) -> Result<Arc<dyn WidgetView>, WidgetError> {
        Err(WidgetError::Load("fixture bundle missing".to_string()))
    }
}

/// Loader that waits for [`SlowLoader::release`]
#[derive(Debug, Clone)]
pub struct SlowLoader {
    id: String,
    gate: Arc<Notify>,
}

impl SlowLoader {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            gate: Arc::new(Notify::new()),
        }
    }

    /// Let one pending (or the next) load finish
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl WidgetLoader for SlowLoader {
    async fn load(&self) -> Result<Arc<dyn WidgetView>, WidgetError> {
        self.gate.notified().await;
        Ok(Arc::new(PayloadCard::new(self.id.as_str())))
    }
}

pub fn card(id: &str) -> WidgetDefinition {
    WidgetDefinition::new(
        id,
        Arc::new(ReadyLoader::new(PayloadCard::new(id))),
        WidgetCategory::General,
    )
}

/// Registry with `alpha`, `beta`, `gamma` (small) plus `panics`, `fails` and `broken`
pub fn fixture_registry() -> WidgetRegistry {
    WidgetRegistry::builder()
        .with(card("alpha"))
        .with(card("beta"))
        .with(card("gamma").with_default_size(WidgetSize::Small))
        .with(WidgetDefinition::new(
            "panics",
            Arc::new(ReadyLoader::new(PanickingView)),
            WidgetCategory::General,
        ))
        .with(WidgetDefinition::new(
            "fails",
            Arc::new(ReadyLoader::new(FailingView)),
            WidgetCategory::General,
        ))
        .with(WidgetDefinition::new("broken", Arc::new(FailingLoader), WidgetCategory::General))
        .build_lenient()
}

fn layout(label: &str, ids: &[&str]) -> RoleDashboardConfig {
    RoleDashboardConfig::new(label, LayoutMode::Dashboard)
        .with_widgets(ids.iter().map(|id| WidgetPlacement::new(*id)))
}

/// Role table over [`fixture_registry`] widgets
///
/// | role      | widgets                                 |
/// |-----------|-----------------------------------------|
/// | `default` | alpha                                   |
/// | `pm`      | alpha, beta, gamma                      |
/// | `sales`   | beta, panics, ghost (unregistered)      |
/// | `quality` | none                                    |
pub fn fixture_table() -> RoleConfigTable {
    let built = RoleConfigTable::builder()
        .role("default", layout("Home", &["alpha"]))
        .role("pm", layout("Projects", &["alpha", "beta", "gamma"]))
        .role("sales", layout("Sales", &["beta", "panics", "ghost"]))
        .role("quality", RoleDashboardConfig::new("Quality", LayoutMode::OneColumn))
        .build();
    match built {
        Ok(table) => table,
        Err(err) => panic!("fixture table is invalid: {err}"),
    }
}

/// Assignments for the given raw codes; the first one is primary
pub fn assignments(codes: &[&str]) -> RoleAssignments {
    codes
        .iter()
        .enumerate()
        .map(|(i, code)| {
            let assignment = UserRoleAssignment::new(*code, code.to_uppercase());
            if i == 0 {
                assignment.primary()
            } else {
                assignment
            }
        })
        .collect()
}

/// Data source with per-role canned responses
///
/// Gated roles hold each fetch until [`ScriptedDataSource::release`] is
/// called for that role. Roles without a response get an empty map.
#[derive(Debug, Default)]
pub struct ScriptedDataSource {
    responses: DashMap<RoleCode, Result<Value, DashboardError>>,
    gates: DashMap<RoleCode, Arc<Notify>>,
    calls: DashMap<RoleCode, usize>,
}

impl ScriptedDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_data(self, role: &str, data: Value) -> Self {
        self.responses.insert(RoleCode::new(role), Ok(data));
        self
    }

    #[must_use]
    pub fn with_error(self, role: &str, error: DashboardError) -> Self {
        self.responses.insert(RoleCode::new(role), Err(error));
        self
    }

    #[must_use]
    pub fn gated(self, role: &str) -> Self {
        self.gates.insert(RoleCode::new(role), Arc::new(Notify::new()));
        self
    }

    /// Let one pending (or the next) fetch for `role` finish
    pub fn release(&self, role: &str) {
        if let Some(gate) = self.gates.get(&RoleCode::new(role)) {
            gate.notify_one();
        }
    }

    pub fn calls(&self, role: &str) -> usize {
        self.calls.get(&RoleCode::new(role)).map_or(0, |c| *c)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }

    /// Yield until `role` has been fetched at least `n` times
    pub async fn wait_for_calls(&self, role: &str, n: usize) {
        while self.calls(role) < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl DashboardDataSource for ScriptedDataSource {
    async fn fetch(&self, role: &RoleCode) -> Result<WidgetDataMap, DashboardError> {
        *self.calls.entry(role.clone()).or_insert(0) += 1;

        let gate = self.gates.get(role).map(|g| Arc::clone(g.value()));
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let response = self.responses.get(role).map(|r| r.value().clone());
        match response {
            None => Ok(WidgetDataMap::empty()),
            Some(Ok(value)) => WidgetDataMap::from_json(value)
                .map_err(|err| DashboardError::InvalidPayload(err.to_string())),
            Some(Err(err)) => Err(err),
        }
    }
}
