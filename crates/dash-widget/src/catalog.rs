//! Standard widget catalog
//!
//! Metadata for the business widgets the console ships with. The business
//! widgets themselves live outside this crate; the standard registry backs
//! every entry with a [`PayloadCard`] so dashboards render (and can be
//! previewed) without them. Hosts with real components build their own
//! registry from the same entries.

use serde_json::{json, Value};
use std::sync::Arc;

use crate::component::{ReadyLoader, WidgetFrame, WidgetProps, WidgetView};
use crate::definition::WidgetDefinition;
use crate::error::WidgetError;
use crate::id::WidgetId;
use crate::size::{WidgetCategory, WidgetSize};

/// Static metadata row of the standard catalog
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Widget id
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// Business area
    pub category: WidgetCategory,
    /// Preferred size
    pub default_size: Option<WidgetSize>,
    /// Authoring description
    pub description: &'static str,
}

impl CatalogEntry {
    /// Build a registry definition backed by a [`PayloadCard`]
    #[must_use]
    pub fn definition(&self) -> WidgetDefinition {
        let card = PayloadCard::new(self.id).with_title(self.title);
        let mut def = WidgetDefinition::new(self.id, Arc::new(ReadyLoader::new(card)), self.category)
            .with_title(self.title)
            .with_description(self.description);
        def.default_size = self.default_size;
        def
    }
}

const fn entry(
    id: &'static str,
    title: &'static str,
    category: WidgetCategory,
    default_size: Option<WidgetSize>,
    description: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        id,
        title,
        category,
        default_size,
        description,
    }
}

use WidgetCategory as C;
use WidgetSize as S;

/// Every widget the console ships with
pub const STANDARD_CATALOG: &[CatalogEntry] = &[
    // General
    entry("welcome-card", "Welcome", C::General, Some(S::Full), "Greeting with the user's name, role and today's date"),
    entry("quick-actions", "Quick Actions", C::General, Some(S::Small), "Shortcuts to the most used forms for the role"),
    entry("notice-board", "Notice Board", C::General, Some(S::Medium), "Company announcements and notices"),
    entry("todo-list", "My To-dos", C::General, Some(S::Medium), "Personal to-do items across modules"),
    entry("approval-inbox", "Approvals", C::General, Some(S::Medium), "Documents waiting for the user's approval"),
    entry("calendar", "Calendar", C::General, Some(S::Medium), "Meetings, milestones and deadlines"),
    entry("kpi-overview", "KPI Overview", C::General, Some(S::Full), "Headline indicators for the role"),
    // Project
    entry("project-progress", "Project Progress", C::Project, Some(S::Large), "Progress of the user's active projects by stage"),
    entry("task-list", "Tasks", C::Project, Some(S::Medium), "Open tasks assigned to the user"),
    entry("project-milestones", "Milestones", C::Project, Some(S::Medium), "Upcoming and overdue milestones"),
    entry("project-health", "Project Health", C::Project, Some(S::Medium), "Traffic-light health of projects"),
    entry("team-workload", "Team Workload", C::Project, Some(S::Large), "Hours allocated per team member"),
    // Sales
    entry("sales-funnel", "Sales Funnel", C::Sales, Some(S::Large), "Opportunities by pipeline stage"),
    entry("sales-target", "Sales Target", C::Sales, Some(S::Medium), "Booked revenue against target"),
    entry("opportunity-list", "Opportunities", C::Sales, Some(S::Medium), "Recently updated opportunities"),
    entry("customer-overview", "Customers", C::Sales, Some(S::Medium), "New, active and dormant customers"),
    entry("contract-summary", "Contracts", C::Sales, Some(S::Medium), "Contracts signed, pending and expiring"),
    entry("payment-collection", "Collections", C::Sales, Some(S::Medium), "Receivables and overdue payments"),
    // Engineering
    entry("ecn-pending", "Pending ECNs", C::Engineering, Some(S::Medium), "Engineering change notices awaiting action"),
    entry("ecn-statistics", "ECN Statistics", C::Engineering, Some(S::Medium), "Change notices by type and status"),
    entry("design-review", "Design Reviews", C::Engineering, Some(S::Medium), "Scheduled and open design reviews"),
    // Quality
    entry("risk-matrix", "Risk Matrix", C::Quality, Some(S::Large), "Open risks by probability and impact"),
    entry("issue-board-summary", "Issue Board", C::Quality, Some(S::Medium), "Issues per Kanban column"),
    entry("issue-trend", "Issue Trend", C::Quality, Some(S::Medium), "Issues opened and closed over time"),
    entry("quality-metrics", "Quality Metrics", C::Quality, Some(S::Medium), "Pass rate and defect density"),
    entry("inspection-queue", "Inspections", C::Quality, Some(S::Medium), "Incoming and in-process inspections"),
    // Supply
    entry("kit-status", "Kit Status", C::Supply, Some(S::Large), "Material kitting completeness per work order"),
    entry("material-shortage", "Shortages", C::Supply, Some(S::Medium), "Materials short against demand"),
    entry("purchase-orders", "Purchase Orders", C::Supply, Some(S::Medium), "Open purchase orders by status"),
    entry("supplier-performance", "Supplier Performance", C::Supply, Some(S::Medium), "On-time delivery and quality by supplier"),
    entry("delivery-tracking", "Deliveries", C::Supply, Some(S::Medium), "Inbound and outbound shipments"),
    // Production
    entry("production-schedule", "Production Schedule", C::Production, Some(S::Full), "Work orders scheduled per line"),
    entry("work-order-status", "Work Orders", C::Production, Some(S::Medium), "Work orders by state"),
    // Finance
    entry("cost-overview", "Cost Overview", C::Finance, Some(S::Large), "Actual against planned cost"),
    entry("budget-execution", "Budget Execution", C::Finance, Some(S::Medium), "Budget consumption per department"),
    // People
    entry("timesheet-summary", "Timesheet Summary", C::People, Some(S::Medium), "Hours logged this week"),
    entry("timesheet-approval", "Timesheet Approval", C::People, Some(S::Medium), "Timesheets waiting for approval"),
    entry("attendance-summary", "Attendance", C::People, Some(S::Small), "Attendance, leave and overtime"),
    entry("headcount", "Headcount", C::People, Some(S::Small), "Headcount per department"),
    // Admin
    entry("system-health", "System Health", C::Admin, None, "Service status and background jobs"),
    entry("user-activity", "User Activity", C::Admin, None, "Logins and active sessions"),
];

/// Generic card that shows a widget's payload
///
/// Renders an explicit empty state when no payload was supplied, which is the
/// normal case for widgets the aggregate endpoint does not cover.
#[derive(Debug, Clone)]
pub struct PayloadCard {
    id: WidgetId,
    title: Option<String>,
}

impl PayloadCard {
    /// Create card for a widget id
    #[must_use]
    pub fn new(id: impl Into<WidgetId>) -> Self {
        Self {
            id: id.into(),
            title: None,
        }
    }

    /// With title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl WidgetView for PayloadCard {
    fn render(&self, props: &WidgetProps) -> Result<WidgetFrame, WidgetError> {
        let body = match props.data() {
            Some(payload) => json!({ "state": "ready", "payload": payload }),
            None => json!({
                "state": "empty",
                "message": props.prop_str("emptyText").unwrap_or("No data"),
            }),
        };
        let body = with_props(body, props);

        let mut frame = WidgetFrame::new(self.id.clone(), body);
        if let Some(title) = props.prop_str("title").or(self.title.as_deref()) {
            frame = frame.with_title(title);
        }
        Ok(frame)
    }
}

fn with_props(mut body: Value, props: &WidgetProps) -> Value {
    if !props.props.is_empty() {
        body["props"] = Value::Object(props.props.clone());
    }
    body
}
