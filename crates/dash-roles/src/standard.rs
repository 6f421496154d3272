//! Standard role dashboards
//!
//! The compiled-in layouts of every role the console knows. Codes here are
//! canonical; legacy spellings reach them through
//! [`ROLE_SYNONYMS`](crate::ROLE_SYNONYMS).

use dash_widget::WidgetSize;
use serde_json::json;

use crate::config::{LayoutMode, RoleDashboardConfig, WidgetPlacement};
use crate::table::RoleConfigTable;

fn w(id: &str) -> WidgetPlacement {
    WidgetPlacement::new(id)
}

fn dashboard(label: &str, widgets: Vec<WidgetPlacement>) -> RoleDashboardConfig {
    RoleDashboardConfig::new(label, LayoutMode::Dashboard).with_widgets(widgets)
}

fn default_config() -> RoleDashboardConfig {
    dashboard(
        "Workbench",
        vec![
            w("welcome-card"),
            w("quick-actions"),
            w("todo-list"),
            w("notice-board"),
            w("calendar"),
        ],
    )
}

pub(crate) fn standard_table() -> RoleConfigTable {
    RoleConfigTable::with_default(
        default_config(),
        [
            (
                "admin",
                dashboard(
                    "System Administrator",
                    vec![
                        w("welcome-card"),
                        w("system-health").with_size(WidgetSize::Large),
                        w("user-activity"),
                        w("approval-inbox"),
                        w("notice-board"),
                    ],
                ),
            ),
            (
                "gm",
                dashboard(
                    "General Manager",
                    vec![
                        w("welcome-card"),
                        w("kpi-overview"),
                        w("sales-target"),
                        w("project-health"),
                        w("cost-overview"),
                        w("payment-collection"),
                        w("risk-matrix").with_prop("scope", "company"),
                        w("approval-inbox"),
                    ],
                ),
            ),
            (
                "pm",
                dashboard(
                    "Project Manager",
                    vec![
                        w("welcome-card"),
                        w("project-progress"),
                        w("task-list").with_prop("scope", "mine").with_prop("limit", 8),
                        w("project-milestones"),
                        w("team-workload"),
                        w("risk-matrix").with_prop("scope", "my-projects"),
                        w("issue-board-summary"),
                        w("timesheet-approval"),
                    ],
                ),
            ),
            (
                "pmo",
                dashboard(
                    "PMO Director",
                    vec![
                        w("welcome-card"),
                        w("kpi-overview").with_prop("preset", "delivery"),
                        w("project-health").with_size(WidgetSize::Large),
                        w("project-progress").with_prop("scope", "all"),
                        w("project-milestones").with_prop("overdueOnly", true),
                        w("team-workload"),
                        w("risk-matrix").with_prop("scope", "portfolio"),
                    ],
                ),
            ),
            (
                "sales",
                dashboard(
                    "Sales Representative",
                    vec![
                        w("welcome-card"),
                        w("sales-funnel").with_prop("scope", "mine"),
                        w("opportunity-list").with_prop("limit", 10),
                        w("customer-overview"),
                        w("contract-summary"),
                        w("todo-list"),
                    ],
                ),
            ),
            (
                "sales-director",
                dashboard(
                    "Sales Director",
                    vec![
                        w("welcome-card"),
                        w("sales-target").with_size(WidgetSize::Large),
                        w("sales-funnel").with_prop("scope", "team"),
                        w("contract-summary"),
                        w("payment-collection"),
                        w("customer-overview"),
                        w("approval-inbox"),
                    ],
                ),
            ),
            (
                "engineer",
                dashboard(
                    "R&D Engineer",
                    vec![
                        w("welcome-card"),
                        w("task-list").with_prop("scope", "mine"),
                        w("ecn-pending").with_prop("assignee", "me"),
                        w("design-review"),
                        w("issue-board-summary"),
                        w("timesheet-summary"),
                    ],
                ),
            ),
            (
                "engineering-manager",
                dashboard(
                    "R&D Manager",
                    vec![
                        w("welcome-card"),
                        w("ecn-statistics"),
                        w("ecn-pending").with_prop("assignee", "team"),
                        w("design-review"),
                        w("project-progress").with_prop("scope", "department"),
                        w("team-workload"),
                        w("timesheet-approval"),
                    ],
                ),
            ),
            (
                "quality",
                dashboard(
                    "Quality Engineer",
                    vec![
                        w("welcome-card"),
                        w("inspection-queue"),
                        w("quality-metrics"),
                        w("issue-trend").with_prop("range", "90d"),
                        w("risk-matrix").with_prop("category", "quality"),
                        w("ecn-pending").with_prop("stage", "quality-review"),
                    ],
                ),
            ),
            (
                "purchaser",
                dashboard(
                    "Purchasing Specialist",
                    vec![
                        w("welcome-card"),
                        w("purchase-orders"),
                        w("material-shortage"),
                        w("kit-status").with_size(WidgetSize::Full),
                        w("supplier-performance"),
                        w("delivery-tracking").with_prop("direction", "inbound"),
                    ],
                ),
            ),
            (
                "warehouse",
                RoleDashboardConfig::new("Warehouse Keeper", LayoutMode::TwoColumn).with_widgets(vec![
                    w("welcome-card"),
                    w("kit-status"),
                    w("material-shortage"),
                    w("delivery-tracking"),
                ]),
            ),
            (
                "production",
                dashboard(
                    "Production Manager",
                    vec![
                        w("welcome-card"),
                        w("production-schedule"),
                        w("work-order-status"),
                        w("kit-status"),
                        w("material-shortage"),
                        w("quality-metrics").with_prop("scope", "line"),
                    ],
                ),
            ),
            (
                "finance",
                dashboard(
                    "Finance",
                    vec![
                        w("welcome-card"),
                        w("cost-overview"),
                        w("budget-execution"),
                        w("payment-collection").with_prop("overdueFirst", true),
                        w("approval-inbox").with_prop("types", json!(["expense", "payment"])),
                    ],
                ),
            ),
            (
                "hr",
                RoleDashboardConfig::new("Human Resources", LayoutMode::ThreeColumn).with_widgets(vec![
                    w("welcome-card"),
                    w("headcount"),
                    w("attendance-summary"),
                    w("timesheet-summary").with_prop("scope", "company"),
                    w("notice-board"),
                ]),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{canonicalize, RoleCode};
    use dash_widget::WidgetRegistry;

    #[test]
    fn standard_table_has_default() {
        let table = standard_table();
        assert_eq!(table.default_config().label, "Workbench");
        assert!(table.contains(&RoleCode::default_role()));
    }

    #[test]
    fn standard_codes_are_canonical() {
        for code in standard_table().codes() {
            assert_eq!(canonicalize(code.as_str()), code.as_str());
        }
    }

    #[test]
    fn standard_widgets_are_registered() {
        let registry = WidgetRegistry::standard();
        for (code, config) in standard_table().iter() {
            for placement in &config.widgets {
                assert!(
                    registry.contains(placement.id.as_str()),
                    "{code} places unregistered widget {}",
                    placement.id
                );
            }
        }
    }

    #[test]
    fn pm_dashboard_starts_with_expected_widgets() {
        let table = standard_table();
        let pm = table.get(&RoleCode::new("pm")).unwrap();
        let ids: Vec<_> = pm.widget_ids().iter().take(3).map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["welcome-card", "project-progress", "task-list"]);
    }
}
