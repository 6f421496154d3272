//! Static checks of a role table against a widget registry
//!
//! Unregistered ids never break a render, so they are easy to miss. The
//! audit lists them up front.

use dash_roles::{RoleCode, RoleConfigTable};
use dash_widget::{WidgetId, WidgetRegistry};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Kind of configuration problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Placement id has no registry entry
    NotRegistered,

    /// Role has no widgets at all
    EmptyDashboard,
}

/// One configuration problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigIssue {
    /// Role the problem belongs to
    pub role: RoleCode,

    /// Placement index, if the problem is tied to one placement
    pub index: Option<usize>,

    /// Widget id, if the problem is tied to one placement
    pub widget: Option<WidgetId>,

    /// Problem kind
    pub kind: IssueKind,
}

impl Display for ConfigIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.widget, self.index) {
            (IssueKind::NotRegistered, Some(widget), Some(index)) => {
                write!(f, "{}: widget #{index} `{widget}` is not registered", self.role)
            }
            (IssueKind::NotRegistered, _, _) => write!(f, "{}: unregistered widget", self.role),
            (IssueKind::EmptyDashboard, _, _) => write!(f, "{}: no widgets configured", self.role),
        }
    }
}

/// Check every role in `table` against `registry`
#[must_use]
pub fn audit_table(table: &RoleConfigTable, registry: &WidgetRegistry) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    for (code, config) in table.iter() {
        if config.widgets.is_empty() {
            issues.push(ConfigIssue {
                role: code.clone(),
                index: None,
                widget: None,
                kind: IssueKind::EmptyDashboard,
            });
            continue;
        }

        issues.extend(
            config
                .widgets
                .iter()
                .enumerate()
                .filter(|(_, placement)| !registry.contains(placement.id.as_str()))
                .map(|(index, placement)| ConfigIssue {
                    role: code.clone(),
                    index: Some(index),
                    widget: Some(placement.id.clone()),
                    kind: IssueKind::NotRegistered,
                }),
        );
    }

    issues
}
