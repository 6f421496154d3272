//! Plain text rendering of console output

use dash_core::DashboardPage;
use dash_render::{ConfigIssue, DashboardContent, SlotState};
use dash_roles::{RoleCode, RoleDashboardConfig};
use dash_widget::WidgetDefinition;
use std::fmt::Write;

/// One line per widget: id, category, default size, title
pub(crate) fn widget_table<'a>(widgets: impl IntoIterator<Item = &'a WidgetDefinition>) -> String {
    let mut out = String::new();
    for def in widgets {
        let size = def.default_size.map_or("-", |s| s.as_str());
        let _ = writeln!(out, "{:<24} {:<12} {:<7} {}", def.id.as_str(), def.category.as_str(), size, def.title);
    }
    out
}

/// One line per role: code, layout, widget count, label
pub(crate) fn role_table<'a>(
    roles: impl IntoIterator<Item = (&'a RoleCode, &'a RoleDashboardConfig)>,
) -> String {
    let mut out = String::new();
    for (code, config) in roles {
        let _ = writeln!(
            out,
            "{:<22} {:<10} {:>3}  {}",
            code.as_str(),
            config.layout.as_str(),
            config.widgets.len(),
            config.label
        );
    }
    out
}

pub(crate) fn issues(issues: &[ConfigIssue]) -> String {
    if issues.is_empty() {
        return "all role configs resolve\n".to_string();
    }
    let mut out = String::new();
    for issue in issues {
        let _ = writeln!(out, "{issue}");
    }
    let _ = writeln!(out, "{} issue(s)", issues.len());
    out
}

fn slot_status(state: &SlotState) -> String {
    match state {
        SlotState::Loading { .. } => "loading".to_string(),
        SlotState::Ready { frame } => match frame.body.get("state").and_then(|s| s.as_str()) {
            Some(inner) => format!("ready ({inner})"),
            None => "ready".to_string(),
        },
        SlotState::NotRegistered => "not registered".to_string(),
        SlotState::LoadFailed { message } => format!("load failed: {message}"),
        SlotState::RenderFailed { message } => format!("render failed: {message}"),
    }
}

/// Human readable page summary
pub(crate) fn page(page: &DashboardPage) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}) - {} layout, data generation {}",
        page.label, page.role, page.layout, page.generation
    );

    if let Some(options) = &page.switcher {
        let roles: Vec<String> = options
            .iter()
            .map(|o| if o.selected { format!("[{}]", o.code) } else { o.code.to_string() })
            .collect();
        let _ = writeln!(out, "roles: {}", roles.join(" "));
    }
    if let Some(banner) = &page.banner {
        let _ = writeln!(out, "! {}", banner.hint);
        let _ = writeln!(out, "! {}", banner.message);
    }

    match &page.view.content {
        DashboardContent::Empty => {
            let _ = writeln!(out, "no widgets are configured for this role");
        }
        DashboardContent::Grid { slots } => {
            for slot in slots {
                let _ = writeln!(
                    out,
                    "[{:>2}] {:<24} {:<14} {}",
                    slot.index,
                    slot.id.as_str(),
                    slot.span.class_name(),
                    slot_status(&slot.state)
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::PageBanner;
    use dash_render::DashboardView;
    use dash_roles::LayoutMode;
    use pretty_assertions::assert_eq;

    fn empty_page() -> DashboardPage {
        DashboardPage {
            role: RoleCode::new("quality"),
            label: "Quality".to_string(),
            layout: LayoutMode::OneColumn,
            switcher: None,
            banner: Some(PageBanner {
                message: "request failed: refused".to_string(),
                retryable: true,
                hint: "Refresh to try again.".to_string(),
            }),
            loading: false,
            view: DashboardView::empty(LayoutMode::OneColumn),
            generation: 3,
        }
    }

    #[test]
    fn empty_page_with_banner() {
        assert_eq!(
            page(&empty_page()),
            "Quality (quality) - 1-column layout, data generation 3\n\
             ! Refresh to try again.\n\
             ! request failed: refused\n\
             no widgets are configured for this role\n"
        );
    }

    #[test]
    fn clean_check() {
        assert_eq!(issues(&[]), "all role configs resolve\n");
    }
}
