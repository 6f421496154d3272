//! Role dashboard configuration types

use dash_widget::{WidgetId, WidgetSize};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{self, Display, Formatter};

/// Grid layout mode of a dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Single column, every widget full width
    #[serde(rename = "1-column", alias = "one-column")]
    OneColumn,

    /// Two columns
    #[serde(rename = "2-column", alias = "two-column")]
    TwoColumn,

    /// Three columns
    #[serde(rename = "3-column", alias = "three-column")]
    ThreeColumn,

    /// Twelve-track responsive grid
    #[default]
    #[serde(rename = "dashboard")]
    Dashboard,
}

impl LayoutMode {
    /// Number of grid tracks in this layout
    #[inline]
    #[must_use]
    pub fn columns(self) -> u8 {
        match self {
            Self::OneColumn => 1,
            Self::TwoColumn => 2,
            Self::ThreeColumn => 3,
            Self::Dashboard => 12,
        }
    }

    /// Wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneColumn => "1-column",
            Self::TwoColumn => "2-column",
            Self::ThreeColumn => "3-column",
            Self::Dashboard => "dashboard",
        }
    }
}

impl Display for LayoutMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One occurrence of a widget inside a role config
///
/// `id` is not required to resolve against the registry; an unknown id
/// renders as a "not registered" placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetPlacement {
    /// Widget id
    pub id: WidgetId,

    /// Static prop overrides
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,

    /// Size override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<WidgetSize>,
}

impl WidgetPlacement {
    /// Place a widget with no overrides
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<WidgetId>) -> Self {
        Self {
            id: id.into(),
            props: Map::new(),
            size: None,
        }
    }

    /// With size override
    #[inline]
    #[must_use]
    pub fn with_size(mut self, size: WidgetSize) -> Self {
        self.size = Some(size);
        self
    }

    /// With one prop override
    #[inline]
    #[must_use]
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

/// Dashboard assigned to one canonical role code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDashboardConfig {
    /// Display label of the role
    pub label: String,

    /// Grid layout
    #[serde(default)]
    pub layout: LayoutMode,

    /// Placements in render order
    #[serde(default)]
    pub widgets: Vec<WidgetPlacement>,
}

impl RoleDashboardConfig {
    /// Create empty config
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>, layout: LayoutMode) -> Self {
        Self {
            label: label.into(),
            layout,
            widgets: Vec::new(),
        }
    }

    /// Append a placement
    #[inline]
    #[must_use]
    pub fn with_widget(mut self, placement: WidgetPlacement) -> Self {
        self.widgets.push(placement);
        self
    }

    /// Append placements
    #[must_use]
    pub fn with_widgets(mut self, placements: impl IntoIterator<Item = WidgetPlacement>) -> Self {
        self.widgets.extend(placements);
        self
    }

    /// Widget ids in render order
    #[must_use]
    pub fn widget_ids(&self) -> Vec<&WidgetId> {
        self.widgets.iter().map(|p| &p.id).collect()
    }

    /// Check if no widgets are configured
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
