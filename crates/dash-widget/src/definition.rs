//! Registry entries

use std::sync::Arc;

use crate::component::WidgetLoader;
use crate::id::WidgetId;
use crate::size::{WidgetCategory, WidgetSize};

/// One registry entry: a loadable implementation plus layout metadata
#[derive(Debug, Clone)]
pub struct WidgetDefinition {
    /// Widget id (registry key)
    pub id: WidgetId,

    /// Loadable implementation
    pub component: Arc<dyn WidgetLoader>,

    /// Business area
    pub category: WidgetCategory,

    /// Preferred size; `None` defers to the renderer's default
    pub default_size: Option<WidgetSize>,

    /// Display title
    pub title: String,

    /// Authoring description
    pub description: String,
}

impl WidgetDefinition {
    /// Create definition
    #[must_use]
    pub fn new(
        id: impl Into<WidgetId>,
        component: Arc<dyn WidgetLoader>,
        category: WidgetCategory,
    ) -> Self {
        let id = id.into();
        Self {
            title: id.to_string(),
            id,
            component,
            category,
            default_size: None,
            description: String::new(),
        }
    }

    /// With default size
    #[inline]
    #[must_use]
    pub fn with_default_size(mut self, size: WidgetSize) -> Self {
        self.default_size = Some(size);
        self
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
