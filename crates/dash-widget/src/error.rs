//! Error types for the widget layer

use crate::id::WidgetId;

/// Errors raised by widget components
///
/// A widget error never reaches page level: the renderer's boundaries turn it
/// into an inline placeholder for the failing widget only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    /// Implementation could not be loaded
    #[error("failed to load widget implementation: {0}")]
    Load(String),

    /// View failed while rendering
    #[error("render failed: {0}")]
    Render(String),

    /// Payload did not have the shape the widget expects
    #[error("unexpected payload: {0}")]
    InvalidPayload(String),

    /// Widget id was blank
    #[error("invalid widget id: {0:?}")]
    InvalidId(String),

    /// Unknown size name
    #[error("unknown widget size: {0}")]
    UnknownSize(String),

    /// Unknown category name
    #[error("unknown widget category: {0}")]
    UnknownCategory(String),
}

impl WidgetError {
    /// Check if the error happened before the view existed
    #[inline]
    #[must_use]
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::Load(_))
    }
}

/// Registry construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Same id registered twice
    #[error("widget already registered: {0}")]
    DuplicateWidget(WidgetId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_error_display() {
        let err = WidgetError::Render("boom".to_string());
        assert_eq!(err.to_string(), "render failed: boom");
    }

    #[test]
    fn load_failure_classification() {
        assert!(WidgetError::Load("chunk".to_string()).is_load_failure());
        assert!(!WidgetError::Render("x".to_string()).is_load_failure());
    }

    #[test]
    fn registry_error_names_id() {
        let err = RegistryError::DuplicateWidget(WidgetId::new("kit-status"));
        assert!(err.to_string().contains("kit-status"));
    }
}
