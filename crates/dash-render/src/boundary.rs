//! Per-widget isolation boundaries
//!
//! Two independent capabilities wrap every mounted widget:
//! - [`Suspendable`]: has a placeholder to show while pending ([`LoadBoundary`])
//! - [`Faultable`]: turns a failure into a placeholder ([`LoadBoundary`], [`FailureBoundary`])
//!
//! [`IsolationBoundary`] composes both around one widget instance. Errors and
//! panics are caught at the boundary; nothing crosses into sibling widgets or
//! the page.

use dash_widget::{WidgetError, WidgetId, WidgetLoader, WidgetProps, WidgetView};
use futures::FutureExt;
use std::any::Any;
use std::fmt::{self, Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::cache::ComponentCache;
use crate::slot::{Skeleton, SlotState};

/// Something that went wrong inside one widget
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetFault {
    /// Widget returned an error
    Error(WidgetError),

    /// Widget panicked
    Panic(String),
}

impl WidgetFault {
    /// Build from a caught panic payload
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "widget panicked".to_string());
        Self::Panic(message)
    }
}

impl Display for WidgetFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(err) => write!(f, "{err}"),
            Self::Panic(message) => write!(f, "panicked: {message}"),
        }
    }
}

/// Capability: has a placeholder while pending
pub trait Suspendable {
    /// Placeholder shown until the wrapped work settles
    fn fallback(&self) -> SlotState;
}

/// Capability: converts a fault into a placeholder
pub trait Faultable {
    /// Placeholder for a caught fault
    fn on_fault(&self, fault: WidgetFault) -> SlotState;
}

/// Boundary around loading a widget implementation
#[derive(Debug, Clone)]
pub struct LoadBoundary {
    id: WidgetId,
    skeleton: Skeleton,
}

impl LoadBoundary {
    /// Create boundary
    #[inline]
    #[must_use]
    pub fn new(id: WidgetId, skeleton: Skeleton) -> Self {
        Self { id, skeleton }
    }

    /// Load through the boundary
    ///
    /// # Errors
    /// Returns the placeholder state when loading fails or panics.
    pub async fn load(&self, loader: &dyn WidgetLoader) -> Result<Arc<dyn WidgetView>, SlotState> {
        match AssertUnwindSafe(loader.load()).catch_unwind().await {
            Ok(Ok(view)) => Ok(view),
            Ok(Err(err)) => Err(self.on_fault(WidgetFault::Error(err))),
            Err(payload) => Err(self.on_fault(WidgetFault::from_panic(payload.as_ref()))),
        }
    }
}

impl Suspendable for LoadBoundary {
    fn fallback(&self) -> SlotState {
        SlotState::Loading {
            skeleton: self.skeleton,
        }
    }
}

impl Faultable for LoadBoundary {
    fn on_fault(&self, fault: WidgetFault) -> SlotState {
        tracing::warn!(widget = %self.id, %fault, "widget failed to load");
        SlotState::LoadFailed {
            message: fault.to_string(),
        }
    }
}

/// Boundary around rendering a loaded view
#[derive(Debug, Clone)]
pub struct FailureBoundary {
    id: WidgetId,
}

impl FailureBoundary {
    /// Create boundary
    #[inline]
    #[must_use]
    pub fn new(id: WidgetId) -> Self {
        Self { id }
    }

    /// Render through the boundary
    #[must_use]
    pub fn render(&self, view: &dyn WidgetView, props: &WidgetProps) -> SlotState {
        match catch_unwind(AssertUnwindSafe(|| view.render(props))) {
            Ok(Ok(frame)) => SlotState::Ready { frame },
            Ok(Err(err)) => self.on_fault(WidgetFault::Error(err)),
            Err(payload) => self.on_fault(WidgetFault::from_panic(payload.as_ref())),
        }
    }
}

impl Faultable for FailureBoundary {
    fn on_fault(&self, fault: WidgetFault) -> SlotState {
        tracing::warn!(widget = %self.id, %fault, "widget failed to render");
        SlotState::RenderFailed {
            message: fault.to_string(),
        }
    }
}

/// Load and failure boundaries around one widget instance
#[derive(Debug, Clone)]
pub struct IsolationBoundary {
    id: WidgetId,
    load: LoadBoundary,
    failure: FailureBoundary,
}

impl IsolationBoundary {
    /// Create boundary for a widget with its skeleton
    #[must_use]
    pub fn new(id: WidgetId, skeleton: Skeleton) -> Self {
        Self {
            load: LoadBoundary::new(id.clone(), skeleton),
            failure: FailureBoundary::new(id.clone()),
            id,
        }
    }

    /// Load (through the cache) and render the widget
    ///
    /// Always settles to a non-loading state.
    pub async fn mount(
        &self,
        loader: Arc<dyn WidgetLoader>,
        cache: &ComponentCache,
        props: &WidgetProps,
    ) -> SlotState {
        let load = self.load.clone();
        let view = cache
            .get_or_load(&self.id, async move { load.load(loader.as_ref()).await })
            .await;

        match view {
            Ok(view) => self.failure.render(view.as_ref(), props),
            Err(placeholder) => placeholder,
        }
    }
}

impl Suspendable for IsolationBoundary {
    fn fallback(&self) -> SlotState {
        self.load.fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_roles::LayoutMode;
    use dash_widget::{ReadyLoader, WidgetFrame, WidgetSize};

    use crate::grid::GridSpan;

    #[derive(Debug)]
    struct Panicking;

    impl WidgetView for Panicking {
        fn render(&self, _props: &WidgetProps) -> Result<WidgetFrame, WidgetError> {
            panic!("chart exploded");
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl WidgetView for Failing {
        fn render(&self, _props: &WidgetProps) -> Result<WidgetFrame, WidgetError> {
            Err(WidgetError::Render("bad payload".to_string()))
        }
    }

    fn skeleton() -> Skeleton {
        Skeleton {
            size: WidgetSize::Small,
            span: GridSpan::for_size(WidgetSize::Small, LayoutMode::Dashboard),
        }
    }

    #[test]
    fn failure_boundary_catches_error() {
        let boundary = FailureBoundary::new(WidgetId::new("x"));
        let state = boundary.render(&Failing, &WidgetProps::default());
        assert_eq!(
            state,
            SlotState::RenderFailed {
                message: "render failed: bad payload".to_string()
            }
        );
    }

    #[test]
    fn failure_boundary_catches_panic() {
        let boundary = FailureBoundary::new(WidgetId::new("x"));
        let state = boundary.render(&Panicking, &WidgetProps::default());
        assert_eq!(state.fault_message(), Some("panicked: chart exploded"));
    }

    #[test]
    fn load_boundary_fallback_is_sized_skeleton() {
        let boundary = LoadBoundary::new(WidgetId::new("x"), skeleton());
        match boundary.fallback() {
            SlotState::Loading { skeleton } => assert_eq!(skeleton.size, WidgetSize::Small),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn isolation_boundary_mounts_ready_view() {
        let boundary = IsolationBoundary::new(WidgetId::new("x"), skeleton());
        let state = boundary
            .mount(
                Arc::new(ReadyLoader::new(Failing)),
                &ComponentCache::new(8),
                &WidgetProps::default(),
            )
            .await;
        assert!(matches!(state, SlotState::RenderFailed { .. }));
    }

    #[test]
    fn panic_payload_string() {
        let fault = WidgetFault::from_panic(&String::from("owned"));
        assert_eq!(fault, WidgetFault::Panic("owned".to_string()));
    }
}
