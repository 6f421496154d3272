//! Widget component contract
//!
//! A widget is mounted in two steps:
//! 1. [`WidgetLoader::load`] fetches the implementation (may suspend, may fail)
//! 2. [`WidgetView::render`] turns [`WidgetProps`] into a [`WidgetFrame`] (may fail)
//!
//! Both steps are wrapped by the renderer's isolation boundaries, so an
//! implementation is free to return errors (or even panic) without affecting
//! sibling widgets.

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::error::WidgetError;
use crate::id::WidgetId;

/// Final props handed to a widget view
///
/// Static placement overrides and the server payload are kept in separate
/// fields, so a payload can never clobber a caller-specified prop.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WidgetProps {
    /// Static overrides from the placement
    pub props: Map<String, Value>,

    /// Payload for this widget from the dashboard data map, if any
    pub data: Option<Value>,
}

impl WidgetProps {
    /// Create props from placement overrides and an optional payload
    #[inline]
    #[must_use]
    pub fn new(props: Map<String, Value>, data: Option<Value>) -> Self {
        Self { props, data }
    }

    /// Get a static prop
    #[inline]
    #[must_use]
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Get a static prop as string
    #[inline]
    #[must_use]
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    /// Get payload
    #[inline]
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Check whether a payload was supplied
    #[inline]
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

/// Rendered output of one widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetFrame {
    /// Widget that produced the frame
    pub widget: WidgetId,

    /// Card title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Widget-specific body
    pub body: Value,
}

impl WidgetFrame {
    /// Create frame with body
    #[inline]
    #[must_use]
    pub fn new(widget: WidgetId, body: Value) -> Self {
        Self {
            widget,
            title: None,
            body,
        }
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A loaded, renderable widget implementation
pub trait WidgetView: Send + Sync + Debug {
    /// Render the widget for the given props
    ///
    /// # Errors
    /// Any error is contained by the failure boundary of this widget.
    fn render(&self, props: &WidgetProps) -> Result<WidgetFrame, WidgetError>;
}

/// Loadable unit behind a registry entry
#[async_trait]
pub trait WidgetLoader: Send + Sync + Debug {
    /// Load (or fetch) the widget implementation
    ///
    /// # Errors
    /// Returns [`WidgetError::Load`] when the implementation is unavailable.
    async fn load(&self) -> Result<Arc<dyn WidgetView>, WidgetError>;
}

/// Loader for an implementation that is linked in and available immediately
#[derive(Debug, Clone)]
pub struct ReadyLoader {
    view: Arc<dyn WidgetView>,
}

impl ReadyLoader {
    /// Wrap a view
    #[inline]
    #[must_use]
    pub fn new(view: impl WidgetView + 'static) -> Self {
        Self {
            view: Arc::new(view),
        }
    }

    /// Wrap a shared view
    #[inline]
    #[must_use]
    pub fn from_arc(view: Arc<dyn WidgetView>) -> Self {
        Self { view }
    }
}

#[async_trait]
impl WidgetLoader for ReadyLoader {
    async fn load(&self) -> Result<Arc<dyn WidgetView>, WidgetError> {
        Ok(Arc::clone(&self.view))
    }
}

type LoadFn = dyn Fn() -> BoxFuture<'static, Result<Arc<dyn WidgetView>, WidgetError>> + Send + Sync;

/// Loader that produces the implementation asynchronously on demand
///
/// Models code-split widgets whose implementation is fetched the first time
/// the widget is mounted.
#[derive(Clone)]
pub struct DeferredLoader {
    name: String,
    load_fn: Arc<LoadFn>,
}

impl DeferredLoader {
    /// Create loader from an async factory
    pub fn new<F>(name: impl Into<String>, load_fn: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<Arc<dyn WidgetView>, WidgetError>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            load_fn: Arc::new(load_fn),
        }
    }
}

impl Debug for DeferredLoader {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredLoader")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WidgetLoader for DeferredLoader {
    async fn load(&self) -> Result<Arc<dyn WidgetView>, WidgetError> {
        (self.load_fn)().await
    }
}
