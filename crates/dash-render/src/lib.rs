//! Dashboard Render Layer
//!
//! Composes a role's widgets into a grid, isolating every widget.
//!
//! # Core Concepts
//!
//! - [`DashboardRenderer`]: Config + data map → [`DashboardView`]
//! - [`GridSpan`]: Effective size → grid tracks for the layout mode
//! - [`IsolationBoundary`]: [`LoadBoundary`] + [`FailureBoundary`] around one widget
//! - [`ComponentCache`]: Loaded implementations, coalesced and reused
//! - [`audit_table`]: Find unregistered placements before rendering
//!
//! # Example
//!
//! ```rust,ignore
//! use dash_render::DashboardRenderer;
//! use dash_roles::RoleConfigTable;
//! use dash_widget::{WidgetDataMap, WidgetRegistry};
//! use std::sync::Arc;
//!
//! let renderer = DashboardRenderer::new(Arc::new(WidgetRegistry::standard()));
//! let table = RoleConfigTable::standard();
//!
//! let view = renderer.render(table.default_config(), &WidgetDataMap::empty()).await;
//! assert!(view.is_settled());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod audit;
mod boundary;
mod cache;
mod grid;
mod renderer;
mod slot;

// Re-exports
pub use audit::{audit_table, ConfigIssue, IssueKind};
pub use boundary::{
    FailureBoundary, Faultable, IsolationBoundary, LoadBoundary, Suspendable, WidgetFault,
};
pub use cache::{ComponentCache, DEFAULT_CACHE_CAPACITY};
pub use grid::GridSpan;
pub use renderer::{DashboardRenderer, MountedDashboard, RenderSettings};
pub use slot::{DashboardContent, DashboardView, Skeleton, SlotState, SlotUpdate, WidgetSlot};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
