//! Dashboard Core - role-driven dashboard orchestration
//!
//! Ties the widget, role and render layers together:
//! - Tracks the active role and the user's role assignments
//! - Loads the aggregate widget data for the active role
//! - Drops stale responses after rapid role switches
//! - Composes pages with a role switcher and an error banner
//!
//! # Example
//!
//! ```rust,ignore
//! use dash_core::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = DashboardSettings::load("dashboard.toml")?;
//! let source = HttpDataSource::from_settings(&settings.api)?;
//! let dashboard = DashboardOrchestrator::standard(&settings, Arc::new(source));
//!
//! dashboard.initialize(&StaticRoleSource::default()).await?;
//! let page = dashboard.render_page().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod loader;
pub mod orchestrator;
pub mod settings;
pub mod source;
pub mod switcher;
pub mod telemetry;

// Re-exports for convenience
pub use error::{DashboardError, SettingsError, SwitchError};
pub use loader::{DashboardDataLoader, LoadFailure, LoadOutcome, LoadState};
pub use orchestrator::{DashboardOrchestrator, DashboardPage, PageBanner, PageEvent};
pub use settings::{ApiSettings, DashboardSettings, LoggingSettings, RenderOptions};
pub use source::{unwrap_envelope, DashboardDataSource, HttpDataSource, StaticDataSource};
pub use switcher::{RoleOption, RoleSwitcher};
pub use telemetry::init_tracing;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the dashboard core
    pub use crate::{
        DashboardDataSource, DashboardError, DashboardOrchestrator, DashboardPage,
        DashboardSettings, HttpDataSource, LoadOutcome, PageEvent, StaticDataSource, SwitchError,
    };
    pub use dash_roles::{RoleAssignments, RoleCode, StaticRoleSource, UserRoleAssignment};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
