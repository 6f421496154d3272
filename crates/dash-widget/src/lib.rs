//! Dashboard Widget Layer
//!
//! Registry of independently loadable dashboard widgets.
//!
//! # Core Concepts
//!
//! - [`WidgetId`]: Stable string identifier of a widget
//! - [`WidgetDefinition`]: Loadable implementation plus layout metadata
//! - [`WidgetLoader`] / [`WidgetView`]: Two-step component contract (load, then render)
//! - [`WidgetRegistry`]: Immutable id → definition table with explicit [`Resolution`]
//! - [`WidgetDataMap`]: Per-load snapshot of server payloads keyed by widget id
//!
//! # Example
//!
//! ```rust,ignore
//! use dash_widget::{Resolution, WidgetRegistry};
//!
//! let registry = WidgetRegistry::standard();
//!
//! match registry.lookup("task-list") {
//!     Resolution::Found(def) => println!("{} ({})", def.id, def.category),
//!     Resolution::NotFound(id) => println!("{id} is not registered"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod catalog;
mod component;
mod data;
mod definition;
mod error;
mod id;
mod registry;
mod size;

// Re-exports
pub use catalog::{CatalogEntry, PayloadCard, STANDARD_CATALOG};
pub use component::{DeferredLoader, ReadyLoader, WidgetFrame, WidgetLoader, WidgetProps, WidgetView};
pub use data::WidgetDataMap;
pub use definition::WidgetDefinition;
pub use error::{RegistryError, WidgetError};
pub use id::WidgetId;
pub use registry::{RegistryBuilder, Resolution, WidgetRegistry};
pub use size::{WidgetCategory, WidgetSize};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
