//! Dashboard Role Layer
//!
//! Maps a user's organisational role to an ordered dashboard layout.
//!
//! # Core Concepts
//!
//! - [`canonicalize`] / [`RoleCode`]: One canonical code per role, synonyms folded in
//! - [`RoleDashboardConfig`]: Label, [`LayoutMode`] and ordered [`WidgetPlacement`]s
//! - [`RoleConfigTable`]: Immutable table with a mandatory `default` entry
//! - [`RoleResolver`]: Total lookup with deterministic fallback to `default`
//! - [`RoleSource`] / [`RoleAssignments`]: Where the user's roles come from
//!
//! # Example
//!
//! ```rust,ignore
//! use dash_roles::{RoleConfigTable, RoleResolver};
//! use std::sync::Arc;
//!
//! let resolver = RoleResolver::new(Arc::new(RoleConfigTable::standard()));
//!
//! // Synonyms and unknown codes never fail
//! assert_eq!(resolver.resolve(Some("Project_Manager")).label, "Project Manager");
//! assert_eq!(resolver.resolve(Some("zzz")), resolver.resolve(None));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod assignment;
mod code;
mod config;
mod error;
mod resolver;
mod standard;
mod table;

// Re-exports
pub use assignment::{
    RoleAssignments, RoleSnapshot, RoleSource, StaticRoleSource, UserRoleAssignment,
    WatchRoleSource,
};
pub use code::{canonicalize, RoleCode, DEFAULT_ROLE, ROLE_SYNONYMS};
pub use config::{LayoutMode, RoleDashboardConfig, WidgetPlacement};
pub use error::{RoleSourceError, RoleTableError};
pub use resolver::{ResolvedRole, RoleResolver};
pub use table::{RoleConfigTable, RoleTableBuilder};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
