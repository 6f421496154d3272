//! Role config resolver
//!
//! Total lookup over a [`RoleConfigTable`]: every input, including `None`,
//! blank and unknown codes, resolves to a config. Misses fall back to the
//! table's `default` entry, which is defined behaviour rather than an error.

use std::sync::Arc;

use crate::code::RoleCode;
use crate::config::RoleDashboardConfig;
use crate::table::RoleConfigTable;

/// Result of resolving a role code
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRole {
    /// Canonical form of the requested code (`None` for blank input)
    pub requested: Option<RoleCode>,

    /// Code whose config is served
    pub served: RoleCode,

    /// Served config
    pub config: Arc<RoleDashboardConfig>,
}

impl ResolvedRole {
    /// Check if the `default` config was served for a different request
    #[inline]
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.requested.as_ref() != Some(&self.served)
    }
}

/// Pure resolver over an injected role table
#[derive(Debug, Clone)]
pub struct RoleResolver {
    table: Arc<RoleConfigTable>,
}

impl RoleResolver {
    /// Create resolver over a table
    #[inline]
    #[must_use]
    pub fn new(table: Arc<RoleConfigTable>) -> Self {
        Self { table }
    }

    /// Get the underlying table
    #[inline]
    #[must_use]
    pub fn table(&self) -> &Arc<RoleConfigTable> {
        &self.table
    }

    /// Resolve a raw role code to its dashboard config
    #[must_use]
    pub fn resolve(&self, role: Option<&str>) -> Arc<RoleDashboardConfig> {
        self.resolve_role(role).config
    }

    /// Resolve a raw role code, reporting which code is served
    #[must_use]
    pub fn resolve_role(&self, role: Option<&str>) -> ResolvedRole {
        let requested = role.and_then(RoleCode::parse);
        match requested.as_ref().and_then(|code| self.table.get(code)) {
            Some(config) => ResolvedRole {
                served: requested.clone().unwrap_or_default(),
                config: Arc::clone(config),
                requested,
            },
            None => {
                tracing::debug!(
                    requested = requested.as_ref().map(RoleCode::as_str),
                    "no dashboard for role, serving default"
                );
                ResolvedRole {
                    requested,
                    served: RoleCode::default_role(),
                    config: Arc::clone(self.table.default_config()),
                }
            }
        }
    }

    /// Resolve an already canonical code
    #[must_use]
    pub fn resolve_code(&self, code: &RoleCode) -> Arc<RoleDashboardConfig> {
        self.resolve(Some(code.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolver() -> RoleResolver {
        RoleResolver::new(Arc::new(RoleConfigTable::standard()))
    }

    #[test]
    fn exact_match() {
        let resolved = resolver().resolve_role(Some("pm"));
        assert_eq!(resolved.served.as_str(), "pm");
        assert_eq!(resolved.config.label, "Project Manager");
        assert!(!resolved.is_fallback());
    }

    #[test]
    fn case_and_synonym_match() {
        let r = resolver();
        assert_eq!(r.resolve(Some("PM")), r.resolve(Some("project_manager")));
        assert_eq!(r.resolve(Some("QC")).label, "Quality Engineer");
    }

    #[test]
    fn none_and_blank_serve_default() {
        let r = resolver();
        let default = r.resolve(None);
        assert_eq!(default.label, "Workbench");
        assert_eq!(r.resolve(Some("")), default);
        assert_eq!(r.resolve(Some("   ")), default);
    }

    #[test]
    fn unknown_serves_default() {
        let r = resolver();
        let resolved = r.resolve_role(Some("zzz-unknown"));
        assert!(resolved.is_fallback());
        assert_eq!(resolved.requested.unwrap().as_str(), "zzz-unknown");
        assert_eq!(resolved.config, r.resolve(None));
    }

    #[test]
    fn explicit_default_is_not_fallback() {
        assert!(!resolver().resolve_role(Some("DEFAULT")).is_fallback());
    }

    #[test]
    fn deterministic_same_arc() {
        let r = resolver();
        assert!(Arc::ptr_eq(&r.resolve(Some("sales")), &r.resolve(Some("Sales"))));
    }
}
