//! Role config table
//!
//! Provides [`RoleConfigTable`], the immutable canonical role code →
//! [`RoleDashboardConfig`] mapping. A table always holds a `default` entry;
//! the builder refuses to produce one without it.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::code::{canonicalize, RoleCode};
use crate::config::RoleDashboardConfig;
use crate::error::RoleTableError;
use crate::standard;

/// Immutable table of role dashboards
#[derive(Debug, Clone)]
pub struct RoleConfigTable {
    configs: IndexMap<RoleCode, Arc<RoleDashboardConfig>>,
    default: Arc<RoleDashboardConfig>,
}

impl RoleConfigTable {
    /// Start building a table
    #[inline]
    #[must_use]
    pub fn builder() -> RoleTableBuilder {
        RoleTableBuilder::default()
    }

    /// The table the console ships with
    #[must_use]
    pub fn standard() -> Self {
        standard::standard_table()
    }

    /// Build from a guaranteed `default` config plus further entries
    ///
    /// Later entries with an already present code are ignored.
    pub(crate) fn with_default(
        default: RoleDashboardConfig,
        entries: impl IntoIterator<Item = (&'static str, RoleDashboardConfig)>,
    ) -> Self {
        let default = Arc::new(default);
        let mut configs = IndexMap::new();
        configs.insert(RoleCode::default_role(), Arc::clone(&default));
        for (raw, config) in entries {
            if let Some(code) = RoleCode::parse(raw) {
                configs.entry(code).or_insert_with(|| Arc::new(config));
            }
        }
        Self { configs, default }
    }

    /// Get config by canonical code
    #[inline]
    #[must_use]
    pub fn get(&self, code: &RoleCode) -> Option<&Arc<RoleDashboardConfig>> {
        self.configs.get(code)
    }

    /// The mandatory `default` config
    #[inline]
    #[must_use]
    pub fn default_config(&self) -> &Arc<RoleDashboardConfig> {
        &self.default
    }

    /// Check if a canonical code has its own entry
    #[inline]
    #[must_use]
    pub fn contains(&self, code: &RoleCode) -> bool {
        self.configs.contains_key(code)
    }

    /// Display label for any raw code (synonyms included)
    #[must_use]
    pub fn label(&self, raw: &str) -> Option<&str> {
        self.configs
            .get(canonicalize(raw).as_str())
            .map(|config| config.label.as_str())
    }

    /// Iterate over entries in table order
    pub fn iter(&self) -> impl Iterator<Item = (&RoleCode, &Arc<RoleDashboardConfig>)> {
        self.configs.iter()
    }

    /// Role codes in table order
    #[must_use]
    pub fn codes(&self) -> Vec<&RoleCode> {
        self.configs.keys().collect()
    }

    /// Number of entries, `default` included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Always false: a table holds at least `default`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

/// Builder for [`RoleConfigTable`]
#[derive(Debug, Default)]
pub struct RoleTableBuilder {
    configs: IndexMap<RoleCode, Arc<RoleDashboardConfig>>,
    errors: Vec<RoleTableError>,
}

impl RoleTableBuilder {
    /// Add a role config under a raw code
    #[must_use]
    pub fn role(mut self, raw: &str, config: RoleDashboardConfig) -> Self {
        match RoleCode::parse(raw) {
            None => self.errors.push(RoleTableError::BlankCode(raw.to_string())),
            Some(code) if self.configs.contains_key(&code) => {
                self.errors.push(RoleTableError::DuplicateRole(code));
            }
            Some(code) => {
                self.configs.insert(code, Arc::new(config));
            }
        }
        self
    }

    /// Finish building
    ///
    /// # Errors
    /// - `RoleTableError::BlankCode` / `DuplicateRole` for bad entries
    /// - `RoleTableError::MissingDefault` if no `default` entry was added
    pub fn build(self) -> Result<RoleConfigTable, RoleTableError> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }
        let default = self
            .configs
            .get(&RoleCode::default_role())
            .cloned()
            .ok_or(RoleTableError::MissingDefault)?;
        Ok(RoleConfigTable {
            configs: self.configs,
            default,
        })
    }
}
