//! Role codes and canonicalisation
//!
//! Role codes arrive from sessions, token claims and legacy records in many
//! spellings (`PM`, `project_manager`, `Project Manager`, ...). Every code is
//! funnelled through [`canonicalize`] before it touches a table, so one
//! canonical code maps to one dashboard and one display label.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};

/// Canonical code of the mandatory fallback role
pub const DEFAULT_ROLE: &str = "default";

/// Legacy and alternative spellings, keyed by their normalised form
///
/// Targets are canonical codes and never appear as keys.
pub const ROLE_SYNONYMS: &[(&str, &str)] = &[
    // admin
    ("administrator", "admin"),
    ("sysadmin", "admin"),
    ("super-admin", "admin"),
    ("superadmin", "admin"),
    ("system-admin", "admin"),
    // general manager
    ("ceo", "gm"),
    ("general-manager", "gm"),
    ("president", "gm"),
    ("boss", "gm"),
    // project management
    ("project-manager", "pm"),
    ("projectmanager", "pm"),
    ("project-lead", "pm"),
    ("pmo-director", "pmo"),
    ("pmo-manager", "pmo"),
    // sales
    ("sales-rep", "sales"),
    ("salesman", "sales"),
    ("sales-engineer", "sales"),
    ("account-manager", "sales"),
    ("sales-manager", "sales-director"),
    ("sales-lead", "sales-director"),
    ("sales-dir", "sales-director"),
    // engineering
    ("rd", "engineer"),
    ("r&d", "engineer"),
    ("rd-engineer", "engineer"),
    ("developer", "engineer"),
    ("mechanical-engineer", "engineer"),
    ("electrical-engineer", "engineer"),
    ("software-engineer", "engineer"),
    ("rd-manager", "engineering-manager"),
    ("tech-lead", "engineering-manager"),
    ("chief-engineer", "engineering-manager"),
    // quality
    ("qa", "quality"),
    ("qc", "quality"),
    ("quality-engineer", "quality"),
    ("quality-inspector", "quality"),
    // supply
    ("purchase", "purchaser"),
    ("procurement", "purchaser"),
    ("buyer", "purchaser"),
    ("warehouse-keeper", "warehouse"),
    ("storekeeper", "warehouse"),
    ("stock", "warehouse"),
    // production
    ("production-manager", "production"),
    ("workshop", "production"),
    ("plant-manager", "production"),
    // finance
    ("accountant", "finance"),
    ("cashier", "finance"),
    ("finance-manager", "finance"),
    // people
    ("human-resources", "hr"),
    ("hr-manager", "hr"),
    ("personnel", "hr"),
    // everyone else
    ("staff", DEFAULT_ROLE),
    ("employee", DEFAULT_ROLE),
    ("user", DEFAULT_ROLE),
    ("guest", DEFAULT_ROLE),
];

/// Canonicalise a raw role code
///
/// Case-folds, turns `_` and whitespace into `-`, collapses repeated
/// separators, then applies [`ROLE_SYNONYMS`]. Idempotent:
/// `canonicalize(&canonicalize(x)) == canonicalize(x)`.
#[must_use]
pub fn canonicalize(raw: &str) -> String {
    let normalized = normalize(raw);
    ROLE_SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map_or(normalized, |(_, canonical)| (*canonical).to_string())
}

fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.to_lowercase().chars() {
        let c = if c == '_' || c.is_whitespace() { '-' } else { c };
        if c == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(c);
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Canonical role code
///
/// Only constructible through canonicalisation, so two `RoleCode`s are equal
/// exactly when they address the same role.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct RoleCode(String);

impl RoleCode {
    /// Canonicalise a raw code; `None` when nothing is left
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let canonical = canonicalize(raw);
        (!canonical.is_empty()).then_some(Self(canonical))
    }

    /// Canonicalise a raw code, falling back to [`DEFAULT_ROLE`] when blank
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(Self::default_role)
    }

    /// The fallback role
    #[inline]
    #[must_use]
    pub fn default_role() -> Self {
        Self(DEFAULT_ROLE.to_string())
    }

    /// Check if this is the fallback role
    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_ROLE
    }

    /// Get code as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoleCode {
    fn default() -> Self {
        Self::default_role()
    }
}

impl Display for RoleCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RoleCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoleCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RoleCode {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<RoleCode> for String {
    fn from(value: RoleCode) -> Self {
        value.0
    }
}
