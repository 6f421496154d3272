//! Widget identifiers

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::WidgetError;

/// Stable identifier of a dashboard widget (e.g. `task-list`)
///
/// Ids are compared verbatim; no case folding is applied. A placement may
/// carry an id that no registry entry matches, so holding a `WidgetId` says
/// nothing about whether the widget exists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Create new id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get id as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for WidgetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WidgetId {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(WidgetError::InvalidId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Borrow<str> for WidgetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for WidgetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for WidgetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let id = WidgetId::from_str("  task-list ").unwrap();
        assert_eq!(id.as_str(), "task-list");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(WidgetId::from_str("   ").is_err());
    }

    #[test]
    fn borrow_allows_str_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(WidgetId::new("kit-status"), 1);
        assert_eq!(map.get("kit-status"), Some(&1));
    }

    #[test]
    fn serde_transparent() {
        let json = serde_json::to_string(&WidgetId::new("sales-funnel")).unwrap();
        assert_eq!(json, "\"sales-funnel\"");
    }
}
