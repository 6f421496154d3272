//! Per-load widget payload snapshot

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::WidgetError;
use crate::id::WidgetId;

/// Server payloads keyed by widget id
///
/// An immutable, cheaply clonable snapshot. A new map is built for every
/// dashboard load and replaces the previous one wholesale; it is never
/// patched in place, so every render pass reads one consistent snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetDataMap(Arc<HashMap<WidgetId, Value>>);

impl WidgetDataMap {
    /// Empty map
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from a JSON object
    #[must_use]
    pub fn from_object(object: Map<String, Value>) -> Self {
        object.into_iter().map(|(k, v)| (WidgetId::new(k), v)).collect()
    }

    /// Build from a JSON value, which must be an object
    ///
    /// # Errors
    /// Returns [`WidgetError::InvalidPayload`] for non-object values.
    pub fn from_json(value: Value) -> Result<Self, WidgetError> {
        match value {
            Value::Object(object) => Ok(Self::from_object(object)),
            Value::Null => Ok(Self::empty()),
            other => Err(WidgetError::InvalidPayload(format!(
                "expected object keyed by widget id, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Get payload for a widget
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.0.get(id)
    }

    /// Check whether a payload exists for a widget
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Number of payloads
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Widget ids with payloads, sorted
    #[must_use]
    pub fn ids(&self) -> Vec<&WidgetId> {
        let mut ids: Vec<_> = self.0.keys().collect();
        ids.sort();
        ids
    }

    /// Check whether two handles point at the same snapshot
    #[inline]
    #[must_use]
    pub fn same_snapshot(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl FromIterator<(WidgetId, Value)> for WidgetDataMap {
    fn from_iter<I: IntoIterator<Item = (WidgetId, Value)>>(iter: I) -> Self {
        Self(Arc::new(iter.into_iter().collect()))
    }
}

impl Serialize for WidgetDataMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let ordered: std::collections::BTreeMap<_, _> = self.0.iter().collect();
        ordered.serialize(serializer)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
