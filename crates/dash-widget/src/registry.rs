//! Widget registry
//!
//! Provides [`WidgetRegistry`], the immutable id → [`WidgetDefinition`] table
//! the renderer resolves placements against.

use indexmap::IndexMap;

use crate::catalog::STANDARD_CATALOG;
use crate::definition::WidgetDefinition;
use crate::error::RegistryError;
use crate::id::WidgetId;
use crate::size::WidgetCategory;

/// Outcome of resolving a widget id
///
/// A missing widget is a normal, explicit branch rather than an error.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// Id is registered
    Found(&'a WidgetDefinition),

    /// Id is not registered
    NotFound(&'a str),
}

impl<'a> Resolution<'a> {
    /// Get definition if found
    #[inline]
    #[must_use]
    pub fn definition(self) -> Option<&'a WidgetDefinition> {
        match self {
            Self::Found(def) => Some(def),
            Self::NotFound(_) => None,
        }
    }

    /// Check if found
    #[inline]
    #[must_use]
    pub fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Immutable registry of dashboard widgets
///
/// Built once (usually at startup) and shared behind an `Arc`. Registration
/// order is preserved for listing.
#[derive(Debug, Default, Clone)]
pub struct WidgetRegistry {
    widgets: IndexMap<WidgetId, WidgetDefinition>,
}

impl WidgetRegistry {
    /// Start building a registry
    #[inline]
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry holding the standard widget catalog
    #[must_use]
    pub fn standard() -> Self {
        let mut builder = Self::builder();
        for entry in STANDARD_CATALOG {
            builder.insert(entry.definition());
        }
        builder.build_lenient()
    }

    /// Resolve a widget id
    #[inline]
    #[must_use]
    pub fn lookup<'a>(&'a self, id: &'a str) -> Resolution<'a> {
        match self.widgets.get(id) {
            Some(def) => Resolution::Found(def),
            None => Resolution::NotFound(id),
        }
    }

    /// Get definition by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WidgetDefinition> {
        self.widgets.get(id)
    }

    /// Check if widget exists
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.widgets.contains_key(id)
    }

    /// Definitions of one category, in registration order
    #[must_use]
    pub fn list_by_category(&self, category: WidgetCategory) -> Vec<&WidgetDefinition> {
        self.widgets
            .values()
            .filter(|def| def.category == category)
            .collect()
    }

    /// All registered ids, in registration order
    #[must_use]
    pub fn ids(&self) -> Vec<&WidgetId> {
        self.widgets.keys().collect()
    }

    /// Iterate over definitions
    pub fn iter(&self) -> impl Iterator<Item = &WidgetDefinition> {
        self.widgets.values()
    }

    /// Number of registered widgets
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

/// Builder for [`WidgetRegistry`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    widgets: IndexMap<WidgetId, WidgetDefinition>,
    duplicates: Vec<WidgetId>,
}

impl RegistryBuilder {
    /// Register a definition
    pub fn insert(&mut self, definition: WidgetDefinition) -> &mut Self {
        if self.widgets.contains_key(&definition.id) {
            self.duplicates.push(definition.id.clone());
        } else {
            self.widgets.insert(definition.id.clone(), definition);
        }
        self
    }

    /// Register a definition (chained)
    #[must_use]
    pub fn with(mut self, definition: WidgetDefinition) -> Self {
        self.insert(definition);
        self
    }

    /// Finish, rejecting duplicate ids
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateWidget`] for the first id registered twice.
    pub fn build(self) -> Result<WidgetRegistry, RegistryError> {
        if let Some(id) = self.duplicates.into_iter().next() {
            return Err(RegistryError::DuplicateWidget(id));
        }
        Ok(WidgetRegistry {
            widgets: self.widgets,
        })
    }

    /// Finish, keeping the first registration of any duplicate id
    #[must_use]
    pub fn build_lenient(self) -> WidgetRegistry {
        WidgetRegistry {
            widgets: self.widgets,
        }
    }
}
