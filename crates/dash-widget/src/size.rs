//! Layout metadata enums

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::WidgetError;

/// Preferred footprint of a widget on the dashboard grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetSize {
    /// Quarter width
    Small,

    /// Half width - global default
    #[default]
    Medium,

    /// Two thirds width
    Large,

    /// Full row
    Full,
}

impl WidgetSize {
    /// All sizes, smallest first
    pub const ALL: [WidgetSize; 4] = [Self::Small, Self::Medium, Self::Large, Self::Full];

    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Full => "full",
        }
    }
}

impl Display for WidgetSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetSize {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" | "sm" => Ok(Self::Small),
            "medium" | "md" => Ok(Self::Medium),
            "large" | "lg" => Ok(Self::Large),
            "full" => Ok(Self::Full),
            other => Err(WidgetError::UnknownSize(other.to_string())),
        }
    }
}

/// Business area a widget belongs to
///
/// Only used by authoring and administration tooling; the renderer ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetCategory {
    /// Greetings, notices, shortcuts
    General,
    /// Project delivery and tasks
    Project,
    /// Customers, opportunities, contracts
    Sales,
    /// Engineering change notices and design work
    Engineering,
    /// Inspections, risks and issues
    Quality,
    /// Purchasing, suppliers and materials
    Supply,
    /// Shop floor scheduling and kitting
    Production,
    /// Costs, budgets and collections
    Finance,
    /// Timesheets, attendance and headcount
    People,
    /// System administration
    Admin,
}

impl WidgetCategory {
    /// All categories in display order
    pub const ALL: [WidgetCategory; 10] = [
        Self::General,
        Self::Project,
        Self::Sales,
        Self::Engineering,
        Self::Quality,
        Self::Supply,
        Self::Production,
        Self::Finance,
        Self::People,
        Self::Admin,
    ];

    /// Lowercase name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Project => "project",
            Self::Sales => "sales",
            Self::Engineering => "engineering",
            Self::Quality => "quality",
            Self::Supply => "supply",
            Self::Production => "production",
            Self::Finance => "finance",
            Self::People => "people",
            Self::Admin => "admin",
        }
    }
}

impl Display for WidgetCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetCategory {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or(WidgetError::UnknownCategory(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_default_is_medium() {
        assert_eq!(WidgetSize::default(), WidgetSize::Medium);
    }

    #[test]
    fn size_parse_aliases() {
        assert_eq!("LG".parse::<WidgetSize>().unwrap(), WidgetSize::Large);
        assert_eq!("full".parse::<WidgetSize>().unwrap(), WidgetSize::Full);
        assert!("huge".parse::<WidgetSize>().is_err());
    }

    #[test]
    fn category_round_trips_through_str() {
        for category in WidgetCategory::ALL {
            assert_eq!(category.as_str().parse::<WidgetCategory>().unwrap(), category);
        }
    }

    #[test]
    fn size_serializes_snake_case() {
        let json = serde_json::to_string(&WidgetSize::Small).unwrap();
        assert_eq!(json, "\"small\"");
    }
}
