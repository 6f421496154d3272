//! Role switcher
//!
//! Offered only to users holding more than one distinct role. Selecting a
//! role validates it; the orchestrator does the actual switch.

use dash_roles::{RoleAssignments, RoleCode};
use serde::Serialize;

use crate::error::SwitchError;

/// One selectable role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleOption {
    /// Canonical code
    pub code: RoleCode,

    /// Display name from the assignment
    pub label: String,

    /// Currently active
    pub selected: bool,
}

/// Choice between the user's roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSwitcher {
    roles: Vec<(RoleCode, String)>,
    active: RoleCode,
}

impl RoleSwitcher {
    /// Build a switcher; `None` for zero or one distinct role
    #[must_use]
    pub fn new(assignments: &RoleAssignments, active: &RoleCode) -> Option<Self> {
        let roles: Vec<_> = assignments
            .distinct()
            .into_iter()
            .map(|a| (a.code(), a.role_name.clone()))
            .collect();

        if roles.len() <= 1 {
            return None;
        }
        Some(Self {
            roles,
            active: active.clone(),
        })
    }

    /// Options in assignment order
    #[must_use]
    pub fn options(&self) -> Vec<RoleOption> {
        self.roles
            .iter()
            .map(|(code, label)| RoleOption {
                code: code.clone(),
                label: label.clone(),
                selected: *code == self.active,
            })
            .collect()
    }

    /// Active role
    #[inline]
    #[must_use]
    pub fn active(&self) -> &RoleCode {
        &self.active
    }

    /// Check if a canonical code is selectable
    #[must_use]
    pub fn contains(&self, code: &RoleCode) -> bool {
        self.roles.iter().any(|(c, _)| c == code)
    }

    /// Validate a raw role code
    ///
    /// # Errors
    /// Returns `SwitchError::NotAssigned` if the user does not hold the role.
    pub fn select(&self, raw: &str) -> Result<RoleCode, SwitchError> {
        let code = RoleCode::new(raw);
        if self.contains(&code) {
            Ok(code)
        } else {
            Err(SwitchError::NotAssigned(code))
        }
    }

    /// Number of options
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if there are no options
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
