//! User role assignments and role sources
//!
//! The dashboard does not know how roles are obtained (session store, token
//! claims, profile endpoint). It consumes a [`RoleSource`] that eventually
//! yields a [`RoleSnapshot`] that is no longer loading.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::code::RoleCode;
use crate::error::RoleSourceError;

/// One role held by the current user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoleAssignment {
    /// Raw role code as delivered by the source
    pub role_code: String,

    /// Display name as delivered by the source
    pub role_name: String,

    /// Primary role flag
    #[serde(default)]
    pub is_primary: bool,
}

impl UserRoleAssignment {
    /// Create non-primary assignment
    #[inline]
    #[must_use]
    pub fn new(role_code: impl Into<String>, role_name: impl Into<String>) -> Self {
        Self {
            role_code: role_code.into(),
            role_name: role_name.into(),
            is_primary: false,
        }
    }

    /// Mark as primary
    #[inline]
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Canonical code
    #[inline]
    #[must_use]
    pub fn code(&self) -> RoleCode {
        RoleCode::new(&self.role_code)
    }
}

/// The user's roles, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleAssignments(Vec<UserRoleAssignment>);

impl RoleAssignments {
    /// Wrap assignments
    #[inline]
    #[must_use]
    pub fn new(assignments: Vec<UserRoleAssignment>) -> Self {
        Self(assignments)
    }

    /// No roles
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Primary assignment: the one flagged primary, else the first
    #[must_use]
    pub fn primary(&self) -> Option<&UserRoleAssignment> {
        self.0.iter().find(|a| a.is_primary).or_else(|| self.0.first())
    }

    /// Canonical code of the primary assignment
    #[must_use]
    pub fn primary_code(&self) -> Option<RoleCode> {
        self.primary().map(UserRoleAssignment::code)
    }

    /// Distinct assignments by canonical code, first occurrence wins
    #[must_use]
    pub fn distinct(&self) -> Vec<&UserRoleAssignment> {
        let mut seen = Vec::<RoleCode>::new();
        self.0
            .iter()
            .filter(|a| {
                let code = a.code();
                if seen.contains(&code) {
                    false
                } else {
                    seen.push(code);
                    true
                }
            })
            .collect()
    }

    /// Find assignment holding a canonical code
    #[must_use]
    pub fn find(&self, code: &RoleCode) -> Option<&UserRoleAssignment> {
        self.0.iter().find(|a| &a.code() == code)
    }

    /// Check if the user holds a role
    #[inline]
    #[must_use]
    pub fn contains(&self, code: &RoleCode) -> bool {
        self.find(code).is_some()
    }

    /// Iterate in source order
    pub fn iter(&self) -> impl Iterator<Item = &UserRoleAssignment> {
        self.0.iter()
    }

    /// Number of assignments
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
}

impl FromIterator<UserRoleAssignment> for RoleAssignments {
    fn from_iter<I: IntoIterator<Item = UserRoleAssignment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Roles as currently known by the source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSnapshot {
    /// Assignments (empty while loading)
    pub roles: RoleAssignments,

    /// Whether the source is still resolving
    pub loading: bool,
}

impl RoleSnapshot {
    /// Snapshot that is still resolving
    #[inline]
    #[must_use]
    pub fn loading() -> Self {
        Self {
            roles: RoleAssignments::empty(),
            loading: true,
        }
    }

    /// Resolved snapshot
    #[inline]
    #[must_use]
    pub fn ready(roles: RoleAssignments) -> Self {
        Self {
            roles,
            loading: false,
        }
    }
}

/// Provider of the current user's roles
#[async_trait]
pub trait RoleSource: Send + Sync {
    /// Wait until roles are resolved and return them
    ///
    /// # Errors
    /// Returns [`RoleSourceError`] when roles cannot be obtained.
    async fn resolve_roles(&self) -> Result<RoleAssignments, RoleSourceError>;
}

/// Fixed role assignments
#[derive(Debug, Clone, Default)]
pub struct StaticRoleSource {
    roles: RoleAssignments,
}

impl StaticRoleSource {
    /// Create source
    #[inline]
    #[must_use]
    pub fn new(roles: RoleAssignments) -> Self {
        Self { roles }
    }
}

#[async_trait]
impl RoleSource for StaticRoleSource {
    async fn resolve_roles(&self) -> Result<RoleAssignments, RoleSourceError> {
        Ok(self.roles.clone())
    }
}

/// Role source fed by a session store through a watch channel
///
/// Consumers wait until a snapshot with `loading == false` is published.
#[derive(Debug, Clone)]
pub struct WatchRoleSource {
    receiver: watch::Receiver<RoleSnapshot>,
}

impl WatchRoleSource {
    /// Create source and the sender the session store publishes through
    #[must_use]
    pub fn channel() -> (watch::Sender<RoleSnapshot>, Self) {
        let (sender, receiver) = watch::channel(RoleSnapshot::loading());
        (sender, Self { receiver })
    }

    /// Current snapshot without waiting
    #[must_use]
    pub fn current(&self) -> RoleSnapshot {
        self.receiver.borrow().clone()
    }
}

#[async_trait]
impl RoleSource for WatchRoleSource {
    async fn resolve_roles(&self) -> Result<RoleAssignments, RoleSourceError> {
        let mut receiver = self.receiver.clone();
        let snapshot = receiver
            .wait_for(|snapshot| !snapshot.loading)
            .await
            .map_err(|_| RoleSourceError::Closed)?;
        Ok(snapshot.roles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(items: &[(&str, bool)]) -> RoleAssignments {
        items
            .iter()
            .map(|(code, primary)| {
                let a = UserRoleAssignment::new(*code, code.to_uppercase());
                if *primary {
                    a.primary()
                } else {
                    a
                }
            })
            .collect()
    }

    #[test]
    fn primary_prefers_flag() {
        let r = roles(&[("sales", false), ("pm", true)]);
        assert_eq!(r.primary_code().unwrap().as_str(), "pm");
    }

    #[test]
    fn primary_falls_back_to_first() {
        let r = roles(&[("sales", false), ("pm", false)]);
        assert_eq!(r.primary_code().unwrap().as_str(), "sales");
    }

    #[test]
    fn empty_has_no_primary() {
        assert!(RoleAssignments::empty().primary().is_none());
    }

    #[test]
    fn distinct_collapses_synonyms() {
        let r = roles(&[("pm", false), ("Project_Manager", false), ("qa", false)]);
        let codes: Vec<_> = r.distinct().iter().map(|a| a.code()).collect();
        assert_eq!(codes, vec![RoleCode::new("pm"), RoleCode::new("quality")]);
    }

    #[test]
    fn contains_uses_canonical_codes() {
        let r = roles(&[("QC", false)]);
        assert!(r.contains(&RoleCode::new("quality")));
    }

    #[tokio::test]
    async fn static_source_returns_roles() {
        let source = StaticRoleSource::new(roles(&[("pm", true)]));
        assert_eq!(source.resolve_roles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn watch_source_waits_for_ready() {
        let (sender, source) = WatchRoleSource::channel();
        assert!(source.current().loading);

        let waiter = tokio::spawn({
            let source = source.clone();
            async move { source.resolve_roles().await }
        });

        sender.send_replace(RoleSnapshot::ready(roles(&[("hr", true)])));
        let resolved = waiter.await.unwrap().unwrap();
        assert_eq!(resolved.primary_code().unwrap().as_str(), "hr");
    }

    #[tokio::test]
    async fn watch_source_closed() {
        let (sender, source) = WatchRoleSource::channel();
        drop(sender);
        assert_eq!(source.resolve_roles().await.unwrap_err(), RoleSourceError::Closed);
    }
}
