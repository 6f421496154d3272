//! Error types for role tables and role sources

use crate::code::RoleCode;

/// Role config table construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleTableError {
    /// Table has no `default` entry
    #[error("role config table has no `default` entry")]
    MissingDefault,

    /// Two entries canonicalise to the same code
    #[error("duplicate role config: {0}")]
    DuplicateRole(RoleCode),

    /// Entry code is blank
    #[error("role code {0:?} is blank after canonicalisation")]
    BlankCode(String),
}

/// Errors raised by a [`RoleSource`](crate::RoleSource)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleSourceError {
    /// Session or profile backend unavailable
    #[error("role source unavailable: {0}")]
    Unavailable(String),

    /// Source closed before roles were known
    #[error("role source closed before roles were resolved")]
    Closed,
}
