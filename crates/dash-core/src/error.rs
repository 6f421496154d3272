//! Error types for the dashboard core
//!
//! None of these reach the renderer:
//! - [`DashboardError`]: aggregate data fetch failed (shown as a page banner)
//! - [`SwitchError`]: requested role is not one of the user's roles
//! - [`SettingsError`]: settings file could not be read or parsed

use dash_roles::{RoleCode, RoleSourceError};
use std::path::PathBuf;

/// Aggregate dashboard data errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    /// Request never produced a response
    #[error("request failed: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout
    #[error("request timed out after {duration_secs}s")]
    Timeout {
        /// Configured timeout
        duration_secs: u64,
    },

    /// Non-success HTTP status
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// First part of the response body
        body: String,
    },

    /// Envelope carried an application error code
    #[error("server rejected request ({code}): {message}")]
    Rejected {
        /// Application code from the envelope
        code: i64,
        /// Message from the envelope
        message: String,
    },

    /// Body was not a widget data map
    #[error("invalid dashboard payload: {0}")]
    InvalidPayload(String),

    /// Source is not configured for requests
    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

impl DashboardError {
    /// Check if a manual refresh may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout { .. } | Self::Unavailable(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Rejected { .. } | Self::InvalidPayload(_) => false,
        }
    }
}

/// Role switch errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwitchError {
    /// Role is not assigned to the user
    #[error("role `{0}` is not assigned to this user")]
    NotAssigned(RoleCode),

    /// User has a single role, so there is nothing to switch to
    #[error("role switching is unavailable with a single role")]
    Unavailable,

    /// Orchestrator was used before `initialize`
    #[error("dashboard is not initialized")]
    NotInitialized,

    /// Role assignments could not be read
    #[error("role source failed: {0}")]
    Source(#[from] RoleSourceError),
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("failed to read settings {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for the settings schema
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid value for {key}: {message}")]
    Invalid {
        /// Setting key
        key: &'static str,
        /// What is wrong
        message: String,
    },
}
