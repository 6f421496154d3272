//! Dashboard settings
//!
//! Loaded from TOML; every field has a default, so an empty file is valid.
//! Environment variables override the file:
//!
//! | variable            | setting           |
//! |---------------------|-------------------|
//! | `DASH_API_BASE_URL` | `api.base_url`    |
//! | `DASH_API_TOKEN`    | `api.bearer_token`|
//! | `DASH_LOG`          | `logging.filter`  |
//!
//! ```toml
//! [api]
//! base_url = "https://erp.example.com/api/v1"
//! timeout_secs = 10
//!
//! [render]
//! default_widget_size = "medium"
//! component_cache_capacity = 256
//!
//! [logging]
//! filter = "info,dash_core=debug"
//! json = false
//! ```

use dash_render::{RenderSettings, DEFAULT_CACHE_CAPACITY};
use dash_widget::WidgetSize;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::SettingsError;

/// Base URL override
pub const ENV_API_BASE_URL: &str = "DASH_API_BASE_URL";
/// Bearer token override
pub const ENV_API_TOKEN: &str = "DASH_API_TOKEN";
/// Log filter override
pub const ENV_LOG: &str = "DASH_LOG";

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Aggregate data endpoint
    pub api: ApiSettings,

    /// Renderer
    pub render: RenderOptions,

    /// Log output
    pub logging: LoggingSettings,
}

/// Aggregate data endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// API root; the dashboard path is appended to it
    pub base_url: String,

    /// Request timeout; `None` waits indefinitely
    pub timeout_secs: Option<u64>,

    /// Bearer token sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            timeout_secs: None,
            bearer_token: None,
        }
    }
}

impl ApiSettings {
    /// Request timeout as a duration
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Renderer settings as written in the settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Size for widgets that name none
    pub default_widget_size: WidgetSize,

    /// Loaded implementation cache capacity
    pub component_cache_capacity: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            default_widget_size: WidgetSize::Medium,
            component_cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl From<RenderOptions> for RenderSettings {
    fn from(options: RenderOptions) -> Self {
        Self {
            default_size: options.default_widget_size,
            cache_capacity: options.component_cache_capacity,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset
    pub filter: String,

    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

impl DashboardSettings {
    /// Create default settings
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TOML file, then apply environment overrides
    ///
    /// # Errors
    /// - `SettingsError::Read` if the file cannot be read
    /// - `SettingsError::Parse` if it is not valid TOML for these settings
    /// - `SettingsError::Invalid` if a value is out of range
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&raw)?.with_env();
        settings.validate()?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Defaults plus environment overrides
    ///
    /// # Errors
    /// Returns `SettingsError::Invalid` if an override is out of range.
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = Self::default().with_env();
        settings.validate()?;
        Ok(settings)
    }

    /// Parse TOML without environment overrides
    ///
    /// # Errors
    /// Returns `SettingsError::Parse` on malformed input.
    pub fn from_toml_str(raw: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a lookup function
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value: &String| !value.trim().is_empty());

        if let Some(url) = non_blank(ENV_API_BASE_URL) {
            self.api.base_url = url;
        }
        if let Some(token) = non_blank(ENV_API_TOKEN) {
            self.api.bearer_token = Some(token);
        }
        if let Some(filter) = non_blank(ENV_LOG) {
            self.logging.filter = filter;
        }
        self
    }

    /// With API base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into();
        self
    }

    /// With bearer token
    #[inline]
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.api.bearer_token = Some(token.into());
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.api.timeout_secs = Some(secs);
        self
    }

    /// With default widget size
    #[inline]
    #[must_use]
    pub fn with_default_widget_size(mut self, size: WidgetSize) -> Self {
        self.render.default_widget_size = size;
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns `SettingsError::Invalid` naming the first bad key.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SettingsError::Invalid {
                key: "api.base_url",
                message: format!("expected an http(s) URL, got {url:?}"),
            });
        }
        if self.api.timeout_secs == Some(0) {
            return Err(SettingsError::Invalid {
                key: "api.timeout_secs",
                message: "must be positive; omit it to disable the timeout".to_string(),
            });
        }
        if self.render.component_cache_capacity == 0 {
            return Err(SettingsError::Invalid {
                key: "render.component_cache_capacity",
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
