//! Aggregate dashboard data sources
//!
//! One request per role returns a JSON object keyed by widget id. Widgets the
//! server knows nothing about are simply absent from the object.

use async_trait::async_trait;
use dash_roles::RoleCode;
use dash_widget::WidgetDataMap;
use reqwest::{Client, Url};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::DashboardError;
use crate::settings::ApiSettings;

/// Path of the aggregate endpoint, relative to the API root
pub const DASHBOARD_PATH: &str = "dashboard/unified";

const ERROR_BODY_LIMIT: usize = 200;

/// Provider of per-role widget data
#[async_trait]
pub trait DashboardDataSource: Send + Sync {
    /// Fetch the widget data map for one role
    ///
    /// # Errors
    /// Returns [`DashboardError`] when the aggregate payload cannot be obtained.
    async fn fetch(&self, role: &RoleCode) -> Result<WidgetDataMap, DashboardError>;
}

/// In-memory data, keyed by role
///
/// Roles without an entry get an empty map.
#[derive(Debug, Clone, Default)]
pub struct StaticDataSource {
    data: HashMap<RoleCode, WidgetDataMap>,
}

impl StaticDataSource {
    /// Create source without data
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With data for a role
    #[must_use]
    pub fn with_role(mut self, role: &str, data: WidgetDataMap) -> Self {
        self.data.insert(RoleCode::new(role), data);
        self
    }
}

#[async_trait]
impl DashboardDataSource for StaticDataSource {
    async fn fetch(&self, role: &RoleCode) -> Result<WidgetDataMap, DashboardError> {
        Ok(self.data.get(role).cloned().unwrap_or_default())
    }
}

/// HTTP client for `GET {base_url}/dashboard/unified/{role}`
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    http: Client,
    base_url: Url,
    bearer_token: Option<String>,
    timeout: Option<Duration>,
}

impl HttpDataSource {
    /// Create client for an API root
    ///
    /// # Errors
    /// Returns `DashboardError::Unavailable` if the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, DashboardError> {
        Self::build(base_url.into(), None, None)
    }

    /// Create client from API settings
    ///
    /// # Errors
    /// Returns `DashboardError::Unavailable` if the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, DashboardError> {
        Self::build(
            settings.base_url.clone(),
            settings.bearer_token.clone(),
            settings.timeout(),
        )
    }

    fn build(
        base_url: String,
        bearer_token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, DashboardError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|err| DashboardError::Unavailable(format!("invalid API base URL `{base_url}`: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DashboardError::Unavailable(format!(
                "API base URL `{base_url}` cannot carry a path"
            )));
        }

        let mut builder = Client::builder().user_agent(concat!("dash-core/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| DashboardError::Unavailable(err.to_string()))?;

        Ok(Self {
            http,
            base_url,
            bearer_token,
            timeout,
        })
    }

    /// With bearer token
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// URL requested for a role
    ///
    /// The role code is a single percent-encoded path segment.
    #[must_use]
    pub fn endpoint(&self, role: &RoleCode) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(DASHBOARD_PATH.split('/'))
                .push(role.as_str());
        }
        url
    }

    fn map_transport(&self, err: &reqwest::Error) -> DashboardError {
        match self.timeout {
            Some(timeout) if err.is_timeout() => DashboardError::Timeout {
                duration_secs: timeout.as_secs(),
            },
            _ => DashboardError::Transport(err.to_string()),
        }
    }
}

#[async_trait]
impl DashboardDataSource for HttpDataSource {
    async fn fetch(&self, role: &RoleCode) -> Result<WidgetDataMap, DashboardError> {
        let url = self.endpoint(role);
        tracing::debug!(%url, "fetching dashboard data");

        let mut request = self.http.get(url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| self.map_transport(&err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| DashboardError::InvalidPayload(err.to_string()))?;

        let data = unwrap_envelope(body)?;
        WidgetDataMap::from_json(data).map_err(|err| DashboardError::InvalidPayload(err.to_string()))
    }
}

/// Strip a `{ "code": .., "data": .. }` envelope, if present
///
/// A code other than `0` or `200` is an application error. Bodies without an
/// envelope are returned unchanged.
///
/// # Errors
/// Returns `DashboardError::Rejected` for an error code.
pub fn unwrap_envelope(body: Value) -> Result<Value, DashboardError> {
    let Value::Object(mut object) = body else {
        return Ok(body);
    };
    if !(object.contains_key("code") && object.contains_key("data")) {
        return Ok(Value::Object(object));
    }

    let code = match object.get("code") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };
    match code {
        Some(0 | 200) => Ok(object.remove("data").unwrap_or(Value::Null)),
        code => {
            let message = object
                .get("message")
                .or_else(|| object.get("msg"))
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            Err(DashboardError::Rejected {
                code: code.unwrap_or(-1),
                message,
            })
        }
    }
}
