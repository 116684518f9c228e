//! # Configuration
//!
//! Org URL, credentials and transport knobs for an [`ApiClient`](crate::ApiClient).

use crate::error::{SdkError, SdkResult};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use url::Url;

/// `User-Agent` sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("okta-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// How requests are authorized.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// API token: `Authorization: SSWS <token>`.
    SswsToken(String),
    /// Access token: `Authorization: Bearer <token>`.
    Bearer(String),
    /// No `Authorization` header.
    #[default]
    None,
}

impl AuthMode {
    /// Value of the `Authorization` header, if any.
    pub fn header_value(&self) -> Option<String> {
        match self {
            AuthMode::SswsToken(token) => Some(format!("SSWS {}", token)),
            AuthMode::Bearer(token) => Some(format!("Bearer {}", token)),
            AuthMode::None => None,
        }
    }
}

// Tokens never reach logs.
impl fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::SswsToken(_) => f.write_str("SswsToken(****)"),
            AuthMode::Bearer(_) => f.write_str("Bearer(****)"),
            AuthMode::None => f.write_str("None"),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Base URL of the org, e.g. `https://dev-123456.okta.com`.
    pub org_url: Url,
    pub auth: AuthMode,
    pub user_agent: String,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Headers added to every request.
    pub default_headers: BTreeMap<String, String>,
}

impl Configuration {
    /// Validates `org_url` and returns a configuration without credentials.
    ///
    /// The URL must be absolute `http` or `https` with a host and no query or
    /// fragment. Trailing slashes are dropped.
    pub fn new(org_url: &str) -> SdkResult<Self> {
        let mut url = Url::parse(org_url.trim())
            .map_err(|e| SdkError::Config(format!("Invalid org URL '{}': {}", org_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(SdkError::Config(format!(
                "Org URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(SdkError::Config(format!("Org URL '{}' has no host", org_url)));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(SdkError::Config(format!(
                "Org URL '{}' must not carry a query or fragment",
                org_url
            )));
        }

        let trimmed = url.path().trim_end_matches('/').to_string();
        url.set_path(&trimmed);

        Ok(Self {
            org_url: url,
            auth: AuthMode::None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            default_headers: BTreeMap::new(),
        })
    }

    /// Uses an SSWS API token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.auth = AuthMode::SswsToken(token.into());
        self
    }

    /// Uses an OAuth 2.0 access token.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.auth = AuthMode::Bearer(token.into());
        self
    }

    pub fn with_auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// The org URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.org_url.as_str().trim_end_matches('/')
    }
}
