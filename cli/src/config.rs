#![deny(missing_docs)]

//! # Connection Settings
//!
//! Resolves the org URL, credentials and timeout from flags, environment
//! variables and `okta.yaml`.
//!
//! Precedence, highest first:
//! 1. Flags and their environment variables (`OKTA_CLIENT_ORGURL`, `OKTA_CLIENT_TOKEN`).
//! 2. `--config <file>`, or `./.okta.yaml` over `~/.okta/okta.yaml`.

use crate::error::{CliError, CliResult};
use okta_sdk::{AuthMode, Configuration};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Authorization scheme selected on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthModeArg {
    /// `Authorization: SSWS <token>`.
    Ssws,
    /// `Authorization: Bearer <token>`.
    Bearer,
}

/// Global connection flags.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Org URL, e.g. https://dev-123456.okta.com.
    #[clap(long, env = "OKTA_CLIENT_ORGURL", global = true)]
    pub org_url: Option<String>,

    /// API token (SSWS) or access token (Bearer).
    #[clap(long, env = "OKTA_CLIENT_TOKEN", hide_env_values = true, global = true)]
    pub api_token: Option<String>,

    /// Authorization scheme for the token.
    #[clap(long, value_enum, global = true)]
    pub auth_mode: Option<AuthModeArg>,

    /// Whole-request timeout in seconds.
    #[clap(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Path to an okta.yaml file.
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct OktaYaml {
    #[serde(default)]
    okta: Option<OktaSection>,
}

#[derive(Debug, Default, Deserialize)]
struct OktaSection {
    #[serde(default)]
    client: Option<FileClientConfig>,
}

/// The `okta.client` section of `okta.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileClientConfig {
    /// `okta.client.orgUrl`
    pub org_url: Option<String>,
    /// `okta.client.token`
    pub token: Option<String>,
    /// `okta.client.authorizationMode`: `SSWS` or `Bearer`.
    pub authorization_mode: Option<String>,
    /// `okta.client.requestTimeout` in seconds.
    pub request_timeout: Option<u64>,
}

impl FileClientConfig {
    /// Fields set in `other` replace ours.
    fn overlay(self, other: FileClientConfig) -> Self {
        Self {
            org_url: other.org_url.or(self.org_url),
            token: other.token.or(self.token),
            authorization_mode: other.authorization_mode.or(self.authorization_mode),
            request_timeout: other.request_timeout.or(self.request_timeout),
        }
    }
}

/// Parses the `okta.client` section of an `okta.yaml` document.
pub fn parse_okta_yaml(content: &str) -> CliResult<FileClientConfig> {
    if content.trim().is_empty() {
        return Ok(FileClientConfig::default());
    }
    let doc: OktaYaml = serde_yaml::from_str(content)
        .map_err(|e| CliError::Config(format!("Invalid okta.yaml: {}", e)))?;
    Ok(doc.okta.and_then(|o| o.client).unwrap_or_default())
}

fn read_okta_yaml(path: &Path) -> CliResult<FileClientConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("Failed to read {:?}: {}", path, e)))?;
    tracing::debug!(path = %path.display(), "loaded okta.yaml");
    parse_okta_yaml(&content)
}

/// Loads file settings. An explicit path must exist; default locations are optional.
pub fn load_file_config(explicit: Option<&Path>) -> CliResult<FileClientConfig> {
    if let Some(path) = explicit {
        return read_okta_yaml(path);
    }

    let mut config = FileClientConfig::default();
    let candidates = [
        dirs::home_dir().map(|h| h.join(".okta").join("okta.yaml")),
        Some(PathBuf::from(".okta.yaml")),
    ];
    for path in candidates.into_iter().flatten() {
        if path.is_file() {
            config = config.overlay(read_okta_yaml(&path)?);
        }
    }
    Ok(config)
}

impl ConnectionArgs {
    /// Builds the SDK configuration from flags layered over `file`.
    pub fn resolve(&self, file: FileClientConfig) -> CliResult<Configuration> {
        let org_url = self.org_url.clone().or(file.org_url).ok_or_else(|| {
            CliError::Config(
                "Okta org URL is not set; pass --org-url, set OKTA_CLIENT_ORGURL or add okta.client.orgUrl to okta.yaml"
                    .into(),
            )
        })?;
        let token = self.api_token.clone().or(file.token).ok_or_else(|| {
            CliError::Config(
                "API token is not set; pass --api-token, set OKTA_CLIENT_TOKEN or add okta.client.token to okta.yaml"
                    .into(),
            )
        })?;

        let mode = match (self.auth_mode, file.authorization_mode.as_deref()) {
            (Some(mode), _) => mode,
            (None, None) => AuthModeArg::Ssws,
            (None, Some(m)) if m.eq_ignore_ascii_case("ssws") => AuthModeArg::Ssws,
            (None, Some(m)) if m.eq_ignore_ascii_case("bearer") => AuthModeArg::Bearer,
            (None, Some(other)) => {
                return Err(CliError::Config(format!(
                    "Unsupported authorizationMode '{}'; use SSWS or Bearer",
                    other
                )))
            }
        };
        let auth = match mode {
            AuthModeArg::Ssws => AuthMode::SswsToken(token),
            AuthModeArg::Bearer => AuthMode::Bearer(token),
        };

        let mut config = Configuration::new(&org_url)?.with_auth(auth);
        if let Some(secs) = self.timeout_secs.or(file.request_timeout) {
            if secs > 0 {
                config = config.with_timeout(Duration::from_secs(secs));
            }
        }
        Ok(config)
    }
}
