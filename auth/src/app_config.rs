//! Application configuration consumed by the provider builder.
//!
//! The SPA receives this object from its backend (usually as `config.json`).
//! Every field is optional: an unset field means the matching provider is
//! not configured, and the builder propagates the absence instead of failing.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the application configuration as JSON.
pub const APP_CONFIG_ENV: &str = "SPA_AUTH_CONFIG";

/// Application configuration for the authentication module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path appended to the page origin to form redirect URIs
    pub base_path: Option<String>,
    /// Key of the currently selected provider (e.g. `"github"`)
    pub provider: Option<String>,
    /// Client id of the currently selected provider
    pub client_id: Option<String>,

    pub azure_client_id: Option<String>,
    pub azure_tenant: Option<String>,

    pub cognito_client_id: Option<String>,
    pub cognito_domain: Option<String>,
    pub aws_region: Option<String>,

    pub github_client_id: Option<String>,
    pub github_url: Option<String>,

    pub gitlab_client_id: Option<String>,
    pub gitlab_url: Option<String>,

    pub google_client_id: Option<String>,

    pub keycloak_client_id: Option<String>,
    pub keycloak_url: Option<String>,
    pub keycloak_realm: Option<String>,

    pub openid_client_id: Option<String>,
    pub oidc_auth_url: Option<String>,

    pub pingfederate_client_id: Option<String>,
    pub pingfederate_url: Option<String>,
}

impl AppConfig {
    /// Parse a configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| anyhow!("Failed to parse app config: {e:?}"))
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading app config from {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Load configuration from the `SPA_AUTH_CONFIG` environment variable
    pub fn from_env() -> Result<Self> {
        let json = std::env::var(APP_CONFIG_ENV)
            .map_err(|_| anyhow!("{APP_CONFIG_ENV} environment variable not set"))?;
        Self::from_json(&json).with_context(|| format!("parsing {APP_CONFIG_ENV}"))
    }

    /// Fills in `base_path` when it is unset or empty.
    ///
    /// Mirrors the build-time base URL fallback: a configured base path always
    /// wins, an empty one is treated as unset.
    pub fn with_default_base_path(mut self, default_base_path: Option<&str>) -> Self {
        if self.base_path.as_deref().unwrap_or_default().is_empty() {
            self.base_path = default_base_path.map(str::to_string);
        }
        self
    }
}
