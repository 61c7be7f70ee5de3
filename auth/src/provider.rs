//! Provider identifiers and the per-provider configuration record

use crate::state_token::StateGenerator;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The fixed set of supported identity providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Azure,
    Cognito,
    Github,
    Gitlab,
    Google,
    Keycloak,
    Openid,
    Pingfederate,
}

impl ProviderKind {
    /// All providers, in map order
    pub const ALL: [ProviderKind; 8] = [
        ProviderKind::Azure,
        ProviderKind::Cognito,
        ProviderKind::Github,
        ProviderKind::Gitlab,
        ProviderKind::Google,
        ProviderKind::Keycloak,
        ProviderKind::Openid,
        ProviderKind::Pingfederate,
    ];

    /// Key used in the application config's `provider` field
    pub fn key(&self) -> &'static str {
        match self {
            ProviderKind::Azure => "azure",
            ProviderKind::Cognito => "cognito",
            ProviderKind::Github => "github",
            ProviderKind::Gitlab => "gitlab",
            ProviderKind::Google => "google",
            ProviderKind::Keycloak => "keycloak",
            ProviderKind::Openid => "openid",
            ProviderKind::Pingfederate => "pingfederate",
        }
    }

    /// Human readable label shown on login buttons
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Azure => "Azure Active Directory",
            ProviderKind::Cognito => "Amazon Cognito",
            ProviderKind::Github => "GitHub",
            ProviderKind::Gitlab => "GitLab",
            ProviderKind::Google => "Google",
            ProviderKind::Keycloak => "Keycloak",
            ProviderKind::Openid => "OpenID",
            ProviderKind::Pingfederate => "PingFederate",
        }
    }

    /// Backend path receiving the authorization code.
    ///
    /// Cognito shares the generic OpenID callback.
    pub fn callback_path(&self) -> &'static str {
        match self {
            ProviderKind::Azure => "/auth/azure",
            ProviderKind::Cognito => "/auth/openid",
            ProviderKind::Github => "/auth/github",
            ProviderKind::Gitlab => "/auth/gitlab",
            ProviderKind::Google => "/auth/google",
            ProviderKind::Keycloak => "/auth/keycloak",
            ProviderKind::Openid => "/auth/openid",
            ProviderKind::Pingfederate => "/auth/pingfederate",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| anyhow!("unknown provider '{s}'"))
    }
}

/// Requested scopes, in the provider's native syntax
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scope {
    /// Pre-joined scope string, e.g. `openid+profile+email`
    Joined(String),
    /// Ordered list of scopes, e.g. `["user:email", "read:org"]`
    List(Vec<String>),
}

impl Scope {
    pub fn joined(scope: &str) -> Self {
        Scope::Joined(scope.to_string())
    }

    pub fn list(scopes: &[&str]) -> Self {
        Scope::List(scopes.iter().map(|s| s.to_string()).collect())
    }

    /// Individual scope names
    ///
    /// A joined string is split on `+` and spaces, which both stand for a
    /// space once the query string is decoded.
    pub fn items(&self) -> Vec<&str> {
        match self {
            Scope::Joined(joined) => joined
                .split(['+', ' '])
                .filter(|s| !s.is_empty())
                .collect(),
            Scope::List(list) => list.iter().map(String::as_str).collect(),
        }
    }

    /// Value of the `scope` query parameter before form encoding
    pub fn to_param(&self, delimiter: &str) -> String {
        match self {
            Scope::Joined(_) => self.items().join(" "),
            Scope::List(list) => list.join(delimiter),
        }
    }
}

/// How the authorization page should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Popup,
    Page,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Popup => "popup",
            DisplayMode::Page => "page",
        }
    }
}

/// OAuth protocol version used by the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OAuthType {
    #[serde(rename = "1.0")]
    OAuth1,
    #[serde(rename = "2.0")]
    OAuth2,
}

/// Size of the popup window opened for the authorization page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupOptions {
    pub width: u32,
    pub height: u32,
}

/// Configuration of one provider, as handed to the OAuth popup flow
///
/// Field names serialize in camelCase to match the option names of the
/// browser-side OAuth library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Display label
    pub name: String,
    /// Backend callback path
    pub url: String,
    /// Resolved client id; `None` means the provider is not configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Authorization endpoint; `None` delegates to the OAuth library default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_endpoint: Option<String>,
    pub redirect_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_url_params: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub optional_url_params: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_type: Option<OAuthType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup_options: Option<PopupOptions>,
    /// CSRF state generator; not serializable, callers generate per request
    #[serde(skip)]
    pub state: Option<StateGenerator>,
    /// Provider-specific URL parameters (e.g. `pfidpadapterid`)
    #[serde(flatten)]
    pub extra_params: BTreeMap<String, String>,
}

impl ProviderConfig {
    /// Minimal configuration: label, callback path, client id and redirect URI
    pub fn new(kind: ProviderKind, client_id: Option<String>, redirect_uri: String) -> Self {
        Self {
            name: kind.display_name().to_string(),
            url: kind.callback_path().to_string(),
            client_id,
            authorization_endpoint: None,
            redirect_uri,
            scope: None,
            required_url_params: Vec::new(),
            optional_url_params: Vec::new(),
            display: None,
            oauth_type: None,
            popup_options: None,
            state: None,
            extra_params: BTreeMap::new(),
        }
    }

    /// Generate a state token if this provider uses one
    pub fn generate_state(&self) -> Option<String> {
        self.state.map(|generator| generator.generate())
    }

    /// Value of a named URL parameter taken from this configuration
    ///
    /// `state` is not resolved here since it must be generated per request.
    pub fn url_param(&self, name: &str, scope_delimiter: &str) -> Option<String> {
        match name {
            "scope" => self.scope.as_ref().map(|s| s.to_param(scope_delimiter)),
            "display" => self.display.map(|d| d.as_str().to_string()),
            "client_id" => self.client_id.clone(),
            "redirect_uri" => Some(self.redirect_uri.clone()),
            other => self.extra_params.get(other).cloned(),
        }
    }
}

/// Provider configurations keyed by provider
pub type ProviderMap = BTreeMap<ProviderKind, ProviderConfig>;
