//! Authorization request construction
//!
//! Builds the URL opened in the popup window. Providers that leave
//! settings to the OAuth library (Google, GitHub) get the library defaults
//! filled in first.

use crate::provider::{DisplayMode, OAuthType, PopupOptions, ProviderConfig, ProviderKind, Scope};
use anyhow::{Result, anyhow};
use tracing::debug;
use url::Url;

/// Google's authorization endpoint used when none is configured
pub const GOOGLE_AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/auth";

/// Delimiter joining scope lists
pub const SCOPE_DELIMITER: &str = " ";

/// Fill unset fields with the OAuth library's built-in provider defaults
pub fn with_library_defaults(kind: ProviderKind, provider: &ProviderConfig) -> ProviderConfig {
    let mut provider = provider.clone();
    match kind {
        ProviderKind::Google => {
            provider
                .authorization_endpoint
                .get_or_insert_with(|| GOOGLE_AUTHORIZATION_ENDPOINT.to_string());
            provider
                .scope
                .get_or_insert_with(|| Scope::list(&["openid", "profile", "email"]));
            if provider.required_url_params.is_empty() {
                provider.required_url_params = vec!["scope".to_string()];
            }
            if provider.optional_url_params.is_empty() {
                provider.optional_url_params = vec!["display".to_string()];
            }
            provider.display.get_or_insert(DisplayMode::Popup);
            provider.oauth_type.get_or_insert(OAuthType::OAuth2);
            provider.popup_options.get_or_insert(PopupOptions {
                width: 452,
                height: 633,
            });
        }
        ProviderKind::Github => {
            if provider.required_url_params.is_empty() {
                provider.required_url_params = vec!["scope".to_string()];
            }
            provider.oauth_type.get_or_insert(OAuthType::OAuth2);
            provider.popup_options.get_or_insert(PopupOptions {
                width: 1020,
                height: 618,
            });
        }
        _ => {}
    }
    provider
}

/// An authorization request ready to be opened in a popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub provider: ProviderKind,
    pub url: Url,
    /// State sent with the request, to compare with the callback's
    pub state: Option<String>,
}

/// Build the authorization URL of a provider
///
/// Query parameters are `response_type=code`, `client_id` and
/// `redirect_uri`, then every required parameter, then every optional
/// parameter that has a value. A fresh state token is generated when the
/// provider lists `state` among its parameters.
pub fn authorization_url(
    kind: ProviderKind,
    provider: &ProviderConfig,
) -> Result<AuthorizationRequest> {
    let provider = with_library_defaults(kind, provider);
    let endpoint = provider
        .authorization_endpoint
        .as_deref()
        .ok_or_else(|| anyhow!("no authorization endpoint configured for {kind}"))?;
    if provider.client_id.is_none() {
        return Err(anyhow!("no client id configured for {kind}"));
    }
    let mut url = Url::parse(endpoint)
        .map_err(|e| anyhow!("Invalid authorization endpoint '{endpoint}': {e:?}"))?;

    let mut state = None;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("response_type", "code");
        for name in ["client_id", "redirect_uri"] {
            if let Some(value) = provider.url_param(name, SCOPE_DELIMITER) {
                query.append_pair(name, &value);
            }
        }
        for name in &provider.required_url_params {
            let value = provider
                .url_param(name, SCOPE_DELIMITER)
                .ok_or_else(|| anyhow!("missing required parameter '{name}' for {kind}"))?;
            query.append_pair(name, &value);
        }
        for name in &provider.optional_url_params {
            let value = if name == "state" {
                state = provider.generate_state();
                state.clone()
            } else {
                provider.url_param(name, SCOPE_DELIMITER)
            };
            if let Some(value) = value {
                query.append_pair(name, &value);
            }
        }
    }

    debug!(
        "authorization request for {kind} to {}",
        url.origin().ascii_serialization()
    );
    Ok(AuthorizationRequest {
        provider: kind,
        url,
        state,
    })
}
