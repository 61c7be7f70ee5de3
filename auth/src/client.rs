//! Popup-flow client talking to the application backend
//!
//! The HTTP client, the options and the token storage are all injected, so
//! several clients can coexist and tests can point one at a mock backend.

use crate::authorize::{AuthorizationRequest, authorization_url};
use crate::options::AuthOptions;
use crate::provider::ProviderKind;
use crate::storage::TokenStorage;
use anyhow::{Context, Result, anyhow, bail};
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Query parameters the provider appends to the redirect URI
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackParams {
    pub code: String,
    pub state: Option<String>,
}

impl CallbackParams {
    /// Extract `code` and `state` from the URL the popup was redirected to
    pub fn from_redirect_url(url: &Url) -> Result<Self> {
        let mut code = None;
        let mut state = None;
        let mut error = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                _ => {}
            }
        }
        if let Some(error) = error {
            bail!("authorization failed: {error}");
        }
        let code = code.ok_or_else(|| anyhow!("redirect URL has no authorization code"))?;
        Ok(Self { code, state })
    }
}

/// Body posted to the provider's backend callback path
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CodeExchangePayload<'a> {
    code: &'a str,
    client_id: Option<&'a str>,
    redirect_uri: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
}

/// Client driving the authorization flow against the application backend
pub struct AuthClient {
    http: reqwest::Client,
    api_base: Url,
    options: AuthOptions,
    storage: Arc<dyn TokenStorage>,
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("api_base", &self.api_base.as_str())
            .field("providers", &self.options.providers.keys())
            .field("token", &"(not printed)")
            .finish()
    }
}

impl AuthClient {
    /// Create a client; backend paths are resolved below `api_base`
    pub fn new(
        http: reqwest::Client,
        mut api_base: Url,
        options: AuthOptions,
        storage: Arc<dyn TokenStorage>,
    ) -> Self {
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }
        Self {
            http,
            api_base,
            options,
            storage,
        }
    }

    pub fn options(&self) -> &AuthOptions {
        &self.options
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_base
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("joining {path} to {}", self.api_base))
    }

    /// Build the authorization request to open for `kind`
    pub fn authorize(&self, kind: ProviderKind) -> Result<AuthorizationRequest> {
        let provider = self
            .options
            .provider(kind)
            .ok_or_else(|| anyhow!("provider {kind} is not configured"))?;
        authorization_url(kind, provider)
    }

    /// Exchange the authorization code with the backend and store the token
    ///
    /// The callback state must match the state sent with `request`.
    pub async fn exchange_code(
        &self,
        request: &AuthorizationRequest,
        callback: &CallbackParams,
    ) -> Result<String> {
        if request.state.is_some() && callback.state != request.state {
            warn!("state mismatch on {} callback", request.provider);
            bail!("OAuth state mismatch for {}", request.provider);
        }
        let provider = self
            .options
            .provider(request.provider)
            .ok_or_else(|| anyhow!("provider {} is not configured", request.provider))?;

        let payload = CodeExchangePayload {
            code: &callback.code,
            client_id: provider.client_id.as_deref(),
            redirect_uri: &provider.redirect_uri,
            state: callback.state.as_deref(),
        };
        let url = self.endpoint(&provider.url)?;
        debug!("exchanging authorization code at {url}");
        let response: serde_json::Value = self
            .http
            .post(url.clone())
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("posting authorization code to {url}"))?
            .error_for_status()
            .map_err(|e| anyhow!("token exchange rejected: {e:?}"))?
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse token exchange response: {e:?}"))?;

        let token = self
            .token_from_response(&response)
            .ok_or_else(|| anyhow!("no token at '{}' in response", self.options.token_path))?;
        self.set_token(&token);
        info!("authenticated with {}", request.provider);
        Ok(token)
    }

    /// Register a local user; stores the token if the backend returns one
    pub async fn register(&self, user: &serde_json::Value) -> Result<Option<String>> {
        let path = self
            .options
            .register_url
            .as_deref()
            .ok_or_else(|| anyhow!("no register URL configured"))?;
        let url = self.endpoint(path)?;
        let response: serde_json::Value = self
            .http
            .post(url.clone())
            .json(user)
            .send()
            .await
            .with_context(|| format!("posting registration to {url}"))?
            .error_for_status()
            .map_err(|e| anyhow!("registration rejected: {e:?}"))?
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse registration response: {e:?}"))?;

        let token = self.token_from_response(&response);
        if let Some(token) = &token {
            self.set_token(token);
        }
        Ok(token)
    }

    /// Notify the backend (when a logout URL is set) and drop the token
    ///
    /// The token is removed even if the backend call fails.
    pub async fn logout(&self) -> Result<()> {
        let result = match self.options.logout_url.as_deref() {
            Some(path) => match self.endpoint(path) {
                Ok(url) => self
                    .http
                    .post(url.clone())
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map(|_| ())
                    .map_err(|e| anyhow!("logout request to {url} failed: {e:?}")),
                Err(e) => Err(e),
            },
            None => Ok(()),
        };
        self.storage.remove(&self.options.storage_key());
        result
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(&self.options.storage_key())
    }

    pub fn set_token(&self, token: &str) {
        self.storage.set(&self.options.storage_key(), token);
    }

    /// True when a token is stored and, if it is a JWT with `exp`, unexpired
    pub fn is_authenticated(&self) -> bool {
        match self.token() {
            Some(token) => !is_expired_jwt(&token),
            None => false,
        }
    }

    fn token_from_response(&self, response: &serde_json::Value) -> Option<String> {
        let mut current = response;
        for part in self.options.token_path.split('.') {
            current = current.get(part)?;
        }
        current.as_str().map(str::to_string)
    }
}

/// True only for a decodable JWT whose `exp` claim is in the past
///
/// Tokens that are not JWTs, or whose payload cannot be read, are treated as
/// valid: the backend remains the authority on them.
pub fn is_expired_jwt(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return false;
    }
    let Ok(payload) = base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(parts[1]) else {
        return false;
    };
    let Ok(claims) = serde_json::from_slice::<serde_json::Value>(&payload) else {
        return false;
    };
    match claims.get("exp").and_then(|exp| exp.as_f64()) {
        Some(exp) => exp <= Utc::now().timestamp() as f64,
        None => false,
    }
}
