//! Builds the provider configuration map from the application config
//!
//! Every provider is always present in the map. Missing configuration never
//! fails the build: unset client ids and endpoints stay `None` and are
//! rejected later by whoever starts the authorization flow.

use crate::app_config::AppConfig;
use crate::provider::{
    DisplayMode, OAuthType, PopupOptions, ProviderConfig, ProviderKind, ProviderMap, Scope,
};
use crate::redirect::{PageOrigin, redirect_uri};
use crate::state_token::StateGenerator;
use tracing::debug;

/// Scope requested from OIDC providers
pub const OIDC_SCOPE: &str = "openid+profile+email";

/// Popup size used by the popup-flow providers
pub const DEFAULT_POPUP: PopupOptions = PopupOptions {
    width: 1020,
    height: 618,
};

/// PingFederate IdP adapter selected for authentication
pub const PINGFEDERATE_ADAPTER_ID: &str = "kerberos";

/// Resolve the client id of `kind`
///
/// The shared `client_id` applies to the active provider only; every other
/// provider uses its own `<provider>_client_id`.
pub fn resolve_client_id(config: &AppConfig, kind: ProviderKind) -> Option<String> {
    if config.provider.as_deref() == Some(kind.key()) {
        return config.client_id.clone();
    }
    let specific = match kind {
        ProviderKind::Azure => &config.azure_client_id,
        ProviderKind::Cognito => &config.cognito_client_id,
        ProviderKind::Github => &config.github_client_id,
        ProviderKind::Gitlab => &config.gitlab_client_id,
        ProviderKind::Google => &config.google_client_id,
        ProviderKind::Keycloak => &config.keycloak_client_id,
        ProviderKind::Openid => &config.openid_client_id,
        ProviderKind::Pingfederate => &config.pingfederate_client_id,
    };
    specific.clone()
}

/// Authorization endpoint of `kind`, if every field its template needs is set
pub fn authorization_endpoint(config: &AppConfig, kind: ProviderKind) -> Option<String> {
    match kind {
        ProviderKind::Azure => config.azure_tenant.as_ref().map(|tenant| {
            format!("https://login.microsoftonline.com/{tenant}/oauth2/v2.0/authorize")
        }),
        ProviderKind::Cognito => {
            let domain = config.cognito_domain.as_ref()?;
            let region = config.aws_region.as_ref()?;
            Some(format!("https://{domain}.auth.{region}.amazoncognito.com/login"))
        }
        ProviderKind::Github => config
            .github_url
            .as_ref()
            .map(|base| format!("{base}/login/oauth/authorize")),
        ProviderKind::Gitlab => config
            .gitlab_url
            .as_ref()
            .map(|base| format!("{base}/oauth/authorize")),
        ProviderKind::Google => None,
        ProviderKind::Keycloak => {
            let base = config.keycloak_url.as_ref()?;
            let realm = config.keycloak_realm.as_ref()?;
            Some(format!("{base}/auth/realms/{realm}/protocol/openid-connect/auth"))
        }
        ProviderKind::Openid => config.oidc_auth_url.clone(),
        ProviderKind::Pingfederate => config.pingfederate_url.clone(),
    }
}

/// Adds the popup-flow parameters shared by the OIDC-style providers
fn with_popup_flow(mut provider: ProviderConfig, scope: Scope) -> ProviderConfig {
    provider.required_url_params = vec!["scope".to_string()];
    provider.optional_url_params = vec!["display".to_string(), "state".to_string()];
    provider.scope = Some(scope);
    provider.display = Some(DisplayMode::Popup);
    provider.oauth_type = Some(OAuthType::OAuth2);
    provider.popup_options = Some(DEFAULT_POPUP);
    provider.state = Some(StateGenerator);
    provider
}

/// Build the configuration of a single provider
pub fn build_provider(
    config: &AppConfig,
    origin: &PageOrigin,
    kind: ProviderKind,
) -> ProviderConfig {
    let base_path = config.base_path.as_deref();
    let redirect = match kind {
        ProviderKind::Pingfederate => redirect_uri(
            origin,
            Some(base_path.filter(|p| !p.is_empty()).unwrap_or("/")),
        ),
        _ => redirect_uri(origin, base_path),
    };

    let mut provider = ProviderConfig::new(kind, resolve_client_id(config, kind), redirect);
    provider.authorization_endpoint = authorization_endpoint(config, kind);

    match kind {
        ProviderKind::Azure
        | ProviderKind::Cognito
        | ProviderKind::Keycloak
        | ProviderKind::Openid => with_popup_flow(provider, Scope::joined(OIDC_SCOPE)),
        ProviderKind::Gitlab => with_popup_flow(provider, Scope::list(&["openid"])),
        ProviderKind::Github => {
            provider.scope = Some(Scope::list(&["user:email", "read:org"]));
            provider
        }
        ProviderKind::Google => provider,
        ProviderKind::Pingfederate => {
            provider.required_url_params = vec!["pfidpadapterid".to_string(), "scope".to_string()];
            provider.scope = Some(Scope::joined(OIDC_SCOPE));
            provider.oauth_type = Some(OAuthType::OAuth2);
            provider.extra_params.insert(
                "pfidpadapterid".to_string(),
                PINGFEDERATE_ADAPTER_ID.to_string(),
            );
            provider
        }
    }
}

/// Build the configuration map for all providers
///
/// ```
/// use spa_auth::app_config::AppConfig;
/// use spa_auth::provider::ProviderKind;
/// use spa_auth::providers::build_providers;
/// use spa_auth::redirect::PageOrigin;
///
/// let config = AppConfig {
///     provider: Some("github".to_string()),
///     client_id: Some("abc".to_string()),
///     github_url: Some("https://github.com".to_string()),
///     ..Default::default()
/// };
/// let origin = PageOrigin::parse("https://app.example.com").unwrap();
/// let providers = build_providers(&config, &origin);
///
/// let github = &providers[&ProviderKind::Github];
/// assert_eq!(github.client_id.as_deref(), Some("abc"));
/// assert_eq!(
///     github.authorization_endpoint.as_deref(),
///     Some("https://github.com/login/oauth/authorize")
/// );
/// ```
pub fn build_providers(config: &AppConfig, origin: &PageOrigin) -> ProviderMap {
    let providers: ProviderMap = ProviderKind::ALL
        .into_iter()
        .map(|kind| (kind, build_provider(config, origin, kind)))
        .collect();
    debug!(
        "built {} provider configurations (active provider: {})",
        providers.len(),
        config.provider.as_deref().unwrap_or("none")
    );
    providers
}
