//! OAuth2/OIDC provider configuration for single-page applications
//!
//! This crate maps the application config served to the SPA onto the
//! per-provider settings of a popup-based OAuth flow. Eight identity
//! providers are supported:
//!
//! - **Azure AD**, **Amazon Cognito**, **Keycloak**, generic **OpenID** and
//!   **GitLab**: authorization code in a popup, with a CSRF `state` token
//! - **GitHub** and **Google**: settings mostly left to OAuth library defaults
//! - **PingFederate**: Kerberos IdP adapter, no popup options
//!
//! # Example: building the provider map
//!
//! ```rust
//! use spa_auth::app_config::AppConfig;
//! use spa_auth::provider::ProviderKind;
//! use spa_auth::providers::build_providers;
//! use spa_auth::redirect::PageOrigin;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = AppConfig::from_json(
//!     r#"{
//!         "provider": "google",
//!         "keycloak_client_id": "kc1",
//!         "keycloak_url": "https://kc.example.com",
//!         "keycloak_realm": "demo"
//!     }"#,
//! )?;
//! let origin = PageOrigin::parse("https://app.example.com")?;
//! let providers = build_providers(&config, &origin);
//!
//! let keycloak = &providers[&ProviderKind::Keycloak];
//! assert_eq!(keycloak.client_id.as_deref(), Some("kc1"));
//! assert_eq!(
//!     keycloak.authorization_endpoint.as_deref(),
//!     Some("https://kc.example.com/auth/realms/demo/protocol/openid-connect/auth")
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Example: driving the flow
//!
//! ```rust,no_run
//! use spa_auth::app_config::AppConfig;
//! use spa_auth::client::{AuthClient, CallbackParams};
//! use spa_auth::options::AuthOptions;
//! use spa_auth::provider::ProviderKind;
//! use spa_auth::redirect::PageOrigin;
//! use spa_auth::storage::MemoryStorage;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::from_env()?;
//! let origin = PageOrigin::parse("https://app.example.com")?;
//! let options = AuthOptions::from_config(&config, &origin, None);
//! let client = AuthClient::new(
//!     reqwest::Client::new(),
//!     "https://api.example.com/".parse()?,
//!     options,
//!     Arc::new(MemoryStorage::new()),
//! );
//!
//! let request = client.authorize(ProviderKind::Keycloak)?;
//! println!("open {}", request.url);
//!
//! // ...the popup lands back on the redirect URI...
//! let landed = format!(
//!     "https://app.example.com/?code=abc&state={}",
//!     request.state.as_deref().unwrap_or_default()
//! );
//! let callback = CallbackParams::from_redirect_url(&landed.parse()?)?;
//! client.exchange_code(&request, &callback).await?;
//! assert!(client.is_authenticated());
//! # Ok(())
//! # }
//! ```

/// Application configuration input
pub mod app_config;

/// Provider identifiers and configuration record
pub mod provider;

/// Provider map construction
pub mod providers;

/// Redirect URI resolution
pub mod redirect;

/// CSRF state tokens
pub mod state_token;

/// Top-level flow options
pub mod options;

/// Authorization URL construction
pub mod authorize;

/// Backend client for code exchange, signup and logout
pub mod client;

/// Token storage
pub mod storage;

/// URL validation utilities for redirect URIs
pub mod url_validation;

/// Config diagnostics
pub mod diagnostics;
