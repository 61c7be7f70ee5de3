//! Top-level options of the authentication flow

use crate::app_config::AppConfig;
use crate::provider::{ProviderConfig, ProviderKind, ProviderMap};
use crate::providers::build_providers;
use crate::redirect::PageOrigin;
use serde::{Deserialize, Serialize};

/// Backend path registering a new local user
pub const REGISTER_URL: &str = "/auth/signup";
/// Backend path ending the session
pub const LOGOUT_URL: &str = "/auth/logout";

/// Where the issued token is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageType {
    #[serde(rename = "localStorage")]
    LocalStorage,
    #[serde(rename = "sessionStorage")]
    SessionStorage,
    #[serde(rename = "memoryStorage")]
    MemoryStorage,
}

/// Options handed to the OAuth flow together with the provider map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOptions {
    /// Field of the token exchange response holding the token (dot separated)
    pub token_path: String,
    pub token_name: String,
    pub token_prefix: String,
    pub register_url: Option<String>,
    pub logout_url: Option<String>,
    pub storage_type: StorageType,
    pub storage_namespace: String,
    pub providers: ProviderMap,
}

impl AuthOptions {
    /// Options with the standard token settings and backend paths
    pub fn new(providers: ProviderMap) -> Self {
        Self {
            token_path: "token".to_string(),
            token_name: "token".to_string(),
            token_prefix: String::new(),
            register_url: Some(REGISTER_URL.to_string()),
            logout_url: Some(LOGOUT_URL.to_string()),
            storage_type: StorageType::LocalStorage,
            storage_namespace: "auth".to_string(),
            providers,
        }
    }

    /// Build options and providers from the application config
    ///
    /// `default_base_path` is the build-time base URL, used when the config
    /// has no base path of its own.
    pub fn from_config(
        config: &AppConfig,
        origin: &PageOrigin,
        default_base_path: Option<&str>,
    ) -> Self {
        let config = config.clone().with_default_base_path(default_base_path);
        Self::new(build_providers(&config, origin))
    }

    pub fn provider(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        self.providers.get(&kind)
    }

    /// Key under which the token is stored
    ///
    /// ```
    /// use spa_auth::options::AuthOptions;
    ///
    /// let options = AuthOptions::new(Default::default());
    /// assert_eq!(options.storage_key(), "auth.token");
    /// ```
    pub fn storage_key(&self) -> String {
        let name = if self.token_prefix.is_empty() {
            self.token_name.clone()
        } else {
            format!("{}_{}", self.token_prefix, self.token_name)
        };
        if self.storage_namespace.is_empty() {
            name
        } else {
            format!("{}.{}", self.storage_namespace, name)
        }
    }
}
