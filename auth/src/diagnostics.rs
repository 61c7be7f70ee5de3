//! Advisory checks over an application config
//!
//! The provider builder accepts any config. These checks surface the
//! problems that would otherwise only show up when a user tries to log in.

use crate::app_config::AppConfig;
use crate::provider::ProviderKind;
use crate::providers::{authorization_endpoint, resolve_client_id};
use crate::url_validation::{validate_base_path, validate_endpoint};
use thiserror::Error;

/// A problem found in an application config
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("base path '{0}' does not keep redirect URIs on the page origin")]
    InvalidBasePath(String),
    #[error("active provider '{0}' is not a supported provider")]
    UnknownProvider(String),
    #[error("no client id configured for active provider {0}")]
    MissingClientId(ProviderKind),
    #[error("authorization endpoint for active provider {0} cannot be built from the config")]
    MissingEndpoint(ProviderKind),
    #[error("authorization endpoint '{1}' for {0} is not an absolute http(s) URL")]
    InvalidEndpoint(ProviderKind, String),
}

/// List the issues of `config`; an empty list means nothing was found
pub fn check_config(config: &AppConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    if let Some(base_path) = &config.base_path {
        if !validate_base_path(base_path) {
            issues.push(ConfigIssue::InvalidBasePath(base_path.clone()));
        }
    }

    let Some(active) = config.provider.as_deref() else {
        return issues;
    };
    let kind = match active.parse::<ProviderKind>() {
        Ok(kind) => kind,
        Err(_) => {
            issues.push(ConfigIssue::UnknownProvider(active.to_string()));
            return issues;
        }
    };

    if resolve_client_id(config, kind).is_none_or(|id| id.is_empty()) {
        issues.push(ConfigIssue::MissingClientId(kind));
    }

    // Google relies on the OAuth library's endpoint
    if kind != ProviderKind::Google {
        match authorization_endpoint(config, kind) {
            None => issues.push(ConfigIssue::MissingEndpoint(kind)),
            Some(endpoint) if !validate_endpoint(&endpoint) => {
                issues.push(ConfigIssue::InvalidEndpoint(kind, endpoint))
            }
            Some(_) => {}
        }
    }

    issues
}
