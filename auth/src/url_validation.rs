//! URL validation utilities for redirect URIs
//!
//! The provider builder appends the base path to the page origin without
//! looking at it. These checks let tooling report base paths that would turn
//! the redirect URI into something other than a same-origin URL.

use url::Url;

/// Validate that a base path keeps redirect URIs on the page origin
///
/// An empty path is valid (the redirect URI is the bare origin). Otherwise
/// the path, once percent-decoded, must start with exactly one `/`, carry no
/// protocol marker and no backslash, and parse as a relative URL.
///
/// # Examples
///
/// ```
/// use spa_auth::url_validation::validate_base_path;
///
/// assert!(validate_base_path(""));
/// assert!(validate_base_path("/"));
/// assert!(validate_base_path("/alerta/"));
///
/// assert!(!validate_base_path("alerta"));
/// assert!(!validate_base_path("//evil.com"));
/// assert!(!validate_base_path("/%2F/evil.com"));
/// assert!(!validate_base_path("/\\evil.com"));
/// ```
pub fn validate_base_path(path: &str) -> bool {
    if path.is_empty() {
        return true;
    }

    // Decode first so that encoded slashes cannot sneak past the checks below
    let decoded = match percent_encoding::percent_decode_str(path).decode_utf8() {
        Ok(s) => s.to_string(),
        Err(_) => return false,
    };

    if !decoded.starts_with('/') || decoded.starts_with("//") {
        return false;
    }

    if decoded.contains("://") {
        return false;
    }

    // Some browsers normalize backslashes to forward slashes
    if decoded.contains('\\') {
        return false;
    }

    let Ok(base) = Url::parse("http://localhost") else {
        return false;
    };
    Url::options().base_url(Some(&base)).parse(&decoded).is_ok()
}

/// Validate that a configured endpoint is an absolute http(s) URL
pub fn validate_endpoint(endpoint: &str) -> bool {
    match Url::parse(endpoint) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}
