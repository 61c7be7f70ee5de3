//! Redirect URI resolution from the page origin

use anyhow::{Result, anyhow};
use std::fmt;
use url::Url;

/// Origin of the page hosting the application (scheme, host and port)
///
/// Serialized the same way a browser serializes `location.origin`: default
/// ports are omitted and there is never a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageOrigin(String);

impl PageOrigin {
    /// Build the origin of any URL of the page (path and query are ignored)
    ///
    /// ```
    /// use spa_auth::redirect::PageOrigin;
    ///
    /// let origin = PageOrigin::parse("https://app.example.com:443/alerts?x=1").unwrap();
    /// assert_eq!(origin.as_str(), "https://app.example.com");
    /// ```
    pub fn parse(page_url: &str) -> Result<Self> {
        let url =
            Url::parse(page_url).map_err(|e| anyhow!("Invalid page URL '{page_url}': {e:?}"))?;
        Ok(Self::from_url(&url))
    }

    /// Origin of an already parsed URL; opaque origins serialize as `"null"`
    pub fn from_url(url: &Url) -> Self {
        Self(url.origin().ascii_serialization())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve a redirect URI as `origin + path`
///
/// An absent or empty path yields the bare origin. The path is appended as
/// is: no validation, no encoding.
///
/// ```
/// use spa_auth::redirect::{PageOrigin, redirect_uri};
///
/// let origin = PageOrigin::parse("https://app.example.com").unwrap();
/// assert_eq!(redirect_uri(&origin, None), "https://app.example.com");
/// assert_eq!(redirect_uri(&origin, Some("/alerta")), "https://app.example.com/alerta");
/// ```
pub fn redirect_uri(origin: &PageOrigin, path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => format!("{origin}{path}"),
        _ => origin.to_string(),
    }
}
