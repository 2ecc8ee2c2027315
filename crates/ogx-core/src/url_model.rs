//! URL normalization.
//!
//! Turns free-form user input (`example.com`, ` https://x.org/a b `) into a
//! validated absolute URL that is used verbatim for the request and echoed in
//! the report.

use std::fmt;

use crate::error::OgxError;

/// Scheme prepended to input that has no `://` separator.
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// An absolute URL with a non-empty scheme and host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl(String);

impl TargetUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TargetUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes raw user input into a [`TargetUrl`].
///
/// Trims whitespace, prepends `https://` when no scheme separator is present,
/// and returns the parser's canonical serialization.
///
/// # Examples
///
/// - `normalize_url("example.com")` → `"https://example.com/"`
/// - `normalize_url("http://Example.COM/a b")` → `"http://example.com/a%20b"`
pub fn normalize_url(raw: &str) -> Result<TargetUrl, OgxError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(OgxError::InvalidInput("url cannot be empty".to_string()));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed)
    };

    let invalid = || OgxError::InvalidInput(format!("invalid URL {:?}", candidate));

    let parsed = url::Url::parse(&candidate).map_err(|_| invalid())?;
    if parsed.scheme().is_empty() || parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid());
    }

    Ok(TargetUrl(parsed.to_string()))
}
