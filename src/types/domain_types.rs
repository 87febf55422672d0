// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Integration token accepted by the Notion API.
///
/// Internal integrations issue `secret_` tokens, newer ones `ntn_`. The token
/// never appears in full in `Display` or `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    const PREFIXES: [&'static str; 2] = ["secret_", "ntn_"];
    const MIN_LENGTH: usize = 20;

    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into().trim().to_string();

        let reason = if key.is_empty() {
            Some("API key cannot be empty".to_string())
        } else if !Self::PREFIXES.iter().any(|prefix| key.starts_with(prefix)) {
            Some(format!(
                "API key must start with one of {}",
                Self::PREFIXES.join(", ")
            ))
        } else if key.len() < Self::MIN_LENGTH {
            Some(format!(
                "API key is too short ({} characters, need at least {})",
                key.len(),
                Self::MIN_LENGTH
            ))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ValidationError::InvalidApiKey { reason }),
            None => Ok(Self(key)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(10).collect();
        write!(f, "{}...", visible)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

/// Base URL the API paths are joined onto. Only `http` and `https` are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(Url);

impl ValidatedUrl {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(input).map_err(|e| invalid(&e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            _ => return Err(invalid("Only HTTP and HTTPS URLs are supported")),
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("A base URL cannot carry a query or fragment"));
        }
        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Joins an absolute API path (`/v1/...`) onto this base.
    ///
    /// Any path the base URL carries is kept, so a proxy mounted at
    /// `https://proxy.local/notion` resolves `/v1/users` to
    /// `https://proxy.local/notion/v1/users`.
    pub fn join_path(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// The name of a property on a Notion page or database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyName(String);

impl PropertyName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::borrow::Borrow<str> for PropertyName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for PropertyName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PropertyName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
