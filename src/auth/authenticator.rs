//! Authenticator implementation
//!
//! Handles applying the bearer token to requests.

use crate::error::{Error, Result};
use reqwest::RequestBuilder;

/// A validated, non-empty API key
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate and wrap a key
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        if trimmed.starts_with("Bearer ") {
            return Err(Error::invalid_value(
                "api_key",
                "remove the 'Bearer ' prefix; the client adds it",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The raw token
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    api_key: ApiKey,
}

impl Authenticator {
    /// Create a new authenticator for the given key
    pub fn new(api_key: ApiKey) -> Self {
        Self { api_key }
    }

    /// Create an authenticator from a raw key string
    pub fn from_key(key: impl Into<String>) -> Result<Self> {
        Ok(Self::new(ApiKey::new(key)?))
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(self.api_key.expose())
    }

    /// Value of the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.api_key.expose())
    }
}
