//! Transport abstraction
//!
//! A transport sends one request and hands back the status and the decoded
//! body. It does not judge the status; [`ApiResponse::into_result`] does.

use crate::error::{Error, Result};
use crate::types::{JsonValue, Method, StringMap};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

/// One outgoing API request
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL, or a path relative to the transport's base URL
    pub url: String,
    /// Request headers
    pub headers: StringMap,
    /// Query parameters
    pub query: BTreeMap<String, String>,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    /// Create a request
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a POST request with a JSON body
    pub fn post(url: impl Into<String>, body: JsonValue) -> Self {
        Self::new(Method::POST, url).json(body)
    }

    /// Create a PUT request with a JSON body
    pub fn put(url: impl Into<String>, body: JsonValue) -> Self {
        Self::new(Method::PUT, url).json(body)
    }

    /// Create a DELETE request
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add several query parameters
    #[must_use]
    pub fn queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Status and decoded body of a response
///
/// Empty bodies decode to `null`; bodies that are not JSON are kept as a
/// JSON string so error payloads survive.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded body
    pub body: JsonValue,
}

impl ApiResponse {
    /// Create a response
    pub fn new(status: u16, body: JsonValue) -> Self {
        Self { status, body }
    }

    /// Decode a raw body
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.to_string()))
        };
        Self { status, body }
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body on success, the classified error otherwise
    pub fn into_result(self) -> Result<JsonValue> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(Error::from_status(self.status, self.body))
        }
    }
}

/// Sends requests on behalf of the client
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}
