//! Error types for the NCM client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use serde_json::Value;
use thiserror::Error;

/// The main error type for the NCM client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // API Errors
    // ============================================================================
    #[error("Authentication failed (HTTP {status}): {body}")]
    Auth { status: u16, body: Value },

    #[error("HTTP {status}: {body}")]
    Request { status: u16, body: Value },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("{resource} not found for {selector}")]
    NotFound { resource: String, selector: String },

    // ============================================================================
    // Caller Errors
    // ============================================================================
    #[error("Invalid parameters: {}", params.join(", "))]
    InvalidParameters { params: Vec<String> },

    #[error("Missing argument: {message}")]
    MissingArgument { message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(status: u16, body: Value) -> Self {
        Self::Auth { status, body }
    }

    /// Create a request error
    pub fn request(status: u16, body: Value) -> Self {
        Self::Request { status, body }
    }

    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, body: Value) -> Self {
        if matches!(status, 401 | 403) {
            Self::auth(status, body)
        } else {
            Self::request(status, body)
        }
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>, selector: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            selector: selector.into(),
        }
    }

    /// Create an invalid parameters error
    pub fn invalid_params<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InvalidParameters {
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a missing argument error
    pub fn missing_argument(message: impl Into<String>) -> Self {
        Self::MissingArgument {
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Auth { status, .. } | Error::Request { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the credential was rejected
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth { .. })
    }

    /// Server error payload, if the server sent one
    pub fn body(&self) -> Option<&Value> {
        match self {
            Error::Auth { body, .. } | Error::Request { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for the NCM client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("api_key");
        assert_eq!(err.to_string(), "Missing required config field: api_key");

        let err = Error::request(404, json!("Not found"));
        assert_eq!(err.to_string(), "HTTP 404: \"Not found\"");

        let err = Error::invalid_params(["colour", "size"]);
        assert_eq!(err.to_string(), "Invalid parameters: colour, size");

        let err = Error::not_found("Users", "email=a@b.c");
        assert_eq!(err.to_string(), "Users not found for email=a@b.c");
    }

    #[test_case(401, true ; "unauthorized")]
    #[test_case(403, true ; "forbidden")]
    #[test_case(400, false ; "bad request")]
    #[test_case(404, false ; "not found")]
    #[test_case(429, false ; "rate limited")]
    #[test_case(503, false ; "unavailable")]
    fn test_from_status_classification(status: u16, auth: bool) {
        let err = Error::from_status(status, json!({"errors": []}));
        assert_eq!(err.is_auth(), auth);
        assert_eq!(err.status(), Some(status));
    }

    #[test]
    fn test_body_attached() {
        let payload = json!({"errors": [{"detail": "bad filter"}]});
        let err = Error::from_status(400, payload.clone());
        assert_eq!(err.body(), Some(&payload));
        assert!(Error::malformed("no data").body().is_none());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
