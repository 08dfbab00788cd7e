//! HTTP module
//!
//! The pagination and client layers talk to the network only through the
//! [`Transport`] trait. [`HttpClient`] is the reqwest-backed implementation.
//!
//! # Features
//!
//! - **Bearer Authentication**: Every request carries the account's API key
//! - **JSON:API Headers**: `Accept`/`Content-Type: application/vnd.api+json`
//! - **Status Classification**: 401/403 become auth errors, other non-2xx
//!   statuses become request errors with the server payload attached

mod client;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, JSON_API_MEDIA_TYPE};
pub use transport::{ApiRequest, ApiResponse, Transport};

#[cfg(test)]
mod tests;
