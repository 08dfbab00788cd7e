//! Common types used throughout the NCM client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Request Limit
// ============================================================================

/// How many records a list call should return
///
/// `Page` and `All` are different on purpose: `Page` is a single raw page,
/// `All` follows next-page links until the server runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Limit {
    /// One request, one page, no flattening
    #[default]
    Page,
    /// Every record the server will yield
    All,
    /// At most this many records
    AtMost(usize),
}

impl Limit {
    /// Collapse `AtMost(0)` into `All`
    pub fn normalized(self) -> Self {
        match self {
            Limit::AtMost(0) => Limit::All,
            other => other,
        }
    }

    /// Upper bound on the number of records, if any
    pub fn cap(self) -> Option<usize> {
        match self.normalized() {
            Limit::AtMost(n) => Some(n),
            _ => None,
        }
    }

    /// Page size to request first
    pub fn first_page_size(self, max_page_size: u32, default_page_size: Option<u32>) -> Option<u32> {
        match self.normalized() {
            Limit::Page => default_page_size,
            Limit::All => Some(max_page_size),
            Limit::AtMost(n) => Some(clamp_page_size(n, max_page_size)),
        }
    }
}

impl From<usize> for Limit {
    fn from(limit: usize) -> Self {
        if limit == 0 {
            Limit::All
        } else {
            Limit::AtMost(limit)
        }
    }
}

impl From<Option<usize>> for Limit {
    fn from(limit: Option<usize>) -> Self {
        limit.map_or(Limit::Page, Limit::from)
    }
}

/// `min(wanted, max)` as a page size
pub(crate) fn clamp_page_size(wanted: usize, max_page_size: u32) -> u32 {
    u32::try_from(wanted).map_or(max_page_size, |w| w.min(max_page_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_limit_from_integer() {
        assert_eq!(Limit::from(0_usize), Limit::All);
        assert_eq!(Limit::from(120_usize), Limit::AtMost(120));
        assert_eq!(Limit::from(None::<usize>), Limit::Page);
        assert_eq!(Limit::from(Some(0_usize)), Limit::All);
        assert_eq!(Limit::default(), Limit::Page);
    }

    #[test]
    fn test_limit_cap() {
        assert_eq!(Limit::Page.cap(), None);
        assert_eq!(Limit::All.cap(), None);
        assert_eq!(Limit::AtMost(0).cap(), None);
        assert_eq!(Limit::AtMost(7).cap(), Some(7));
    }

    #[test_case(Limit::Page, None, None ; "page without default")]
    #[test_case(Limit::Page, Some(20), Some(20) ; "page with default")]
    #[test_case(Limit::All, None, Some(50) ; "all uses server max")]
    #[test_case(Limit::AtMost(120), None, Some(50) ; "large limit clamps")]
    #[test_case(Limit::AtMost(10), None, Some(10) ; "small limit")]
    #[test_case(Limit::AtMost(0), None, Some(50) ; "zero means all")]
    fn test_first_page_size(limit: Limit, default: Option<u32>, expected: Option<u32>) {
        assert_eq!(limit.first_page_size(50, default), expected);
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(Method::PUT), reqwest::Method::PUT);
        assert_eq!(Method::DELETE.to_string(), "DELETE");
    }
}
