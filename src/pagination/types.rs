//! Pagination types
//!
//! Parsing of a response body into a [`Page`] and the state tracked while
//! walking pages.

use crate::error::{Error, Result};
use crate::record::Record;
use crate::types::JsonValue;

/// Places a collection's record count may live under `meta`
const TOTAL_PATHS: [&str; 3] = ["total", "page.total", "count"];

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available at this URL
    Continue {
        /// Next page URL, as sent by the server
        url: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a new URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::Continue { url: url.into() }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// One response worth of records
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// Records in server order
    pub records: Vec<Record>,
    /// `links.next`, if the server sent one
    pub next: Option<String>,
    /// Total record count from `meta`, if the server sent one
    pub total: Option<u64>,
}

impl Page {
    /// Parse a decoded response body
    ///
    /// `data` may be an array (collection), an object (single resource) or
    /// null (empty). Anything else, or a missing `data`, is malformed.
    pub fn from_body(body: JsonValue) -> Result<Self> {
        let mut map = match body {
            JsonValue::Object(map) => map,
            other => {
                return Err(Error::malformed(format!(
                    "expected a JSON object, got {}",
                    kind_of(&other)
                )))
            }
        };

        let data = map
            .remove("data")
            .ok_or_else(|| Error::malformed("response has no 'data' member"))?;

        let records = match data {
            JsonValue::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| parse_record(item, index))
                .collect::<Result<Vec<_>>>()?,
            JsonValue::Object(_) => vec![parse_record(data, 0)?],
            JsonValue::Null => Vec::new(),
            other => {
                return Err(Error::malformed(format!(
                    "'data' must be an array or object, got {}",
                    kind_of(&other)
                )))
            }
        };

        let next = map
            .get("links")
            .and_then(|links| links.get("next"))
            .and_then(JsonValue::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        let total = map.get("meta").and_then(|meta| {
            TOTAL_PATHS
                .iter()
                .find_map(|path| extract_path(meta, path).and_then(JsonValue::as_u64))
        });

        Ok(Self {
            records,
            next,
            total,
        })
    }

    /// Where to go after this page
    pub fn next_page(&self) -> NextPage {
        match &self.next {
            Some(url) => NextPage::with_url(url.clone()),
            None => NextPage::Done,
        }
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the page has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages: u32,
    /// Records received so far, before any truncation
    pub total_fetched: u64,
    /// Total the server last reported
    pub reported_total: Option<u64>,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a received page
    pub fn record_page(&mut self, page: &Page) {
        self.pages += 1;
        self.total_fetched += page.len() as u64;
        if page.total.is_some() {
            self.reported_total = page.total;
        }
    }
}

fn parse_record(item: JsonValue, index: usize) -> Result<Record> {
    if !item.is_object() {
        return Err(Error::malformed(format!(
            "record {index} is {}, expected an object",
            kind_of(&item)
        )));
    }
    serde_json::from_value(item).map_err(|e| Error::malformed(format!("record {index}: {e}")))
}

/// Walk a dotted path through nested objects
fn extract_path<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    path.split('.')
        .try_fold(value, |current, part| current.as_object()?.get(part))
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
