//! Paginated fetcher
//!
//! Flattens a paged collection into one ordered sequence of records.

use super::types::{NextPage, Page, PaginationState};
use crate::config::{ClientConfig, MAX_PAGE_SIZE};
use crate::error::{Error, Result};
use crate::http::{ApiRequest, Transport};
use crate::query::QueryParams;
use crate::record::Record;
use crate::types::{clamp_page_size, Limit};
use tracing::debug;
use url::Url;

/// Query parameter carrying the requested page size
pub const PAGE_SIZE_PARAM: &str = "page[size]";

/// Page size limits for a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    /// Largest page the server will serve
    pub max_page_size: u32,
    /// Page size for single-page fetches; server default when `None`
    pub default_page_size: Option<u32>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            max_page_size: MAX_PAGE_SIZE,
            default_page_size: None,
        }
    }
}

impl From<&ClientConfig> for PageSettings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            max_page_size: config.max_page_size,
            default_page_size: config.default_page_size,
        }
    }
}

/// Fetches pages through a [`Transport`] and assembles them
#[derive(Clone, Copy)]
pub struct PaginatedFetcher<'a> {
    transport: &'a dyn Transport,
    settings: PageSettings,
}

impl<'a> PaginatedFetcher<'a> {
    /// Create a fetcher over a transport
    pub fn new(transport: &'a dyn Transport, settings: PageSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Page size limits in use
    pub fn settings(&self) -> PageSettings {
        self.settings
    }

    /// Fetch up to `limit` records from `endpoint`
    ///
    /// `endpoint` must be an absolute URL: relative next-page links are
    /// resolved against the URL they came from. `query` is sent with the
    /// first request only; next-page links already carry it. With a positive
    /// limit the last request asks only for the records still missing.
    pub async fn fetch(
        &self,
        endpoint: &str,
        query: &QueryParams,
        limit: Limit,
    ) -> Result<Vec<Record>> {
        Url::parse(endpoint).map_err(|e| {
            Error::Other(format!("paginated fetch needs an absolute URL, got '{endpoint}': {e}"))
        })?;
        let limit = limit.normalized();
        let max_page_size = self.settings.max_page_size;

        let mut request = ApiRequest::get(endpoint).queries(query.iter());
        if let Some(size) = limit.first_page_size(max_page_size, self.settings.default_page_size) {
            request = request.query(PAGE_SIZE_PARAM, size.to_string());
        }

        let mut current_url = endpoint.to_string();
        let mut state = PaginationState::new();
        let mut records = Vec::new();

        loop {
            let page = self.fetch_page(request).await?;
            state.record_page(&page);
            debug!(
                "Fetched page {} from {}: {} records ({} so far)",
                state.pages,
                current_url,
                page.len(),
                state.total_fetched
            );

            let next = page.next_page();
            records.extend(page.records);

            if limit == Limit::Page {
                break;
            }

            if let Some(cap) = limit.cap() {
                if records.len() >= cap {
                    records.truncate(cap);
                    break;
                }
            }

            let NextPage::Continue { url } = next else {
                break;
            };

            let mut next_url = resolve_next(&current_url, &url)?;
            if let Some(cap) = limit.cap() {
                let remaining = cap - records.len();
                next_url = with_page_size(&next_url, clamp_page_size(remaining, max_page_size))?;
            }

            request = ApiRequest::get(next_url.clone());
            current_url = next_url;
        }

        debug!(
            "Pagination of {} finished after {} pages with {} records (server total {:?})",
            endpoint,
            state.pages,
            records.len(),
            state.reported_total
        );
        Ok(records)
    }

    /// Send one request and parse its page
    pub async fn fetch_page(&self, request: ApiRequest) -> Result<Page> {
        let body = self.transport.send(request).await?.into_result()?;
        Page::from_body(body)
    }
}

impl std::fmt::Debug for PaginatedFetcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedFetcher")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Resolve a next-page link against the URL it came from
pub(crate) fn resolve_next(current: &str, next: &str) -> Result<String> {
    match Url::parse(next) {
        Ok(url) => Ok(url.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Url::parse(current)?.join(next)?.into()),
        Err(e) => Err(e.into()),
    }
}

/// Replace `page[size]` in a URL's query string
pub(crate) fn with_page_size(url: &str, size: u32) -> Result<String> {
    let mut parsed = Url::parse(url)?;
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| key != PAGE_SIZE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    parsed
        .query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(PAGE_SIZE_PARAM, &size.to_string());
    Ok(parsed.into())
}
