//! NCM client
//!
//! [`NcmClient`] ties configuration, transport and pagination together and
//! exposes one method per remote operation. The generic operations here work
//! on any [`Resource`]; the endpoint-specific wrappers live in submodules.
//!
//! # Example
//!
//! ```rust,ignore
//! use ncm_client::{Limit, NcmClient, QueryParams};
//!
//! let client = NcmClient::new("my-api-key")?;
//! let users = client
//!     .get_users(&QueryParams::new().search("last_name", "smith"), Limit::All)
//!     .await?;
//! ```

mod assets;
mod exchange;
mod private_cellular;
mod users;

pub use exchange::{ExchangeResourceKind, NewExchangeResource, NewExchangeSite};
pub use private_cellular::{GroupUpdate, NewNetwork, NewRadioGroup, RadioUpdate, SimUpdate};
pub use users::NewUser;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{ApiRequest, HttpClient, Transport};
use crate::pagination::{Page, PageSettings, PaginatedFetcher};
use crate::query::QueryParams;
use crate::record::Record;
use crate::resources::Resource;
use crate::types::{JsonObject, Limit};
use std::sync::Arc;
use tracing::{debug, info};

/// Client for NCM APIv3
#[derive(Clone)]
pub struct NcmClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl NcmClient {
    /// Create a client with default settings for an API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key)?)
    }

    /// Create a client from `NCM_API_KEY` and `CP_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a client that talks HTTP with the given settings
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpClient::from_config(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over any transport
    ///
    /// The config is validated here too, since its fields are public.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    /// Settings in use
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Paginated fetcher bound to this client's transport
    pub fn fetcher(&self) -> PaginatedFetcher<'_> {
        PaginatedFetcher::new(self.transport.as_ref(), PageSettings::from(self.config.as_ref()))
    }

    // ========================================================================
    // Generic operations
    // ========================================================================

    /// Fetch records from any path under the API root
    pub async fn fetch(
        &self,
        path: &str,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        self.fetcher()
            .fetch(&self.config.endpoint(path), query, limit.into())
            .await
    }

    /// List a collection
    ///
    /// The query is checked against the collection's filter allowlist first;
    /// a rejected query never reaches the network.
    pub async fn list(
        &self,
        resource: Resource,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        resource.validate(query)?;
        let records = self.fetch(resource.path(), query, limit).await?;
        self.log_event(resource, "list", records.len());
        Ok(records)
    }

    /// Fetch one record by ID
    pub async fn get(&self, resource: Resource, id: &str) -> Result<Record> {
        let request = ApiRequest::get(self.config.endpoint(&resource.item_path(id)));
        let page = self.fetcher().fetch_page(request).await?;
        self.log_event(resource, "get", page.len());
        first_record(page).ok_or_else(|| Error::not_found(resource.label(), format!("id={id}")))
    }

    /// First record matching a query
    pub async fn find_one(&self, resource: Resource, query: &QueryParams) -> Result<Record> {
        self.list(resource, query, Limit::AtMost(1))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(resource.label(), describe(query)))
    }

    /// Create a record, returning what the server stored
    pub async fn create(&self, resource: Resource, record: &Record) -> Result<Record> {
        let request = ApiRequest::post(self.config.endpoint(resource.path()), record.to_document());
        let created = self.write(request).await?;
        self.log_event(resource, "create", 1);
        Ok(created.unwrap_or_else(|| record.clone()))
    }

    /// Replace a record, returning what the server stored
    pub async fn replace(&self, resource: Resource, id: &str, record: &Record) -> Result<Record> {
        let request = ApiRequest::put(
            self.config.endpoint(&resource.item_path(id)),
            record.to_document(),
        );
        let updated = self.write(request).await?;
        self.log_event(resource, "update", 1);
        Ok(updated.unwrap_or_else(|| record.clone()))
    }

    /// Delete a record
    pub async fn remove(&self, resource: Resource, id: &str) -> Result<()> {
        let request = ApiRequest::delete(self.config.endpoint(&resource.item_path(id)));
        self.transport.send(request).await?.into_result()?;
        self.log_event(resource, "delete", 1);
        Ok(())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Look a record up, let `edit` change it, and write it back
    pub(crate) async fn modify<F>(
        &self,
        resource: Resource,
        query: &QueryParams,
        edit: F,
    ) -> Result<Record>
    where
        F: FnOnce(&mut Record) + Send,
    {
        let mut record = self.find_one(resource, query).await?;
        let id = record
            .id
            .clone()
            .ok_or_else(|| Error::malformed(format!("{} record has no id", resource.label())))?;
        edit(&mut record);
        self.replace(resource, &id, &record).await
    }

    /// Send a write and parse the record in the response, if any
    async fn write(&self, request: ApiRequest) -> Result<Option<Record>> {
        let body = self.transport.send(request).await?.into_result()?;
        if body.is_null() {
            return Ok(None);
        }
        Ok(first_record(Page::from_body(body)?))
    }

    fn log_event(&self, resource: Resource, action: &str, count: usize) {
        if self.config.log_events {
            info!("{} {}: {} records", resource.label(), action, count);
        } else {
            debug!("{} {}: {} records", resource.label(), action, count);
        }
    }
}

impl std::fmt::Debug for NcmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NcmClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Reject attribute names outside `allowed`
pub(crate) fn check_attributes(attributes: &JsonObject, allowed: &[&str]) -> Result<()> {
    let bad: Vec<&str> = attributes
        .keys()
        .map(String::as_str)
        .filter(|key| !allowed.contains(key))
        .collect();
    if bad.is_empty() {
        Ok(())
    } else {
        Err(Error::invalid_params(bad))
    }
}

fn first_record(page: Page) -> Option<Record> {
    page.records.into_iter().next()
}

fn describe(query: &QueryParams) -> String {
    query
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}
