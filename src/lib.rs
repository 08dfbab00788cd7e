// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # NCM Client
//!
//! An async client for the Cradlepoint NCM APIv3 with transparent
//! pagination.
//!
//! ## Features
//!
//! - **Transparent Pagination**: Follows `links.next` and trims the last
//!   request so no more than the requested number of records is fetched
//! - **Filter Validation**: Queries are checked against each endpoint's
//!   allowlist before anything is sent
//! - **Read-Modify-Write Updates**: Records are looked up, merged and PUT
//!   back as JSON:API documents
//! - **Pluggable Transport**: Everything goes through a [`Transport`]
//!   trait, reqwest by default
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ncm_client::{Limit, NcmClient, QueryParams, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ncm_client::logging::try_init()?;
//!
//!     let client = NcmClient::from_env()?;
//!
//!     // Every router, however many pages that takes
//!     let routers = client.get_routers(&QueryParams::new(), Limit::All).await?;
//!
//!     // At most 120 inactive users
//!     let query = QueryParams::new().filter("is_active", false);
//!     let users = client.get_users(&query, Limit::AtMost(120)).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        NcmClient                          │
//! │  users · routers · subscriptions · private cellular · ... │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//! ┌────────────┬───────────────┴───────┬──────────────────────┐
//! │ Resources  │      Pagination       │        HTTP          │
//! ├────────────┼───────────────────────┼──────────────────────┤
//! │ Paths      │ page[size] sizing     │ Transport trait      │
//! │ Allowlists │ links.next following  │ reqwest + bearer key │
//! │ Lookups    │ Limit truncation      │ JSON:API headers     │
//! └────────────┴───────────────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// JSON:API records
pub mod record;

/// Client configuration
pub mod config;

/// Bearer-key authentication
pub mod auth;

/// Transport trait and reqwest client
pub mod http;

/// Page parsing and the paginated fetcher
pub mod pagination;

/// Filter, search and sort parameters
pub mod query;

/// Endpoint catalogue
pub mod resources;

/// The NCM client
pub mod client;

/// Subscriber setup
pub mod logging;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::{
    ExchangeResourceKind, GroupUpdate, NcmClient, NewExchangeResource, NewExchangeSite,
    NewNetwork, NewRadioGroup, NewUser, RadioUpdate, SimUpdate,
};
pub use config::ClientConfig;
pub use http::{ApiRequest, ApiResponse, HttpClient, Transport};
pub use query::{FilterOp, QueryParams};
pub use record::Record;
pub use resources::{ExchangeScope, Lookup, Resource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
