//! Pagination module
//!
//! NCM APIv3 pages collections with a `page[size]` parameter and a
//! `links.next` URL in each response body.
//!
//! # Overview
//!
//! The [`PaginatedFetcher`] issues the first request, follows next-page
//! links and flattens the pages into one ordered `Vec<Record>`, stopping at
//! the caller's [`Limit`](crate::types::Limit) or when the server runs out.
//! A failure on any page aborts the whole fetch; records gathered from
//! earlier pages are dropped.

mod fetcher;
mod types;

pub use fetcher::{PageSettings, PaginatedFetcher, PAGE_SIZE_PARAM};
pub use types::{NextPage, Page, PaginationState};
