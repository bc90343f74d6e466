//! Query building, HTTP client and response normalization for the National
//! Grid ESO CKAN datastore.
//!
//! This crate provides the data access pipeline:
//!
//! - [`build_date_filter`] / [`DateFilter`] - Date-range filter expressions
//! - [`Query`] / [`QueryParams`] - Immutable request builders
//! - [`DatastoreClient`] - HTTP client with endpoint routing and memoization
//! - [`validate_and_extract`] - Envelope validation and table normalization
//! - [`ResultCache`] - Pluggable response cache
//! - [`StreamClient`] - Client bound to a registered stream

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cache;
mod client;
mod envelope;
mod query;
mod wrapper;

pub use cache::{CacheKey, MemoryCache, NoCache, ResultCache};
pub use client::{
    BASE_URL, ClientConfig, DatastoreClient, HttpTransport, RawResponse, SQL_SUFFIX, Transport,
    endpoint,
};
pub use envelope::{ApiErrorBody, Envelope, Field, ResultSet, decode, validate_and_extract};
pub use query::{
    Advisory, DateFilter, FilterExpression, Query, QueryParams, RESOURCE_ID_PARAM, ResolvedQuery,
    SQL_PARAM, build_date_filter,
};
pub use wrapper::{QueryOutcome, StreamClient};
