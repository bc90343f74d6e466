//! Rust client for the National Grid ESO CKAN datastore.
//!
//! This is a facade crate that re-exports functionality from the harmonize
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use harmonize_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let client = StreamClient::new(DatastoreClient::with_defaults()?, "unit_dstack_response")?;
//!
//!     let query = Query::new()
//!         .date_column("EFA Date")
//!         .start_date("2024-01-01")
//!         .end_date("2024-01-01");
//!
//!     let outcome = client.query(&query).await?;
//!     println!("Fetched {} records", outcome.value.len());
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use harmonize_types::*;

// Re-export stream registry
pub use harmonize_streams::StreamRegistry;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use harmonize_fetch::{
    Advisory, BASE_URL, ClientConfig, DatastoreClient, DateFilter, FilterExpression,
    HttpTransport, MemoryCache, NoCache, Query, QueryOutcome, QueryParams, RawResponse,
    ResultCache, StreamClient, Transport, build_date_filter, decode, endpoint,
    validate_and_extract,
};

// Re-export reports
#[cfg(feature = "report")]
pub use harmonize_report::{
    DATE_COLUMN, DayReport, DeliveryDay, EfaBlock, PUBLICATION_NOTICE, UNIT_STREAM, Unit,
    UnitReport, format_earnings,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use harmonize_format::{CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat};

/// Prelude module for convenient imports.
///
/// ```
/// use harmonize_lib::prelude::*;
/// ```
pub mod prelude {
    pub use harmonize_types::{
        FilterError, HarmonizeError, Record, Result, Stream, Table, TransportError,
    };

    pub use harmonize_streams::StreamRegistry;

    #[cfg(feature = "fetch")]
    pub use harmonize_fetch::{
        Advisory, ClientConfig, DatastoreClient, Query, QueryOutcome, QueryParams, RawResponse,
        StreamClient,
    };

    #[cfg(feature = "report")]
    pub use harmonize_report::{DayReport, DeliveryDay, Unit, UnitReport};

    #[cfg(feature = "format")]
    pub use harmonize_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};
}
