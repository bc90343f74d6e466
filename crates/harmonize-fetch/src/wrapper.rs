//! Stream-bound datastore client.

use std::sync::Arc;

use harmonize_streams::StreamRegistry;
use harmonize_types::{FilterError, HarmonizeError, Result, Stream, Table};
use uuid::Uuid;

use crate::{
    Advisory, DatastoreClient, FilterExpression, Query, RawResponse, build_date_filter, decode,
    validate_and_extract,
};

/// A query result together with the advisories raised while resolving it.
#[derive(Debug, Clone)]
pub struct QueryOutcome<T> {
    /// The decoded table or the raw response.
    pub value: T,
    /// Non-fatal diagnostics, already emitted as `tracing` warnings.
    pub advisories: Vec<Advisory>,
}

/// Client bound to one datastore stream.
///
/// A stream is required at construction; [`StreamClient::assign_stream`]
/// rebinds it. No connection state is tied to the binding.
#[derive(Debug, Clone)]
pub struct StreamClient {
    client: DatastoreClient,
    registry: &'static StreamRegistry,
    stream: Stream,
}

impl StreamClient {
    /// Binds a client to a stream of the global registry.
    ///
    /// # Errors
    ///
    /// Returns [`HarmonizeError::UnknownStream`] if the name is not registered.
    pub fn new(client: DatastoreClient, stream: &str) -> Result<Self> {
        Self::with_registry(client, StreamRegistry::global(), stream)
    }

    /// Binds a client to a stream of the given registry.
    ///
    /// # Errors
    ///
    /// Returns [`HarmonizeError::UnknownStream`] if the name is not registered.
    pub fn with_registry(
        client: DatastoreClient,
        registry: &'static StreamRegistry,
        stream: &str,
    ) -> Result<Self> {
        let stream = lookup(registry, stream)?;
        Ok(Self {
            client,
            registry,
            stream,
        })
    }

    /// Rebinds the client to another stream.
    ///
    /// On error the current binding is kept.
    ///
    /// # Errors
    ///
    /// Returns [`HarmonizeError::UnknownStream`] if the name is not registered.
    pub fn assign_stream(&mut self, stream: &str) -> Result<()> {
        self.stream = lookup(self.registry, stream)?;
        Ok(())
    }

    /// Returns the bound stream.
    #[must_use]
    pub const fn stream(&self) -> &Stream {
        &self.stream
    }

    /// Returns the bound resource identifier.
    #[must_use]
    pub const fn resource_id(&self) -> Uuid {
        self.stream.resource_id()
    }

    /// Returns the names of every stream this client can bind to.
    #[must_use]
    pub fn streams(&self) -> Vec<&'static str> {
        self.registry.list_names()
    }

    /// Returns the underlying datastore client.
    #[must_use]
    pub const fn client(&self) -> &DatastoreClient {
        &self.client
    }

    /// Builds a date-range filter for the bound stream.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MissingBounds`] if neither bound is given.
    pub fn build_date_filter(
        &self,
        column: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> std::result::Result<FilterExpression, FilterError> {
        build_date_filter(self.resource_id(), column, start, end)
    }

    /// Runs a query and returns the response without decoding it.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure.
    pub async fn query_raw(&self, query: &Query) -> Result<QueryOutcome<Arc<RawResponse>>> {
        let resolved = query.resolve(self.resource_id());
        for advisory in &resolved.advisories {
            tracing::warn!(stream = self.stream.name(), "{advisory}");
        }

        let response = self
            .client
            .fetch(
                self.resource_id(),
                &resolved.params,
                resolved.filter.as_ref(),
            )
            .await?;

        Ok(QueryOutcome {
            value: response,
            advisories: resolved.advisories,
        })
    }

    /// Runs a query and normalizes the records into a table.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, an undecodable body, or a
    /// response with `success: false`.
    pub async fn query(&self, query: &Query) -> Result<QueryOutcome<Table>> {
        let QueryOutcome { value, advisories } = self.query_raw(query).await?;
        let table = validate_and_extract(decode(&value)?)?;
        Ok(QueryOutcome {
            value: table,
            advisories,
        })
    }
}

fn lookup(registry: &StreamRegistry, name: &str) -> Result<Stream> {
    registry
        .get(name)
        .cloned()
        .ok_or_else(|| HarmonizeError::UnknownStream(name.to_string()))
}
