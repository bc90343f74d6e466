//! HTTP client for the CKAN datastore API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use harmonize_types::TransportError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::query::{RESOURCE_ID_PARAM, SQL_PARAM};
use crate::{CacheKey, FilterExpression, MemoryCache, QueryParams, ResultCache};

/// Record-listing endpoint of the National Grid ESO data portal.
pub const BASE_URL: &str = "https://national-grid-admin.ckan.io/api/3/action/datastore_search";

/// Suffix selecting the filter-capable endpoint variant.
pub const SQL_SUFFIX: &str = "_sql";

/// Returns the endpoint for a request, with or without a filter expression.
///
/// ```
/// use harmonize_fetch::{BASE_URL, endpoint};
///
/// assert_eq!(endpoint(BASE_URL, false), BASE_URL);
/// assert!(endpoint(BASE_URL, true).ends_with("datastore_search_sql"));
/// ```
#[must_use]
pub fn endpoint(base_url: &str, filtered: bool) -> String {
    if filtered {
        format!("{base_url}{SQL_SUFFIX}")
    } else {
        base_url.to_string()
    }
}

/// Configuration for the datastore client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Record-listing endpoint; the filter endpoint appends [`SQL_SUFFIX`].
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("harmonize/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// An HTTP response as received, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    url: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl RawResponse {
    /// Creates a response with no headers.
    #[must_use]
    pub fn new(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns true for a 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the final request URL, query string included.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the response headers in received order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the first header with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// Sends GET requests. Implementations never retry.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Performs a GET against `url` with the given query parameters.
    async fn get(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await.map_err(transport_error)?;

        Ok(RawResponse {
            status,
            url: final_url,
            headers,
            body,
        })
    }
}

/// Classifies a reqwest failure.
fn transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Request(error.to_string())
    }
}

/// Datastore client: routes requests to the right endpoint and memoizes them.
#[derive(Debug, Clone)]
pub struct DatastoreClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    cache: Arc<dyn ResultCache>,
}

impl DatastoreClient {
    /// Creates an HTTP client using the process-wide cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::from_parts(
            config,
            Arc::new(transport),
            MemoryCache::shared(),
        ))
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Creates a client from an explicit transport and cache.
    #[must_use]
    pub fn from_parts(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        cache: Arc<dyn ResultCache>,
    ) -> Self {
        Self {
            config,
            transport,
            cache,
        }
    }

    /// Returns a copy of this client using a different cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn ResultCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the response cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn ResultCache> {
        &self.cache
    }

    /// Fetches records of a resource.
    ///
    /// With a filter the request goes to the `_sql` endpoint variant. The
    /// resource id always overrides any `resource_id` in `params`, and the
    /// filter replaces any `sql` in `params`. Identical requests are answered
    /// from the cache; only 2xx responses are stored.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure. Nothing is retried.
    pub async fn fetch(
        &self,
        resource_id: Uuid,
        params: &QueryParams,
        filter: Option<&FilterExpression>,
    ) -> Result<Arc<RawResponse>, TransportError> {
        let url = endpoint(&self.config.base_url, filter.is_some());

        let mut request = params
            .without(SQL_PARAM)
            .with(RESOURCE_ID_PARAM, resource_id);
        if let Some(filter) = filter {
            request = request.with(SQL_PARAM, filter);
        }

        let key = CacheKey::new(url, request);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        let response = Arc::new(
            self.transport
                .get(key.endpoint(), &key.params().to_pairs())
                .await?,
        );
        if response.is_success() {
            self.cache.set(key, Arc::clone(&response));
        } else {
            tracing::debug!(
                status = response.status(),
                url = key.endpoint(),
                "response not cached"
            );
        }
        Ok(response)
    }
}
