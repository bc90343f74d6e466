//! Memoization of datastore responses.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::{QueryParams, RawResponse};

/// Process-wide response cache.
static SHARED: OnceLock<Arc<MemoryCache>> = OnceLock::new();

/// Everything that identifies a request: the endpoint and the final parameters
/// (resource id and filter expression included).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    endpoint: String,
    params: QueryParams,
}

impl CacheKey {
    /// Creates a key for a request.
    #[must_use]
    pub const fn new(endpoint: String, params: QueryParams) -> Self {
        Self { endpoint, params }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the request parameters.
    #[must_use]
    pub const fn params(&self) -> &QueryParams {
        &self.params
    }
}

/// Storage for responses keyed by request.
///
/// Entries never expire. Callers that need fresh data put a changing value,
/// such as today's date, into the request.
pub trait ResultCache: Send + Sync + std::fmt::Debug {
    /// Returns the cached response for `key`.
    fn get(&self, key: &CacheKey) -> Option<Arc<RawResponse>>;

    /// Stores a response.
    fn set(&self, key: CacheKey, response: Arc<RawResponse>);

    /// Removes every entry.
    fn clear(&self);
}

/// Unbounded in-memory cache.
///
/// [`DatastoreClient`](crate::DatastoreClient) only stores 2xx responses, so
/// server errors and proxy failures are fetched again on the next call.
///
/// Concurrent misses on the same key are not de-duplicated: both requests go
/// out and the last response stored wins.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, Arc<RawResponse>>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide cache shared by default clients.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::new())))
    }

    /// Returns the number of cached responses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultCache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<Arc<RawResponse>> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: CacheKey, response: Arc<RawResponse>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, response);
        }
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

/// Cache that stores nothing, so every call reaches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ResultCache for NoCache {
    fn get(&self, _key: &CacheKey) -> Option<Arc<RawResponse>> {
        None
    }

    fn set(&self, _key: CacheKey, _response: Arc<RawResponse>) {}

    fn clear(&self) {}
}
