//! Stream registry for the harmonize National Grid datastore client.
//!
//! This crate maps the human-readable names of the National Grid ESO data
//! portal streams to their CKAN datastore resource identifiers.
//!
//! # Example
//!
//! ```
//! use harmonize_streams::StreamRegistry;
//!
//! let registry = StreamRegistry::global();
//!
//! let resource_id = registry.resolve("unit_dstack_response")?;
//! println!("unit_dstack_response -> {resource_id}");
//! # Ok::<(), harmonize_types::HarmonizeError>(())
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use harmonize_types::{HarmonizeError, Result, Stream};
use uuid::Uuid;

/// The stream table embedded at compile time.
const STREAMS_JSON: &str = include_str!("../data/streams.json");

/// Global stream registry instance.
static REGISTRY: OnceLock<StreamRegistry> = OnceLock::new();

/// Read-only registry of the known datastore streams.
#[derive(Debug)]
pub struct StreamRegistry {
    streams: Vec<Stream>,
    by_name: HashMap<String, usize>,
}

impl StreamRegistry {
    /// Returns the global stream registry.
    ///
    /// The registry is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::load)
    }

    /// Loads streams from the embedded JSON data.
    fn load() -> Self {
        let streams: Vec<Stream> =
            serde_json::from_str(STREAMS_JSON).expect("Invalid streams.json");
        Self::from_streams(streams)
    }

    /// Builds a registry from an explicit list of streams.
    ///
    /// Later entries with a duplicate name are ignored.
    #[must_use]
    pub fn from_streams(streams: impl IntoIterator<Item = Stream>) -> Self {
        let mut kept = Vec::new();
        let mut by_name = HashMap::new();
        for stream in streams {
            if by_name.contains_key(stream.name()) {
                continue;
            }
            by_name.insert(stream.name().to_string(), kept.len());
            kept.push(stream);
        }
        Self {
            streams: kept,
            by_name,
        }
    }

    /// Looks up a stream by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Stream> {
        self.by_name.get(name).map(|&i| &self.streams[i])
    }

    /// Resolves a stream name to its resource identifier.
    ///
    /// # Errors
    ///
    /// Returns [`HarmonizeError::UnknownStream`] if the name is not registered.
    pub fn resolve(&self, name: &str) -> Result<Uuid> {
        self.get(name)
            .map(Stream::resource_id)
            .ok_or_else(|| HarmonizeError::UnknownStream(name.to_string()))
    }

    /// Returns all stream names in registration order.
    pub fn list_names(&self) -> Vec<&str> {
        self.streams.iter().map(Stream::name).collect()
    }

    /// Returns all streams as an iterator, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &Stream> {
        self.streams.iter()
    }

    /// Searches streams by name (case-insensitive substring).
    pub fn search(&self, pattern: &str) -> Vec<&Stream> {
        let pattern = pattern.to_lowercase();
        self.streams
            .iter()
            .filter(|s| s.name().to_lowercase().contains(&pattern))
            .collect()
    }

    /// Returns the total number of streams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}
