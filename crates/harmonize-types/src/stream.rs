//! Datastore stream definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named dataset exposed by the National Grid ESO data portal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stream {
    /// Human-readable name (e.g., "unit_dstack_response").
    name: String,
    /// CKAN datastore resource identifier.
    resource_id: Uuid,
}

impl Stream {
    /// Creates a new stream.
    #[must_use]
    pub fn new(name: impl Into<String>, resource_id: Uuid) -> Self {
        Self {
            name: name.into(),
            resource_id,
        }
    }

    /// Returns the stream name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the datastore resource identifier.
    #[must_use]
    pub const fn resource_id(&self) -> Uuid {
        self.resource_id
    }
}

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.resource_id)
    }
}
