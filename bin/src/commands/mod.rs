//! CLI command implementations.

pub(crate) mod info;
pub(crate) mod query;
pub(crate) mod report;
pub(crate) mod streams;
