//! Streams command implementation.
//!
//! This module handles listing the registered datastore streams.

use anyhow::Result;
use harmonize_lib::prelude::*;

/// List registered streams, optionally filtered by a search pattern.
pub(crate) fn list_streams(search: Option<&str>) -> Result<()> {
    let registry = StreamRegistry::global();

    let streams: Vec<_> = match search {
        Some(pattern) => registry.search(pattern),
        None => registry.all().collect(),
    };

    if streams.is_empty() {
        println!("No streams found.");
        return Ok(());
    }

    println!("{:<55} {:<36}", "NAME", "RESOURCE ID");
    println!("{}", "-".repeat(92));

    for stream in &streams {
        println!("{:<55} {:<36}", stream.name(), stream.resource_id());
    }

    println!("\nTotal: {} streams", streams.len());
    Ok(())
}
