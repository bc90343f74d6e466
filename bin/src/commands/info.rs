//! Info command implementation.

use anyhow::Result;
use harmonize_lib::prelude::*;
use harmonize_lib::{build_date_filter, endpoint};

/// Show a stream's resource id and the endpoints it is queried through.
pub(crate) fn show_info(name: &str, config: &ClientConfig) -> Result<()> {
    let resource_id = StreamRegistry::global().resolve(name)?;

    println!("Stream:      {name}");
    println!("Resource ID: {resource_id}");
    println!("Listing:     {}", endpoint(&config.base_url, false));
    println!("Filtered:    {}", endpoint(&config.base_url, true));

    let example = build_date_filter(
        resource_id,
        "EFA Date",
        Some("2024-01-01"),
        Some("2024-01-31"),
    )?;
    println!("\nExample date filter:\n  {example}");

    Ok(())
}
