//! Query command implementation.
//!
//! This module handles querying a stream and writing the decoded table (or the
//! raw HTTP response) to a file or stdout.

use crate::display::{Format, spinner, write_table};
use anyhow::{Context, Result};
use clap::Args;
use harmonize_lib::prelude::*;
use std::path::PathBuf;

/// Arguments of the `query` command.
#[derive(Args)]
pub(crate) struct QueryArgs {
    /// Stream name (see `harmonize streams`)
    stream: String,

    /// Column the date bounds apply to (e.g. "EFA Date")
    #[arg(short = 'c', long)]
    date_column: Option<String>,

    /// Lower date bound, passed verbatim (e.g. 2024-01-01)
    #[arg(short, long)]
    start: Option<String>,

    /// Upper date bound, passed verbatim
    #[arg(short, long)]
    end: Option<String>,

    /// Raw filter expression, ignored when a date bound is given
    #[arg(long)]
    sql: Option<String>,

    /// Maximum number of records (listing endpoint only)
    #[arg(short, long)]
    limit: Option<u32>,

    /// Extra query parameter as key=value (repeatable)
    #[arg(short, long = "param", value_parser = parse_key_value)]
    params: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: Format,

    /// Output file path. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the raw HTTP response instead of the decoded table
    #[arg(long)]
    raw: bool,
}

impl QueryArgs {
    /// Builds the datastore query from the arguments.
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        for (key, value) in &self.params {
            query = query.param(key.as_str(), value);
        }
        if let Some(limit) = self.limit {
            query = query.param("limit", limit);
        }
        if let Some(column) = &self.date_column {
            query = query.date_column(column.as_str());
        }
        if let Some(start) = &self.start {
            query = query.start_date(start.as_str());
        }
        if let Some(end) = &self.end {
            query = query.end_date(end.as_str());
        }
        if let Some(sql) = &self.sql {
            query = query.sql(sql.as_str());
        }
        query
    }
}

/// Parses a `key=value` pair.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

/// Query a stream and write the result.
pub(crate) async fn query(config: ClientConfig, args: QueryArgs, quiet: bool) -> Result<()> {
    let client = StreamClient::new(DatastoreClient::new(config)?, &args.stream)?;
    let query = args.to_query();

    let progress = spinner(quiet, format!("Querying {}", client.stream().name()));

    if args.raw {
        let outcome = client.query_raw(&query).await;
        progress.finish_and_clear();
        let response = outcome?.value;

        tracing::info!(status = response.status(), url = response.url(), "raw response");
        match &args.output {
            Some(path) => std::fs::write(path, response.body())
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => println!("{}", response.body()),
        }
        return Ok(());
    }

    let outcome = client.query(&query).await;
    progress.finish_and_clear();
    let table = outcome
        .with_context(|| format!("Query against '{}' failed", args.stream))?
        .value;

    tracing::info!(rows = table.len(), columns = table.width(), "decoded table");
    write_table(&table, args.output.as_deref(), args.format)?;

    if !quiet {
        if let Some(path) = &args.output {
            eprintln!("Wrote {} records to {}", table.len(), path.display());
        }
    }

    Ok(())
}
