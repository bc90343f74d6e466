//! Report command implementation.
//!
//! Fetches the unit auction results for the current day and/or the day ahead
//! and prints the per-unit price, volume and earnings report.

use crate::display::{spinner, write_day_report};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use harmonize_lib::prelude::*;
use harmonize_lib::{DATE_COLUMN, UNIT_STREAM};
use std::io::Write;

/// Which delivery days to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum DaySelection {
    Current,
    Ahead,
    Both,
}

impl DaySelection {
    /// Delivery days covered, in display order.
    pub(crate) fn days(self) -> &'static [DeliveryDay] {
        match self {
            Self::Current => &[DeliveryDay::Current],
            Self::Ahead => &[DeliveryDay::DayAhead],
            Self::Both => &[DeliveryDay::Current, DeliveryDay::DayAhead],
        }
    }
}

/// Parses the `--date` argument, defaulting to today's local date.
fn reference_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{date}', expected YYYY-MM-DD")),
        None => Ok(Local::now().date_naive()),
    }
}

/// Query for one delivery day's auction results.
fn day_query(day: DeliveryDay, today: NaiveDate) -> Query {
    let (start, end) = day.bounds(today);
    let mut query = Query::new().date_column(DATE_COLUMN);
    if let Some(start) = start {
        query = query.start_date(start);
    }
    if let Some(end) = end {
        query = query.end_date(end);
    }
    query
}

/// Fetch and print the unit report.
pub(crate) async fn report(
    config: ClientConfig,
    selection: DaySelection,
    date: Option<&str>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let today = reference_date(date)?;
    let client = StreamClient::new(DatastoreClient::new(config)?, UNIT_STREAM)?;

    let mut reports = Vec::with_capacity(selection.days().len());
    for &day in selection.days() {
        let progress = spinner(quiet, format!("Fetching {day} auction results"));
        let outcome = client.query(&day_query(day, today)).await;
        progress.finish_and_clear();

        let table = outcome
            .with_context(|| format!("Failed to fetch {day} results"))?
            .value;
        tracing::debug!(%day, rows = table.len(), "fetched auction results");

        reports.push(DayReport::build(day, today, &table));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_day_report(report, &mut out)?;
    }

    Ok(())
}
