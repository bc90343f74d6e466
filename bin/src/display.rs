//! Display utilities and output formatting for the harmonize CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use harmonize_lib::prelude::*;
use harmonize_lib::{PUBLICATION_NOTICE, format_earnings};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Output format for query results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", OutputFormat::from(*self))
    }
}

/// Spinner shown while a request is in flight. Hidden in quiet mode.
pub(crate) fn spinner(quiet: bool, message: String) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Write a table to `output`, or to stdout when no path is given.
pub(crate) fn write_table(table: &Table, output: Option<&Path>, format: Format) -> Result<()> {
    let format = OutputFormat::from(format);
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            format.write_table(table, &mut writer)?;
            writer
                .flush()
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout();
            format.write_table(table, &mut stdout)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Render a day report as text.
pub(crate) fn write_day_report<W: Write>(report: &DayReport, mut out: W) -> Result<()> {
    writeln!(out, "== {} ({}) ==", report.day, report.uk_date())?;

    if report.is_unpublished() {
        match report.day {
            DeliveryDay::DayAhead => writeln!(out, "{PUBLICATION_NOTICE}")?,
            DeliveryDay::Current => writeln!(out, "No auction results for this day.")?,
        }
        return Ok(());
    }

    for unit in &report.units {
        writeln!(out)?;
        writeln!(out, "{}", unit.unit)?;
        writeln!(out, "Potential earnings: {}", unit.earnings_display())?;

        if unit.blocks.is_empty() {
            writeln!(out, "  No cleared volume.")?;
            continue;
        }

        writeln!(
            out,
            "  {:<5} {:<8} {:>16} {:>16}",
            "EFA", "SERVICE", "PRICE (£/MW/h)", "VOLUME (MW)"
        )?;
        for block in &unit.blocks {
            writeln!(
                out,
                "  {:<5} {:<8} {:>16} {:>16}",
                block.efa.map_or_else(|| "-".to_string(), |efa| efa.to_string()),
                block.service.as_deref().unwrap_or("-"),
                cell(block.clearing_price),
                cell(block.cleared_volume),
            )?;
        }
    }

    Ok(())
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_earnings)
}
