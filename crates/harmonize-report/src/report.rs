//! Per-unit price, volume and earnings reports.

use chrono::NaiveDate;
use harmonize_types::Table;
use serde::Serialize;
use serde_json::Value;

use crate::{
    CLEARED_VOLUME_COLUMN, CLEARING_PRICE_COLUMN, DeliveryDay, EFA_COLUMN, SERVICE_COLUMN,
    UNIT_COLUMN, Unit,
};

/// Housekeeping columns removed before reporting.
pub const DROPPED_COLUMNS: [&str; 9] = [
    "index",
    "Delivery Start",
    "Delivery End",
    "Company",
    "_full_text",
    "Location",
    "Cancelled",
    "_id",
    "Technology Type",
];

/// Length of an EFA block in hours.
pub const HOURS_PER_EFA_BLOCK: f64 = 4.0;

/// Shown when the day-ahead results are not out yet.
pub const PUBLICATION_NOTICE: &str = "National Grid ESO will publish this data after 4pm UK time.";

/// Coerces a cell to a number. Anything unparseable becomes `None`.
#[must_use]
pub fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// One auction result: a service cleared for an EFA block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfaBlock {
    /// EFA block number.
    pub efa: Option<f64>,
    /// Frequency response service.
    pub service: Option<String>,
    /// Clearing price in £/MW/h.
    pub clearing_price: Option<f64>,
    /// Cleared volume in MW.
    pub cleared_volume: Option<f64>,
}

impl EfaBlock {
    /// Returns price × volume over the block, if both are known.
    #[must_use]
    pub fn earnings(&self) -> Option<f64> {
        Some(self.clearing_price? * self.cleared_volume? * HOURS_PER_EFA_BLOCK)
    }
}

/// Auction results of one unit for one delivery day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitReport {
    /// The reported unit.
    pub unit: Unit,
    /// Results sorted by EFA block, unknown blocks last.
    pub blocks: Vec<EfaBlock>,
    /// Sum of block earnings, rounded to pennies (ties to even).
    pub potential_earnings: f64,
    /// The unit's rows without housekeeping columns.
    #[serde(skip)]
    pub table: Table,
}

impl UnitReport {
    /// Builds the report for `unit` from the full auction table.
    #[must_use]
    pub fn build(table: &Table, unit: Unit) -> Self {
        let table = table
            .filter_by(UNIT_COLUMN, |v| v.as_str() == Some(unit.unit_name()))
            .without_columns(&DROPPED_COLUMNS);

        let number = |row: usize, column: &str| table.value(row, column).and_then(to_number);

        let mut blocks: Vec<EfaBlock> = (0..table.len())
            .map(|row| EfaBlock {
                efa: number(row, EFA_COLUMN),
                service: table
                    .value(row, SERVICE_COLUMN)
                    .and_then(Value::as_str)
                    .map(str::to_string),
                clearing_price: number(row, CLEARING_PRICE_COLUMN),
                cleared_volume: number(row, CLEARED_VOLUME_COLUMN),
            })
            .collect();

        blocks.sort_by(|a, b| match (a.efa, b.efa) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let total: f64 = blocks.iter().filter_map(EfaBlock::earnings).sum();

        Self {
            unit,
            blocks,
            potential_earnings: round_pennies(total),
            table,
        }
    }

    /// Returns the earnings metric as displayed, e.g. `12,480.5 (£/MW/Day)`.
    #[must_use]
    pub fn earnings_display(&self) -> String {
        format!("{} (£/MW/Day)", format_earnings(self.potential_earnings))
    }
}

/// Reports of every unit for one delivery day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayReport {
    /// Which day.
    pub day: DeliveryDay,
    /// The delivery date.
    pub date: NaiveDate,
    /// One report per unit, empty when nothing is published yet.
    pub units: Vec<UnitReport>,
}

impl DayReport {
    /// Builds the report for `day` from the table fetched for it.
    #[must_use]
    pub fn build(day: DeliveryDay, today: NaiveDate, table: &Table) -> Self {
        let units = if table.is_empty() {
            Vec::new()
        } else {
            Unit::ALL
                .iter()
                .map(|&unit| UnitReport::build(table, unit))
                .collect()
        };

        Self {
            day,
            date: day.date(today),
            units,
        }
    }

    /// Returns true if the ESO has not published any results for this day.
    #[must_use]
    pub fn is_unpublished(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns the delivery date in UK order (`DD-MM-YYYY`).
    #[must_use]
    pub fn uk_date(&self) -> String {
        self.date.format("%d-%m-%Y").to_string()
    }
}

fn round_pennies(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Formats a number with thousands separators, keeping at least one decimal.
///
/// ```
/// use harmonize_report::format_earnings;
///
/// assert_eq!(format_earnings(12480.5), "12,480.5");
/// assert_eq!(format_earnings(1234.0), "1,234.0");
/// assert_eq!(format_earnings(-987654.32), "-987,654.32");
/// ```
#[must_use]
pub fn format_earnings(value: f64) -> String {
    let text = format!("{value}");
    let (sign, unsigned) = text
        .strip_prefix('-')
        .map_or(("", text.as_str()), |rest| ("-", rest));
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "0"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped}.{fraction}")
}
