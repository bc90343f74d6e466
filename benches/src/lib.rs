//! Benchmark fixtures for the harmonize decode and report pipeline.
//!
//! Run with: `cargo bench --package harmonize-bench`

use chrono::{Days, NaiveDate};
use harmonize_lib::{RawResponse, Record};
use serde_json::{Value, json};

/// BM units that appear in the synthetic auction data.
const UNITS: [&str; 4] = ["CONTB-1", "BHOLB-1", "KEMB-1", "ARNKB-2"];

/// Services cleared per EFA block.
const SERVICES: [&str; 3] = ["DCL", "DCH", "DRL"];

/// Number of synthetic auction records for `days` delivery days.
#[must_use]
pub const fn record_count(days: u64) -> u64 {
    days * 6 * (UNITS.len() * SERVICES.len()) as u64
}

/// Generates auction records shaped like `unit_dstack_response` rows.
#[must_use]
pub fn auction_records(start: NaiveDate, days: u64) -> Vec<Record> {
    let mut records = Vec::with_capacity(record_count(days) as usize);
    let mut id = 0u64;

    for day in 0..days {
        let date = start.checked_add_days(Days::new(day)).unwrap_or(start);
        let efa_date = format!("{}T00:00:00", date.format("%Y-%m-%d"));

        for efa in 1..=6u32 {
            for (u, unit) in UNITS.iter().enumerate() {
                for (s, service) in SERVICES.iter().enumerate() {
                    id += 1;
                    let price = 1.5 + f64::from(efa) * 0.75 + s as f64;
                    let volume = 5 + u * 3;
                    let row = json!({
                        "_id": id,
                        "Company": "Harmony Energy",
                        "Unit Name": unit,
                        "EFA Date": efa_date,
                        "Delivery Start": efa_date,
                        "Delivery End": efa_date,
                        "EFA": efa.to_string(),
                        "Service": service,
                        "Cleared Volume": volume.to_string(),
                        "Clearing Price": format!("{price:.2}"),
                        "Technology Type": "Battery",
                        "Location": "GB",
                        "Cancelled": Value::Null,
                    });
                    if let Value::Object(map) = row {
                        records.push(map);
                    }
                }
            }
        }
    }

    records
}

/// Wraps records in a successful datastore envelope, as the API returns them.
#[must_use]
pub fn envelope_response(records: &[Record]) -> RawResponse {
    let body = json!({
        "help": "https://national-grid-admin.ckan.io/api/3/action/help_show?name=datastore_search_sql",
        "success": true,
        "result": {
            "records": records,
            "fields": [{"id": "_id", "type": "int"}],
            "sql": "SELECT * FROM bench",
        }
    });
    RawResponse::new(200, "https://bench.invalid/datastore_search_sql", body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_size() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = auction_records(start, 2);
        assert_eq!(records.len() as u64, record_count(2));
        assert_eq!(records[0]["Unit Name"], "CONTB-1");
    }

    #[test]
    fn test_envelope_decodes() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = auction_records(start, 1);
        let response = envelope_response(&records);
        let table = harmonize_lib::decode(&response)
            .and_then(harmonize_lib::validate_and_extract)
            .unwrap();
        assert_eq!(table.len(), records.len());
    }
}
