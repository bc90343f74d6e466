//! JSON output format.

use harmonize_types::Table;
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter. Each row is written as an object keyed by column name.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }
}

impl Formatter for JsonFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &Table,
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                let records: Vec<_> = table.records().collect();
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, &records)?;
                } else {
                    serde_json::to_writer(&mut writer, &records)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for record in table.records() {
                    serde_json::to_writer(&mut writer, &record)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harmonize_types::Record;
    use serde_json::{Value, json};
    use std::io::Cursor;

    fn create_test_table() -> Table {
        let record = |value: Value| -> Record {
            match value {
                Value::Object(map) => map,
                _ => panic!("expected an object"),
            }
        };
        Table::from_records(vec![
            record(json!({"Unit Name": "CONTB-1", "Clearing Price": 4.5})),
            record(json!({"Unit Name": "BHOLB-1", "Clearing Price": 3.1})),
        ])
    }

    fn render(formatter: &JsonFormatter) -> String {
        let mut output = Cursor::new(Vec::new());
        formatter
            .write_table(&create_test_table(), &mut output)
            .unwrap();
        String::from_utf8(output.into_inner()).unwrap()
    }

    #[test]
    fn test_json_array() {
        let result = render(&JsonFormatter::new());
        assert!(result.starts_with('['));
        assert!(result.contains(r#"{"Unit Name":"CONTB-1","Clearing Price":4.5}"#));
    }

    #[test]
    fn test_ndjson() {
        let result = render(&JsonFormatter::ndjson());
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with(r#"{"Unit Name":"BHOLB-1""#));
    }

    #[test]
    fn test_pretty_json() {
        let result = render(&JsonFormatter::new().with_pretty(true));
        assert!(result.contains('\n'));
        assert!(result.contains("  ")); // Indentation
    }

    #[test]
    fn test_empty_table_is_empty_array() {
        let mut output = Cursor::new(Vec::new());
        JsonFormatter::new()
            .write_table(&Table::empty(), &mut output)
            .unwrap();
        assert_eq!(String::from_utf8(output.into_inner()).unwrap(), "[]\n");
    }
}
