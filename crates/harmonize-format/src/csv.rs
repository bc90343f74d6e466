//! CSV output format.

use harmonize_types::Table;
use serde_json::Value;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }

    /// Quotes a field if it contains the delimiter, a quote or a line break.
    fn escape(&self, field: &str) -> String {
        if field.contains(self.delimiter) || field.contains(['"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Renders a cell: strings verbatim, null as empty, anything else as JSON.
    fn cell(&self, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => self.escape(s),
            other => self.escape(&other.to_string()),
        }
    }

    fn write_line<W: Write>(&self, writer: &mut W, fields: &[String]) -> std::io::Result<()> {
        let mut delimiter = [0u8; 4];
        let delimiter = self.delimiter.encode_utf8(&mut delimiter);
        writeln!(writer, "{}", fields.join(delimiter))
    }
}

impl Formatter for CsvFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &Table,
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.include_header && table.width() > 0 {
            let header: Vec<String> = table.columns().iter().map(|c| self.escape(c)).collect();
            self.write_line(&mut writer, &header)?;
        }

        for row in table.rows() {
            let fields: Vec<String> = row.iter().map(|v| self.cell(v)).collect();
            self.write_line(&mut writer, &fields)?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}
