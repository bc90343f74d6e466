//! Tabular results normalized from datastore records.

use serde_json::{Map, Value};

/// A single datastore record: column name to value, in server order.
pub type Record = Map<String, Value>;

/// Rectangular table built by stacking records into rows.
///
/// Columns are the union of record keys in first-seen order. Keys missing from
/// a record are stored as `null`. Tables are never modified in place; the
/// transforming methods return a new table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates an empty table with no rows and no columns.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Builds a table from records, preserving record order.
    ///
    /// # Example
    ///
    /// ```
    /// use harmonize_types::Table;
    /// use serde_json::json;
    ///
    /// let records = vec![
    ///     json!({"EFA": 1, "Service": "DCL"}),
    ///     json!({"EFA": 2, "Unit Name": "CONTB-1"}),
    /// ];
    /// let table = Table::from_records(records.into_iter().filter_map(|r| match r {
    ///     serde_json::Value::Object(map) => Some(map),
    ///     _ => None,
    /// }));
    /// assert_eq!(table.columns(), ["EFA", "Service", "Unit Name"]);
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let records: Vec<Record> = records.into_iter().collect();

        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|column| record.remove(column).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Returns the column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.columns.len()
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Returns the row at `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[Value]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Returns the position of a column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the values of a column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }

    /// Returns a single cell.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[index])
    }

    /// Returns the rows as records, in column order.
    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        self.rows.iter().map(|row| {
            self.columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect()
        })
    }

    /// Returns a copy keeping only the rows whose `column` value matches.
    ///
    /// A missing column keeps the column layout and yields no rows.
    #[must_use]
    pub fn filter_by(&self, column: &str, mut predicate: impl FnMut(&Value) -> bool) -> Self {
        let rows = self.column_index(column).map_or_else(Vec::new, |index| {
            self.rows
                .iter()
                .filter(|row| predicate(&row[index]))
                .cloned()
                .collect()
        });

        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Returns a copy without the named columns. Unknown names are ignored.
    #[must_use]
    pub fn without_columns(&self, names: &[&str]) -> Self {
        let keep: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !names.contains(&c.as_str()))
            .map(|(i, _)| i)
            .collect();

        Self {
            columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }

    /// Stacks `other` below this table, taking the union of both column sets.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        Self::from_records(self.records().chain(other.records()))
    }
}
