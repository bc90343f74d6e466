//! Date-range filter expressions and request parameters.

use std::collections::BTreeMap;

use harmonize_types::FilterError;
use uuid::Uuid;

/// Parameter key carrying the datastore resource identifier.
pub const RESOURCE_ID_PARAM: &str = "resource_id";

/// Parameter key carrying a filter expression.
pub const SQL_PARAM: &str = "sql";

/// Server-side query string restricting and ordering records by a date column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterExpression(String);

impl FilterExpression {
    /// Wraps a raw filter expression.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    /// Returns the expression text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which date predicate a filter uses, chosen from the bounds present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFilter {
    /// Inclusive range between two dates.
    Between {
        /// Lower bound.
        start: String,
        /// Upper bound.
        end: String,
    },
    /// Strictly before the end date.
    LessThan {
        /// Upper bound.
        end: String,
    },
    /// Strictly after the start date.
    GreaterThan {
        /// Lower bound.
        start: String,
    },
}

impl DateFilter {
    /// Picks the predicate for the given bounds.
    ///
    /// Dates are kept verbatim; no parsing or validation is done here.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MissingBounds`] if neither bound is given.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Self, FilterError> {
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self::Between {
                start: start.to_string(),
                end: end.to_string(),
            }),
            (None, Some(end)) => Ok(Self::LessThan {
                end: end.to_string(),
            }),
            (Some(start), None) => Ok(Self::GreaterThan {
                start: start.to_string(),
            }),
            (None, None) => Err(FilterError::MissingBounds),
        }
    }

    /// Renders the filter against a resource, ordered by `column` ascending.
    ///
    /// The column is double-quoted but not escaped, so it must come from
    /// trusted code rather than end-user input.
    #[must_use]
    pub fn to_sql(&self, resource_id: Uuid, column: &str) -> FilterExpression {
        let predicate = match self {
            Self::Between { start, end } => {
                format!("BETWEEN '{start}'::timestamp AND '{end}'::timestamp")
            }
            Self::LessThan { end } => format!("< '{end}'::timestamp"),
            Self::GreaterThan { start } => format!("> '{start}'::timestamp"),
        };
        FilterExpression(format!(
            r#"SELECT * from "{resource_id}" WHERE "{column}" {predicate} ORDER BY "{column}""#
        ))
    }
}

/// Builds a date-range filter expression for a resource.
///
/// # Example
///
/// ```
/// use harmonize_fetch::build_date_filter;
/// use uuid::Uuid;
///
/// let rid = Uuid::parse_str("ddc4afde-d2bd-424d-891c-56ad49c13d1a").unwrap();
/// let sql = build_date_filter(rid, "EFA Date", Some("2024-01-01"), None).unwrap();
/// assert_eq!(
///     sql.as_str(),
///     r#"SELECT * from "ddc4afde-d2bd-424d-891c-56ad49c13d1a" WHERE "EFA Date" > '2024-01-01'::timestamp ORDER BY "EFA Date""#
/// );
/// ```
///
/// # Errors
///
/// Returns [`FilterError::MissingBounds`] if neither bound is given.
pub fn build_date_filter(
    resource_id: Uuid,
    column: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<FilterExpression, FilterError> {
    Ok(DateFilter::from_bounds(start, end)?.to_sql(resource_id, column))
}

/// Immutable set of query-string parameters.
///
/// Every modifier returns a new set, so a parameter set handed to one request
/// can never leak into another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns a copy with `key` set to `value`.
    #[must_use]
    pub fn with(&self, key: impl Into<String>, value: impl ToString) -> Self {
        let mut params = self.0.clone();
        params.insert(key.into(), value.to_string());
        Self(params)
    }

    /// Returns a copy without `key`.
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        let mut params = self.0.clone();
        params.remove(key);
        Self(params)
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the parameters as key/value pairs, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the parameters as owned pairs for the HTTP layer.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}

/// Non-fatal diagnostic raised while resolving a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Advisory {
    /// A date range replaced a caller-supplied filter expression.
    SqlOverridden,
    /// A date bound was given without naming the column to filter on.
    MissingDateColumn,
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SqlOverridden => {
                f.write_str("the start and end date query will overwrite the provided SQL")
            }
            Self::MissingDateColumn => f.write_str(
                "a date column must be provided when a start or end date is given",
            ),
        }
    }
}

/// A datastore query against the bound stream.
///
/// Empty strings count as absent for the date bounds and the raw filter.
///
/// ```
/// use harmonize_fetch::Query;
///
/// let query = Query::new()
///     .date_column("EFA Date")
///     .start_date("2024-01-01")
///     .param("limit", 500);
/// assert_eq!(query.params().get("limit"), Some("500"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: QueryParams,
    start_date: Option<String>,
    end_date: Option<String>,
    date_column: Option<String>,
    sql: Option<String>,
}

impl Query {
    /// Creates a query listing every record of the stream.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a passthrough parameter (e.g. `limit`).
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params = self.params.with(key, value);
        self
    }

    /// Replaces all passthrough parameters.
    #[must_use]
    pub fn params_from(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the lower date bound.
    #[must_use]
    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = non_empty(date.into());
        self
    }

    /// Sets the upper date bound.
    #[must_use]
    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = non_empty(date.into());
        self
    }

    /// Sets the column the date bounds apply to.
    #[must_use]
    pub fn date_column(mut self, column: impl Into<String>) -> Self {
        self.date_column = non_empty(column.into());
        self
    }

    /// Sets a raw filter expression, used only when no date bound is given.
    #[must_use]
    pub fn sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = non_empty(sql.into());
        self
    }

    /// Returns the passthrough parameters.
    #[must_use]
    pub const fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Returns true if a date bound is set.
    #[must_use]
    pub const fn has_date_bounds(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Resolves the query into request parameters and an optional filter.
    ///
    /// Date bounds take precedence over a raw filter expression. Caller
    /// `resource_id` and `sql` parameters are always dropped; the client
    /// injects its own.
    #[must_use]
    pub fn resolve(&self, resource_id: Uuid) -> ResolvedQuery {
        let mut advisories = Vec::new();

        let date_filter =
            DateFilter::from_bounds(self.start_date.as_deref(), self.end_date.as_deref()).ok();

        let filter = match date_filter {
            Some(date_filter) => {
                if self.sql.is_some() {
                    advisories.push(Advisory::SqlOverridden);
                }
                if self.date_column.is_none() {
                    advisories.push(Advisory::MissingDateColumn);
                }
                let column = self.date_column.as_deref().unwrap_or_default();
                Some(date_filter.to_sql(resource_id, column))
            }
            None => self.sql.as_deref().map(FilterExpression::new),
        };

        ResolvedQuery {
            params: self.params.without(RESOURCE_ID_PARAM).without(SQL_PARAM),
            filter,
            advisories,
        }
    }
}

/// A query ready to send: passthrough params, filter and advisories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    /// Passthrough parameters, without `resource_id` or `sql`.
    pub params: QueryParams,
    /// Filter expression, if any.
    pub filter: Option<FilterExpression>,
    /// Diagnostics raised while resolving.
    pub advisories: Vec<Advisory>,
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
