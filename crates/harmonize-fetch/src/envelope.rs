//! CKAN response envelope decoding and validation.

use harmonize_types::{HarmonizeError, Record, Result, Table};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::RawResponse;

/// Top-level CKAN action response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Whether the action succeeded.
    pub success: bool,
    /// Result set, present on success.
    #[serde(default)]
    pub result: Option<ResultSet>,
    /// Error object, present on failure.
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
    /// Link to the action documentation.
    #[serde(default)]
    pub help: Option<String>,
}

/// Records and metadata returned by `datastore_search[_sql]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultSet {
    /// Records in server order.
    #[serde(default)]
    pub records: Vec<Record>,
    /// Column descriptions.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Total number of matching records (listing endpoint only).
    #[serde(default)]
    pub total: Option<u64>,
    /// Executed SQL (filter endpoint only).
    #[serde(default)]
    pub sql: Option<String>,
}

/// A datastore column description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Field {
    /// Column name.
    pub id: String,
    /// Postgres type name (e.g. `text`, `numeric`, `timestamp`).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Error object of a failed action.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// CKAN error class (e.g. `Validation Error`).
    #[serde(rename = "__type", default)]
    pub kind: Option<String>,
    /// Any other fields, such as per-parameter validation messages.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ApiErrorBody {
    /// Returns the message to surface to callers.
    ///
    /// Validation errors often carry no `message`; their details are rendered
    /// as JSON instead.
    #[must_use]
    pub fn display_message(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        let details = Value::Object(self.details.clone()).to_string();
        match &self.kind {
            Some(kind) => format!("{kind}: {details}"),
            None => details,
        }
    }
}

/// Decodes a raw response into an envelope.
///
/// The HTTP status is not checked: CKAN reports failures such as bad SQL with
/// a 4xx status and a regular envelope.
///
/// # Errors
///
/// Returns [`HarmonizeError::InvalidResponse`] if the body is not an envelope.
pub fn decode(response: &RawResponse) -> Result<Envelope> {
    response.json::<Envelope>().map_err(|e| {
        HarmonizeError::InvalidResponse(format!("HTTP {}: {e}", response.status()))
    })
}

/// Checks the success flag and normalizes the records into a table.
///
/// # Errors
///
/// Returns [`HarmonizeError::Api`] with the server message on `success: false`,
/// or [`HarmonizeError::InvalidResponse`] on a success without a result.
pub fn validate_and_extract(envelope: Envelope) -> Result<Table> {
    if !envelope.success {
        let message = envelope.error.map_or_else(
            || "request failed without an error message".to_string(),
            |error| error.display_message(),
        );
        return Err(HarmonizeError::Api(message));
    }

    let result = envelope.result.ok_or_else(|| {
        HarmonizeError::InvalidResponse("successful response without a result".to_string())
    })?;

    Ok(Table::from_records(result.records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_api_error_message_verbatim() {
        let result = validate_and_extract(envelope(json!({
            "success": false,
            "error": {"message": "boom"}
        })));
        assert!(matches!(result, Err(HarmonizeError::Api(m)) if m == "boom"));
    }

    #[test]
    fn test_validation_error_without_message() {
        let result = validate_and_extract(envelope(json!({
            "success": false,
            "error": {"__type": "Validation Error", "resource_id": ["Not found"]}
        })));
        match result {
            Err(HarmonizeError::Api(message)) => {
                assert!(message.starts_with("Validation Error: "));
                assert!(message.contains("Not found"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_failure_without_error_object() {
        let result = validate_and_extract(envelope(json!({"success": false})));
        assert!(matches!(result, Err(HarmonizeError::Api(_))));
    }

    #[test]
    fn test_records_become_table() {
        let table = validate_and_extract(envelope(json!({
            "success": true,
            "result": {
                "records": [
                    {"_id": 1, "Unit Name": "CONTB-1", "EFA": "1"},
                    {"_id": 2, "Unit Name": "BHOLB-1", "EFA": "2"}
                ],
                "fields": [{"id": "_id", "type": "int"}],
                "total": 2
            }
        })))
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), ["_id", "Unit Name", "EFA"]);
        assert_eq!(table.value(1, "Unit Name"), Some(&json!("BHOLB-1")));
    }

    #[test]
    fn test_empty_records_are_valid() {
        let table = validate_and_extract(envelope(json!({
            "success": true,
            "result": {"records": []}
        })))
        .unwrap();

        assert_eq!(table.len(), 0);
        assert_eq!(table.width(), 0);
    }

    #[test]
    fn test_success_without_result() {
        let result = validate_and_extract(envelope(json!({"success": true})));
        assert!(matches!(result, Err(HarmonizeError::InvalidResponse(_))));
    }

    #[test]
    fn test_decode_non_json_body() {
        let response = RawResponse::new(502, "https://example.test", "<html>Bad Gateway</html>");
        let result = decode(&response);
        assert!(matches!(
            result,
            Err(HarmonizeError::InvalidResponse(m)) if m.starts_with("HTTP 502")
        ));
    }

    #[test]
    fn test_decode_error_envelope_with_4xx_status() {
        let response = RawResponse::new(
            409,
            "https://example.test",
            r#"{"success": false, "error": {"message": "invalid input syntax for type timestamp"}}"#,
        );
        let envelope = decode(&response).unwrap();
        assert!(!envelope.success);
        assert!(validate_and_extract(envelope).unwrap_err().is_api());
    }
}
