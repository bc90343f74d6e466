//! End-to-end tests of `StreamClient` against an in-memory datastore.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use harmonize_fetch::{
    Advisory, ClientConfig, DatastoreClient, MemoryCache, Query, RawResponse, StreamClient,
    Transport,
};
use harmonize_types::{HarmonizeError, TransportError};
use serde_json::json;

/// Answers like CKAN: `_sql` requests are checked for a parseable timestamp.
#[derive(Debug, Default)]
struct FakeDatastore {
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeDatastore {
    fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeDatastore {
    async fn get(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<RawResponse, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), params.to_vec()));

        let bad_timestamp = params
            .iter()
            .any(|(k, v)| k == "sql" && v.contains("'yesterday-ish'"));

        if bad_timestamp {
            let body = json!({
                "success": false,
                "error": {"message": "invalid input syntax for type timestamp: \"yesterday-ish\""}
            });
            return Ok(RawResponse::new(409, url, body.to_string()));
        }

        let body = json!({
            "success": true,
            "result": {
                "records": [
                    {"_id": 1, "Unit Name": "CONTB-1", "EFA": "1", "Clearing Price": "4.50"},
                    {"_id": 2, "Unit Name": "BHOLB-1", "EFA": "1", "Clearing Price": "3.10"}
                ]
            }
        });
        Ok(RawResponse::new(200, url, body.to_string())
            .with_header("Content-Type", "application/json"))
    }
}

/// Fails every request as if the host were unreachable.
#[derive(Debug)]
struct Unreachable;

#[async_trait]
impl Transport for Unreachable {
    async fn get(
        &self,
        _url: &str,
        _params: &[(String, String)],
    ) -> Result<RawResponse, TransportError> {
        Err(TransportError::Connect("dns error".to_string()))
    }
}

fn client_with(transport: Arc<dyn Transport>) -> StreamClient {
    let client = DatastoreClient::from_parts(
        ClientConfig::default(),
        transport,
        Arc::new(MemoryCache::new()),
    );
    StreamClient::new(client, "unit_dstack_response").unwrap()
}

fn efa_query() -> Query {
    Query::new()
        .date_column("EFA Date")
        .start_date("2024-01-01")
        .end_date("2024-01-01")
}

#[tokio::test]
async fn test_query_returns_table() {
    let datastore = Arc::new(FakeDatastore::default());
    let client = client_with(datastore.clone());

    let outcome = client.query(&efa_query()).await.unwrap();

    assert!(outcome.advisories.is_empty());
    assert_eq!(outcome.value.len(), 2);
    assert_eq!(
        outcome.value.columns(),
        ["_id", "Unit Name", "EFA", "Clearing Price"]
    );

    let calls = datastore.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.ends_with("datastore_search_sql"));
}

#[tokio::test]
async fn test_identical_queries_fetch_once() {
    let datastore = Arc::new(FakeDatastore::default());
    let client = client_with(datastore.clone());

    let first = client.query(&efa_query()).await.unwrap();
    let second = client.query(&efa_query()).await.unwrap();

    assert_eq!(first.value, second.value);
    assert_eq!(datastore.calls().len(), 1);
}

#[tokio::test]
async fn test_new_day_is_a_new_cache_key() {
    let datastore = Arc::new(FakeDatastore::default());
    let client = client_with(datastore.clone());

    client.query(&efa_query()).await.unwrap();
    client
        .query(&efa_query().start_date("2024-01-02").end_date("2024-01-02"))
        .await
        .unwrap();

    assert_eq!(datastore.calls().len(), 2);
}

#[tokio::test]
async fn test_malformed_date_surfaces_as_api_error() {
    let datastore = Arc::new(FakeDatastore::default());
    let client = client_with(datastore.clone());

    let query = Query::new()
        .date_column("EFA Date")
        .start_date("yesterday-ish");
    let err = client.query(&query).await.unwrap_err();

    assert!(matches!(
        err,
        HarmonizeError::Api(ref message) if message.contains("yesterday-ish")
    ));
    assert_eq!(datastore.calls().len(), 1);
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let client = client_with(Arc::new(Unreachable));

    let err = client.query(&Query::new()).await.unwrap_err();

    assert!(matches!(
        err,
        HarmonizeError::Transport(TransportError::Connect(_))
    ));
}

#[tokio::test]
async fn test_date_range_overrides_sql_with_advisory() {
    let datastore = Arc::new(FakeDatastore::default());
    let client = client_with(datastore.clone());

    let outcome = client
        .query(&efa_query().sql("SELECT * FROM elsewhere"))
        .await
        .unwrap();

    assert_eq!(outcome.advisories, vec![Advisory::SqlOverridden]);
    let calls = datastore.calls();
    let (_, params) = &calls[0];
    let sql = params.iter().find(|(k, _)| k == "sql").unwrap();
    assert!(!sql.1.contains("elsewhere"));
    assert!(sql.1.contains("BETWEEN '2024-01-01'::timestamp"));
}

#[tokio::test]
async fn test_raw_mode_keeps_http_details() {
    let datastore = Arc::new(FakeDatastore::default());
    let client = client_with(datastore.clone());

    let outcome = client
        .query_raw(&Query::new().param("limit", 10))
        .await
        .unwrap();

    assert_eq!(outcome.value.status(), 200);
    assert_eq!(
        outcome.value.header("content-type"),
        Some("application/json")
    );

    let calls = datastore.calls();
    let (url, params) = &calls[0];
    assert!(url.ends_with("datastore_search"));
    assert!(params.iter().any(|(k, v)| k == "limit" && v == "10"));
}

#[tokio::test]
async fn test_raw_and_decoded_share_cache() {
    let datastore = Arc::new(FakeDatastore::default());
    let client = client_with(datastore.clone());

    client.query_raw(&efa_query()).await.unwrap();
    client.query(&efa_query()).await.unwrap();

    assert_eq!(datastore.calls().len(), 1);
}
