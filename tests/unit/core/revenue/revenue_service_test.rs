// RevenueService unit tests
// Input resolution, stored item shape, and the collision-retry protocol.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tab_cause::types::UserContext;
use tab_cause::{
    EncodedRevenue, ErrorKind, ItemKey, QueryRequest, RevenueService, StoreError, TableConfig,
    TableStore,
};

/// Mock store that records every create and can simulate key collisions or
/// an unrelated store failure for the first N attempts.
struct MockStore {
    creates: Mutex<Vec<(String, ItemKey, Value)>>,
    collisions_remaining: AtomicUsize,
    request_failure: Option<String>,
}

impl MockStore {
    fn new() -> Self {
        Self {
            creates: Mutex::new(Vec::new()),
            collisions_remaining: AtomicUsize::new(0),
            request_failure: None,
        }
    }

    fn with_collisions(count: usize) -> Self {
        let store = Self::new();
        store.collisions_remaining.store(count, Ordering::SeqCst);
        store
    }

    fn with_request_failure(message: &str) -> Self {
        Self {
            request_failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    fn recorded_creates(&self) -> Vec<(String, ItemKey, Value)> {
        self.creates.lock().unwrap().clone()
    }
}

#[async_trait]
impl TableStore for MockStore {
    async fn create(&self, table: &str, key: ItemKey, item: Value) -> Result<(), StoreError> {
        self.creates
            .lock()
            .unwrap()
            .push((table.to_string(), key.clone(), item));

        if let Some(message) = &self.request_failure {
            return Err(StoreError::Request(message.clone()));
        }
        let remaining = self.collisions_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.collisions_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(StoreError::KeyCollision {
                hash_key: key.hash_key,
                range_key: key.range_key,
            });
        }
        Ok(())
    }

    async fn query(&self, _request: QueryRequest) -> Result<Vec<Value>, StoreError> {
        unimplemented!("RevenueService never queries")
    }

    async fn batch_get(&self, _table: &str, _keys: Vec<ItemKey>) -> Result<Vec<Value>, StoreError> {
        unimplemented!("RevenueService never batch-gets")
    }
}

fn service_with(store: Arc<MockStore>) -> RevenueService {
    RevenueService::new(store, TableConfig::with_appendix(""))
}

fn user() -> UserContext {
    UserContext::new("abcdefghijklmno")
}

fn amazon_cpm(encoded_value: &str) -> EncodedRevenue {
    EncodedRevenue {
        encoding_type: "AMAZON_CPM".to_string(),
        encoded_value: encoded_value.to_string(),
    }
}

#[tokio::test]
async fn logs_plain_revenue_value() {
    let store = Arc::new(MockStore::new());
    let service = service_with(store.clone());

    let response = service
        .log_revenue(&user(), "abcdefghijklmno", Some(0.0172), None, None, None, None)
        .await
        .unwrap();
    assert!(response.success);

    let creates = store.recorded_creates();
    assert_eq!(creates.len(), 1);
    let (table, key, item) = &creates[0];
    assert_eq!(table, "UserRevenueLog");
    assert_eq!(key.hash_key, "abcdefghijklmno");
    assert_eq!(item["userId"], "abcdefghijklmno");
    assert_eq!(item["revenue"], 0.0172);
    assert_eq!(item["timestamp"], json!(key.range_key.clone().unwrap()));
    // Optional fields are omitted, not written as null.
    assert!(item.get("dfpAdvertiserId").is_none());
    assert!(item.get("tabId").is_none());
}

#[tokio::test]
async fn logs_decoded_encoded_revenue() {
    let store = Arc::new(MockStore::new());
    let service = service_with(store.clone());

    service
        .log_revenue(
            &user(),
            "abcdefghijklmno",
            None,
            None,
            Some(&amazon_cpm("9.9")),
            None,
            None,
        )
        .await
        .unwrap();

    let creates = store.recorded_creates();
    assert_eq!(creates.len(), 1);
    let revenue = creates[0].2["revenue"].as_f64().unwrap();
    assert!((revenue - 0.0099).abs() < 1e-12);
}

#[tokio::test]
async fn includes_optional_fields_when_provided() {
    let store = Arc::new(MockStore::new());
    let service = service_with(store.clone());
    let tab_id = uuid::Uuid::new_v4().to_string();

    service
        .log_revenue(
            &user(),
            "abcdefghijklmno",
            Some(0.002),
            Some("1234567890123456789"),
            None,
            None,
            Some(&tab_id),
        )
        .await
        .unwrap();

    let item = &store.recorded_creates()[0].2;
    assert_eq!(item["dfpAdvertiserId"], "1234567890123456789");
    assert_eq!(item["tabId"], json!(tab_id));
}

#[tokio::test]
async fn rejects_malformed_tab_id() {
    let store = Arc::new(MockStore::new());
    let service = service_with(store.clone());

    let err = service
        .log_revenue(
            &user(),
            "abcdefghijklmno",
            Some(0.002),
            None,
            None,
            None,
            Some("not-a-uuid"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ValidationError);
    assert!(store.recorded_creates().is_empty());
}

#[tokio::test]
async fn fails_when_no_revenue_value_is_supplied() {
    let store = Arc::new(MockStore::new());
    let service = service_with(store.clone());

    let err = service
        .log_revenue(&user(), "abcdefghijklmno", None, None, None, None, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingRevenueError);
    assert!(store.recorded_creates().is_empty());
}

#[tokio::test]
async fn requires_aggregation_operation_when_both_values_supplied() {
    let store = Arc::new(MockStore::new());
    let service = service_with(store.clone());

    let err = service
        .log_revenue(
            &user(),
            "abcdefghijklmno",
            Some(5.0),
            None,
            Some(&amazon_cpm("3000")),
            None,
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingAggregationStrategyError);
    assert!(store.recorded_creates().is_empty());
}

#[tokio::test]
async fn aggregates_with_max_when_both_values_supplied() {
    let store = Arc::new(MockStore::new());
    let service = service_with(store.clone());

    // revenue = 5, decoded encodedRevenue = 3000 CPM / 1000 = 3; MAX -> 5.
    service
        .log_revenue(
            &user(),
            "abcdefghijklmno",
            Some(5.0),
            None,
            Some(&amazon_cpm("3000")),
            Some("MAX"),
            None,
        )
        .await
        .unwrap();

    assert_eq!(store.recorded_creates()[0].2["revenue"], 5.0);
}

#[tokio::test]
async fn surfaces_decode_failures_before_writing() {
    let store = Arc::new(MockStore::new());
    let service = service_with(store.clone());

    let err = service
        .log_revenue(
            &user(),
            "abcdefghijklmno",
            None,
            None,
            Some(&amazon_cpm("garbage")),
            None,
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::DecodeError);
    assert!(store.recorded_creates().is_empty());
}

#[tokio::test]
async fn retries_once_with_perturbed_timestamp_on_collision() {
    let store = Arc::new(MockStore::with_collisions(1));
    let service = service_with(store.clone());

    let response = service
        .log_revenue(&user(), "abcdefghijklmno", Some(0.014), None, None, None, None)
        .await
        .unwrap();
    assert!(response.success);

    let creates = store.recorded_creates();
    assert_eq!(creates.len(), 2);
    let first: DateTime<Utc> = creates[0].1.range_key.clone().unwrap().parse().unwrap();
    let second: DateTime<Utc> = creates[1].1.range_key.clone().unwrap().parse().unwrap();
    let offset_ms = (second - first).num_milliseconds();
    assert!(
        (1..=20).contains(&offset_ms),
        "retry timestamp offset was {} ms",
        offset_ms
    );
    assert_eq!(creates[1].2["revenue"], 0.014);
}

#[tokio::test]
async fn second_collision_is_fatal() {
    let store = Arc::new(MockStore::with_collisions(2));
    let service = service_with(store.clone());

    let err = service
        .log_revenue(&user(), "abcdefghijklmno", Some(0.014), None, None, None, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::KeyCollisionError);
    // Exactly two attempts; never an unbounded retry storm.
    assert_eq!(store.recorded_creates().len(), 2);
}

#[tokio::test]
async fn non_collision_store_failures_are_not_retried() {
    let store = Arc::new(MockStore::with_request_failure("throughput exceeded"));
    let service = service_with(store.clone());

    let err = service
        .log_revenue(&user(), "abcdefghijklmno", Some(0.014), None, None, None, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::DatabaseError);
    assert!(err.message.contains("throughput exceeded"));
    assert_eq!(store.recorded_creates().len(), 1);
}

#[tokio::test]
async fn rejects_logging_for_another_user() {
    let store = Arc::new(MockStore::new());
    let service = service_with(store.clone());

    let err = service
        .log_revenue(&user(), "somebody-else", Some(0.014), None, None, None, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AuthorizationError);
    assert!(store.recorded_creates().is_empty());
}
