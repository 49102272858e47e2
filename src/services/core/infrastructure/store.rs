// src/services/core/infrastructure/store.rs

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Primary key of a stored item: hash key plus an optional range key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub hash_key: String,
    pub range_key: Option<String>,
}

impl ItemKey {
    pub fn hash(hash_key: impl Into<String>) -> Self {
        Self {
            hash_key: hash_key.into(),
            range_key: None,
        }
    }

    pub fn composite(hash_key: impl Into<String>, range_key: impl Into<String>) -> Self {
        Self {
            hash_key: hash_key.into(),
            range_key: Some(range_key.into()),
        }
    }
}

/// A range query against a table or one of its secondary indexes.
///
/// The expression fields mirror the wire shape of the backing store so a
/// reimplementation against the same store stays byte-compatible with the
/// queries the original deployment issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub table_name: String,
    pub index_name: Option<String>,
    pub key_condition_expression: String,
    pub expression_attribute_names: BTreeMap<String, String>,
    pub expression_attribute_values: BTreeMap<String, Value>,
}

/// Failure taxonomy of the store collaborator. A write that loses to an
/// existing item at the same key must be distinguishable from every other
/// failure; the revenue recorder's retry branch depends on it.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("an item already exists at key ({hash_key}, {range_key:?})")]
    KeyCollision {
        hash_key: String,
        range_key: Option<String>,
    },
    #[error("store request failed: {0}")]
    Request(String),
    #[error("malformed store response: {0}")]
    Malformed(String),
}

/// Contract of the backing key-value table store.
///
/// Consumed, not implemented, by this core: production wires in the managed
/// store client, tests wire in a mock. All methods are single network
/// round-trips; `batch_get` in particular is one multi-key request, never a
/// fan-out of individual gets.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Conditional create: writes `item` at `key` iff no item exists there,
    /// failing with [`StoreError::KeyCollision`] otherwise.
    async fn create(&self, table: &str, key: ItemKey, item: Value) -> Result<(), StoreError>;

    /// Range query returning items in index order.
    async fn query(&self, request: QueryRequest) -> Result<Vec<Value>, StoreError>;

    /// Fetches the subset of `keys` that exist, silently omitting the rest.
    async fn batch_get(&self, table: &str, keys: Vec<ItemKey>) -> Result<Vec<Value>, StoreError>;
}
