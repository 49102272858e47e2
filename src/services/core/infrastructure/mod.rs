// src/services/core/infrastructure/mod.rs

pub mod store;
pub mod table_config;

pub use store::{ItemKey, QueryRequest, StoreError, TableStore};
pub use table_config::{TableConfig, REFERRALS_BY_REFERRER_INDEX};
