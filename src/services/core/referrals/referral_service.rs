// src/services/core/referrals/referral_service.rs

use crate::services::core::infrastructure::{
    ItemKey, QueryRequest, TableConfig, TableStore, REFERRALS_BY_REFERRER_INDEX,
};
use crate::types::{ReferralLogEntry, UserActivitySummary, UserContext, UserRecord};
use crate::utils::{TabError, TabResult};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Queries a user's recruits and joins them against user records.
pub struct ReferralService {
    store: Arc<dyn TableStore>,
    tables: TableConfig,
}

impl ReferralService {
    pub fn new(store: Arc<dyn TableStore>, tables: TableConfig) -> Self {
        Self { store, tables }
    }

    /// Fetch the users recruited by `referring_user_id`, optionally bounded
    /// to referrals created within [`start_time`, `end_time`] (ISO-8601
    /// strings, inclusive on both ends).
    ///
    /// Returns one activity summary per referral-log row, in the order the
    /// index returned them. A recruit whose user record no longer exists is
    /// surfaced with null activity fields rather than dropped.
    pub async fn get_recruits(
        &self,
        user_context: &UserContext,
        referring_user_id: &str,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> TabResult<Vec<UserActivitySummary>> {
        if user_context.id != referring_user_id {
            return Err(TabError::authorization_error(
                "Users may only view their own recruits",
            ));
        }

        let request = self.build_recruits_query(referring_user_id, start_time, end_time);
        let referral_items = self.store.query(request).await.map_err(TabError::from)?;

        // No referral rows: skip the user fetch entirely. An empty batch-get
        // request is malformed at the store.
        if referral_items.is_empty() {
            return Ok(Vec::new());
        }

        let referral_logs = referral_items
            .into_iter()
            .map(parse_referral_log)
            .collect::<TabResult<Vec<ReferralLogEntry>>>()?;

        let keys = referral_logs
            .iter()
            .map(|log| ItemKey::hash(log.user_id.clone()))
            .collect();
        let user_items = self
            .store
            .batch_get(&self.tables.users, keys)
            .await
            .map_err(TabError::from)?;

        // The batch-get omits missing keys, so index the users it did find
        // and walk the referral rows in their original order.
        let mut users_by_id: HashMap<String, UserRecord> = HashMap::new();
        for item in user_items {
            let user = parse_user_record(item)?;
            users_by_id.insert(user.id.clone(), user);
        }

        Ok(referral_logs
            .iter()
            .map(|log| {
                let user = users_by_id.get(&log.user_id);
                UserActivitySummary {
                    recruited_at: log.created,
                    last_active: user.and_then(|u| u.last_tab_timestamp),
                    has_opened_one_tab: user
                        .and_then(|u| u.tabs)
                        .map(|tabs| tabs > 0)
                        .unwrap_or(false),
                }
            })
            .collect())
    }

    /// Builds the range query against the ReferralsByReferrer index. The
    /// referrer equality condition is always present and always last in the
    /// expression; the end bound of a BETWEEN gets the ":created_2" name so
    /// it never collides with the start bound.
    fn build_recruits_query(
        &self,
        referring_user_id: &str,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> QueryRequest {
        let mut names = BTreeMap::from([(
            "#referringUser".to_string(),
            "referringUser".to_string(),
        )]);
        let mut values = BTreeMap::from([(
            ":referringUser".to_string(),
            Value::String(referring_user_id.to_string()),
        )]);

        let key_condition_expression = match (start_time, end_time) {
            (None, None) => "(#referringUser = :referringUser)".to_string(),
            (Some(start), None) => {
                names.insert("#created".to_string(), "created".to_string());
                values.insert(":created".to_string(), Value::String(start.to_string()));
                "(#created >= :created) AND (#referringUser = :referringUser)".to_string()
            }
            (None, Some(end)) => {
                names.insert("#created".to_string(), "created".to_string());
                values.insert(":created".to_string(), Value::String(end.to_string()));
                "(#created <= :created) AND (#referringUser = :referringUser)".to_string()
            }
            (Some(start), Some(end)) => {
                names.insert("#created".to_string(), "created".to_string());
                values.insert(":created".to_string(), Value::String(start.to_string()));
                values.insert(":created_2".to_string(), Value::String(end.to_string()));
                "(#created BETWEEN :created AND :created_2) AND (#referringUser = :referringUser)"
                    .to_string()
            }
        };

        QueryRequest {
            table_name: self.tables.referral_data_log.clone(),
            index_name: Some(REFERRALS_BY_REFERRER_INDEX.to_string()),
            key_condition_expression,
            expression_attribute_names: names,
            expression_attribute_values: values,
        }
    }
}

fn parse_referral_log(item: Value) -> TabResult<ReferralLogEntry> {
    serde_json::from_value(item)
        .map_err(|e| TabError::database_error(format!("Malformed referral log item: {}", e)))
}

fn parse_user_record(item: Value) -> TabResult<UserRecord> {
    serde_json::from_value(item)
        .map_err(|e| TabError::database_error(format!("Malformed user item: {}", e)))
}
