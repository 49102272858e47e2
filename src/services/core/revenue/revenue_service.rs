// src/services/core/revenue/revenue_service.rs

use crate::services::core::infrastructure::{ItemKey, StoreError, TableConfig, TableStore};
use crate::services::core::revenue::aggregate::aggregate_revenues;
use crate::services::core::revenue::decode::{decode_revenue, EncodedRevenue};
use crate::types::{LogRevenueResponse, RevenueLogEntry, UserContext};
use crate::utils::{time, TabError, TabResult};
use std::sync::Arc;

/// Records revenue events in the user revenue log.
pub struct RevenueService {
    store: Arc<dyn TableStore>,
    tables: TableConfig,
}

impl RevenueService {
    pub fn new(store: Arc<dyn TableStore>, tables: TableConfig) -> Self {
        Self { store, tables }
    }

    /// Log revenue earned by a user.
    ///
    /// Either `revenue` or `encoded_revenue` must be provided; when both
    /// are, `aggregation_operation` names how to resolve them to one value.
    ///
    /// The log is keyed by (userId, timestamp). Two events can land on the
    /// same millisecond for one user, so a conditional create that loses to
    /// an existing item is retried exactly once under a timestamp perturbed
    /// by 1-20 ms. A second collision, or any other store failure, is
    /// surfaced to the caller.
    #[allow(clippy::too_many_arguments)]
    pub async fn log_revenue(
        &self,
        user_context: &UserContext,
        user_id: &str,
        revenue: Option<f64>,
        dfp_advertiser_id: Option<&str>,
        encoded_revenue: Option<&EncodedRevenue>,
        aggregation_operation: Option<&str>,
        tab_id: Option<&str>,
    ) -> TabResult<LogRevenueResponse> {
        if user_context.id != user_id {
            return Err(TabError::authorization_error(
                "Users may only log revenue for themselves",
            ));
        }
        if let Some(tab_id) = tab_id {
            uuid::Uuid::parse_str(tab_id).map_err(|_| {
                TabError::validation_error(format!("\"tabId\" must be a valid UUID: {}", tab_id))
            })?;
        }

        let decoded_revenue = match encoded_revenue {
            Some(obj) => Some(decode_revenue(obj)?),
            None => None,
        };

        let revenue_to_log = match (revenue, decoded_revenue) {
            (None, None) => {
                return Err(TabError::missing_revenue(
                    "Revenue logging requires either \"revenue\" or \"encodedRevenue\" values",
                ))
            }
            (Some(val), None) => val,
            (None, Some(val)) => val,
            (Some(raw), Some(decoded)) => {
                let operation = aggregation_operation.ok_or_else(|| {
                    TabError::missing_aggregation_strategy(
                        "Revenue logging requires an \"aggregationOperation\" value if both \
                         \"revenue\" and \"encodedRevenue\" values are provided",
                    )
                })?;
                aggregate_revenues(&[raw, decoded], operation)?
            }
        };

        let timestamp = time::now_utc();
        match self
            .create_revenue_log_item(
                user_id,
                &time::to_iso_millis(timestamp),
                revenue_to_log,
                dfp_advertiser_id,
                tab_id,
            )
            .await
        {
            Ok(()) => {}
            // An item already exists at (userId, timestamp): two events
            // logged within the same millisecond. Perturb the sort key and
            // retry once; a second collision is fatal.
            Err(StoreError::KeyCollision { .. }) => {
                let retry_timestamp = time::to_iso_millis(time::add_millisecond_jitter(timestamp));
                log::warn!(
                    "revenue log timestamp collision for user {}; retrying at {}",
                    user_id,
                    retry_timestamp
                );
                self.create_revenue_log_item(
                    user_id,
                    &retry_timestamp,
                    revenue_to_log,
                    dfp_advertiser_id,
                    tab_id,
                )
                .await?;
            }
            Err(other) => return Err(other.into()),
        }

        Ok(LogRevenueResponse { success: true })
    }

    async fn create_revenue_log_item(
        &self,
        user_id: &str,
        timestamp: &str,
        revenue: f64,
        dfp_advertiser_id: Option<&str>,
        tab_id: Option<&str>,
    ) -> Result<(), StoreError> {
        let entry = RevenueLogEntry {
            user_id: user_id.to_string(),
            timestamp: timestamp.to_string(),
            revenue,
            dfp_advertiser_id: dfp_advertiser_id.map(str::to_string),
            tab_id: tab_id.map(str::to_string),
        };
        let item = serde_json::to_value(&entry)
            .map_err(|e| StoreError::Malformed(format!("Failed to serialize log entry: {}", e)))?;
        self.store
            .create(
                &self.tables.user_revenue_log,
                ItemKey::composite(user_id, timestamp),
                item,
            )
            .await
    }
}
