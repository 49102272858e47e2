// src/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated caller, as resolved by the authorization collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub id: String,
    pub email: Option<String>,
    pub email_verified: bool,
}

impl UserContext {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            email_verified: false,
        }
    }
}

/// One row of the revenue log. Unique on (userId, timestamp); written once
/// via conditional create and never mutated. Optional fields are omitted
/// from the stored item entirely when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueLogEntry {
    pub user_id: String,
    /// ISO-8601 UTC, millisecond precision (sort key).
    pub timestamp: String,
    /// Non-negative $USD amount.
    pub revenue: f64,
    /// Stringified because some DFP advertiser IDs exceed 32 bits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dfp_advertiser_id: Option<String>,
    /// UUID of the browser tab the revenue was created on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<String>,
}

/// One row of the referral log, read through the ReferralsByReferrer index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralLogEntry {
    pub user_id: String,
    pub referring_user: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// The slice of a user row this core reads when joining recruits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_tab_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabs: Option<u64>,
}

/// Derived per-recruit activity summary. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivitySummary {
    pub recruited_at: DateTime<Utc>,
    pub last_active: Option<DateTime<Utc>>,
    pub has_opened_one_tab: bool,
}

/// Paginated-list shape the recruit metrics consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruitEdge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    pub node: UserActivitySummary,
}

/// One row of the UserWidgets table: a user's state for a single widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWidgetRecord {
    pub user_id: String,
    pub widget_id: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub config: serde_json::Value,
}

/// One row of the Widgets table: widget definition shared by all users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseWidgetRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub widget_type: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default)]
    pub position: i64,
}

/// A base widget merged with the user's widget state. The JSON-valued
/// fields are serialized into strings for the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullWidget {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub widget_type: String,
    pub icon: Option<String>,
    pub enabled: bool,
    pub visible: bool,
    pub data: String,
    pub config: String,
    pub settings: String,
    pub position: i64,
}

/// Response of a confirmed revenue-log write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRevenueResponse {
    pub success: bool,
}
