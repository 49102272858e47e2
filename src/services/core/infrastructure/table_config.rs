// src/services/core/infrastructure/table_config.rs

use crate::utils::{TabError, TabResult};

pub const DB_TABLE_NAME_APPENDIX_VAR: &str = "DB_TABLE_NAME_APPENDIX";

/// Secondary index on the referral log, partitioned by the referring user
/// and sorted by the referral's creation time.
pub const REFERRALS_BY_REFERRER_INDEX: &str = "ReferralsByReferrer";

/// Resolved table names, built once at startup and passed into services
/// explicitly. The appendix distinguishes deployment stages sharing one
/// store account (e.g. "-dev" -> "Users-dev").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub users: String,
    pub user_revenue_log: String,
    pub referral_data_log: String,
    pub widgets: String,
    pub user_widgets: String,
}

impl TableConfig {
    pub fn with_appendix(appendix: &str) -> Self {
        Self {
            users: format!("Users{}", appendix),
            user_revenue_log: format!("UserRevenueLog{}", appendix),
            referral_data_log: format!("ReferralDataLog{}", appendix),
            widgets: format!("Widgets{}", appendix),
            user_widgets: format!("UserWidgets{}", appendix),
        }
    }

    /// Reads the appendix from the environment, failing at construction
    /// time when it is unset. An empty value is valid and yields the bare
    /// base names.
    pub fn from_env() -> TabResult<Self> {
        let appendix = std::env::var(DB_TABLE_NAME_APPENDIX_VAR).map_err(|_| {
            TabError::configuration_error(format!(
                "The env variable \"{}\" must be defined.",
                DB_TABLE_NAME_APPENDIX_VAR
            ))
        })?;
        Ok(Self::with_appendix(&appendix))
    }
}
