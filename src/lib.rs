//! Data-access core for Tab for a Cause: revenue logging with
//! collision-safe timestamps, recruit queries over the referral log, and
//! the pure aggregations the dashboard reads.
//!
//! The backing table store and the request-handling layer (GraphQL
//! resolvers, authentication) are collaborators; the store is consumed
//! through the [`services::TableStore`] trait and the caller identity
//! arrives as a [`types::UserContext`].

// Module declarations
pub mod services;
pub mod types;
pub mod utils;

pub use services::core::infrastructure::{
    ItemKey, QueryRequest, StoreError, TableConfig, TableStore, REFERRALS_BY_REFERRER_INDEX,
};
pub use services::core::referrals::{
    get_recruits_active_for_at_least_one_day, get_recruits_with_at_least_one_tab,
    get_total_recruits_count, ReferralService,
};
pub use services::core::revenue::{
    aggregate_revenues, decode_revenue, EncodedRevenue, RevenueService,
};
pub use services::core::widgets::WidgetService;
pub use utils::{ErrorKind, TabError, TabResult};
