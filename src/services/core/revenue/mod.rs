// src/services/core/revenue/mod.rs

pub mod aggregate;
pub mod decode;
pub mod revenue_service;

pub use aggregate::{aggregate_revenues, AGGREGATION_MAX};
pub use decode::{decode_revenue, EncodedRevenue, AMAZON_CPM_REVENUE_TYPE};
pub use revenue_service::RevenueService;
