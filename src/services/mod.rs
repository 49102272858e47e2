// src/services/mod.rs

// Core services organized by domain
pub mod core;

// Re-export commonly used services
pub use self::core::infrastructure::{ItemKey, QueryRequest, StoreError, TableConfig, TableStore};
pub use self::core::referrals::ReferralService;
pub use self::core::revenue::RevenueService;
pub use self::core::widgets::WidgetService;
