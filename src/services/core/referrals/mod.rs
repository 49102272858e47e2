// src/services/core/referrals/mod.rs

pub mod recruit_stats;
pub mod referral_service;

pub use recruit_stats::{
    get_recruits_active_for_at_least_one_day, get_recruits_with_at_least_one_tab,
    get_total_recruits_count,
};
pub use referral_service::ReferralService;
