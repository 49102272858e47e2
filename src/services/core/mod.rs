// src/services/core/mod.rs

pub mod infrastructure;
pub mod referrals;
pub mod revenue;
pub mod widgets;
