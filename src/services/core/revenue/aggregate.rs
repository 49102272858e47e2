// src/services/core/revenue/aggregate.rs

use crate::utils::{TabError, TabResult};

pub const AGGREGATION_MAX: &str = "MAX";

/// Resolves multiple candidate revenue values down to one by the named
/// aggregation operation. Unrecognized names fail; they never fall back to
/// a default.
pub fn aggregate_revenues(revenues: &[f64], aggregation_operation: &str) -> TabResult<f64> {
    match aggregation_operation {
        AGGREGATION_MAX => revenues
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or_else(|| {
                TabError::validation_error("Cannot aggregate an empty list of revenue values")
            }),
        _ => Err(TabError::invalid_strategy(format!(
            "Invalid \"aggregationOperation\" value. Must be one of: \"{}\"",
            AGGREGATION_MAX
        ))),
    }
}
