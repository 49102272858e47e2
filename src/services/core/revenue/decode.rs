// src/services/core/revenue/decode.rs

use crate::utils::{TabError, TabResult};
use serde::{Deserialize, Serialize};

/// An encoded revenue payload received from the client, tagged with the
/// scheme used to encode it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedRevenue {
    pub encoding_type: String,
    pub encoded_value: String,
}

pub const AMAZON_CPM_REVENUE_TYPE: &str = "AMAZON_CPM";

/// Decodes an Amazon CPM code into a raw CPM value. Returns None when the
/// code does not resolve to a number.
fn decode_amazon_cpm(encoded_value: &str) -> Option<f64> {
    let cpm: f64 = encoded_value.trim().parse().ok()?;
    if cpm.is_finite() {
        Some(cpm)
    } else {
        None
    }
}

/// Converts an encoded revenue payload into a $USD float by the method the
/// payload's `encodingType` names. Each new encoding scheme adds one arm;
/// an unrecognized scheme is a hard error, never a silent default.
pub fn decode_revenue(revenue_obj: &EncodedRevenue) -> TabResult<f64> {
    match revenue_obj.encoding_type.as_str() {
        // Amazon reports CPM (cost per thousand impressions); divide by
        // 1000 for the per-impression amount.
        AMAZON_CPM_REVENUE_TYPE => match decode_amazon_cpm(&revenue_obj.encoded_value) {
            Some(decoded_cpm) => Ok(decoded_cpm / 1000.0),
            None => Err(TabError::decode_error(format!(
                "Amazon revenue code \"{}\" resolved to a nil value",
                revenue_obj.encoded_value
            ))),
        },
        _ => Err(TabError::decode_error(
            "Invalid \"encodingType\" field for revenue object transformation",
        )),
    }
}
