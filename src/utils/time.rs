// src/utils/time.rs

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;

/// Formats a datetime as ISO-8601 UTC with millisecond precision, the
/// format revenue-log sort keys are stored in.
pub fn to_iso_millis(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Gets the current UTC date and time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Adds a pseudo-random offset of 1 to 20 milliseconds (inclusive) to a
/// datetime. Used to perturb a revenue-log sort key after a collision on
/// the original timestamp.
pub fn add_millisecond_jitter(dt: DateTime<Utc>) -> DateTime<Utc> {
    let ms_to_add = rand::thread_rng().gen_range(1..=20);
    dt + Duration::milliseconds(ms_to_add)
}
