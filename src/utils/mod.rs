// src/utils/mod.rs

pub mod hash;
pub mod lenient;

use chrono::{SecondsFormat, Utc};
use rand::Rng;

/// Canonical form for comparing teacher names: trimmed and lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Record identifier: current milliseconds followed by a random suffix in `0..1000`.
///
/// Not globally unique, but two records created in the same millisecond only
/// collide with probability 1/1000.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format!("{}{}", millis, suffix)
}

/// Current time as an ISO-8601 UTC string with millisecond precision,
/// e.g. `2025-01-01T08:30:00.000Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
