//! Random test-data generators.
//!
//! Stateless helpers for filling test payload fields. Each call draws from
//! the process RNG or the wall clock; there is no shared state between calls.

use chrono::Utc;
use rand::{Rng, distributions::Alphanumeric, thread_rng};

use crate::error::AppError;

/// `len` characters drawn uniformly from `[A-Za-z0-9]`, with replacement.
/// `len == 0` yields the empty string.
pub fn random_string(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// An email-shaped string: `test_<8 random alphanumerics>@example.com`.
/// Not unique across calls, but collisions in a 62^8 space are negligible.
pub fn random_email() -> String {
    format!("test_{}@example.com", random_string(8))
}

/// Uniform integer in the closed interval `[min, max]`.
/// `min > max` is reported as an invalid-range error.
pub fn random_int(min: i64, max: i64) -> Result<i64, AppError> {
    if min > max {
        return Err(AppError::InvalidRange { min, max });
    }
    Ok(thread_rng().gen_range(min..=max))
}

/// Milliseconds since the Unix epoch. Wall clock, so non-decreasing across
/// sequential calls; ties within one clock tick are possible.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Today's UTC date as `YYYY-MM-DD` — the date half of the ISO timestamp.
pub fn current_date() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
