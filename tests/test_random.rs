//! Distribution and shape properties of the random test-data helpers.

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use regex::Regex;

use api_harness::random;

#[test]
fn test_random_string_alphabet() {
    let re = Regex::new(r"^[A-Za-z0-9]*$").unwrap();
    for len in [0usize, 1, 8, 100] {
        let s = random::random_string(len);
        assert_eq!(s.len(), len);
        assert!(re.is_match(&s), "unexpected character in {s:?}");
    }
}

#[test]
fn test_random_email_pattern() {
    let re = Regex::new(r"^test_[A-Za-z0-9]{8}@example\.com$").unwrap();
    for _ in 0..50 {
        let email = random::random_email();
        assert!(re.is_match(&email), "bad email shape: {email}");
    }
}

#[test]
fn test_random_int_stays_in_bounds_and_covers_range() {
    // Distributional smoke test: 10k draws from [1, 10] must stay in range
    // and hit every value. P(missing one value) < 10 * 0.9^10000.
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let v = random::random_int(1, 10).unwrap();
        assert!((1..=10).contains(&v), "out of range: {v}");
        seen.insert(v);
    }
    assert_eq!(seen.len(), 10, "not all values of [1, 10] appeared");
}

#[test]
fn test_current_date_agrees_with_timestamp() {
    let re = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    // Retry across midnight: date and timestamp must agree for at least one
    // of two consecutive attempts.
    for attempt in 0..2 {
        let date = random::current_date();
        let ts = random::current_timestamp_ms();
        assert!(re.is_match(&date), "bad date shape: {date}");
        let from_ts = Utc
            .timestamp_millis_opt(ts)
            .single()
            .expect("timestamp in range")
            .format("%Y-%m-%d")
            .to_string();
        if date == from_ts {
            return;
        }
        assert_eq!(attempt, 0, "date {date} disagrees with timestamp date {from_ts}");
    }
}
