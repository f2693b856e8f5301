//! Shared fixtures for unit tests.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::types::{Job, TimeWindow};

/// A date in October 2026.
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

pub fn job_id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

/// Creation timestamp `offset` minutes after a fixed base.
pub fn created(offset: i64) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-01T08:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
        + Duration::minutes(offset)
}

/// Job in Brno with the given load.
pub fn job(
    n: u128,
    date: NaiveDate,
    window: TimeWindow,
    weight: f64,
    volume: f64,
    created_offset: i64,
) -> Job {
    Job::new(job_id(n), date, "Brno", created(created_offset))
        .with_window(window)
        .with_load(weight, volume)
}

/// Job at `location` with a small load.
pub fn job_at(n: u128, date: NaiveDate, location: &str, window: TimeWindow, created_offset: i64) -> Job {
    Job::new(job_id(n), date, location, created(created_offset))
        .with_customer(format!("Customer {n}"), "pallets")
        .with_window(window)
        .with_load(10.0, 0.1)
}
