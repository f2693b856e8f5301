//! Error types for scheduling operations.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced to callers of the scheduling core.
///
/// Bad numeric data is never an error (it is coerced to zero). These variants
/// cover contract violations and boundary failures only.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("job record is missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("job {0} has no location")]
    MissingLocation(Uuid),

    #[error("location could not be resolved: {0}")]
    UnresolvedLocation(String),

    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("capacity limit configured for {date}, outside range {start}..={end}")]
    LimitOutsideRange {
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("invalid job id `{0}`")]
    InvalidId(String),

    #[error("invalid date `{0}`")]
    InvalidDate(String),

    #[error("csv import failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("json import failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
