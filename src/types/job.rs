//! Transport job types
//!
//! `Job` is the validated, immutable view the scheduling core works on.
//! `JobRecord` is the loose row shape coming from storage or import files;
//! converting a record into a job is where bad numbers get coerced to zero
//! and missing grouping/routing fields get rejected.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ScheduleError, ScheduleResult};

/// Preferred delivery half-day. Only used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    #[default]
    Morning,
    Afternoon,
}

impl TimeWindow {
    /// Sort rank inside a day: Morning first.
    pub const fn order(self) -> u8 {
        match self {
            TimeWindow::Morning => 0,
            TimeWindow::Afternoon => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Morning => "morning",
            TimeWindow::Afternoon => "afternoon",
        }
    }

    /// Parse a stored window label. Unrecognized labels rank like Morning.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "afternoon" | "pm" | "nachmittag" | "odpoledne" => TimeWindow::Afternoon,
            _ => TimeWindow::Morning,
        }
    }
}

/// A delivery/transport request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub customer_name: Option<String>,
    pub load_description: Option<String>,
    pub target_date: NaiveDate,
    pub time_window: TimeWindow,
    pub weight: f64,
    pub volume: f64,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(
        id: Uuid,
        target_date: NaiveDate,
        location: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_name: None,
            load_description: None,
            target_date,
            time_window: TimeWindow::Morning,
            weight: 0.0,
            volume: 0.0,
            location: location.into(),
            created_at,
        }
    }

    pub fn with_window(mut self, time_window: TimeWindow) -> Self {
        self.time_window = time_window;
        self
    }

    pub fn with_load(mut self, weight: f64, volume: f64) -> Self {
        self.weight = sanitize_measure(weight);
        self.volume = sanitize_measure(volume);
        self
    }

    pub fn with_customer(mut self, name: impl Into<String>, load: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self.load_description = Some(load.into());
        self
    }

    /// Weight, never negative or NaN even if the field was set directly.
    pub fn weight(&self) -> f64 {
        sanitize_measure(self.weight)
    }

    /// Volume, never negative or NaN even if the field was set directly.
    pub fn volume(&self) -> f64 {
        sanitize_measure(self.volume)
    }

    pub fn weekday(&self) -> Weekday {
        self.target_date.weekday()
    }

    /// Display name of the delivery day, derived from `target_date`.
    pub fn delivery_day_name(&self) -> &'static str {
        weekday_name(self.weekday())
    }
}

/// Clamp a load measure to a finite, non-negative number.
pub fn sanitize_measure(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Coerce a loosely typed JSON value (number, numeric string, null) to a measure.
pub fn coerce_measure(value: Option<&serde_json::Value>) -> f64 {
    let raw = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    sanitize_measure(raw)
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a weekday from its English name or three-letter abbreviation.
pub fn parse_weekday(value: &str) -> Option<Weekday> {
    value.trim().parse::<Weekday>().ok()
}

/// Parse a calendar date. Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp,
/// in which case only the date part is kept.
pub fn parse_date(value: &str) -> ScheduleResult<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_| ScheduleError::InvalidDate(trimmed.to_string()))
}

fn parse_timestamp(value: &str) -> ScheduleResult<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| ScheduleError::InvalidDate(trimmed.to_string()))
}

/// Job row as stored or imported. Field names are snake_case; camelCase
/// aliases are accepted for rows exported by the dashboard frontend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default, alias = "customerName")]
    pub customer_name: Option<String>,
    #[serde(default, alias = "loadDescription")]
    pub load_description: Option<String>,
    #[serde(default, alias = "targetDate")]
    pub target_date: Option<String>,
    #[serde(default, alias = "timeWindow")]
    pub time_window: Option<String>,
    #[serde(default)]
    pub weight: Option<serde_json::Value>,
    #[serde(default)]
    pub volume: Option<serde_json::Value>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

impl JobRecord {
    /// Validate and normalize into a `Job`.
    ///
    /// `imported_at` stands in for a missing `created_at`.
    pub fn into_job(self, imported_at: DateTime<Utc>) -> ScheduleResult<Job> {
        let target_date = match self.target_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_date(raw)?,
            _ => return Err(ScheduleError::MissingField { field: "target_date" }),
        };
        let location = match self.location.map(|l| l.trim().to_string()) {
            Some(loc) if !loc.is_empty() => loc,
            _ => return Err(ScheduleError::MissingField { field: "location" }),
        };
        let created_at = match self.created_at.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_timestamp(raw)?,
            _ => imported_at,
        };

        Ok(Job {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            customer_name: self.customer_name,
            load_description: self.load_description,
            target_date,
            time_window: self
                .time_window
                .as_deref()
                .map(TimeWindow::parse_lenient)
                .unwrap_or_default(),
            weight: coerce_measure(self.weight.as_ref()),
            volume: coerce_measure(self.volume.as_ref()),
            location,
            created_at,
        })
    }
}
