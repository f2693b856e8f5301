//! Job import from JSON and CSV files
//!
//! Rows are read as `JobRecord`s and validated into `Job`s. A row with
//! a missing target date or location aborts the whole import.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::error::{ScheduleError, ScheduleResult};
use crate::types::{Job, JobRecord};

/// CSV row; every column is optional text.
#[derive(Debug, Deserialize)]
struct CsvJobRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, alias = "customerName")]
    customer_name: Option<String>,
    #[serde(default, alias = "loadDescription")]
    load_description: Option<String>,
    #[serde(default, alias = "targetDate")]
    target_date: Option<String>,
    #[serde(default, alias = "timeWindow")]
    time_window: Option<String>,
    #[serde(default)]
    weight: Option<String>,
    #[serde(default)]
    volume: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default, alias = "createdAt")]
    created_at: Option<String>,
}

impl CsvJobRow {
    fn into_record(self) -> ScheduleResult<JobRecord> {
        let id = match non_empty(self.id) {
            Some(raw) => Some(
                uuid::Uuid::parse_str(raw.trim()).map_err(|_| ScheduleError::InvalidId(raw))?,
            ),
            None => None,
        };
        Ok(JobRecord {
            id,
            customer_name: non_empty(self.customer_name),
            load_description: non_empty(self.load_description),
            target_date: non_empty(self.target_date),
            time_window: non_empty(self.time_window),
            weight: non_empty(self.weight).map(serde_json::Value::String),
            volume: non_empty(self.volume).map(serde_json::Value::String),
            location: non_empty(self.location),
            created_at: non_empty(self.created_at),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a JSON array of job rows.
pub fn parse_json_jobs(content: &str, imported_at: DateTime<Utc>) -> ScheduleResult<Vec<Job>> {
    let records: Vec<JobRecord> = serde_json::from_str(content)?;
    records
        .into_iter()
        .map(|record| record.into_job(imported_at))
        .collect()
}

/// Parse CSV job rows. The delimiter is `;` if the header line contains one,
/// otherwise `,`.
pub fn parse_csv_jobs(content: &str, imported_at: DateTime<Utc>) -> ScheduleResult<Vec<Job>> {
    let header = content.lines().next().unwrap_or_default();
    let delimiter = if header.contains(';') { b';' } else { b',' };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut jobs = Vec::new();
    for result in reader.deserialize() {
        let row: CsvJobRow = result?;
        jobs.push(row.into_record()?.into_job(imported_at)?);
    }
    Ok(jobs)
}

/// Read jobs from a `.csv` or JSON file.
pub fn read_jobs(path: &Path) -> ScheduleResult<Vec<Job>> {
    let content = std::fs::read_to_string(path)?;
    let imported_at = Utc::now();
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let jobs = if is_csv {
        parse_csv_jobs(&content, imported_at)?
    } else {
        parse_json_jobs(&content, imported_at)?
    };
    info!("Imported {} jobs from {}", jobs.len(), path.display());
    Ok(jobs)
}
