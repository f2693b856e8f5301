//! Capacity types

use serde::{Deserialize, Serialize};

use super::Job;

/// Per-day load limit. A non-positive bound means the day is always full.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityLimit {
    pub weight: f64,
    pub volume: f64,
}

impl CapacityLimit {
    pub const fn new(weight: f64, volume: f64) -> Self {
        Self { weight, volume }
    }
}

/// Accumulated weight/volume
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityUsage {
    pub weight: f64,
    pub volume: f64,
}

impl CapacityUsage {
    pub fn of_jobs<'a>(jobs: impl IntoIterator<Item = &'a Job>) -> Self {
        jobs.into_iter().fold(Self::default(), |acc, job| Self {
            weight: acc.weight + job.weight(),
            volume: acc.volume + job.volume(),
        })
    }

    /// Utilization in percent of `limit`, for progress bars.
    pub fn percent_of(&self, limit: &CapacityLimit) -> UtilizationPercent {
        UtilizationPercent {
            weight: percent(self.weight, limit.weight),
            volume: percent(self.volume, limit.volume),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationPercent {
    pub weight: f64,
    pub volume: f64,
}

fn percent(used: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        used / limit * 100.0
    } else if used > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Partition of one day's jobs into capacity-fitting and overflow sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAllocationResult {
    pub regular: Vec<Job>,
    pub addon: Vec<Job>,
    /// Sum over regular and addon jobs.
    pub usage: CapacityUsage,
}

impl DayAllocationResult {
    pub fn job_count(&self) -> usize {
        self.regular.len() + self.addon.len()
    }

    /// Regular jobs followed by addon jobs.
    pub fn workload(&self) -> impl Iterator<Item = &Job> {
        self.regular.iter().chain(self.addon.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_positive_limit() {
        let usage = CapacityUsage { weight: 250.0, volume: 5.0 };
        let pct = usage.percent_of(&CapacityLimit::new(1000.0, 10.0));
        assert_eq!(pct.weight, 25.0);
        assert_eq!(pct.volume, 50.0);
    }

    #[test]
    fn test_percent_of_zero_limit() {
        let empty = CapacityUsage::default().percent_of(&CapacityLimit::new(0.0, 0.0));
        assert_eq!(empty.weight, 0.0);

        let loaded = CapacityUsage { weight: 1.0, volume: 0.0 }.percent_of(&CapacityLimit::new(0.0, -1.0));
        assert_eq!(loaded.weight, 100.0);
        assert_eq!(loaded.volume, 0.0);
    }

    #[test]
    fn test_usage_serializes_to_camel_case() {
        let result = DayAllocationResult::default();
        assert_eq!(result.job_count(), 0);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"regular\":[]"));
        assert!(json.contains("\"usage\":{\"weight\":0.0,\"volume\":0.0}"));
    }
}
