//! Weekly delivery board computation
//!
//! Buckets jobs by target date, then allocates capacity and estimates a route
//! for every configured delivery day in the requested range. Days without
//! jobs still get an (empty) column.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::allocator::allocate_day;
use super::geo::DistanceEstimator;
use super::route_planner::RoutePlanner;
use crate::error::{ScheduleError, ScheduleResult};
use crate::types::{CapacityLimit, DaySchedule, Job};

/// Inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ScheduleResult<Self> {
        if start > end {
            return Err(ScheduleError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Monday through Sunday of the week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let week = date.week(Weekday::Mon);
        Self {
            start: week.first_day(),
            end: week.last_day(),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

/// Configured delivery weekdays with a default daily limit and per-date overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryCalendar {
    delivery_days: Vec<Weekday>,
    default_limit: CapacityLimit,
    overrides: BTreeMap<NaiveDate, CapacityLimit>,
}

impl DeliveryCalendar {
    pub fn new(delivery_days: Vec<Weekday>, default_limit: CapacityLimit) -> Self {
        Self {
            delivery_days,
            default_limit,
            overrides: BTreeMap::new(),
        }
    }

    /// Set a limit for one date. The date becomes a delivery day even if its
    /// weekday is not configured.
    pub fn with_override(mut self, date: NaiveDate, limit: CapacityLimit) -> Self {
        self.overrides.insert(date, limit);
        self
    }

    pub fn is_delivery_day(&self, date: NaiveDate) -> bool {
        self.overrides.contains_key(&date) || self.delivery_days.contains(&date.weekday())
    }

    pub fn limit_on(&self, date: NaiveDate) -> Option<CapacityLimit> {
        if let Some(limit) = self.overrides.get(&date) {
            return Some(*limit);
        }
        self.delivery_days
            .contains(&date.weekday())
            .then_some(self.default_limit)
    }

    /// Limits for every delivery day inside `range`.
    pub fn limits_for(&self, range: &DateRange) -> BTreeMap<NaiveDate, CapacityLimit> {
        range
            .days()
            .filter_map(|date| self.limit_on(date).map(|limit| (date, limit)))
            .collect()
    }
}

/// Builds the per-day board for a date range.
pub struct WeekScheduler<'a> {
    planner: RoutePlanner<'a>,
}

impl<'a> WeekScheduler<'a> {
    pub fn new(estimator: &'a DistanceEstimator) -> Self {
        Self {
            planner: RoutePlanner::new(estimator),
        }
    }

    /// Allocate and route every configured day in `range`.
    ///
    /// Only dates present in `limits_by_date` are processed; jobs on other
    /// dates are ignored. Every key of `limits_by_date` must lie inside
    /// `range`. Routes cover the whole day's workload, addons included.
    pub fn schedule(
        &self,
        all_jobs: &[Job],
        range: DateRange,
        limits_by_date: &BTreeMap<NaiveDate, CapacityLimit>,
        depot: &str,
        stop_minutes: u32,
    ) -> ScheduleResult<BTreeMap<NaiveDate, DaySchedule>> {
        if let Some(date) = limits_by_date.keys().find(|d| !range.contains(**d)) {
            return Err(ScheduleError::LimitOutsideRange {
                date: *date,
                start: range.start,
                end: range.end,
            });
        }

        let mut buckets: BTreeMap<NaiveDate, Vec<Job>> = BTreeMap::new();
        let mut skipped = 0usize;
        for job in all_jobs {
            if limits_by_date.contains_key(&job.target_date) {
                buckets.entry(job.target_date).or_default().push(job.clone());
            } else {
                skipped += 1;
            }
        }
        if skipped > 0 {
            debug!("{} jobs fall outside configured delivery days, skipped", skipped);
        }

        let mut board = BTreeMap::new();
        for (date, limit) in limits_by_date {
            let jobs = buckets.remove(date).unwrap_or_default();
            let allocation = allocate_day(&jobs, limit);
            let workload: Vec<Job> = allocation.workload().cloned().collect();
            let route = self.planner.plan(&workload, depot, stop_minutes)?;

            debug!(
                "{}: {} jobs ({} regular, {} addon), {:.1} km",
                date,
                allocation.job_count(),
                allocation.regular.len(),
                allocation.addon.len(),
                route.total_distance_km
            );

            board.insert(
                *date,
                DaySchedule {
                    date: *date,
                    weekday: date.weekday(),
                    limit: *limit,
                    allocation,
                    route,
                },
            );
        }

        info!(
            "Scheduled {} delivery days between {} and {}",
            board.len(),
            range.start,
            range.end
        );

        Ok(board)
    }
}
