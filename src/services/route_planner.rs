//! Day route estimation.
//!
//! Walks one day's jobs in delivery order starting and ending at the depot and
//! accumulates leg distances and driving times. The order is NOT optimised;
//! the route visits jobs exactly in the order the board shows them.

use tracing::debug;

use super::allocator::sort_for_day;
use super::geo::{haversine_distance, round_km, DistanceEstimator};
use crate::error::{ScheduleError, ScheduleResult};
use crate::types::{Job, RouteResult, RouteStop};

/// Estimates depot-to-depot routes with a shared `DistanceEstimator`.
pub struct RoutePlanner<'a> {
    estimator: &'a DistanceEstimator,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(estimator: &'a DistanceEstimator) -> Self {
        Self { estimator }
    }

    /// Plan a route through `jobs` from and back to `depot`.
    ///
    /// Jobs are re-sorted into delivery order. Each stop records the leg that
    /// reaches it; the return leg only shows up in the totals and the
    /// `return_*` fields. `stop_minutes` of dwell time is added per job.
    pub fn plan(&self, jobs: &[Job], depot: &str, stop_minutes: u32) -> ScheduleResult<RouteResult> {
        if jobs.is_empty() {
            return Ok(RouteResult::default());
        }
        if depot.trim().is_empty() {
            return Err(ScheduleError::InvalidSetting {
                name: "depot",
                reason: "depot location is empty".to_string(),
            });
        }

        let mut sorted = jobs.to_vec();
        sort_for_day(&mut sorted);

        let depot_coords = self.estimator.locate(depot)?;
        let mut current = depot_coords;
        let mut total_km = 0.0;
        let mut total_minutes: u32 = 0;
        let mut stops = Vec::with_capacity(sorted.len());

        for (i, job) in sorted.iter().enumerate() {
            if job.location.trim().is_empty() {
                return Err(ScheduleError::MissingLocation(job.id));
            }
            let coords = self.estimator.locate(&job.location)?;

            let leg_km = haversine_distance(&current, &coords);
            let leg_minutes = self.estimator.duration(leg_km);
            total_km += leg_km;
            total_minutes += leg_minutes;

            stops.push(RouteStop {
                order: i + 1,
                job_id: job.id,
                location: job.location.clone(),
                time_window: job.time_window,
                distance_from_previous_km: round_km(leg_km),
                duration_from_previous_minutes: leg_minutes,
            });

            current = coords;
        }

        // Return leg to depot.
        let return_km = haversine_distance(&current, &depot_coords);
        let return_minutes = self.estimator.duration(return_km);
        total_km += return_km;
        total_minutes += return_minutes;

        let dwell_minutes = stop_minutes.saturating_mul(stops.len() as u32);

        debug!(
            "Planned route from {} with {} stops: {:.1} km, {} min driving",
            depot,
            stops.len(),
            total_km,
            total_minutes
        );

        Ok(RouteResult {
            total_distance_km: round_km(total_km),
            total_duration_minutes: total_minutes,
            total_duration_with_stops_minutes: total_minutes.saturating_add(dwell_minutes),
            return_distance_km: round_km(return_km),
            return_duration_minutes: return_minutes,
            stops,
        })
    }
}
