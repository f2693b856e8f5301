//! Route types

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CapacityLimit, DayAllocationResult, TimeWindow};

/// A stop on the route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub order: usize,
    pub job_id: Uuid,
    pub location: String,
    pub time_window: TimeWindow,
    /// Leg distance from the previous stop (or depot), one decimal.
    pub distance_from_previous_km: f64,
    pub duration_from_previous_minutes: u32,
}

/// Estimated route for one delivery day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    /// Total distance including the return leg, one decimal.
    pub total_distance_km: f64,
    /// Driving time only.
    pub total_duration_minutes: u32,
    /// Driving time plus dwell time at every stop.
    pub total_duration_with_stops_minutes: u32,
    /// Return leg from the last stop back to the depot (km)
    pub return_distance_km: f64,
    /// Return leg from the last stop back to the depot (minutes)
    pub return_duration_minutes: u32,
    pub stops: Vec<RouteStop>,
}

/// One column of the delivery board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub limit: CapacityLimit,
    pub allocation: DayAllocationResult,
    pub route: RouteResult,
}
