//! Scheduling services

pub mod allocator;
pub mod geo;
pub mod history;
pub mod route_planner;
pub mod week_scheduler;

pub use allocator::{allocate_day, day_order, sort_for_day};
pub use geo::{
    haversine_distance, round_km, travel_minutes, ApproximateFallback, DistanceEstimator,
    LocationResolver, LocationTable, UnknownLocationPolicy,
};
pub use history::JobHistory;
pub use route_planner::RoutePlanner;
pub use week_scheduler::{DateRange, DeliveryCalendar, WeekScheduler};
