//! Configuration management

use anyhow::{self, Context, Result};
use chrono::Weekday;

use crate::services::geo::{ApproximateFallback, DEFAULT_AVERAGE_SPEED_KMH};
use crate::services::{DeliveryCalendar, DistanceEstimator, LocationTable, UnknownLocationPolicy};
use crate::types::{parse_weekday, CapacityLimit};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Depot location identifier (start and end of every route)
    pub depot: String,

    /// Dwell time per stop in minutes
    pub stop_minutes: u32,

    /// Average driving speed for travel time estimation
    pub average_speed_kmh: f64,

    /// Default per-day capacity
    pub daily_limit: CapacityLimit,

    /// Weekdays on which deliveries happen
    pub delivery_days: Vec<Weekday>,

    /// Handling of locations missing from the lookup table
    pub unknown_locations: UnknownLocationPolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let depot = lookup("DEPOT_LOCATION").unwrap_or_else(|| "Praha".to_string());
        if depot.trim().is_empty() {
            anyhow::bail!("DEPOT_LOCATION must not be empty");
        }

        let stop_minutes = match lookup("STOP_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("STOP_MINUTES must be a whole number of minutes, got '{raw}'"))?,
            None => 15,
        };

        let average_speed_kmh = parse_positive(&lookup, "AVERAGE_SPEED_KMH", DEFAULT_AVERAGE_SPEED_KMH)?;
        let daily_weight = parse_positive(&lookup, "DAILY_WEIGHT_LIMIT", 1000.0)?;
        let daily_volume = parse_positive(&lookup, "DAILY_VOLUME_LIMIT", 10.0)?;

        let delivery_days = match lookup("DELIVERY_DAYS") {
            Some(raw) => parse_delivery_days(&raw)?,
            None => vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
        };

        let unknown_locations = match lookup("UNKNOWN_LOCATIONS").as_deref().map(str::trim) {
            None | Some("") | Some("approximate") => {
                UnknownLocationPolicy::Approximate(ApproximateFallback::default())
            }
            Some("reject") => UnknownLocationPolicy::Reject,
            Some(other) => anyhow::bail!(
                "UNKNOWN_LOCATIONS must be 'approximate' or 'reject', got '{}'",
                other
            ),
        };

        Ok(Self {
            depot,
            stop_minutes,
            average_speed_kmh,
            daily_limit: CapacityLimit::new(daily_weight, daily_volume),
            delivery_days,
            unknown_locations,
        })
    }

    /// Distance estimator using the builtin location table.
    pub fn estimator(&self) -> Result<DistanceEstimator> {
        let estimator = DistanceEstimator::new(LocationTable::builtin())
            .with_unknown_policy(self.unknown_locations)
            .with_average_speed(self.average_speed_kmh)?;
        Ok(estimator)
    }

    pub fn calendar(&self) -> DeliveryCalendar {
        DeliveryCalendar::new(self.delivery_days.clone(), self.daily_limit)
    }
}

fn parse_positive<F>(lookup: &F, key: &str, default: f64) -> Result<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<f64>()
        .with_context(|| format!("{key} must be a number, got '{raw}'"))?;
    if !(value.is_finite() && value >= 1.0) {
        anyhow::bail!("{} must be at least 1, got {}", key, value);
    }
    Ok(value)
}

fn parse_delivery_days(raw: &str) -> Result<Vec<Weekday>> {
    let mut days = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let day = parse_weekday(part).with_context(|| format!("unknown weekday '{part}' in DELIVERY_DAYS"))?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    if days.is_empty() {
        anyhow::bail!("DELIVERY_DAYS must name at least one weekday");
    }
    Ok(days)
}
