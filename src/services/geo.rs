//! Geographic calculations and distance estimation
//!
//! Distances are great-circle (Haversine) kilometres between coordinates
//! looked up from a static location table. This is an approximation for
//! board planning, not road routing.
//!
//! Locations the table does not know either fail with
//! `ScheduleError::UnresolvedLocation` or, by default, get a random
//! coordinate near a reference point. That fallback is the only
//! non-deterministic path in the crate and is logged every time it is taken.

use rand::Rng;
use tracing::warn;

use crate::error::{ScheduleError, ScheduleResult};
use crate::types::Coordinates;

/// Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average speed in km/h for travel time estimation
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 40.0;

/// Calculate Haversine distance between two points in kilometers
pub fn haversine_distance(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lng - from.lng).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Travel time in whole minutes for `km` at `average_speed_kmh`.
pub fn travel_minutes(km: f64, average_speed_kmh: f64) -> u32 {
    if !(km.is_finite() && km > 0.0 && average_speed_kmh > 0.0) {
        return 0;
    }
    (km / average_speed_kmh * 60.0).round() as u32
}

/// Round kilometres to one decimal place.
pub fn round_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

/// Resolves an opaque location identifier to coordinates.
pub trait LocationResolver: Send + Sync {
    /// Returns None if the location is unknown
    fn resolve(&self, location: &str) -> Option<Coordinates>;

    /// Get resolver name for logging
    fn name(&self) -> &str;
}

/// Static lookup table keyed by normalized place name.
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    entries: Vec<(String, Coordinates)>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the larger Czech cities, including ASCII spellings.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (name, lat, lng) in [
            ("Praha", 50.0755, 14.4378),
            ("Prague", 50.0755, 14.4378),
            ("Brno", 49.1951, 16.6068),
            ("Ostrava", 49.8209, 18.2625),
            ("Plzeň", 49.7384, 13.3736),
            ("Plzen", 49.7384, 13.3736),
            ("Liberec", 50.7663, 15.0543),
            ("Olomouc", 49.5938, 17.2509),
            ("České Budějovice", 48.9745, 14.4743),
            ("Ceske Budejovice", 48.9745, 14.4743),
            ("Hradec Králové", 50.2092, 15.8328),
            ("Hradec Kralove", 50.2092, 15.8328),
            ("Pardubice", 50.0343, 15.7812),
            ("Zlín", 49.2265, 17.6707),
            ("Zlin", 49.2265, 17.6707),
            ("Jihlava", 49.3961, 15.5912),
            ("Karlovy Vary", 50.2319, 12.8710),
            ("Ústí nad Labem", 50.6607, 14.0323),
            ("Usti nad Labem", 50.6607, 14.0323),
            ("Kladno", 50.1473, 14.1028),
        ] {
            table.insert(name, Coordinates::new(lat, lng));
        }
        table
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: &str, coordinates: Coordinates) {
        let key = normalize(name);
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = coordinates,
            None => self.entries.push((key, coordinates)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LocationResolver for LocationTable {
    /// Exact key first, then the longest key that appears as whole words
    /// inside the identifier ("Hlavní 12, Brno" → Brno).
    fn resolve(&self, location: &str) -> Option<Coordinates> {
        let needle = normalize(location);
        if needle.is_empty() {
            return None;
        }
        if let Some((_, coords)) = self.entries.iter().find(|(k, _)| *k == needle) {
            return Some(*coords);
        }

        let padded = format!(" {needle} ");
        self.entries
            .iter()
            .filter(|(k, _)| padded.contains(&format!(" {k} ")))
            .max_by_key(|(k, _)| k.len())
            .map(|(_, coords)| *coords)
    }

    fn name(&self) -> &str {
        "LocationTable"
    }
}

/// Lowercase and collapse every run of non-alphanumerics to one space.
fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Random coordinate near a reference point, for locations nobody can resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateFallback {
    pub reference: Coordinates,
    /// Maximum offset in degrees on each axis.
    pub max_offset_deg: f64,
}

impl Default for ApproximateFallback {
    fn default() -> Self {
        Self {
            reference: Coordinates::new(50.0755, 14.4378),
            max_offset_deg: 0.1,
        }
    }
}

impl ApproximateFallback {
    pub fn approximate(&self) -> Coordinates {
        self.approximate_with(&mut rand::thread_rng())
    }

    pub fn approximate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinates {
        let spread = if self.max_offset_deg.is_finite() {
            self.max_offset_deg.abs()
        } else {
            0.0
        };
        Coordinates {
            lat: self.reference.lat + rng.gen_range(-spread..=spread),
            lng: self.reference.lng + rng.gen_range(-spread..=spread),
        }
    }
}

/// What to do with a location the resolver does not know.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnknownLocationPolicy {
    /// Jitter around a reference point (non-deterministic).
    Approximate(ApproximateFallback),
    /// Fail with `ScheduleError::UnresolvedLocation`.
    Reject,
}

impl Default for UnknownLocationPolicy {
    fn default() -> Self {
        UnknownLocationPolicy::Approximate(ApproximateFallback::default())
    }
}

/// Distance and travel-time estimation between location identifiers.
pub struct DistanceEstimator {
    resolver: Box<dyn LocationResolver>,
    unknown: UnknownLocationPolicy,
    average_speed_kmh: f64,
}

impl Default for DistanceEstimator {
    fn default() -> Self {
        Self::new(LocationTable::builtin())
    }
}

impl DistanceEstimator {
    pub fn new(resolver: impl LocationResolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
            unknown: UnknownLocationPolicy::default(),
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
        }
    }

    pub fn with_average_speed(mut self, average_speed_kmh: f64) -> ScheduleResult<Self> {
        if !(average_speed_kmh.is_finite() && average_speed_kmh > 0.0) {
            return Err(ScheduleError::InvalidSetting {
                name: "average_speed_kmh",
                reason: format!("must be positive, got {average_speed_kmh}"),
            });
        }
        self.average_speed_kmh = average_speed_kmh;
        Ok(self)
    }

    pub fn with_unknown_policy(mut self, policy: UnknownLocationPolicy) -> Self {
        self.unknown = policy;
        self
    }

    pub fn average_speed_kmh(&self) -> f64 {
        self.average_speed_kmh
    }

    /// Resolve a location identifier, applying the unknown-location policy.
    pub fn locate(&self, location: &str) -> ScheduleResult<Coordinates> {
        if let Some(coords) = self.resolver.resolve(location) {
            return Ok(coords);
        }
        match self.unknown {
            UnknownLocationPolicy::Approximate(fallback) => {
                warn!(
                    "Location '{}' unknown to {}, using approximate coordinates",
                    location,
                    self.resolver.name()
                );
                Ok(fallback.approximate())
            }
            UnknownLocationPolicy::Reject => {
                Err(ScheduleError::UnresolvedLocation(location.to_string()))
            }
        }
    }

    /// Great-circle distance in kilometres between two location identifiers.
    pub fn distance(&self, from: &str, to: &str) -> ScheduleResult<f64> {
        let a = self.locate(from)?;
        let b = self.locate(to)?;
        Ok(haversine_distance(&a, &b))
    }

    /// Travel time in whole minutes for a distance in kilometres.
    pub fn duration(&self, km: f64) -> u32 {
        travel_minutes(km, self.average_speed_kmh)
    }
}
