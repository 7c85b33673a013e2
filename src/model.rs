/// Shared data types for the parking monitoring service.
///
/// `ParkingZone` is the published per-zone record served by the read API,
/// `Snapshot` the complete set of zones produced by one ingestion cycle,
/// `Availability` the three-level occupancy bucket, and `IngestError` the
/// failure taxonomy of the upstream sensor feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// WGS84 coordinate as carried by the sensor feed (`{"lat": .., "lon": ..}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// Occupancy bucket derived from the available/total spot ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Limited,
    Full,
}

impl Availability {
    /// Buckets an `(available, total)` spot count pair.
    ///
    /// Rules, applied in order: no free spots is `Full`; under 20% free is
    /// `Limited`; anything else is `Available`. A zone with zero counted
    /// spots has zero free spots, so checking `available == 0` first also
    /// covers `total == 0` and keeps the ratio well-defined.
    pub fn classify(available: u32, total: u32) -> Self {
        if available == 0 {
            Availability::Full
        } else if (available as f64) / (total as f64) < 0.2 {
            Availability::Limited
        } else {
            Availability::Available
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Availability::Available),
            "limited" => Some(Availability::Limited),
            "full" => Some(Availability::Full),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Limited => "limited",
            Availability::Full => "full",
        }
    }
}

// ---------------------------------------------------------------------------
// Published zone record
// ---------------------------------------------------------------------------

/// One published parking zone. Immutable once built; readers receive shared
/// handles through the snapshot cache, never mutable access.
///
/// Serializes with the camelCase field names the read API exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingZone {
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub availability: Availability,
    pub total_spots: u32,
    pub available_spots: u32,
    pub price_per_hour: f64,
    pub max_duration: String,
    pub features: Vec<String>,
    pub operating_hours: String,
    pub last_updated: String,

    // Raw upstream fields carried through for clients that want them
    pub street_name: String,
    pub street_number: String,
    pub suburb: String,
    pub zone_number: u32,
    pub accurate_address: Option<String>,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Complete result of one ingestion cycle: every zone keyed by id plus the
/// cycle timestamp. Built off to the side and published as one unit by the
/// snapshot cache; never mutated after publish.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub zones: HashMap<String, ParkingZone>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn new(zones: HashMap<String, ParkingZone>, last_updated: DateTime<Utc>) -> Self {
        Self {
            zones,
            last_updated: Some(last_updated),
        }
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Ingest errors
// ---------------------------------------------------------------------------

/// Failure modes of the upstream sensor fetch. Any of these aborts the
/// current ingestion cycle; the previously published snapshot stays live and
/// the next scheduled cycle is the retry mechanism.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("sensor API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sensor API returned status {0}")]
    Status(u16),

    #[error("failed to parse sensor response: {0}")]
    Parse(String),

    #[error("sensor response contained no usable bay records")]
    NoRecords,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
