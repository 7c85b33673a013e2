/// Zone aggregation: collapses the flat per-bay record list from the sensor
/// feed into one rollup per zone.
///
/// Bay records missing a zone number, bay id, or coordinate are dropped —
/// never zero-filled. Occupancy counting is deliberately conservative: only
/// the two recognized statuses contribute to the totals, so an unknown
/// status can never inflate occupancy-derived metrics.

use std::collections::HashMap;

use crate::ingest::sensors::SensorRecord;
use crate::model::Coordinate;

/// Occupancy statuses recognized by the counting policy.
pub const STATUS_UNOCCUPIED: &str = "Unoccupied";
pub const STATUS_PRESENT: &str = "Present";

/// Suburb used when the feed provides none.
pub const DEFAULT_SUBURB: &str = "Melbourne";

/// Synthesized street-name marker for zones with no usable street field.
/// Downstream naming recognizes this marker as "no real name available".
pub fn zone_marker(zone_number: u32) -> String {
    format!("Zone {}", zone_number)
}

// ---------------------------------------------------------------------------
// Aggregate type
// ---------------------------------------------------------------------------

/// Per-zone rollup of one cycle's bay records. Representative fields
/// (coordinate, street descriptor, timestamp) come from the first complete
/// record seen for the zone; counts accumulate over all of them.
///
/// Invariant: `available_spots <= total_spots`.
#[derive(Debug, Clone)]
pub struct ZoneAggregate {
    pub zone_number: u32,
    pub location: Coordinate,
    pub street_name: String,
    pub street_number: String,
    pub suburb: String,
    pub lastupdated: Option<String>,
    pub total_spots: u32,
    pub available_spots: u32,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Groups bay records by zone number, counting spots per the recognized
/// occupancy statuses and carrying the first record's descriptive fields.
pub fn aggregate_by_zone(records: &[SensorRecord]) -> HashMap<u32, ZoneAggregate> {
    let mut zones: HashMap<u32, ZoneAggregate> = HashMap::new();

    for record in records {
        // Incomplete bay records are dropped, not zero-filled
        let (zone_number, location) = match (record.zone_number, record.kerbsideid, record.location)
        {
            (Some(zone), Some(_bay), Some(location)) => (zone, location),
            _ => continue,
        };

        let entry = zones.entry(zone_number).or_insert_with(|| ZoneAggregate {
            zone_number,
            location,
            street_name: record
                .best_street_name()
                .map(str::to_string)
                .unwrap_or_else(|| zone_marker(zone_number)),
            street_number: record.best_street_number().unwrap_or("").to_string(),
            suburb: record.best_suburb().unwrap_or(DEFAULT_SUBURB).to_string(),
            lastupdated: record.lastupdated.clone(),
            total_spots: 0,
            available_spots: 0,
        });

        match record.status_description.as_deref() {
            Some(STATUS_UNOCCUPIED) => {
                entry.total_spots += 1;
                entry.available_spots += 1;
            }
            Some(STATUS_PRESENT) => {
                entry.total_spots += 1;
            }
            // Unrecognized statuses count toward neither total nor available
            _ => {}
        }
    }

    zones
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
