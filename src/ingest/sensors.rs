/// City of Melbourne on-street parking-bay sensor API client.
///
/// Handles URL construction and JSON response parsing for the open-data
/// explore API:
///   https://data.melbourne.vic.gov.au/api/explore/v2.1/catalog/datasets/on-street-parking-bay-sensors/records
///
/// The endpoint returns `{"total_count": N, "results": [bay, ...]}` where
/// each bay record optionally carries a zone number, a kerbside (bay) id, an
/// occupancy status string, a coordinate, street/suburb fields under several
/// alias spellings, and a last-updated timestamp. See `fixtures.rs` for
/// annotated examples.

use serde::Deserialize;

use crate::config::ServiceConfig;
use crate::model::{Coordinate, IngestError};

// ---------------------------------------------------------------------------
// Serde structures for the sensor feed
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RecordsEnvelope {
    results: Vec<serde_json::Value>,
}

/// One raw bay record. Every field is optional: the feed is third-party data
/// and regularly omits fields per record. Records missing the zone number,
/// bay id, or coordinate are dropped during aggregation, not zero-filled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorRecord {
    pub zone_number: Option<u32>,
    pub kerbsideid: Option<u64>,
    pub status_description: Option<String>,
    pub location: Option<Coordinate>,
    pub lastupdated: Option<String>,

    // Street name alias spellings seen in the feed, in priority order
    pub street_name: Option<String>,
    pub streetname: Option<String>,
    pub street: Option<String>,
    pub road: Option<String>,
    pub thoroughfare: Option<String>,

    pub street_number: Option<String>,
    pub streetnumber: Option<String>,

    pub suburb: Option<String>,
    pub suburb_name: Option<String>,
}

impl SensorRecord {
    /// First non-empty street name across the alias spellings, in the fixed
    /// priority order street_name, streetname, street, road, thoroughfare.
    pub fn best_street_name(&self) -> Option<&str> {
        non_empty(&self.street_name)
            .or_else(|| non_empty(&self.streetname))
            .or_else(|| non_empty(&self.street))
            .or_else(|| non_empty(&self.road))
            .or_else(|| non_empty(&self.thoroughfare))
    }

    /// First non-empty street number (street_number, then streetnumber).
    pub fn best_street_number(&self) -> Option<&str> {
        non_empty(&self.street_number).or_else(|| non_empty(&self.streetnumber))
    }

    /// First non-empty suburb (suburb, then suburb_name).
    pub fn best_suburb(&self) -> Option<&str> {
        non_empty(&self.suburb).or_else(|| non_empty(&self.suburb_name))
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the records URL with a bounded page-size parameter. One fetch per
/// cycle, no pagination: the reference deployment reads at most one page.
pub fn build_records_url(base: &str, limit: u32) -> String {
    format!("{}?limit={}", base, limit)
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a sensor API JSON body into the list of bay records.
///
/// Individual records that fail to deserialize (wrong type in a field, for
/// example) are skipped with a warning rather than failing the batch; the
/// feed is not under our control and one bad bay must not cost a cycle.
///
/// # Errors
/// - `IngestError::Parse` — envelope is malformed or missing `results`.
/// - `IngestError::NoRecords` — no record in the batch survived parsing.
pub fn parse_records_response(json: &str) -> Result<Vec<SensorRecord>, IngestError> {
    let envelope: RecordsEnvelope = serde_json::from_str(json)
        .map_err(|e| IngestError::Parse(format!("JSON deserialization failed: {}", e)))?;

    let mut records = Vec::with_capacity(envelope.results.len());

    for (index, value) in envelope.results.into_iter().enumerate() {
        match serde_json::from_value::<SensorRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                eprintln!("Warning: skipping malformed bay record {}: {}", index, e);
            }
        }
    }

    if records.is_empty() {
        return Err(IngestError::NoRecords);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Performs one sensor fetch. No retries within an attempt; a transport
/// error, non-success status, or unparseable body aborts the cycle and the
/// next scheduled cycle retries.
pub fn fetch_records(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
) -> Result<Vec<SensorRecord>, IngestError> {
    let url = build_records_url(&config.sensor_api_base, config.sensor_page_limit);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()?;

    if !response.status().is_success() {
        return Err(IngestError::Status(response.status().as_u16()));
    }

    let body = response.text()?;
    parse_records_response(&body)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
