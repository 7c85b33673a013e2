/// Test fixtures: representative JSON payloads from the sensor and
/// geocoding APIs.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parsers and the aggregation pipeline.
///
/// Sensor feed response shape:
///   response.total_count — total matching records upstream
///   response.results[]
///     .zone_number         — upstream zone id (number, may be absent)
///     .kerbsideid          — bay id (number, may be absent)
///     .status_description  — "Unoccupied" | "Present" | other
///     .location            — { "lat": .., "lon": .. } (may be absent)
///     .lastupdated         — ISO 8601 timestamp string
///     street/suburb fields under several alias spellings (usually absent)
///
/// Reverse-geocoding response shape:
///   { "display_name": "house, road, suburb, city, state, postcode, country" }
///   or { "error": "Unable to geocode" } when nothing is found.

/// Three zones around the Melbourne CBD:
/// - zone 7301 (Collins Street): 2 unoccupied + 1 present + 1 unknown status
/// - zone 7302 (no street fields): 1 present — full once aggregated
/// - zone 7303: 1 unoccupied, street name under the `road` alias
/// plus three incomplete records (no location / no zone / no bay id) that
/// the aggregator must drop.
#[cfg(test)]
pub(crate) fn fixture_bay_records_json() -> &'static str {
    r#"{
      "total_count": 9,
      "results": [
        {
          "lastupdated": "2025-08-01T09:15:00+10:00",
          "status_timestamp": "2025-08-01T09:14:21+10:00",
          "zone_number": 7301,
          "status_description": "Unoccupied",
          "kerbsideid": 53784,
          "location": { "lon": 144.9631, "lat": -37.8136 },
          "street_name": "Collins Street",
          "street_number": "120",
          "suburb": "Melbourne"
        },
        {
          "lastupdated": "2025-08-01T09:15:00+10:00",
          "zone_number": 7301,
          "status_description": "Unoccupied",
          "kerbsideid": 53785,
          "location": { "lon": 144.9633, "lat": -37.8137 }
        },
        {
          "lastupdated": "2025-08-01T09:15:00+10:00",
          "zone_number": 7301,
          "status_description": "Present",
          "kerbsideid": 53786,
          "location": { "lon": 144.9635, "lat": -37.8138 }
        },
        {
          "lastupdated": "2025-08-01T09:15:00+10:00",
          "zone_number": 7301,
          "status_description": "Maintenance",
          "kerbsideid": 53787,
          "location": { "lon": 144.9636, "lat": -37.8139 }
        },
        {
          "lastupdated": "2025-08-01T09:12:00+10:00",
          "zone_number": 7302,
          "status_description": "Present",
          "kerbsideid": 53788,
          "location": { "lon": 144.9584, "lat": -37.8183 }
        },
        {
          "lastupdated": "2025-08-01T09:10:00+10:00",
          "zone_number": 7303,
          "status_description": "Unoccupied",
          "kerbsideid": 53789,
          "location": { "lon": 144.9671, "lat": -37.8102 },
          "road": "Little Bourke Street",
          "suburb_name": "Chinatown"
        },
        {
          "lastupdated": "2025-08-01T09:15:00+10:00",
          "zone_number": 7304,
          "status_description": "Unoccupied",
          "kerbsideid": 53790
        },
        {
          "lastupdated": "2025-08-01T09:15:00+10:00",
          "status_description": "Unoccupied",
          "kerbsideid": 53791,
          "location": { "lon": 144.9600, "lat": -37.8150 }
        },
        {
          "lastupdated": "2025-08-01T09:15:00+10:00",
          "zone_number": 7305,
          "status_description": "Present",
          "location": { "lon": 144.9610, "lat": -37.8160 }
        }
      ]
    }"#
}

/// One well-formed record plus one with a string `zone_number`; the parser
/// must skip the bad record and keep the rest.
#[cfg(test)]
pub(crate) fn fixture_mixed_validity_json() -> &'static str {
    r#"{
      "total_count": 2,
      "results": [
        {
          "lastupdated": "2025-08-01T09:15:00+10:00",
          "zone_number": 7301,
          "status_description": "Unoccupied",
          "kerbsideid": 53784,
          "location": { "lon": 144.9631, "lat": -37.8136 }
        },
        {
          "lastupdated": "2025-08-01T09:15:00+10:00",
          "zone_number": "seven-three-zero-two",
          "status_description": "Present",
          "kerbsideid": 53788,
          "location": { "lon": 144.9584, "lat": -37.8183 }
        }
      ]
    }"#
}

/// Valid envelope, zero records.
#[cfg(test)]
pub(crate) fn fixture_empty_results_json() -> &'static str {
    r#"{ "total_count": 0, "results": [] }"#
}

/// Successful Nominatim reverse lookup at building-level zoom. The second
/// component ("Collins Street") is the one the naming chain extracts.
#[cfg(test)]
pub(crate) fn fixture_reverse_geocode_json() -> &'static str {
    r#"{
      "place_id": 134015257,
      "licence": "Data © OpenStreetMap contributors, ODbL 1.0. http://osm.org/copyright",
      "lat": "-37.81362",
      "lon": "144.96312",
      "display_name": "120, Collins Street, Melbourne, City of Melbourne, Victoria, 3000, Australia",
      "address": {
        "house_number": "120",
        "road": "Collins Street",
        "suburb": "Melbourne",
        "city": "City of Melbourne",
        "state": "Victoria",
        "postcode": "3000",
        "country": "Australia"
      }
    }"#
}

/// Nominatim's response for a coordinate it cannot resolve — no
/// `display_name` at all.
#[cfg(test)]
pub(crate) fn fixture_reverse_geocode_error_json() -> &'static str {
    r#"{ "error": "Unable to geocode" }"#
}

/// Resolved address with no road-type keyword in any component; the naming
/// chain must fall through to the feed's street name or the zone marker.
#[cfg(test)]
pub(crate) fn fixture_reverse_geocode_no_road_json() -> &'static str {
    r#"{
      "display_name": "Federation Square, Melbourne, City of Melbourne, Victoria, 3000, Australia"
    }"#
}
