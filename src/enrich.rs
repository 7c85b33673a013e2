/// Zone naming and address synthesis.
///
/// The naming chain is an externally documented contract — it decides what
/// users see on every zone — and must be applied in exactly this order:
/// 1. a road-type component of the resolved address, if one exists;
/// 2. the feed's street name, when it is real (not the zone marker);
/// 3. the synthesized `"Zone {id} Parking"` fallback.
/// The display address is the full resolved address whenever the resolver
/// succeeded, otherwise a synthesized street/suburb/city line.

use chrono::{DateTime, Utc};

use crate::aggregate::{zone_marker, ZoneAggregate, DEFAULT_SUBURB};
use crate::model::{Availability, ParkingZone};

/// Address components that identify a street-level road.
pub const ROAD_KEYWORDS: [&str; 4] = ["Street", "Lane", "Avenue", "Road"];

/// City/postcode suffix for synthesized addresses.
const CITY_SUFFIX: &str = "Melbourne VIC 3000";

// Zone metadata the upstream feed does not carry; fixed across all zones.
const PRICE_PER_HOUR: f64 = 6.5;
const MAX_DURATION: &str = "4 hours";
const OPERATING_HOURS: &str = "24/7";
const FEATURES: [&str; 2] = ["covered", "security"];

// ---------------------------------------------------------------------------
// Naming chain
// ---------------------------------------------------------------------------

fn contains_road_keyword(text: &str) -> bool {
    ROAD_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

/// First `", "`-separated component of a resolved address that names a road.
fn road_component(address: &str) -> Option<&str> {
    address.split(", ").find(|part| contains_road_keyword(part))
}

/// True when the aggregate carries a real street name rather than the
/// synthesized `"Zone {id}"` marker.
fn has_real_street_name(aggregate: &ZoneAggregate) -> bool {
    let street = &aggregate.street_name;
    !street.is_empty()
        && *street != zone_marker(aggregate.zone_number)
        && !street.starts_with("Zone ")
}

/// Derives the display name for a zone. See the module docs for the chain.
pub fn display_name(aggregate: &ZoneAggregate, resolved: Option<&str>) -> String {
    if let Some(part) = resolved.and_then(road_component) {
        return format!("{} Parking", part);
    }

    if has_real_street_name(aggregate) {
        if contains_road_keyword(&aggregate.street_name) {
            return format!("{} Parking", aggregate.street_name);
        }
        return format!("{} Parking Zone", aggregate.street_name);
    }

    format!("Zone {} Parking", aggregate.zone_number)
}

/// Derives the display address: the resolver's full answer when available,
/// otherwise street number + street + suburb (omitted when it is the
/// default city) + city suffix.
pub fn display_address(aggregate: &ZoneAggregate, resolved: Option<&str>) -> String {
    if let Some(address) = resolved {
        return address.to_string();
    }

    let mut parts: Vec<&str> = Vec::new();
    if !aggregate.street_number.is_empty() {
        parts.push(&aggregate.street_number);
    }
    parts.push(&aggregate.street_name);
    if !aggregate.suburb.is_empty() && aggregate.suburb != DEFAULT_SUBURB {
        parts.push(&aggregate.suburb);
    }
    parts.push(CITY_SUFFIX);
    parts.join(", ")
}

// ---------------------------------------------------------------------------
// Zone construction
// ---------------------------------------------------------------------------

/// Builds the published zone record from an aggregate and the geocoder's
/// best-effort result. The availability bucket is assigned by the
/// classification pass before publish; until then the zone carries `Full`,
/// the bucket a zone with no counted spots would get anyway.
pub fn enrich_zone(
    aggregate: &ZoneAggregate,
    resolved: Option<String>,
    cycle_time: DateTime<Utc>,
) -> ParkingZone {
    let name = display_name(aggregate, resolved.as_deref());
    let address = display_address(aggregate, resolved.as_deref());

    ParkingZone {
        id: aggregate.zone_number.to_string(),
        name,
        address,
        lat: aggregate.location.lat,
        lng: aggregate.location.lon,
        availability: Availability::Full,
        total_spots: aggregate.total_spots,
        available_spots: aggregate.available_spots,
        price_per_hour: PRICE_PER_HOUR,
        max_duration: MAX_DURATION.to_string(),
        features: FEATURES.iter().map(|f| f.to_string()).collect(),
        operating_hours: OPERATING_HOURS.to_string(),
        last_updated: aggregate
            .lastupdated
            .clone()
            .unwrap_or_else(|| cycle_time.to_rfc3339()),
        street_name: aggregate.street_name.clone(),
        street_number: aggregate.street_number.clone(),
        suburb: aggregate.suburb.clone(),
        zone_number: aggregate.zone_number,
        accurate_address: resolved,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;
    use crate::ingest::geocode::parse_reverse_response;
    use crate::model::Coordinate;

    fn aggregate(zone_number: u32, street: &str, number: &str, suburb: &str) -> ZoneAggregate {
        ZoneAggregate {
            zone_number,
            location: Coordinate {
                lat: -37.8136,
                lon: 144.9631,
            },
            street_name: if street.is_empty() {
                zone_marker(zone_number)
            } else {
                street.to_string()
            },
            street_number: number.to_string(),
            suburb: suburb.to_string(),
            lastupdated: Some("2025-08-01T09:15:00+10:00".to_string()),
            total_spots: 10,
            available_spots: 4,
        }
    }

    // --- Naming chain step 1: resolved address -------------------------------

    #[test]
    fn test_name_uses_road_component_of_resolved_address() {
        let resolved = parse_reverse_response(fixture_reverse_geocode_json());
        let zone = aggregate(7301, "Feed Name Rd", "1", "Melbourne");
        assert_eq!(
            display_name(&zone, resolved.as_deref()),
            "Collins Street Parking",
            "resolved road component must win over the feed street name"
        );
    }

    #[test]
    fn test_resolved_address_without_road_falls_back_to_feed_street() {
        let resolved = parse_reverse_response(fixture_reverse_geocode_no_road_json());
        let zone = aggregate(7301, "Collins Street", "120", "Melbourne");
        assert_eq!(display_name(&zone, resolved.as_deref()), "Collins Street Parking");
    }

    // --- Naming chain step 2: feed street name -------------------------------

    #[test]
    fn test_feed_street_with_road_keyword_gets_parking_suffix() {
        let zone = aggregate(7301, "Flinders Lane", "", "Melbourne");
        assert_eq!(display_name(&zone, None), "Flinders Lane Parking");
    }

    #[test]
    fn test_feed_street_without_road_keyword_gets_parking_zone_suffix() {
        let zone = aggregate(7301, "Southbank Promenade", "", "Southbank");
        assert_eq!(display_name(&zone, None), "Southbank Promenade Parking Zone");
    }

    // --- Naming chain step 3: synthesized fallback ---------------------------

    #[test]
    fn test_marker_street_name_falls_through_to_zone_name() {
        let zone = aggregate(7302, "", "", "Melbourne");
        assert_eq!(zone.street_name, "Zone 7302");
        assert_eq!(display_name(&zone, None), "Zone 7302 Parking");
    }

    #[test]
    fn test_zone_prefixed_street_name_is_not_treated_as_real() {
        // Street names that merely start with "Zone " are also synthetic.
        let zone = aggregate(7302, "Zone 99 overflow", "", "Melbourne");
        assert_eq!(display_name(&zone, None), "Zone 7302 Parking");
    }

    #[test]
    fn test_unresolvable_zone_with_marker_uses_fallback_even_with_geocode_error() {
        let resolved = parse_reverse_response(fixture_reverse_geocode_error_json());
        let zone = aggregate(7310, "", "", "Melbourne");
        assert_eq!(display_name(&zone, resolved.as_deref()), "Zone 7310 Parking");
    }

    // --- Display address -----------------------------------------------------

    #[test]
    fn test_address_prefers_full_resolved_address() {
        let resolved = parse_reverse_response(fixture_reverse_geocode_json());
        let zone = aggregate(7301, "Collins Street", "120", "Melbourne");
        let address = display_address(&zone, resolved.as_deref());
        assert!(address.ends_with("Australia"), "resolved address is used verbatim");
    }

    #[test]
    fn test_address_synthesis_omits_default_suburb() {
        let zone = aggregate(7301, "Collins Street", "120", "Melbourne");
        assert_eq!(
            display_address(&zone, None),
            "120, Collins Street, Melbourne VIC 3000"
        );
    }

    #[test]
    fn test_address_synthesis_includes_non_default_suburb() {
        let zone = aggregate(7303, "Little Bourke Street", "", "Chinatown");
        assert_eq!(
            display_address(&zone, None),
            "Little Bourke Street, Chinatown, Melbourne VIC 3000"
        );
    }

    #[test]
    fn test_address_synthesis_for_marker_zone() {
        let zone = aggregate(7302, "", "", "Melbourne");
        assert_eq!(display_address(&zone, None), "Zone 7302, Melbourne VIC 3000");
    }

    // --- Full record construction --------------------------------------------

    #[test]
    fn test_enrich_zone_carries_counts_and_metadata() {
        let aggregate = aggregate(7301, "Collins Street", "120", "Melbourne");
        let zone = enrich_zone(&aggregate, None, Utc::now());

        assert_eq!(zone.id, "7301");
        assert_eq!(zone.zone_number, 7301);
        assert_eq!(zone.total_spots, 10);
        assert_eq!(zone.available_spots, 4);
        assert_eq!(zone.price_per_hour, 6.5);
        assert_eq!(zone.max_duration, "4 hours");
        assert_eq!(zone.operating_hours, "24/7");
        assert_eq!(zone.features, vec!["covered", "security"]);
        assert_eq!(zone.last_updated, "2025-08-01T09:15:00+10:00");
        assert!(zone.accurate_address.is_none());
    }

    #[test]
    fn test_enrich_zone_falls_back_to_cycle_time_when_feed_has_no_timestamp() {
        let mut aggregate = aggregate(7301, "Collins Street", "", "Melbourne");
        aggregate.lastupdated = None;
        let cycle_time = Utc::now();
        let zone = enrich_zone(&aggregate, None, cycle_time);
        assert_eq!(zone.last_updated, cycle_time.to_rfc3339());
    }

    #[test]
    fn test_enrich_zone_stores_resolved_address_separately() {
        let aggregate = aggregate(7301, "Collins Street", "120", "Melbourne");
        let resolved = "120, Collins Street, Melbourne, Victoria, 3000, Australia".to_string();
        let zone = enrich_zone(&aggregate, Some(resolved.clone()), Utc::now());
        assert_eq!(zone.accurate_address.as_deref(), Some(resolved.as_str()));
        assert_eq!(zone.address, resolved);
    }
}
