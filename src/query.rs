/// Read-side queries over the published snapshot.
///
/// Every operation works on a snapshot handle obtained from the cache; none
/// of them mutates anything or triggers ingestion. Listing output is sorted
/// by zone id so responses are stable across calls against the same
/// snapshot.

use serde::Serialize;

use crate::model::{Availability, ParkingZone, Snapshot};

/// Mean Earth radius in kilometres, for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default radius for location search, in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 2.0;

// ---------------------------------------------------------------------------
// Filtered listing
// ---------------------------------------------------------------------------

/// Conjunctive zone-list filter; `None` fields are unconstrained.
#[derive(Debug, Clone, Default)]
pub struct ZoneFilter {
    /// Case-insensitive substring match on name or address
    pub search: Option<String>,
    /// Exact availability bucket
    pub availability: Option<Availability>,
    /// Upper bound on price per hour (inclusive)
    pub max_price: Option<f64>,
}

pub fn filter_zones<'a>(snapshot: &'a Snapshot, filter: &ZoneFilter) -> Vec<&'a ParkingZone> {
    let needle = filter.search.as_ref().map(|s| s.to_lowercase());

    let mut result: Vec<&ParkingZone> = snapshot
        .zones
        .values()
        .filter(|zone| {
            if let Some(needle) = &needle {
                let in_name = zone.name.to_lowercase().contains(needle);
                let in_address = zone.address.to_lowercase().contains(needle);
                if !in_name && !in_address {
                    return false;
                }
            }
            if let Some(availability) = filter.availability {
                if zone.availability != availability {
                    return false;
                }
            }
            if let Some(max_price) = filter.max_price {
                if zone.price_per_hour > max_price {
                    return false;
                }
            }
            true
        })
        .collect();

    result.sort_by(|a, b| a.id.cmp(&b.id));
    result
}

// ---------------------------------------------------------------------------
// Lookup by id
// ---------------------------------------------------------------------------

/// Exact-id lookup. `None` means the zone does not exist in the current
/// snapshot — a distinct outcome from an empty filtered list.
pub fn find_zone<'a>(snapshot: &'a Snapshot, id: &str) -> Option<&'a ParkingZone> {
    snapshot.zones.get(id)
}

// ---------------------------------------------------------------------------
// Radius search
// ---------------------------------------------------------------------------

/// All zones within `radius_km` great-circle kilometres of the center,
/// inclusive, sorted by id.
pub fn zones_within_radius<'a>(
    snapshot: &'a Snapshot,
    lat: f64,
    lng: f64,
    radius_km: f64,
) -> Vec<&'a ParkingZone> {
    let mut nearby: Vec<&ParkingZone> = snapshot
        .zones
        .values()
        .filter(|zone| haversine_km(lat, lng, zone.lat, zone.lng) <= radius_km)
        .collect();

    nearby.sort_by(|a, b| a.id.cmp(&b.id));
    nearby
}

/// Great-circle distance in kilometres between two WGS84 coordinates.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Aggregate statistics over the full snapshot; listing filters never
/// apply here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStats {
    pub total_spots: u32,
    pub available_spots: u32,
    pub total_locations: usize,
    pub average_price: f64,
    pub availability_stats: AvailabilityStats,
    pub last_updated: Option<String>,
}

/// Zone counts per availability bucket.
#[derive(Debug, Serialize)]
pub struct AvailabilityStats {
    pub available: usize,
    pub limited: usize,
    pub full: usize,
}

pub fn compute_stats(snapshot: &Snapshot) -> ZoneStats {
    let total_locations = snapshot.zones.len();
    let total_spots = snapshot.zones.values().map(|z| z.total_spots).sum();
    let available_spots = snapshot.zones.values().map(|z| z.available_spots).sum();

    let average_price = if total_locations == 0 {
        0.0
    } else {
        let sum: f64 = snapshot.zones.values().map(|z| z.price_per_hour).sum();
        (sum / total_locations as f64 * 100.0).round() / 100.0
    };

    let count_bucket = |bucket: Availability| {
        snapshot
            .zones
            .values()
            .filter(|z| z.availability == bucket)
            .count()
    };

    ZoneStats {
        total_spots,
        available_spots,
        total_locations,
        average_price,
        availability_stats: AvailabilityStats {
            available: count_bucket(Availability::Available),
            limited: count_bucket(Availability::Limited),
            full: count_bucket(Availability::Full),
        },
        last_updated: snapshot.last_updated.map(|t| t.to_rfc3339()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    fn zone(id: &str, name: &str, address: &str, availability: Availability) -> ParkingZone {
        ParkingZone {
            id: id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            lat: -37.8136,
            lng: 144.9631,
            availability,
            total_spots: 10,
            available_spots: 5,
            price_per_hour: 6.5,
            max_duration: "4 hours".to_string(),
            features: vec!["covered".to_string(), "security".to_string()],
            operating_hours: "24/7".to_string(),
            last_updated: "2025-08-01T09:15:00+10:00".to_string(),
            street_name: name.to_string(),
            street_number: String::new(),
            suburb: "Melbourne".to_string(),
            zone_number: id.parse().unwrap_or(0),
            accurate_address: None,
        }
    }

    fn snapshot(zones: Vec<ParkingZone>) -> Snapshot {
        let map: HashMap<String, ParkingZone> =
            zones.into_iter().map(|z| (z.id.clone(), z)).collect();
        Snapshot::new(map, Utc::now())
    }

    fn cbd_snapshot() -> Snapshot {
        snapshot(vec![
            zone(
                "7301",
                "Collins Street Parking",
                "120, Collins Street, Melbourne VIC 3000",
                Availability::Available,
            ),
            zone(
                "7302",
                "Zone 7302 Parking",
                "Zone 7302, Melbourne VIC 3000",
                Availability::Full,
            ),
            zone(
                "7303",
                "Little Bourke Street Parking",
                "Little Bourke Street, Chinatown, Melbourne VIC 3000",
                Availability::Limited,
            ),
        ])
    }

    // --- Filtering -----------------------------------------------------------

    #[test]
    fn test_filter_without_constraints_returns_all_sorted_by_id() {
        let snapshot = cbd_snapshot();
        let zones = filter_zones(&snapshot, &ZoneFilter::default());
        let ids: Vec<&str> = zones.iter().map(|z| z.id.as_str()).collect();
        assert_eq!(ids, vec!["7301", "7302", "7303"]);
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let snapshot = cbd_snapshot();
        let filter = ZoneFilter {
            search: Some("COLLINS".to_string()),
            ..Default::default()
        };
        let zones = filter_zones(&snapshot, &filter);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].id, "7301");
    }

    #[test]
    fn test_search_matches_address_too() {
        let snapshot = cbd_snapshot();
        let filter = ZoneFilter {
            search: Some("chinatown".to_string()),
            ..Default::default()
        };
        let zones = filter_zones(&snapshot, &filter);
        assert_eq!(zones.len(), 1, "address-only matches must be included");
        assert_eq!(zones[0].id, "7303");
    }

    #[test]
    fn test_availability_filter_is_exact() {
        let snapshot = cbd_snapshot();
        let filter = ZoneFilter {
            availability: Some(Availability::Full),
            ..Default::default()
        };
        let zones = filter_zones(&snapshot, &filter);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].id, "7302");
    }

    #[test]
    fn test_max_price_is_an_inclusive_upper_bound() {
        let snapshot = cbd_snapshot();

        let at_price = ZoneFilter {
            max_price: Some(6.5),
            ..Default::default()
        };
        assert_eq!(filter_zones(&snapshot, &at_price).len(), 3);

        let below_price = ZoneFilter {
            max_price: Some(5.0),
            ..Default::default()
        };
        assert!(filter_zones(&snapshot, &below_price).is_empty());
    }

    #[test]
    fn test_filters_compose_conjunctively() {
        let snapshot = cbd_snapshot();
        let filter = ZoneFilter {
            search: Some("street".to_string()),
            availability: Some(Availability::Limited),
            max_price: Some(10.0),
        };
        let zones = filter_zones(&snapshot, &filter);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].id, "7303");
    }

    // --- Lookup ---------------------------------------------------------------

    #[test]
    fn test_find_zone_by_exact_id() {
        let snapshot = cbd_snapshot();
        assert!(find_zone(&snapshot, "7301").is_some());
        assert!(find_zone(&snapshot, "9999").is_none());
        assert!(find_zone(&snapshot, "730").is_none(), "prefixes must not match");
    }

    // --- Haversine ------------------------------------------------------------

    #[test]
    fn test_haversine_zero_distance_to_self() {
        let d = haversine_km(-37.8136, 144.9631, -37.8136, 144.9631);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_haversine_small_cbd_distance() {
        // One block apart in the Melbourne CBD: small and strictly positive.
        let d = haversine_km(-37.8136, 144.9631, -37.8143, 144.9632);
        assert!(d > 0.0, "distinct points must be a positive distance apart");
        assert!(
            (0.05..0.15).contains(&d),
            "expected roughly 0.08-0.1 km, got {}",
            d
        );
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let there = haversine_km(-37.8136, 144.9631, -37.8200, 144.9700);
        let back = haversine_km(-37.8200, 144.9700, -37.8136, 144.9631);
        assert!((there - back).abs() < 1e-12);
    }

    // --- Radius search ---------------------------------------------------------

    #[test]
    fn test_radius_search_includes_only_zones_within_radius() {
        let mut far_zone = zone("9000", "Far Away Parking", "Somewhere else", Availability::Available);
        far_zone.lat = -37.9000; // ~10 km south of the CBD center
        far_zone.lng = 144.9631;

        let snapshot = snapshot(vec![
            zone("7301", "Collins Street Parking", "Collins Street", Availability::Available),
            far_zone,
        ]);

        let nearby = zones_within_radius(&snapshot, -37.8136, 144.9631, DEFAULT_RADIUS_KM);
        let ids: Vec<&str> = nearby.iter().map(|z| z.id.as_str()).collect();
        assert_eq!(ids, vec!["7301"]);
    }

    #[test]
    fn test_radius_search_empty_snapshot_is_empty() {
        let snapshot = Snapshot::default();
        assert!(zones_within_radius(&snapshot, -37.8136, 144.9631, 2.0).is_empty());
    }

    // --- Statistics -------------------------------------------------------------

    #[test]
    fn test_stats_sum_spots_and_count_buckets() {
        let snapshot = cbd_snapshot();
        let stats = compute_stats(&snapshot);

        assert_eq!(stats.total_locations, 3);
        assert_eq!(stats.total_spots, 30);
        assert_eq!(stats.available_spots, 15);
        assert_eq!(stats.availability_stats.available, 1);
        assert_eq!(stats.availability_stats.limited, 1);
        assert_eq!(stats.availability_stats.full, 1);
        assert!(stats.last_updated.is_some());
    }

    #[test]
    fn test_stats_average_price_rounds_to_cents() {
        let mut a = zone("1", "A", "A", Availability::Available);
        let mut b = zone("2", "B", "B", Availability::Available);
        let mut c = zone("3", "C", "C", Availability::Available);
        a.price_per_hour = 5.0;
        b.price_per_hour = 6.0;
        c.price_per_hour = 6.0;
        let stats = compute_stats(&snapshot(vec![a, b, c]));
        // 17/3 = 5.666..., rounded to two decimals
        assert_eq!(stats.average_price, 5.67);
    }

    #[test]
    fn test_stats_empty_snapshot_reports_zero_average() {
        let stats = compute_stats(&Snapshot::default());
        assert_eq!(stats.total_locations, 0);
        assert_eq!(stats.total_spots, 0);
        assert_eq!(stats.average_price, 0.0, "no zones must not divide by zero");
        assert!(stats.last_updated.is_none());
    }
}
