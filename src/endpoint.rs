/// HTTP read API over the published snapshot.
///
/// Provides a simple REST API for clients to query the current parking
/// snapshot. Every handler reads a snapshot handle from the cache and never
/// triggers ingestion or mutates state.
///
/// Endpoints:
/// - GET /zones                 - Filtered zone list (search, availability, maxPrice)
/// - GET /zones/stats           - Aggregate statistics
/// - GET /zones/search/location - Radius search (lat, lng required; radius km)
/// - GET /zones/{id}            - Single zone by id
/// - GET /health                - Service health check
///
/// All responses are JSON wrapped as `{"success": bool, ...}` except
/// /health, which reports liveness only.

use std::collections::HashMap;

use crate::cache::SnapshotCache;
use crate::model::Availability;
use crate::query::{self, ZoneFilter, DEFAULT_RADIUS_KM};

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start the read-API server on the specified port. Blocks serving requests;
/// run it on its own thread.
pub fn start_endpoint_server(port: u16, cache: SnapshotCache) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    println!("📡 HTTP endpoint listening on http://0.0.0.0:{}", port);
    println!("   GET /zones                 - Filtered zone list");
    println!("   GET /zones/stats           - Aggregate statistics");
    println!("   GET /zones/search/location - Radius search");
    println!("   GET /zones/{{id}}            - Single zone");
    println!("   GET /health                - Service health check\n");

    for request in server.incoming_requests() {
        let (status, body) = route_request(request.url(), &cache);
        if let Err(e) = request.respond(create_response(status, body)) {
            eprintln!("Failed to send response: {}", e);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Dispatches a request URL to its handler and returns (status, JSON body).
/// Static paths are matched before the parameterized `/zones/{id}` so that
/// "stats" and "search" can never be read as zone ids.
pub fn route_request(url: &str, cache: &SnapshotCache) -> (u16, serde_json::Value) {
    let (path, query_string) = match url.split_once('?') {
        Some((path, query)) => (path, query),
        None => (url, ""),
    };
    let params = parse_query(query_string);

    match path {
        "/health" => handle_health(),
        "/zones" | "/zones/" => handle_list(cache, &params),
        "/zones/stats" => handle_stats(cache),
        "/zones/search/location" => handle_location_search(cache, &params),
        _ if path.starts_with("/zones/") => {
            handle_get_by_id(cache, path.trim_start_matches("/zones/"))
        }
        _ => (
            404,
            serde_json::json!({
                "success": false,
                "error": "Not found",
                "available_endpoints": [
                    "/health",
                    "/zones",
                    "/zones/stats",
                    "/zones/search/location",
                    "/zones/{id}"
                ]
            }),
        ),
    }
}

/// Parses a URL query string into a key → value map. Values are
/// percent-decoded ('+' included); empty values are dropped so that
/// `?search=` behaves like no filter at all.
fn parse_query(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = value.replace('+', " ");
        let decoded = match urlencoding::decode(&value) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => value,
        };
        if !decoded.is_empty() {
            params.insert(key.to_string(), decoded);
        }
    }

    params
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Handle /health endpoint
fn handle_health() -> (u16, serde_json::Value) {
    (
        200,
        serde_json::json!({
            "status": "ok",
            "service": "parkmon_service",
            "version": "0.1.0"
        }),
    )
}

/// Handle GET /zones with optional search/availability/maxPrice filters
fn handle_list(cache: &SnapshotCache, params: &HashMap<String, String>) -> (u16, serde_json::Value) {
    let mut filter = ZoneFilter {
        search: params.get("search").cloned(),
        ..Default::default()
    };

    if let Some(raw) = params.get("availability") {
        match Availability::from_str(raw) {
            Some(bucket) => filter.availability = Some(bucket),
            None => {
                return validation_error("availability must be one of available, limited, full");
            }
        }
    }

    if let Some(raw) = params.get("maxPrice") {
        match raw.parse::<f64>() {
            Ok(price) => filter.max_price = Some(price),
            Err(_) => return validation_error("maxPrice must be a number"),
        }
    }

    let snapshot = cache.current();
    let zones = query::filter_zones(&snapshot, &filter);
    let total = zones.len();

    (
        200,
        serde_json::json!({
            "success": true,
            "data": zones,
            "total": total
        }),
    )
}

/// Handle GET /zones/stats
fn handle_stats(cache: &SnapshotCache) -> (u16, serde_json::Value) {
    let snapshot = cache.current();
    let stats = query::compute_stats(&snapshot);

    (
        200,
        serde_json::json!({
            "success": true,
            "data": stats
        }),
    )
}

/// Handle GET /zones/search/location. Both coordinates are required; the
/// radius defaults to 2 km.
fn handle_location_search(
    cache: &SnapshotCache,
    params: &HashMap<String, String>,
) -> (u16, serde_json::Value) {
    let lat = params.get("lat").and_then(|v| v.parse::<f64>().ok());
    let lng = params.get("lng").and_then(|v| v.parse::<f64>().ok());

    let (lat, lng) = match (lat, lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return validation_error("Latitude and longitude are required"),
    };

    let radius_km = match params.get("radius") {
        None => DEFAULT_RADIUS_KM,
        Some(raw) => match raw.parse::<f64>() {
            Ok(radius) => radius,
            Err(_) => return validation_error("radius must be a number"),
        },
    };

    let snapshot = cache.current();
    let nearby = query::zones_within_radius(&snapshot, lat, lng, radius_km);
    let total = nearby.len();

    (
        200,
        serde_json::json!({
            "success": true,
            "data": nearby,
            "total": total
        }),
    )
}

/// Handle GET /zones/{id}
fn handle_get_by_id(cache: &SnapshotCache, id: &str) -> (u16, serde_json::Value) {
    let snapshot = cache.current();

    match query::find_zone(&snapshot, id) {
        Some(zone) => (
            200,
            serde_json::json!({
                "success": true,
                "data": zone
            }),
        ),
        None => (
            404,
            serde_json::json!({
                "success": false,
                "error": "Zone not found"
            }),
        ),
    }
}

fn validation_error(message: &str) -> (u16, serde_json::Value) {
    (
        400,
        serde_json::json!({
            "success": false,
            "error": message
        }),
    )
}

/// Create HTTP response with JSON body
fn create_response(
    status_code: u16,
    json: serde_json::Value,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string(&json).unwrap_or_else(|_| "{}".to_string());
    let bytes = body.into_bytes();

    tiny_http::Response::from_data(bytes)
        .with_status_code(tiny_http::StatusCode::from(status_code))
        .with_header(
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                .expect("static header is valid"),
        )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
