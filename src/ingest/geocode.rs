/// Nominatim reverse-geocoding client.
///
/// One lookup per zone per ingestion cycle, keyed by the zone's
/// representative coordinate. The resolver is strictly best-effort: any
/// failure — transport, status, malformed body, missing `display_name` —
/// yields `None`, never an error to the caller. A zone that cannot be
/// resolved falls back to the synthesized naming chain in `enrich`.
///
/// Nominatim usage policy requires a client identification header; the
/// configured user agent is sent on every request.

use serde::Deserialize;

use crate::config::ServiceConfig;

// ---------------------------------------------------------------------------
// Response structure
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds a reverse-geocoding URL for the given coordinate. `zoom=18`
/// requests building-level detail; `addressdetails=1` asks for the
/// structured address alongside the display name.
pub fn build_reverse_url(base: &str, lat: f64, lon: f64) -> String {
    format!(
        "{}?format=json&lat={}&lon={}&zoom=18&addressdetails=1",
        base, lat, lon
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Extracts the display name from a reverse-geocoding response body.
/// Nominatim reports unresolvable coordinates as `{"error": ...}` with no
/// `display_name`; both that and a malformed body parse to `None`.
pub fn parse_reverse_response(json: &str) -> Option<String> {
    let response: ReverseResponse = serde_json::from_str(json).ok()?;
    response.display_name.filter(|name| !name.is_empty())
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Resolves a coordinate to a human-readable address, or `None` on any
/// failure. Failures are logged and swallowed here: a missing address must
/// not abort the zone, let alone the cycle.
pub fn resolve_address(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
    lat: f64,
    lon: f64,
) -> Option<String> {
    let url = build_reverse_url(&config.geocoder_base, lat, lon);

    let response = match client
        .get(&url)
        .header("User-Agent", &config.geocoder_user_agent)
        .header("Accept", "application/json")
        .send()
    {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Reverse geocoding error for ({}, {}): {}", lat, lon, e);
            return None;
        }
    };

    if !response.status().is_success() {
        eprintln!(
            "Reverse geocoding returned status {} for ({}, {})",
            response.status(),
            lat,
            lon
        );
        return None;
    }

    let body = response.text().ok()?;
    parse_reverse_response(&body)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
