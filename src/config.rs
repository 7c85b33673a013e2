/// Runtime configuration.
///
/// Compiled defaults match the reference deployment; every field can be
/// overridden through a `PARKMON_*` environment variable (a `.env` file is
/// loaded by `main` via dotenv before this runs). Bad override values fall
/// back to the default rather than aborting startup.

use std::env;
use std::str::FromStr;

/// Upstream sensor dataset (City of Melbourne open data, explore API v2.1).
pub const DEFAULT_SENSOR_API_BASE: &str =
    "https://data.melbourne.vic.gov.au/api/explore/v2.1/catalog/datasets/on-street-parking-bay-sensors/records";

/// Nominatim reverse-geocoding endpoint.
pub const DEFAULT_GEOCODER_BASE: &str = "https://nominatim.openstreetmap.org/reverse";

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Upstream sensor dataset endpoint
    pub sensor_api_base: String,

    /// Page-size bound for one sensor fetch
    pub sensor_page_limit: u32,

    /// Seconds between ingestion cycles (125 in the reference deployment)
    pub poll_interval_secs: u64,

    /// Reverse-geocoding endpoint
    pub geocoder_base: String,

    /// Client identification header required by Nominatim
    pub geocoder_user_agent: String,

    /// Per-request timeout for outbound HTTP calls
    pub http_timeout_secs: u64,

    /// Worker threads for the per-zone enrichment fan-out
    pub enrich_workers: usize,

    /// Port for the HTTP read API
    pub endpoint_port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            sensor_api_base: DEFAULT_SENSOR_API_BASE.to_string(),
            sensor_page_limit: 100,
            poll_interval_secs: 125,
            geocoder_base: DEFAULT_GEOCODER_BASE.to_string(),
            geocoder_user_agent: "parkmon/1.0".to_string(),
            http_timeout_secs: 10,
            enrich_workers: 4,
            endpoint_port: 5000,
        }
    }
}

impl ServiceConfig {
    /// Builds a configuration from defaults plus environment overrides.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sensor_api_base: env_string("PARKMON_SENSOR_API", defaults.sensor_api_base),
            sensor_page_limit: env_parse("PARKMON_PAGE_LIMIT", defaults.sensor_page_limit),
            poll_interval_secs: env_parse("PARKMON_POLL_SECS", defaults.poll_interval_secs),
            geocoder_base: env_string("PARKMON_GEOCODER", defaults.geocoder_base),
            geocoder_user_agent: env_string("PARKMON_USER_AGENT", defaults.geocoder_user_agent),
            http_timeout_secs: env_parse("PARKMON_HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
            enrich_workers: env_parse("PARKMON_ENRICH_WORKERS", defaults.enrich_workers),
            endpoint_port: env_parse("PORT", defaults.endpoint_port),
        }
    }
}

fn env_string(key: &str, default: String) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default,
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or(default),
        Err(_) => default,
    }
}
