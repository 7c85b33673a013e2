/// parkmon_service: Melbourne on-street parking availability service.
///
/// # Module structure
///
/// ```text
/// parkmon_service
/// ├── model     — shared data types (ParkingZone, Snapshot, Availability, IngestError)
/// ├── config    — runtime configuration (compiled defaults + env overrides)
/// ├── ingest
/// │   ├── sensors  — parking-bay sensor API: URL construction + JSON parsing
/// │   ├── geocode  — Nominatim reverse geocoding (best-effort, per zone)
/// │   └── fixtures (test only) — representative API response payloads
/// ├── aggregate — per-zone rollup of raw bay records
/// ├── enrich    — zone naming and address synthesis
/// ├── cache     — published snapshot cache (atomic whole-snapshot swap)
/// ├── daemon    — ingestion loop (fetch → aggregate → enrich → classify → publish)
/// ├── query     — read-side filtering, radius search, statistics
/// └── endpoint  — HTTP read API for parking zones
/// ```

/// Public modules
pub mod aggregate;
pub mod cache;
pub mod config;
pub mod daemon;
pub mod endpoint;
pub mod enrich;
pub mod ingest;
pub mod model;
pub mod query;
