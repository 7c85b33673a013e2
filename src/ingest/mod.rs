/// Upstream API clients: parking-bay sensor feed and reverse geocoding.
///
/// Each upstream source gets its own file. URL construction and response
/// parsing are split from transport so the pure parts are testable against
/// the fixtures without a network.

pub mod fixtures;
pub mod geocode;
pub mod sensors;
