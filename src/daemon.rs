/// Core daemon implementation for the parking monitoring service.
///
/// This module implements the ingestion loop that:
/// 1. Fetches the parking-bay sensor feed
/// 2. Aggregates bay records into per-zone rollups
/// 3. Enriches each zone with a reverse-geocoded address (parallel fan-out)
/// 4. Classifies per-zone availability
/// 5. Publishes the finished snapshot with one atomic swap
///
/// A failure at any stage before publish aborts the cycle; the previously
/// published snapshot stays live and the next scheduled tick retries.

use std::collections::HashMap;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use threadpool::ThreadPool;

use crate::aggregate::{aggregate_by_zone, ZoneAggregate};
use crate::cache::SnapshotCache;
use crate::config::ServiceConfig;
use crate::enrich::enrich_zone;
use crate::ingest::{geocode, sensors};
use crate::model::{Availability, IngestError, ParkingZone, Snapshot};

// ---------------------------------------------------------------------------
// Cycle outcome
// ---------------------------------------------------------------------------

/// Result of one scheduled tick.
#[derive(Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A snapshot with this many zones was published.
    Published { zones: usize },
    /// A previous cycle was still in flight; this tick was skipped.
    Skipped,
}

// ---------------------------------------------------------------------------
// Daemon
// ---------------------------------------------------------------------------

/// Main daemon state
pub struct Daemon {
    config: ServiceConfig,
    cache: SnapshotCache,
    client: reqwest::blocking::Client,
    pool: ThreadPool,
    cycle_in_flight: AtomicBool,
}

impl Daemon {
    /// Creates a daemon publishing into the given cache. The HTTP client
    /// carries a bounded per-request timeout so a hung upstream cannot
    /// stall a cycle indefinitely.
    pub fn new(config: ServiceConfig, cache: SnapshotCache) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        let pool = ThreadPool::new(config.enrich_workers.max(1));

        Ok(Self {
            config,
            cache,
            client,
            pool,
            cycle_in_flight: AtomicBool::new(false),
        })
    }

    /// Runs one full ingestion cycle, unless one is already in flight — the
    /// single-flight guard turns an overlapping tick into a skip rather
    /// than a concurrent cycle.
    pub fn run_cycle(&self) -> Result<CycleOutcome, IngestError> {
        if self
            .cycle_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(CycleOutcome::Skipped);
        }

        let result = self.run_cycle_stages();
        self.cycle_in_flight.store(false, Ordering::SeqCst);
        result
    }

    fn run_cycle_stages(&self) -> Result<CycleOutcome, IngestError> {
        let records = sensors::fetch_records(&self.client, &self.config)?;
        let aggregates = aggregate_by_zone(&records);
        let mut zones = self.enrich_all(aggregates);
        classify_zones(&mut zones);

        let count = zones.len();
        self.cache.replace(Snapshot::new(zones, Utc::now()));
        Ok(CycleOutcome::Published { zones: count })
    }

    /// Enriches every aggregate, fanning the per-zone geocoding calls out
    /// over the worker pool so cycle latency scales with pool size rather
    /// than zone count. One zone's resolver failure never aborts siblings:
    /// the failed zone simply enriches with `None` and falls back to
    /// synthesized naming.
    fn enrich_all(&self, aggregates: HashMap<u32, ZoneAggregate>) -> HashMap<String, ParkingZone> {
        let cycle_time = Utc::now();
        let total = aggregates.len();
        let (tx, rx) = mpsc::channel();

        for aggregate in aggregates.into_values() {
            let tx = tx.clone();
            let client = self.client.clone();
            let config = self.config.clone();
            self.pool.execute(move || {
                let resolved = geocode::resolve_address(
                    &client,
                    &config,
                    aggregate.location.lat,
                    aggregate.location.lon,
                );
                let zone = enrich_zone(&aggregate, resolved, cycle_time);
                // Send only fails if the cycle was abandoned; nothing to do then
                let _ = tx.send(zone);
            });
        }
        drop(tx);

        let mut zones = HashMap::with_capacity(total);
        for zone in rx {
            zones.insert(zone.id.clone(), zone);
        }
        zones
    }

    /// Main daemon loop (runs indefinitely): one cycle immediately, then
    /// one per poll interval, sleeping only for the remainder of the period
    /// after each cycle's own runtime.
    pub fn run(&self) {
        println!("🔄 Starting ingestion loop...");
        println!("   Poll interval: {} seconds", self.config.poll_interval_secs);

        loop {
            let start = Utc::now();

            match self.run_cycle() {
                Ok(CycleOutcome::Published { zones }) => {
                    println!("✓ Real-time parking data updated ({} zones)", zones);
                }
                Ok(CycleOutcome::Skipped) => {
                    println!("• Previous cycle still in flight, skipping tick");
                }
                Err(e) => {
                    eprintln!("✗ Ingestion cycle failed: {}", e);
                }
            }

            let elapsed = (Utc::now() - start).num_seconds();
            let sleep_seconds = self.config.poll_interval_secs as i64 - elapsed;

            if sleep_seconds > 0 {
                thread::sleep(Duration::from_secs(sleep_seconds as u64));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Classification pass
// ---------------------------------------------------------------------------

/// Assigns every zone its availability bucket from the counted spots. Runs
/// over the cycle-local map, before publish; the published snapshot is
/// never mutated.
pub fn classify_zones(zones: &mut HashMap<String, ParkingZone>) {
    for zone in zones.values_mut() {
        zone.availability = Availability::classify(zone.available_spots, zone.total_spots);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::zone_marker;
    use crate::model::Coordinate;

    fn zone_with_counts(id: &str, available: u32, total: u32) -> ParkingZone {
        let aggregate = ZoneAggregate {
            zone_number: id.parse().unwrap_or(0),
            location: Coordinate {
                lat: -37.8136,
                lon: 144.9631,
            },
            street_name: zone_marker(id.parse().unwrap_or(0)),
            street_number: String::new(),
            suburb: "Melbourne".to_string(),
            lastupdated: None,
            total_spots: total,
            available_spots: available,
        };
        enrich_zone(&aggregate, None, Utc::now())
    }

    #[test]
    fn test_classify_zones_assigns_buckets_from_counts() {
        let mut zones = HashMap::new();
        zones.insert("1".to_string(), zone_with_counts("1", 0, 8));
        zones.insert("2".to_string(), zone_with_counts("2", 1, 10));
        zones.insert("3".to_string(), zone_with_counts("3", 6, 10));
        zones.insert("4".to_string(), zone_with_counts("4", 0, 0));

        classify_zones(&mut zones);

        assert_eq!(zones["1"].availability, Availability::Full);
        assert_eq!(zones["2"].availability, Availability::Limited);
        assert_eq!(zones["3"].availability, Availability::Available);
        assert_eq!(
            zones["4"].availability,
            Availability::Full,
            "a zone with no counted spots must classify as full"
        );
    }

    #[test]
    fn test_run_cycle_skips_when_one_is_in_flight() {
        let daemon = Daemon::new(ServiceConfig::default(), SnapshotCache::new())
            .expect("daemon should build");

        daemon.cycle_in_flight.store(true, Ordering::SeqCst);

        let outcome = daemon.run_cycle().expect("skip is not an error");
        assert_eq!(outcome, CycleOutcome::Skipped);
        assert!(
            daemon.cycle_in_flight.load(Ordering::SeqCst),
            "a skipped tick must not clear the holder's flag"
        );
    }

    #[test]
    fn test_daemon_uses_configured_worker_count() {
        let mut config = ServiceConfig::default();
        config.enrich_workers = 2;
        let daemon =
            Daemon::new(config, SnapshotCache::new()).expect("daemon should build");
        assert_eq!(daemon.pool.max_count(), 2);
    }
}
