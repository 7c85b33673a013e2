//! Parking Monitoring Service - Main Daemon
//!
//! A server-side daemon that continuously:
//! 1. Ingests live parking-bay sensor data from the Melbourne open-data API
//! 2. Aggregates bays into per-zone availability snapshots
//! 3. Enriches zones with reverse-geocoded addresses
//! 4. Publishes each finished snapshot atomically
//! 5. Serves the snapshot through an HTTP read API
//!
//! Usage:
//!   cargo run --release                    # Daemon + read API on the default port
//!   cargo run --release -- --endpoint 8080 # Read API on port 8080
//!
//! Environment:
//!   PORT, PARKMON_SENSOR_API, PARKMON_POLL_SECS, ... (see config.rs)

use parkmon_service::cache::SnapshotCache;
use parkmon_service::config::ServiceConfig;
use parkmon_service::daemon::Daemon;
use parkmon_service::endpoint;
use std::env;

fn main() {
    println!("🅿️  Parking Monitoring Service");
    println!("==============================\n");

    dotenv::dotenv().ok();
    let mut config = ServiceConfig::from_env();

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--endpoint" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse() {
                        Ok(port) => config.endpoint_port = port,
                        Err(_) => {
                            eprintln!("Error: --endpoint requires a port number");
                            std::process::exit(1);
                        }
                    }
                    i += 2;
                } else {
                    eprintln!("Error: --endpoint requires a port number");
                    std::process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--endpoint PORT]", args[0]);
                std::process::exit(1);
            }
        }
    }

    let cache = SnapshotCache::new();

    // Start the read API on a background thread; queries serve the empty
    // snapshot until the first ingestion cycle publishes.
    {
        let cache = cache.clone();
        let port = config.endpoint_port;
        std::thread::spawn(move || {
            if let Err(e) = endpoint::start_endpoint_server(port, cache) {
                eprintln!("❌ Endpoint server error: {}", e);
            }
        });
    }

    println!("📊 Initializing daemon...");
    let daemon = match Daemon::new(config, cache) {
        Ok(daemon) => daemon,
        Err(e) => {
            eprintln!("\n❌ Initialization failed: {}\n", e);
            std::process::exit(1);
        }
    };
    println!("✓ Daemon initialized\n");

    // Run the ingestion loop on the main thread (never returns)
    daemon.run();
}
