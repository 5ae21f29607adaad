//! Startup wiring example for promise-registry.
//!
//! Demonstrates:
//! - Services started in arbitrary order finding each other by name
//! - A service whose construction waits on another service
//! - A failing service whose error reaches everything that depends on it
//!
//! Run with: `cargo run --example startup_wiring`

use promise_registry::{define_registry, SourceError};
use std::time::Duration;

// Registry holding the endpoints of every service, keyed by service name
define_registry!(services, String);

async fn start_api() {
    // The API needs the database, which may not have started yet.
    services::register_future("api", async {
        let database = services::once("database")?.await?;
        println!("   [api] connected to {database}");
        Ok::<_, SourceError>("http://localhost:8080".to_string())
    })
    .expect("api registers once");
}

async fn start_database() {
    tokio::time::sleep(Duration::from_millis(20)).await;
    services::register_value("database", "postgres://localhost/app".to_string())
        .expect("database registers once");
    println!("   [database] ready");
}

async fn start_search() {
    services::register_future("search", async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Err::<String, _>(SourceError::msg("index directory is missing"))
    })
    .expect("search registers once");
}

#[tokio::main]
async fn main() {
    println!("=== promise-registry: Startup Wiring ===\n");

    println!("1. Starting services out of order...");
    tokio::join!(start_api(), start_database(), start_search());

    println!("\n2. Waiting for the API...");
    match services::once("api").expect("valid name").await {
        Ok(endpoint) => println!("   api available at {endpoint}"),
        Err(err) => println!("   api failed: {err}"),
    }

    println!("\n3. Waiting for search...");
    match services::once("search").expect("valid name").await {
        Ok(endpoint) => println!("   search available at {endpoint}"),
        Err(err) => println!("   search failed: {err}"),
    }

    println!("\n=== Done ===");
}
