//! Basic usage example for promise-registry.
//!
//! Demonstrates:
//! - Waiting for a name before its producer exists with `once()`
//! - Supplying values with `register_value()` and `register_future()`
//! - Duplicate registrations being rejected
//! - Isolated registries from `make_registry()`
//!
//! Run with: `cargo run --example basic_usage`

use promise_registry::{make_registry, once, register_future, register_value, RegistryApi};
use std::time::Duration;

#[tokio::main]
async fn main() {
    println!("=== promise-registry: Basic Usage ===\n");

    // -------------------------------------------------------------------------
    // 1. Consumer first
    // -------------------------------------------------------------------------
    println!("1. Asking for \"hawk\" before anyone registered it...");

    let waiting = once("hawk").expect("valid name");

    register_value("hawk", "Bird of prey").expect("first registration");

    let hawk = waiting.await.expect("hawk resolves");
    println!("   hawk: {}", hawk.downcast::<&str>().expect("a &str"));

    // -------------------------------------------------------------------------
    // 2. Producer first, with a value that takes a while
    // -------------------------------------------------------------------------
    println!("\n2. Registering \"eel\" as a future...");

    register_future("eel", async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Ok::<_, promise_registry::SourceError>("Snake-like sea creature".to_string())
    })
    .expect("first registration");

    let eel = once("eel").expect("valid name").await.expect("eel resolves");
    println!("   eel: {}", eel.downcast::<String>().expect("a String"));

    // -------------------------------------------------------------------------
    // 3. Write-once
    // -------------------------------------------------------------------------
    println!("\n3. Registering \"hawk\" again...");

    match register_value("hawk", "Has sharp talons") {
        Ok(_) => println!("   unexpectedly accepted"),
        Err(err) => println!("   rejected: {err}"),
    }

    // -------------------------------------------------------------------------
    // 4. Isolated registries
    // -------------------------------------------------------------------------
    println!("\n4. Separate registries for separate animals...");

    let spider = make_registry::<u32>();
    let dog = make_registry::<u32>();
    spider.register_value("legs", 8).expect("spider legs");
    dog.register_value("legs", 4).expect("dog legs");

    println!("   spider legs: {}", spider.once("legs").expect("valid name").await.expect("resolves"));
    println!("   dog legs: {}", dog.once("legs").expect("valid name").await.expect("resolves"));

    println!("\n=== Done ===");
}
