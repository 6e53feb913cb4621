//! # Intersection Demo
//!
//! Drives one traffic light with a few vehicle threads that queue at the
//! stop line and cross on green.
//!
//! Usage:
//!
//! ```text
//! intersection_demo [config.toml]
//! RUST_LOG=intersection=debug intersection_demo
//! ```
//!
//! Each green transition releases one waiting vehicle, so with the default
//! 4-6 second cycle the run takes a while. Point it at a config with shorter
//! cycles for a quick look.

use crossbeam_channel::unbounded;
use intersection::{LightConfig, LightResult, TrafficLight};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Vehicles sent toward the intersection.
const VEHICLES: usize = 3;

/// Gap between two vehicle arrivals.
const ARRIVAL_GAP: Duration = Duration::from_millis(500);

/// Report from a vehicle that made it across.
#[derive(Debug)]
struct Crossing {
    vehicle: usize,
    waited: Duration,
}

fn main() -> LightResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => LightConfig::load(path)?,
        None => LightConfig::default(),
    };

    println!("===========================================");
    println!("INTERSECTION - {}", config.name);
    println!(
        "Cycle: {}-{} ms, poll slice: {} ms",
        config.min_cycle_ms, config.max_cycle_ms, config.poll_slice_ms
    );
    println!("===========================================");

    let light = Arc::new(TrafficLight::with_config(config)?);
    light.start()?;

    let (tx, rx) = unbounded();
    let handles: Vec<_> = (0..VEHICLES)
        .map(|vehicle| {
            let light = Arc::clone(&light);
            let tx = tx.clone();
            thread::spawn(move || {
                thread::sleep(ARRIVAL_GAP * u32::try_from(vehicle).unwrap_or(u32::MAX));
                println!("Vehicle {vehicle} waiting at {} light", light.current_phase());

                let arrived = Instant::now();
                light.wait_for_green();
                let _ = tx.send(Crossing {
                    vehicle,
                    waited: arrived.elapsed(),
                });
            })
        })
        .collect();
    drop(tx);

    for crossing in rx.iter() {
        println!(
            "Vehicle {} crossed after {:.2}s",
            crossing.vehicle,
            crossing.waited.as_secs_f64()
        );
    }
    for handle in handles {
        let _ = handle.join();
    }

    light.stop();

    let stats = light.stats();
    println!("\n=== Summary ===");
    println!("Toggles: {} ({} green, {} red)", stats.toggles, stats.greens, stats.reds);
    if let (Some(shortest), Some(longest)) = (stats.shortest_cycle, stats.longest_cycle) {
        println!("Cycle range: {shortest:?} - {longest:?}");
    }
    Ok(())
}
