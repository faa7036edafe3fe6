//! pickup: one cab, one passenger, two legs.
//!
//! Parks a cab on Vasilyevsky Island, places a pickup and a drop-off point,
//! and lets the coordinator drive both legs on a straight-line router while
//! the ETA badge text is printed as it changes.  Ticks are sped up; each leg
//! still ends with the fixed 3 s boarding pause.
//!
//! Set `RUST_LOG=cab_trip=debug` (or `trace` for per-tick positions) for
//! more detail.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cab_core::{Point, TripConfig};
use cab_route::StraightLineClient;
use cab_trip::{EtaDisplay, TripCoordinator, TripPhase, TripSignal};

// ── Constants ─────────────────────────────────────────────────────────────────

const TICK_INTERVAL_MS: u64 = 10;
const TRIP_TIMEOUT:     Duration = Duration::from_secs(120);

// ── ETA badge ─────────────────────────────────────────────────────────────────

/// Prints the badge text whenever it changes.
#[derive(Default)]
struct ConsoleBadge {
    last: Mutex<String>,
}

impl EtaDisplay for ConsoleBadge {
    fn set_text(&self, text: &str) {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if *last != text {
            println!("  ETA: {text}");
            *last = text.to_string();
        }
    }

    fn anchor(&self, at: Point) {
        println!("  badge pinned at {at}");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== pickup: cab_twin ride animator ===");

    // 1. Config: default geography, faster ticks.
    let config = TripConfig {
        tick_interval_ms: TICK_INTERVAL_MS,
        ..TripConfig::default()
    };
    let start = config.vehicle_start;
    let pickup = start.offset(-0.0020, 0.0015);
    let drop_off = pickup.offset(-0.0012, 0.0030);
    println!("Cab parked at {start}");
    println!("Pickup {pickup} ({:.0} m), drop-off {drop_off} ({:.0} m)", start.distance_m(pickup), pickup.distance_m(drop_off));
    println!();

    // 2. Coordinator.
    let (handle, task) = TripCoordinator::spawn(config, StraightLineClient::default(), ConsoleBadge::default())
        .context("starting trip coordinator")?;
    let mut signals = handle.subscribe();

    // 3. Place both points.
    let t0 = Instant::now();
    handle.place(pickup)?;
    handle.place(drop_off)?;

    // 4. Follow the trip until it completes.
    let finished = tokio::time::timeout(TRIP_TIMEOUT, async {
        loop {
            match signals.recv().await {
                Ok(TripSignal::TripComplete(trip)) => {
                    println!("[{:>6.2} s] {trip} complete", t0.elapsed().as_secs_f64());
                    return Ok(());
                }
                Ok(signal) => {
                    let vehicle = handle.vehicle().snapshot();
                    println!(
                        "[{:>6.2} s] {signal:?} at {} heading {}",
                        t0.elapsed().as_secs_f64(),
                        vehicle.position,
                        vehicle.heading,
                    );
                }
                Err(RecvError::Lagged(n)) => info!(missed = n, "signal subscriber lagged"),
                Err(RecvError::Closed) => return Err(anyhow::anyhow!("coordinator stopped early")),
            }
        }
    })
    .await
    .context("trip did not finish in time")?;
    finished?;

    // 5. Summary.
    let vehicle = handle.vehicle().snapshot();
    println!();
    println!("Final phase:    {}", handle.phase());
    println!("Final position: {} ({:.2} m from drop-off)", vehicle.position, vehicle.position.distance_m(drop_off));
    anyhow::ensure!(handle.phase() == TripPhase::Arrived, "trip ended in phase {}", handle.phase());

    drop(handle);
    task.await.context("coordinator task")?;
    Ok(())
}
