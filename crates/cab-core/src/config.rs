//! Trip configuration.
//!
//! Typically built with `TripConfig::default()` and a few overrides, or
//! deserialized by the application (with the `serde` feature) and handed to
//! the trip coordinator.

use std::time::Duration;

use crate::{CabError, CabResult, Point};

/// Top-level configuration for one vehicle's trips.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TripConfig {
    /// Where the vehicle is parked before the first trip.
    pub vehicle_start: Point,

    /// Metres travelled per animation tick.  1.38 m every 100 ms is roughly
    /// 50 km/h.
    pub step_m: f64,

    /// Milliseconds between animation ticks.
    pub tick_interval_ms: u64,

    /// ETA replies at or below this many seconds render as "We are here!".
    pub arriving_threshold_secs: f64,

    /// Issue an ETA query every N animation ticks.  1 = every tick.
    pub eta_every_ticks: u32,

    /// Buffer size of the lifecycle signal channel.  Slow subscribers that
    /// fall further behind than this observe a lag error.
    pub signal_capacity: usize,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            vehicle_start:           Point::new(59.944047, 30.230815),
            step_m:                  1.38,
            tick_interval_ms:        100,
            arriving_threshold_secs: 5.0,
            eta_every_ticks:         1,
            signal_capacity:         64,
        }
    }
}

impl TripConfig {
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject values the animator or the signal channel cannot work with.
    pub fn validate(&self) -> CabResult<()> {
        if !self.vehicle_start.is_valid() {
            return Err(CabError::InvalidCoordinate {
                lat: self.vehicle_start.lat,
                lon: self.vehicle_start.lon,
            });
        }
        if !(self.step_m.is_finite() && self.step_m > 0.0) {
            return Err(CabError::Config(format!("step_m must be positive, got {}", self.step_m)));
        }
        if self.tick_interval_ms == 0 {
            return Err(CabError::Config("tick_interval_ms must be non-zero".into()));
        }
        if self.eta_every_ticks == 0 {
            return Err(CabError::Config("eta_every_ticks must be non-zero".into()));
        }
        if self.signal_capacity == 0 {
            return Err(CabError::Config("signal_capacity must be non-zero".into()));
        }
        if !self.arriving_threshold_secs.is_finite() {
            return Err(CabError::Config("arriving_threshold_secs must be finite".into()));
        }
        Ok(())
    }
}
