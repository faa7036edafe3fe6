//! Timer-driven animation runs.

use std::collections::HashMap;
use std::time::Duration;

use cab_core::{CabError, Point, TripConfig, VehicleId};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace};

use crate::{AnimationTick, MotionError, MotionResult, PathCursor, RunId, SharedVehicle};

/// Boarding / alighting pause between the last tick of a run and its arrival
/// callback.  Fixed: runs cannot shorten or skip it.
pub const SETTLE_DELAY: Duration = Duration::from_millis(3_000);

// ── AnimationParams ───────────────────────────────────────────────────────────

/// Step size and tick cadence of one animation run.  The settle delay is
/// always [`SETTLE_DELAY`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationParams {
    /// Metres per tick.
    pub step_m:        f64,
    /// Time between ticks.
    pub tick_interval: Duration,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            step_m:        1.38,
            tick_interval: Duration::from_millis(100),
        }
    }
}

impl AnimationParams {
    /// Validated constructor.  `step_m` must be positive and finite and the
    /// interval non-zero.
    pub fn new(step_m: f64, tick_interval: Duration) -> MotionResult<Self> {
        if !(step_m.is_finite() && step_m > 0.0) {
            return Err(CabError::Config(format!("step_m must be positive, got {step_m}")).into());
        }
        if tick_interval.is_zero() {
            return Err(CabError::Config("tick interval must be non-zero".into()).into());
        }
        Ok(Self { step_m, tick_interval })
    }

    pub fn from_config(config: &TripConfig) -> MotionResult<Self> {
        Self::new(config.step_m, config.tick_interval())
    }
}

// ── PathAnimator ──────────────────────────────────────────────────────────────

struct ActiveRun {
    run:     RunId,
    vehicle: SharedVehicle,
    task:    JoinHandle<()>,
}

/// Drives vehicles along paths, at most one run per vehicle.
///
/// Each run is a spawned tokio task, so `animate` must be called from within
/// a runtime.  Dropping the animator aborts every run it started.
#[derive(Default)]
pub struct PathAnimator {
    runs: HashMap<VehicleId, ActiveRun>,
}

impl PathAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `vehicle` through `path`, one `params.step_m` step per
    /// `params.tick_interval`.
    ///
    /// `on_tick` is called after every position update.  `on_arrive` is called
    /// once, [`SETTLE_DELAY`] after the last tick, unless the run is
    /// cancelled or superseded first.  An empty path arrives after the settle
    /// delay without ticking.
    ///
    /// Any run already active on this vehicle is cancelled before the new one
    /// starts.
    pub fn animate<T, A>(
        &mut self,
        vehicle:   &SharedVehicle,
        path:      Vec<Point>,
        params:    AnimationParams,
        on_tick:   T,
        on_arrive: A,
    ) -> MotionResult<RunId>
    where
        T: FnMut(AnimationTick) + Send + 'static,
        A: FnOnce() + Send + 'static,
    {
        let handle = Handle::try_current().map_err(|_| MotionError::NoRuntime)?;

        self.cancel(vehicle.id());
        let run = vehicle.claim();
        debug!(vehicle = %vehicle.id(), %run, waypoints = path.len(), "animation started");

        let cursor = PathCursor::new(path, params.step_m);
        let task = handle.spawn(drive(vehicle.clone(), run, cursor, params, on_tick, on_arrive));

        self.runs.insert(vehicle.id(), ActiveRun { run, vehicle: vehicle.clone(), task });
        Ok(run)
    }

    /// Stop the run on `vehicle`, if any.  The vehicle stays where it is.
    ///
    /// Returns `true` if a run was still in progress.  Cancelling an idle or
    /// unknown vehicle does nothing.
    pub fn cancel(&mut self, vehicle: VehicleId) -> bool {
        let Some(active) = self.runs.remove(&vehicle) else {
            return false;
        };
        let live = !active.task.is_finished();
        active.task.abort();
        active.vehicle.revoke(active.run);
        if live {
            debug!(%vehicle, run = %active.run, "animation cancelled");
        }
        live
    }

    /// `true` while a run for `vehicle` is ticking or settling.
    pub fn is_running(&self, vehicle: VehicleId) -> bool {
        self.runs
            .get(&vehicle)
            .is_some_and(|active| !active.task.is_finished())
    }
}

impl Drop for PathAnimator {
    fn drop(&mut self) {
        for (_, active) in self.runs.drain() {
            active.task.abort();
            active.vehicle.revoke(active.run);
        }
    }
}

async fn drive<T, A>(
    vehicle:     SharedVehicle,
    run:         RunId,
    mut cursor:  PathCursor,
    params:      AnimationParams,
    mut on_tick: T,
    on_arrive:   A,
) where
    T: FnMut(AnimationTick) + Send + 'static,
    A: FnOnce() + Send + 'static,
{
    let mut interval = time::interval(params.tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut segment = 0;

    while !cursor.is_exhausted() {
        interval.tick().await;

        let (from, heading) = vehicle.pose();
        let Some(tick) = cursor.advance(from, heading) else {
            break;
        };
        if !vehicle.apply(run, tick.position, tick.heading) {
            debug!(vehicle = %vehicle.id(), %run, "run superseded");
            return;
        }
        if tick.segment != segment {
            segment = tick.segment;
            debug!(
                vehicle = %vehicle.id(),
                segment,
                heading = %tick.heading,
                turn_deg = tick.heading.difference(heading),
                "segment started"
            );
        }
        trace!(vehicle = %vehicle.id(), tick = tick.tick, position = %tick.position, heading = %tick.heading);
        on_tick(tick);
    }

    time::sleep(SETTLE_DELAY).await;

    if vehicle.owned_by(run) {
        debug!(vehicle = %vehicle.id(), %run, ticks = cursor.ticks(), "path complete");
        on_arrive();
    }
}
