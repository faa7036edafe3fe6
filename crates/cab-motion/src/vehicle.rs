//! The animated vehicle and its shared handle.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cab_core::{Heading, Point, VehicleId};

/// Generation number of an animation run.
///
/// Each call to `PathAnimator::animate` claims a fresh `RunId` on the
/// vehicle.  A run may only write the vehicle while its id is the current one.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run#{}", self.0)
    }
}

/// Snapshot of a vehicle.
///
/// The heading doubles as the rotation of the vehicle's map icon.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vehicle {
    pub id:       VehicleId,
    pub position: Point,
    pub heading:  Heading,
    /// Run that currently owns the vehicle.
    pub run:      RunId,
}

/// Cloneable handle to a vehicle shared between the coordinator, the
/// animation task and any renderer.
///
/// Position and heading are only written by the animator; everyone else reads
/// snapshots.
#[derive(Clone)]
pub struct SharedVehicle {
    id:    VehicleId,
    inner: Arc<Mutex<Vehicle>>,
}

impl SharedVehicle {
    /// A vehicle parked at `position`, facing north.
    pub fn new(id: VehicleId, position: Point) -> Self {
        Self {
            id,
            inner: Arc::new(Mutex::new(Vehicle {
                id,
                position,
                heading: Heading::NORTH,
                run: RunId(0),
            })),
        }
    }

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn snapshot(&self) -> Vehicle {
        *self.lock()
    }

    pub fn position(&self) -> Point {
        self.lock().position
    }

    pub fn heading(&self) -> Heading {
        self.lock().heading
    }

    /// Position and heading read under one lock.
    pub fn pose(&self) -> (Point, Heading) {
        let v = self.lock();
        (v.position, v.heading)
    }

    // ── Animator-only writes ──────────────────────────────────────────────

    /// Start a new generation and return it.  Any older run loses the right
    /// to write.
    pub(crate) fn claim(&self) -> RunId {
        let mut v = self.lock();
        v.run = RunId(v.run.0 + 1);
        v.run
    }

    /// Revoke `run` if it still owns the vehicle.
    pub(crate) fn revoke(&self, run: RunId) {
        let mut v = self.lock();
        if v.run == run {
            v.run = RunId(v.run.0 + 1);
        }
    }

    /// Write a new pose on behalf of `run`.  Returns `false`, without writing,
    /// if `run` has been superseded.
    pub(crate) fn apply(&self, run: RunId, position: Point, heading: Heading) -> bool {
        let mut v = self.lock();
        if v.run != run {
            return false;
        }
        v.position = position;
        v.heading = heading;
        true
    }

    pub(crate) fn owned_by(&self, run: RunId) -> bool {
        self.lock().run == run
    }

    fn lock(&self) -> MutexGuard<'_, Vehicle> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SharedVehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedVehicle").field(&self.snapshot()).finish()
    }
}
