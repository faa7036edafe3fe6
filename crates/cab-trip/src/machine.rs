//! Pure trip transitions.
//!
//! [`TripMachine::handle`] takes one [`TripEvent`], updates the trip, and
//! returns the [`Effect`]s the coordinator must carry out.  Nothing here
//! touches timers, channels or the network, so every transition can be
//! tested synchronously.

use cab_core::{Point, TripId};
use cab_route::{Route, RouteResult};

use crate::{Leg, TripError, TripPhase, TripResult, TripSignal, TripStatus};

/// The single active trip.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub id:     TripId,
    /// First placement: where the passenger is picked up.
    pub pickup: Option<Point>,
    /// Second placement: where the passenger is dropped off.
    pub target: Option<Point>,
    pub phase:  TripPhase,
}

impl Trip {
    fn new(id: TripId) -> Self {
        Self { id, pickup: None, target: None, phase: TripPhase::AwaitingPlacement }
    }

    /// Destination of `leg`, once both points are placed.
    pub fn destination(&self, leg: Leg) -> Option<Point> {
        match leg {
            Leg::Pickup  => self.pickup,
            Leg::DropOff => self.target,
        }
    }
}

/// Inputs to the machine.
#[derive(Clone, Debug, PartialEq)]
pub enum TripEvent {
    /// The UI placed a point on the map.
    Placed(Point),
    /// A route request issued for `(trip, leg)` completed.
    RouteResolved {
        trip:   TripId,
        leg:    Leg,
        result: RouteResult<Route>,
    },
    /// The animator finished `(trip, leg)`, settle delay included.
    LegArrived { trip: TripId, leg: Leg },
    /// Abandon the current trip and wait for new placements.
    Reset,
}

/// Work the coordinator performs after a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Ask the routing provider for a route from the vehicle's current
    /// position to `destination`.
    RequestRoute { trip: TripId, leg: Leg, destination: Point },
    /// Animate the vehicle along `route.path` and track its ETA to
    /// `destination`.
    StartLeg { trip: TripId, leg: Leg, route: Route, destination: Point },
    /// Broadcast a lifecycle signal.
    Emit(TripSignal),
    /// Stop the vehicle and forget in-flight ETA queries.
    StopMotion,
}

/// Transition function over the single active [`Trip`].
#[derive(Clone, Debug)]
pub struct TripMachine {
    trip: Trip,
}

impl Default for TripMachine {
    fn default() -> Self {
        Self::new(TripId(0))
    }
}

impl TripMachine {
    pub fn new(id: TripId) -> Self {
        Self { trip: Trip::new(id) }
    }

    #[inline]
    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    #[inline]
    pub fn phase(&self) -> TripPhase {
        self.trip.phase
    }

    #[inline]
    pub fn status(&self) -> TripStatus {
        TripStatus { trip: self.trip.id, phase: self.trip.phase }
    }

    /// Apply `event`.
    ///
    /// # Errors
    ///
    /// - [`TripError::InvalidPlacement`] for a placement outside
    ///   `AwaitingPlacement` (the third and later clicks).
    /// - [`TripError::Stale`] for replies or arrivals tagged with another
    ///   trip or a phase the trip has already left.
    /// - [`TripError::Route`] when a current route request failed.
    ///
    /// The trip is unchanged whenever an error is returned.
    pub fn handle(&mut self, event: TripEvent) -> TripResult<Vec<Effect>> {
        match event {
            TripEvent::Placed(point)                      => self.on_placed(point),
            TripEvent::RouteResolved { trip, leg, result } => self.on_route(trip, leg, result),
            TripEvent::LegArrived { trip, leg }           => self.on_arrived(trip, leg),
            TripEvent::Reset                              => Ok(self.on_reset()),
        }
    }

    fn on_placed(&mut self, point: Point) -> TripResult<Vec<Effect>> {
        if self.trip.phase != TripPhase::AwaitingPlacement {
            return Err(TripError::InvalidPlacement { trip: self.trip.id, phase: self.trip.phase });
        }

        let Some(pickup) = self.trip.pickup else {
            self.trip.pickup = Some(point);
            return Ok(vec![]);
        };

        self.trip.target = Some(point);
        self.trip.phase = TripPhase::AwaitingRoute;
        Ok(vec![Effect::RequestRoute { trip: self.trip.id, leg: Leg::Pickup, destination: pickup }])
    }

    fn on_route(&mut self, trip: TripId, leg: Leg, result: RouteResult<Route>) -> TripResult<Vec<Effect>> {
        let awaiting = match leg {
            Leg::Pickup  => TripPhase::AwaitingRoute,
            Leg::DropOff => TripPhase::AwaitingSecondRoute,
        };
        if trip != self.trip.id || self.trip.phase != awaiting {
            return Err(TripError::Stale { trip, what: "route reply" });
        }
        let Some(destination) = self.trip.destination(leg) else {
            return Err(TripError::Stale { trip, what: "route reply" });
        };

        let route = result.map_err(|source| TripError::Route { leg, source })?;

        self.trip.phase = TripPhase::Traveling(leg);
        Ok(vec![
            Effect::StartLeg { trip, leg, route, destination },
            Effect::Emit(TripSignal::RouteReady(trip)),
        ])
    }

    fn on_arrived(&mut self, trip: TripId, leg: Leg) -> TripResult<Vec<Effect>> {
        if trip != self.trip.id || self.trip.phase != TripPhase::Traveling(leg) {
            return Err(TripError::Stale { trip, what: "arrival" });
        }

        match leg {
            Leg::Pickup => {
                let Some(destination) = self.trip.target else {
                    return Err(TripError::Stale { trip, what: "arrival" });
                };
                self.trip.phase = TripPhase::AwaitingSecondRoute;
                Ok(vec![
                    Effect::Emit(TripSignal::LegArrived(trip)),
                    Effect::RequestRoute { trip, leg: Leg::DropOff, destination },
                ])
            }
            Leg::DropOff => {
                self.trip.phase = TripPhase::Arrived;
                Ok(vec![
                    Effect::Emit(TripSignal::LegArrived(trip)),
                    Effect::Emit(TripSignal::TripComplete(trip)),
                ])
            }
        }
    }

    fn on_reset(&mut self) -> Vec<Effect> {
        self.trip = Trip::new(self.trip.id.next());
        vec![Effect::StopMotion]
    }
}
