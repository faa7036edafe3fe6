use cab_core::{CabError, TripId};
use cab_motion::MotionError;
use cab_route::RouteError;
use thiserror::Error;

use crate::{Leg, TripPhase};

#[derive(Debug, Error)]
pub enum TripError {
    /// A placement arrived when the trip was not accepting one.  Dropped
    /// silently by the coordinator.
    #[error("placement ignored: trip {trip} is {phase}")]
    InvalidPlacement { trip: TripId, phase: TripPhase },

    /// A route reply or arrival that belongs to an earlier trip or phase.
    #[error("stale {what} for trip {trip} ignored")]
    Stale { trip: TripId, what: &'static str },

    /// The routing provider failed; the trip stays in its awaiting phase.
    #[error("{leg} route failed: {source}")]
    Route {
        leg:    Leg,
        #[source]
        source: RouteError,
    },

    #[error(transparent)]
    Core(#[from] CabError),

    #[error(transparent)]
    Motion(#[from] MotionError),

    #[error("trip coordinator has shut down")]
    Closed,
}

pub type TripResult<T> = Result<T, TripError>;
