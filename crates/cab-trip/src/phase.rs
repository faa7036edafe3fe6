//! Trip phases and lifecycle signals.

use std::fmt;

use cab_core::TripId;

/// Which half of the trip the vehicle is driving.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Leg {
    /// From the vehicle's parking spot to the first placed point.
    Pickup,
    /// From the pickup point to the second placed point.
    DropOff,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Leg::Pickup  => "pickup",
            Leg::DropOff => "drop-off",
        })
    }
}

/// Where a trip is in its lifecycle.  `Arrived` is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum TripPhase {
    #[default]
    AwaitingPlacement,
    AwaitingRoute,
    Traveling(Leg),
    AwaitingSecondRoute,
    Arrived,
}

impl TripPhase {
    /// `true` once no further transition can happen without a reset.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, TripPhase::Arrived)
    }
}

impl fmt::Display for TripPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripPhase::AwaitingPlacement   => f.write_str("awaiting placement"),
            TripPhase::AwaitingRoute       => f.write_str("awaiting route"),
            TripPhase::Traveling(leg)      => write!(f, "traveling ({leg})"),
            TripPhase::AwaitingSecondRoute => f.write_str("awaiting second route"),
            TripPhase::Arrived             => f.write_str("arrived"),
        }
    }
}

/// Lifecycle notifications broadcast to every subscriber.
///
/// Each is sent exactly once per occurrence and carries only the trip's
/// identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TripSignal {
    /// A leg's route arrived and the vehicle started moving.
    RouteReady(TripId),
    /// The vehicle finished a leg, settle delay included.
    LegArrived(TripId),
    /// The drop-off leg finished; the trip is over.
    TripComplete(TripId),
}

impl TripSignal {
    pub fn trip(self) -> TripId {
        match self {
            TripSignal::RouteReady(id) | TripSignal::LegArrived(id) | TripSignal::TripComplete(id) => id,
        }
    }
}

/// Current trip identity and phase, published on a watch channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct TripStatus {
    pub trip:  TripId,
    pub phase: TripPhase,
}
