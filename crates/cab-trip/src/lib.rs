//! `cab-trip`: pickup / drop-off trip coordination.
//!
//! # Trip lifecycle
//!
//! ```text
//! AwaitingPlacement ──two placements──▶ AwaitingRoute
//!   ──route ok──▶ Traveling(Pickup) ──arrived──▶ AwaitingSecondRoute
//!   ──route ok──▶ Traveling(DropOff) ──arrived──▶ Arrived
//! ```
//!
//! A failed route request leaves the trip where it is; the UI can call
//! [`TripHandle::reset`] to start over.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`phase`]       | `TripPhase`, `Leg`, `TripSignal`, `TripStatus`              |
//! | [`machine`]     | `TripMachine`: pure transitions, events in, effects out     |
//! | [`eta`]         | `TimeToArrivalMonitor`, `EtaDisplay`, `TextDisplay`         |
//! | [`coordinator`] | `TripCoordinator` actor and its `TripHandle`                |
//! | [`error`]       | `TripError`, `TripResult<T>`                                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cab_core::{Point, TripConfig};
//! use cab_route::StraightLineClient;
//! use cab_trip::{TextDisplay, TripCoordinator, TripPhase};
//!
//! let (handle, _task) = TripCoordinator::spawn(TripConfig::default(), StraightLineClient::default(), TextDisplay::new())?;
//! let mut signals = handle.subscribe();
//! handle.place(Point::new(59.9425, 30.2315))?;
//! handle.place(Point::new(59.9410, 30.2340))?;
//! handle.wait_for(TripPhase::Arrived).await?;
//! ```

pub mod coordinator;
pub mod error;
pub mod eta;
pub mod machine;
pub mod phase;

#[cfg(test)]
mod tests;

pub use coordinator::{TripCoordinator, TripHandle};
pub use error::{TripError, TripResult};
pub use eta::{ARRIVING_TEXT, EtaDisplay, EtaTag, TextDisplay, TimeToArrivalMonitor, format_duration};
pub use machine::{Effect, Trip, TripEvent, TripMachine};
pub use phase::{Leg, TripPhase, TripSignal, TripStatus};
