//! `cab-core`: foundational types for the `cab_twin` ride animator.
//!
//! This crate is a dependency of every other `cab-*` crate.  It has no async
//! code and no `cab-*` dependencies.
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`geo`]    | `Point`, `Heading`, haversine distance, initial bearing   |
//! | [`ids`]    | `VehicleId`, `TripId`                                     |
//! | [`config`] | `TripConfig` and its defaults                             |
//! | [`error`]  | `CabError`, `CabResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::TripConfig;
pub use error::{CabError, CabResult};
pub use geo::{EARTH_RADIUS_M, Heading, Point, distance_between, heading_between};
pub use ids::{TripId, VehicleId};
