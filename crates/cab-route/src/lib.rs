//! `cab-route`: the routing-provider boundary.
//!
//! The trip coordinator and the ETA monitor never talk to a concrete routing
//! service; they go through the async [`RouteClient`] trait so applications
//! can plug in an HTTP directions API, an offline engine, or a test double.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`client`]   | `RouteClient` trait, `Route`, `FnRouteClient`             |
//! | [`straight`] | `StraightLineClient`: synthetic straight-line provider    |
//! | [`scripted`] | `ScriptedRouteClient`: canned replies with latency        |
//! | [`error`]    | `RouteError`, `RouteResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Route`.                |

pub mod client;
pub mod error;
pub mod scripted;
pub mod straight;


pub use client::{FnRouteClient, Route, RouteClient};
pub use error::{RouteError, RouteResult};
pub use scripted::ScriptedRouteClient;
pub use straight::StraightLineClient;
