//! `cab-motion`: moving a vehicle along a waypoint path.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`step`]     | `StepState`: interpolation across one segment                   |
//! | [`cursor`]   | `PathCursor`: consumes a path one tick at a time, no timers     |
//! | [`vehicle`]  | `Vehicle`, `SharedVehicle`, `RunId`                             |
//! | [`animator`] | `PathAnimator`, `AnimationParams`: the tokio-driven runner      |
//! | [`error`]    | `MotionError`, `MotionResult<T>`                                |
//!
//! # Movement model (fixed step, fixed interval)
//!
//! 1. `PathAnimator::animate` hands the path to a fresh `PathCursor` and
//!    spawns a task driven by a single recurring `tokio::time::interval`.
//! 2. Every tick the cursor advances the vehicle by `step_m` metres towards
//!    the current waypoint.  When less than one step remains the vehicle is
//!    placed exactly on the waypoint and the next waypoint becomes the target
//!    on the following tick.
//! 3. After the last waypoint the task sleeps for the fixed 3 s settle
//!    delay ([`SETTLE_DELAY`]), then calls the arrival callback.
//! 4. Starting another run on the same vehicle aborts the previous task, and
//!    every position write is checked against the vehicle's current `RunId`,
//!    so two runs can never move one vehicle.

pub mod animator;
pub mod cursor;
pub mod error;
pub mod step;
pub mod vehicle;


pub use animator::{AnimationParams, PathAnimator, SETTLE_DELAY};
pub use cursor::{AnimationTick, PathCursor};
pub use error::{MotionError, MotionResult};
pub use step::{Step, StepState};
pub use vehicle::{RunId, SharedVehicle, Vehicle};
