//! Timer-free path stepping.

use std::collections::VecDeque;

use cab_core::{Heading, Point};

use crate::StepState;

/// What one animation tick produced.  Handed to the per-tick callback.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationTick {
    /// Vehicle position after this tick.
    pub position: Point,
    /// Heading of the segment this tick belongs to.
    pub heading: Heading,
    /// 1-based index of the segment (waypoint) being travelled.
    pub segment: u32,
    /// 1-based tick count within the run.
    pub tick: u64,
    /// `true` on the tick that placed the vehicle on the waypoint.
    pub reached_waypoint: bool,
}

/// Consumes a waypoint path one step at a time.
///
/// Waypoints are popped from the front as segments begin and are never
/// revisited, so [`remaining_waypoints`][Self::remaining_waypoints] only ever
/// decreases.  The cursor has no notion of time; the animator calls
/// [`advance`][Self::advance] once per timer tick, and tests can call it in a
/// plain loop.
#[derive(Clone, Debug)]
pub struct PathCursor {
    waypoints: VecDeque<Point>,
    active:    Option<StepState>,
    step_m:    f64,
    segment:   u32,
    ticks:     u64,
}

impl PathCursor {
    /// `step_m` must be positive; see [`AnimationParams`][crate::AnimationParams].
    pub fn new(path: Vec<Point>, step_m: f64) -> Self {
        Self {
            waypoints: path.into(),
            active:    None,
            step_m,
            segment:   0,
            ticks:     0,
        }
    }

    /// `true` when every waypoint has been reached.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.active.is_none() && self.waypoints.is_empty()
    }

    /// Waypoints not yet started.
    #[inline]
    pub fn remaining_waypoints(&self) -> usize {
        self.waypoints.len()
    }

    /// Ticks produced so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Produce the next tick.
    ///
    /// `from` and `prior` are the vehicle's current position and heading; they
    /// only matter when this tick starts a new segment.  Returns `None` once
    /// the path is exhausted.
    pub fn advance(&mut self, from: Point, prior: Heading) -> Option<AnimationTick> {
        let mut state = match self.active.take() {
            Some(state) => state,
            None => {
                let target = self.waypoints.pop_front()?;
                self.segment += 1;
                StepState::begin(from, target, self.step_m, prior)
            }
        };

        let step = state.advance();
        let heading = state.heading;
        if !state.is_done() {
            self.active = Some(state);
        }
        self.ticks += 1;

        Some(AnimationTick {
            position: step.position(),
            heading,
            segment: self.segment,
            tick: self.ticks,
            reached_waypoint: step.is_reached(),
        })
    }

    /// Step through the rest of the path without a timer, starting from
    /// `from`.  Returns every tick produced.
    pub fn drain(&mut self, mut from: Point, mut heading: Heading) -> Vec<AnimationTick> {
        let mut out = Vec::new();
        while let Some(tick) = self.advance(from, heading) {
            from = tick.position;
            heading = tick.heading;
            out.push(tick);
        }
        out
    }
}
