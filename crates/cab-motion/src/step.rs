//! Interpolation across a single segment.

use cab_core::{Heading, Point};

/// Outcome of one [`StepState::advance`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Step {
    /// Still short of the target; the vehicle is now here.
    Moved(Point),
    /// Less than a step remained; the vehicle was placed exactly on the target.
    Reached(Point),
}

impl Step {
    #[inline]
    pub fn position(self) -> Point {
        match self {
            Step::Moved(p) | Step::Reached(p) => p,
        }
    }

    #[inline]
    pub fn is_reached(self) -> bool {
        matches!(self, Step::Reached(_))
    }
}

/// Interpolation state for the segment between the vehicle's position at
/// segment start and the next waypoint.
///
/// # Numeric model
///
/// The remaining distance is geodesic (haversine), but the per-tick
/// latitude/longitude deltas are a planar split of the coordinate difference
/// into `distance / step_m` equal parts.  At city-block scale the two
/// disagree by far less than a step, so the vehicle still lands on the
/// waypoint after the expected number of ticks.
///
/// The deltas are computed once per segment and the position after `k`
/// ticks is `start + k * delta`, so no rounding error accumulates across a
/// long segment.
///
/// When the remaining distance drops to zero or below, the vehicle snaps to
/// the target and any leftover fraction of the step is dropped rather than
/// carried into the next segment.
#[derive(Clone, Debug, PartialEq)]
pub struct StepState {
    /// Position at segment start.
    pub start: Point,
    /// Position after the last tick.
    pub current: Point,
    /// Waypoint this segment ends at.
    pub target: Point,
    /// Geodesic length of the segment in metres.
    pub distance_m: f64,
    /// Metres still to travel.
    pub remaining_m: f64,
    /// Fractional tick count, `distance_m / step_m`.
    pub required_ticks: f64,
    pub delta_lat: f64,
    pub delta_lon: f64,
    pub step_m: f64,
    /// Heading for the whole segment, fixed when it begins.
    pub heading: Heading,
    /// Ticks taken so far.
    pub taken: u64,
}

impl StepState {
    /// Begin a segment from `start` towards `target`.
    ///
    /// A zero-length segment keeps `prior` as its heading since there is no
    /// direction to face.  `step_m` must be positive.
    pub fn begin(start: Point, target: Point, step_m: f64, prior: Heading) -> Self {
        let distance_m = start.distance_m(target);
        let required_ticks = distance_m / step_m;

        let (delta_lat, delta_lon) = if required_ticks > 0.0 {
            (
                (target.lat - start.lat) / required_ticks,
                (target.lon - start.lon) / required_ticks,
            )
        } else {
            (0.0, 0.0)
        };

        let heading = if distance_m > 0.0 { start.heading_to(target) } else { prior };

        Self {
            start,
            current: start,
            target,
            distance_m,
            remaining_m: distance_m,
            required_ticks,
            delta_lat,
            delta_lon,
            step_m,
            heading,
            taken: 0,
        }
    }

    /// Total ticks this segment takes: `ceil(distance / step)`, at least one.
    pub fn tick_count(&self) -> u64 {
        (self.required_ticks.ceil() as u64).max(1)
    }

    /// `true` once the target has been reached.
    pub fn is_done(&self) -> bool {
        self.taken > 0 && self.taken as f64 >= self.required_ticks
    }

    /// Take one step.
    pub fn advance(&mut self) -> Step {
        self.taken += 1;
        let k = self.taken as f64;

        if k < self.required_ticks {
            self.remaining_m = self.distance_m - k * self.step_m;
            self.current = self.start.offset(k * self.delta_lat, k * self.delta_lon);
            Step::Moved(self.current)
        } else {
            self.remaining_m = 0.0;
            self.current = self.target;
            Step::Reached(self.target)
        }
    }
}
