//! Synthetic provider that drives in a straight line.

use cab_core::Point;

use crate::{Route, RouteClient, RouteError, RouteResult};

/// Routes every request along the straight line between its endpoints.
///
/// The path starts with the origin and ends with the destination, with
/// intermediate waypoints no more than `waypoint_spacing_m` apart.  Duration
/// is the great-circle length divided by `speed_mps`.
///
/// With `max_distance_m` set, longer requests fail with
/// [`RouteError::NoRouteFound`], the way a real provider reports
/// `ZERO_RESULTS` for unreachable destinations.
#[derive(Debug, Clone)]
pub struct StraightLineClient {
    pub speed_mps:          f64,
    pub waypoint_spacing_m: f64,
    pub max_distance_m:     Option<f64>,
}

impl Default for StraightLineClient {
    fn default() -> Self {
        Self {
            speed_mps:          13.8,
            waypoint_spacing_m: 50.0,
            max_distance_m:     None,
        }
    }
}

impl StraightLineClient {
    pub fn new(speed_mps: f64) -> Self {
        Self { speed_mps, ..Self::default() }
    }

    /// Compute the route synchronously.
    pub fn plan(&self, origin: Point, destination: Point) -> RouteResult<Route> {
        if !origin.is_valid() || !destination.is_valid() {
            return Err(RouteError::NoRouteFound(format!(
                "invalid request {origin} -> {destination}"
            )));
        }
        if !(self.speed_mps.is_finite() && self.speed_mps > 0.0) {
            return Err(RouteError::Unavailable(format!("bad speed {}", self.speed_mps)));
        }

        let distance = origin.distance_m(destination);
        if let Some(max) = self.max_distance_m {
            if distance > max {
                return Err(RouteError::NoRouteFound(format!(
                    "{distance:.0} m exceeds the {max:.0} m limit"
                )));
            }
        }

        let segments = if self.waypoint_spacing_m > 0.0 {
            ((distance / self.waypoint_spacing_m).ceil() as usize).max(1)
        } else {
            1
        };

        let d_lat = destination.lat - origin.lat;
        let d_lon = destination.lon - origin.lon;
        let mut path: Vec<Point> = (0..segments)
            .map(|i| {
                let f = i as f64 / segments as f64;
                origin.offset(d_lat * f, d_lon * f)
            })
            .collect();
        // Exact endpoint, not origin + delta * 1.0.
        path.push(destination);

        Ok(Route::new(path, distance / self.speed_mps))
    }
}

impl RouteClient for StraightLineClient {
    async fn route(&self, origin: Point, destination: Point) -> RouteResult<Route> {
        self.plan(origin, destination)
    }
}
