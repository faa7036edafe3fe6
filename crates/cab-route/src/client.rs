//! Routing trait and the route value it returns.
//!
//! # Pluggability
//!
//! The trip coordinator is generic over [`RouteClient`], so a real directions
//! API, an offline engine, or a test double can be swapped in at compile time
//! without touching the coordination logic.
//!
//! # Contract
//!
//! One call issues at most one request and resolves with its outcome.  There
//! is no retry policy here; retries belong to the implementation if it wants
//! them.

use std::future::Future;
use std::sync::Arc;

use cab_core::Point;

use crate::RouteResult;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the waypoints to drive through, in travel
/// order, and the provider's duration estimate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Waypoints in travel order.  Providers usually repeat the origin as the
    /// first entry; the animator handles that as a zero-length segment.
    pub path: Vec<Point>,
    /// Estimated driving time in seconds.
    pub duration_secs: f64,
}

impl Route {
    pub fn new(path: Vec<Point>, duration_secs: f64) -> Self {
        Self { path, duration_secs }
    }

    /// A route with no waypoints, used by ETA-only providers.
    pub fn eta_only(duration_secs: f64) -> Self {
        Self { path: Vec::new(), duration_secs }
    }

    /// Last waypoint, if any.
    pub fn destination(&self) -> Option<Point> {
        self.path.last().copied()
    }

    /// Sum of the great-circle lengths of consecutive waypoints, in metres.
    pub fn length_m(&self) -> f64 {
        self.path.windows(2).map(|w| w[0].distance_m(w[1])).sum()
    }

    /// `true` if there is nothing to drive.
    pub fn is_trivial(&self) -> bool {
        self.path.is_empty()
    }
}

// ── RouteClient trait ─────────────────────────────────────────────────────────

/// Asynchronous routing provider.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync + 'static` and return `Send`
/// futures: the coordinator shares one client behind an `Arc` and awaits its
/// replies on spawned tasks.
pub trait RouteClient: Send + Sync + 'static {
    /// Compute a driving route from `origin` to `destination`.
    ///
    /// Fails with [`RouteError::Unavailable`][crate::RouteError::Unavailable]
    /// on transport errors and
    /// [`RouteError::NoRouteFound`][crate::RouteError::NoRouteFound] when the
    /// provider reports no viable route.
    fn route(
        &self,
        origin: Point,
        destination: Point,
    ) -> impl Future<Output = RouteResult<Route>> + Send;
}

/// A shared client routes like the client it wraps.  Lets a caller keep a
/// handle to a test double after giving it to the coordinator.
impl<R: RouteClient> RouteClient for Arc<R> {
    fn route(
        &self,
        origin: Point,
        destination: Point,
    ) -> impl Future<Output = RouteResult<Route>> + Send {
        (**self).route(origin, destination)
    }
}

// ── FnRouteClient ─────────────────────────────────────────────────────────────

/// Adapts a synchronous closure into a [`RouteClient`].
///
/// Handy when a reply depends on the request, e.g. failing only the second
/// leg of a trip.
pub struct FnRouteClient<F>(pub F);

impl<F> RouteClient for FnRouteClient<F>
where
    F: Fn(Point, Point) -> RouteResult<Route> + Send + Sync + 'static,
{
    async fn route(&self, origin: Point, destination: Point) -> RouteResult<Route> {
        (self.0)(origin, destination)
    }
}
