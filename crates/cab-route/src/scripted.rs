//! Canned-reply provider for tests and demos.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use cab_core::Point;

use crate::{Route, RouteClient, RouteError, RouteResult};

struct ScriptedReply {
    delay:   Duration,
    outcome: RouteResult<Route>,
}

#[derive(Default)]
struct Script {
    replies:  VecDeque<ScriptedReply>,
    fallback: Option<RouteResult<Route>>,
    latency:  Duration,
    requests: Vec<(Point, Point)>,
}

/// Replays queued outcomes in request order.
///
/// Each reply resolves after its own delay (default: the client latency),
/// which lets tests make later requests finish before earlier ones.  Once the
/// queue is empty the fallback outcome is returned; without a fallback the
/// request fails with [`RouteError::Unavailable`].
///
/// Every request is recorded and can be inspected with
/// [`requests`][Self::requests].
#[derive(Default)]
pub struct ScriptedRouteClient {
    script: Mutex<Script>,
}

impl ScriptedRouteClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every unscripted request with `outcome`.
    pub fn with_fallback(outcome: RouteResult<Route>) -> Self {
        let client = Self::new();
        client.lock().fallback = Some(outcome);
        client
    }

    /// Delay applied to the fallback and to replies queued with [`push`][Self::push].
    pub fn with_latency(self, latency: Duration) -> Self {
        self.lock().latency = latency;
        self
    }

    /// Queue an outcome with the default latency.
    pub fn push(&self, outcome: RouteResult<Route>) -> &Self {
        let mut script = self.lock();
        let delay = script.latency;
        script.replies.push_back(ScriptedReply { delay, outcome });
        drop(script);
        self
    }

    /// Queue an outcome that resolves `delay` after its request arrives.
    pub fn push_after(&self, delay: Duration, outcome: RouteResult<Route>) -> &Self {
        self.lock().replies.push_back(ScriptedReply { delay, outcome });
        self
    }

    /// Every `(origin, destination)` requested so far, in arrival order.
    pub fn requests(&self) -> Vec<(Point, Point)> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Queued replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lock().replies.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RouteClient for ScriptedRouteClient {
    async fn route(&self, origin: Point, destination: Point) -> RouteResult<Route> {
        let (delay, outcome) = {
            let mut script = self.lock();
            script.requests.push((origin, destination));
            match script.replies.pop_front() {
                Some(reply) => (reply.delay, reply.outcome),
                None => {
                    let outcome = script.fallback.clone().unwrap_or_else(|| {
                        Err(RouteError::Unavailable("script exhausted".into()))
                    });
                    (script.latency, outcome)
                }
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        outcome
    }
}
