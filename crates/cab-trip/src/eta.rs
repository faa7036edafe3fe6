//! Time-to-arrival monitor.
//!
//! While a leg is animating, every `eta_every_ticks`-th tick issues a routing
//! query from the vehicle's current position to the leg's destination and
//! renders the reply's duration on an [`EtaDisplay`].
//!
//! Replies can come back late or out of order.  Each query is tagged with an
//! [`EtaTag`]; a reply is applied only if it belongs to the current leg
//! (`epoch`), to the segment the vehicle is on right now (`segment`), and is
//! newer than the last reply shown (`seq`).  Everything else is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cab_core::{Point, TripConfig};
use cab_motion::AnimationTick;
use cab_route::{Route, RouteClient, RouteResult};
use tokio::runtime::Handle;
use tracing::{debug, trace, warn};

/// Text shown once the provider's estimate drops to the arriving threshold.
pub const ARRIVING_TEXT: &str = "We are here!";

/// Render a duration the way the ETA badge shows it.
///
/// Minutes are rounded to the nearest whole minute with a floor of one.
/// Non-finite or negative input counts as zero.
///
/// ```
/// use cab_trip::format_duration;
/// assert_eq!(format_duration(40.0), "1 min");
/// assert_eq!(format_duration(720.0), "12 mins");
/// assert_eq!(format_duration(3_900.0), "1 hour 5 mins");
/// assert_eq!(format_duration(7_200.0), "2 hours");
/// ```
pub fn format_duration(secs: f64) -> String {
    let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
    let minutes = ((secs / 60.0).round() as u64).max(1);

    let (hours, minutes) = (minutes / 60, minutes % 60);
    let mins = match minutes {
        1 => "1 min".to_string(),
        n => format!("{n} mins"),
    };
    match hours {
        0 => mins,
        1 if minutes == 0 => "1 hour".to_string(),
        h if minutes == 0 => format!("{h} hours"),
        1 => format!("1 hour {mins}"),
        h => format!("{h} hours {mins}"),
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

/// Where ETA text ends up, typically an info badge pinned to the destination.
pub trait EtaDisplay: Send + Sync + 'static {
    /// Replace the shown text.
    fn set_text(&self, text: &str);

    /// Pin the display to the current leg's destination.
    fn anchor(&self, _at: Point) {}
}

#[derive(Debug, Default)]
struct TextState {
    text:   Option<String>,
    anchor: Option<Point>,
    writes: usize,
}

/// In-memory [`EtaDisplay`].  Clones share the same text.
#[derive(Clone, Debug, Default)]
pub struct TextDisplay {
    inner: Arc<Mutex<TextState>>,
}

impl TextDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text written, `None` before the first reply.
    pub fn text(&self) -> Option<String> {
        self.lock().text.clone()
    }

    pub fn anchored_at(&self) -> Option<Point> {
        self.lock().anchor
    }

    /// Number of `set_text` calls so far.
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, TextState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EtaDisplay for TextDisplay {
    fn set_text(&self, text: &str) {
        let mut state = self.lock();
        state.text = Some(text.to_string());
        state.writes += 1;
    }

    fn anchor(&self, at: Point) {
        self.lock().anchor = Some(at);
    }
}

// ── Monitor ───────────────────────────────────────────────────────────────────

/// Identity of one ETA query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EtaTag {
    /// Leg generation; bumped by `begin_leg` and `reset`.
    pub epoch:   u64,
    /// 1-based path segment the vehicle was on when the query was issued.
    pub segment: u32,
    /// Issue order, unique across the monitor's lifetime.
    pub seq:     u64,
}

#[derive(Debug, Default)]
struct MonitorState {
    destination: Option<Point>,
    epoch:       u64,
    segment:     u32,
    next_seq:    u64,
    applied_seq: u64,
}

struct Shared<R, D> {
    router:    Arc<R>,
    display:   D,
    every:     u64,
    threshold: f64,
    state:     Mutex<MonitorState>,
}

/// Keeps an [`EtaDisplay`] current while a leg animates.  Cheap to clone.
pub struct TimeToArrivalMonitor<R, D> {
    shared: Arc<Shared<R, D>>,
}

impl<R, D> Clone for TimeToArrivalMonitor<R, D> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<R: RouteClient, D: EtaDisplay> TimeToArrivalMonitor<R, D> {
    pub fn new(router: Arc<R>, display: D, config: &TripConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                router,
                display,
                every:     u64::from(config.eta_every_ticks.max(1)),
                threshold: config.arriving_threshold_secs,
                state:     Mutex::new(MonitorState::default()),
            }),
        }
    }

    pub fn display(&self) -> &D {
        &self.shared.display
    }

    /// Start tracking a new leg.  Replies to earlier queries are discarded
    /// from here on.
    pub fn begin_leg(&self, destination: Point) {
        {
            let mut state = self.lock();
            state.epoch += 1;
            state.segment = 0;
            state.destination = Some(destination);
        }
        self.shared.display.anchor(destination);
    }

    /// Stop tracking.  In-flight replies are discarded and the display keeps
    /// whatever it showed last.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.epoch += 1;
        state.segment = 0;
        state.destination = None;
    }

    /// Record `tick` and, on query ticks, issue a query for it.
    ///
    /// Returns the query's tag when one was issued.  Must run inside a tokio
    /// runtime; outside one the query is skipped.
    pub fn observe(&self, tick: &AnimationTick) -> Option<EtaTag> {
        let (tag, destination) = self.track(tick)?;

        let Ok(runtime) = Handle::try_current() else {
            warn!(seq = tag.seq, "no runtime for ETA query");
            return None;
        };

        let monitor = self.clone();
        let origin = tick.position;
        runtime.spawn(async move {
            let result = monitor.shared.router.route(origin, destination).await;
            monitor.apply(tag, result);
        });
        Some(tag)
    }

    /// Note the vehicle's segment and, if this tick is due a query, allocate
    /// its tag.
    pub fn track(&self, tick: &AnimationTick) -> Option<(EtaTag, Point)> {
        let mut state = self.lock();
        let destination = state.destination?;
        state.segment = tick.segment;

        if (tick.tick.saturating_sub(1)) % self.shared.every != 0 {
            return None;
        }
        state.next_seq += 1;
        let tag = EtaTag { epoch: state.epoch, segment: tick.segment, seq: state.next_seq };
        Some((tag, destination))
    }

    /// Apply a reply.  Returns `true` if the display was updated.
    pub fn apply(&self, tag: EtaTag, result: RouteResult<Route>) -> bool {
        let mut state = self.lock();
        let stale = tag.epoch != state.epoch || tag.segment != state.segment || tag.seq <= state.applied_seq;

        // Failures are reported even when the reply is stale.
        let route = match result {
            Ok(route) => route,
            Err(e) => {
                warn!(seq = tag.seq, stale, error = %e, "ETA query failed");
                return false;
            }
        };
        if stale {
            trace!(?tag, epoch = state.epoch, segment = state.segment, "stale ETA reply dropped");
            return false;
        }

        let text = self.render(route.duration_secs);
        state.applied_seq = tag.seq;
        debug!(seq = tag.seq, duration_secs = route.duration_secs, %text, "ETA updated");
        self.shared.display.set_text(&text);
        true
    }

    /// Text for a provider estimate of `duration_secs`.
    pub fn render(&self, duration_secs: f64) -> String {
        if duration_secs <= self.shared.threshold {
            ARRIVING_TEXT.to_string()
        } else {
            format_duration(duration_secs)
        }
    }

    fn lock(&self) -> MutexGuard<'_, MonitorState> {
        self.shared.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
