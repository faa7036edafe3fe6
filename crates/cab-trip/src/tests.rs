//! Unit tests for cab-trip.

use std::sync::Arc;
use std::time::Duration;

use cab_core::{CabError, Heading, Point, TripConfig, TripId};
use cab_motion::{AnimationTick, MotionError, SETTLE_DELAY};
use cab_route::{FnRouteClient, Route, RouteError, RouteResult, ScriptedRouteClient, StraightLineClient};

use crate::{
    ARRIVING_TEXT, Effect, Leg, TextDisplay, TimeToArrivalMonitor, TripCoordinator, TripError, TripEvent,
    TripMachine, TripPhase, TripSignal, format_duration,
};

const START: Point = Point::new(59.944047, 30.230815);

/// ~44 m north of `START`.
fn pickup() -> Point {
    START.offset(0.0004, 0.0)
}

/// ~33 m east of `pickup()`.
fn target() -> Point {
    pickup().offset(0.0, 0.0006)
}

fn config() -> TripConfig {
    TripConfig { vehicle_start: START, ..TripConfig::default() }
}

fn eta(secs: f64) -> RouteResult<Route> {
    Ok(Route::eta_only(secs))
}

// ── Warning capture ───────────────────────────────────────────────────────────

mod capture {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing::subscriber::DefaultGuard;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[derive(Clone, Default)]
    pub struct WarnCount(Arc<AtomicUsize>);

    impl WarnCount {
        pub fn get(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    struct CountWarnings {
        count:  WarnCount,
        target: &'static str,
    }

    impl<S: Subscriber> Layer<S> for CountWarnings {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let meta = event.metadata();
            if *meta.level() == Level::WARN && meta.target() == self.target {
                self.count.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    /// Count WARN events from `target` on this thread until the guard drops.
    pub fn count_warnings(target: &'static str) -> (WarnCount, DefaultGuard) {
        let count = WarnCount::default();
        let subscriber = tracing_subscriber::registry().with(CountWarnings { count: count.clone(), target });
        (count, tracing::subscriber::set_default(subscriber))
    }
}

// ── TripMachine ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod machine {
    use super::*;

    fn route_to(dest: Point) -> RouteResult<Route> {
        Ok(Route::new(vec![START, dest], 30.0))
    }

    /// A machine with both points placed, waiting for the pickup route.
    fn placed() -> TripMachine {
        let mut m = TripMachine::new(TripId(7));
        m.handle(TripEvent::Placed(pickup())).unwrap();
        m.handle(TripEvent::Placed(target())).unwrap();
        m
    }

    #[test]
    fn first_placement_only_records_pickup() {
        let mut m = TripMachine::new(TripId(7));
        let effects = m.handle(TripEvent::Placed(pickup())).unwrap();
        assert!(effects.is_empty());
        assert_eq!(m.phase(), TripPhase::AwaitingPlacement);
        assert_eq!(m.trip().pickup, Some(pickup()));
    }

    #[test]
    fn second_placement_requests_pickup_route() {
        let mut m = TripMachine::new(TripId(7));
        m.handle(TripEvent::Placed(pickup())).unwrap();
        let effects = m.handle(TripEvent::Placed(target())).unwrap();
        assert_eq!(effects, vec![Effect::RequestRoute { trip: TripId(7), leg: Leg::Pickup, destination: pickup() }]);
        assert_eq!(m.phase(), TripPhase::AwaitingRoute);
        assert_eq!(m.trip().target, Some(target()));
    }

    #[test]
    fn third_placement_is_rejected() {
        let mut m = placed();
        let err = m.handle(TripEvent::Placed(START)).unwrap_err();
        assert!(matches!(err, TripError::InvalidPlacement { phase: TripPhase::AwaitingRoute, .. }));
        assert_eq!(m.trip().target, Some(target()));
    }

    #[test]
    fn route_starts_leg_then_signals() {
        let mut m = placed();
        let effects = m
            .handle(TripEvent::RouteResolved { trip: TripId(7), leg: Leg::Pickup, result: route_to(pickup()) })
            .unwrap();
        assert_eq!(effects, vec![
            Effect::StartLeg {
                trip:        TripId(7),
                leg:         Leg::Pickup,
                route:       Route::new(vec![START, pickup()], 30.0),
                destination: pickup(),
            },
            Effect::Emit(TripSignal::RouteReady(TripId(7))),
        ]);
        assert_eq!(m.phase(), TripPhase::Traveling(Leg::Pickup));
    }

    #[test]
    fn failed_route_leaves_phase_unchanged() {
        let mut m = placed();
        let err = m
            .handle(TripEvent::RouteResolved {
                trip:   TripId(7),
                leg:    Leg::Pickup,
                result: Err(RouteError::NoRouteFound("ZERO_RESULTS".into())),
            })
            .unwrap_err();
        assert!(matches!(err, TripError::Route { leg: Leg::Pickup, source: RouteError::NoRouteFound(_) }));
        assert_eq!(m.phase(), TripPhase::AwaitingRoute);
    }

    #[test]
    fn reply_for_other_trip_is_stale() {
        let mut m = placed();
        let err = m
            .handle(TripEvent::RouteResolved { trip: TripId(6), leg: Leg::Pickup, result: route_to(pickup()) })
            .unwrap_err();
        assert!(matches!(err, TripError::Stale { .. }));
        assert_eq!(m.phase(), TripPhase::AwaitingRoute);
    }

    #[test]
    fn reply_for_wrong_leg_is_stale() {
        let mut m = placed();
        let err = m
            .handle(TripEvent::RouteResolved { trip: TripId(7), leg: Leg::DropOff, result: route_to(target()) })
            .unwrap_err();
        assert!(matches!(err, TripError::Stale { .. }));
    }

    #[test]
    fn pickup_arrival_requests_drop_off_route() {
        let mut m = placed();
        m.handle(TripEvent::RouteResolved { trip: TripId(7), leg: Leg::Pickup, result: route_to(pickup()) })
            .unwrap();
        let effects = m.handle(TripEvent::LegArrived { trip: TripId(7), leg: Leg::Pickup }).unwrap();
        assert_eq!(effects, vec![
            Effect::Emit(TripSignal::LegArrived(TripId(7))),
            Effect::RequestRoute { trip: TripId(7), leg: Leg::DropOff, destination: target() },
        ]);
        assert_eq!(m.phase(), TripPhase::AwaitingSecondRoute);
    }

    #[test]
    fn drop_off_arrival_completes_trip() {
        let mut m = placed();
        m.handle(TripEvent::RouteResolved { trip: TripId(7), leg: Leg::Pickup, result: route_to(pickup()) })
            .unwrap();
        m.handle(TripEvent::LegArrived { trip: TripId(7), leg: Leg::Pickup }).unwrap();
        m.handle(TripEvent::RouteResolved { trip: TripId(7), leg: Leg::DropOff, result: route_to(target()) })
            .unwrap();
        assert_eq!(m.phase(), TripPhase::Traveling(Leg::DropOff));

        let effects = m.handle(TripEvent::LegArrived { trip: TripId(7), leg: Leg::DropOff }).unwrap();
        assert_eq!(effects, vec![
            Effect::Emit(TripSignal::LegArrived(TripId(7))),
            Effect::Emit(TripSignal::TripComplete(TripId(7))),
        ]);
        assert_eq!(m.phase(), TripPhase::Arrived);
        assert!(m.phase().is_terminal());

        assert!(matches!(m.handle(TripEvent::Placed(START)), Err(TripError::InvalidPlacement { .. })));
    }

    #[test]
    fn arrival_for_wrong_leg_is_stale() {
        let mut m = placed();
        m.handle(TripEvent::RouteResolved { trip: TripId(7), leg: Leg::Pickup, result: route_to(pickup()) })
            .unwrap();
        let err = m.handle(TripEvent::LegArrived { trip: TripId(7), leg: Leg::DropOff }).unwrap_err();
        assert!(matches!(err, TripError::Stale { .. }));
        assert_eq!(m.phase(), TripPhase::Traveling(Leg::Pickup));
    }

    #[test]
    fn reset_starts_fresh_trip_and_stales_old_replies() {
        let mut m = placed();
        assert_eq!(m.handle(TripEvent::Reset).unwrap(), vec![Effect::StopMotion]);
        assert_eq!(m.trip().id, TripId(8));
        assert_eq!(m.phase(), TripPhase::AwaitingPlacement);
        assert_eq!(m.trip().pickup, None);

        let err = m
            .handle(TripEvent::RouteResolved { trip: TripId(7), leg: Leg::Pickup, result: route_to(pickup()) })
            .unwrap_err();
        assert!(matches!(err, TripError::Stale { .. }));
    }
}

// ── format_duration ───────────────────────────────────────────────────────────

#[cfg(test)]
mod duration_text {
    use super::*;

    #[test]
    fn minutes() {
        assert_eq!(format_duration(0.0), "1 min");
        assert_eq!(format_duration(29.0), "1 min");
        assert_eq!(format_duration(90.0), "2 mins");
        assert_eq!(format_duration(3_540.0), "59 mins");
    }

    #[test]
    fn hours() {
        assert_eq!(format_duration(3_570.0), "1 hour");
        assert_eq!(format_duration(3_660.0), "1 hour 1 min");
        assert_eq!(format_duration(7_200.0), "2 hours");
        assert_eq!(format_duration(7_500.0), "2 hours 5 mins");
    }

    #[test]
    fn garbage_counts_as_zero() {
        assert_eq!(format_duration(f64::NAN), "1 min");
        assert_eq!(format_duration(-30.0), "1 min");
    }
}

// ── TimeToArrivalMonitor ──────────────────────────────────────────────────────

#[cfg(test)]
mod monitor {
    use super::*;

    type Monitor = TimeToArrivalMonitor<ScriptedRouteClient, TextDisplay>;

    const ETA: &str = "cab_trip::eta";

    fn monitor(every: u32, router: ScriptedRouteClient) -> (Monitor, TextDisplay) {
        let display = TextDisplay::new();
        let config = TripConfig { eta_every_ticks: every, ..config() };
        (TimeToArrivalMonitor::new(Arc::new(router), display.clone(), &config), display)
    }

    fn tick(n: u64, segment: u32) -> AnimationTick {
        AnimationTick { position: START, heading: Heading::NORTH, segment, tick: n, reached_waypoint: false }
    }

    #[test]
    fn idle_monitor_issues_nothing() {
        let (m, _) = monitor(1, ScriptedRouteClient::new());
        assert!(m.track(&tick(1, 1)).is_none());
    }

    #[test]
    fn begin_leg_anchors_display() {
        let (m, display) = monitor(1, ScriptedRouteClient::new());
        m.begin_leg(target());
        assert_eq!(display.anchored_at(), Some(target()));
        assert_eq!(display.text(), None);
    }

    #[test]
    fn older_reply_after_newer_is_dropped() {
        let (m, display) = monitor(1, ScriptedRouteClient::new());
        m.begin_leg(target());
        let (first, dest) = m.track(&tick(1, 1)).unwrap();
        let (second, _) = m.track(&tick(2, 1)).unwrap();
        assert_eq!(dest, target());

        assert!(m.apply(second, eta(600.0)));
        assert!(!m.apply(first, eta(900.0)));
        assert_eq!(display.text().as_deref(), Some("10 mins"));
        assert_eq!(display.writes(), 1);
    }

    #[test]
    fn reply_from_previous_segment_is_dropped() {
        let (m, display) = monitor(1, ScriptedRouteClient::new());
        m.begin_leg(target());
        let (on_first, _) = m.track(&tick(1, 1)).unwrap();
        let (on_second, _) = m.track(&tick(2, 2)).unwrap();

        assert!(!m.apply(on_first, eta(600.0)));
        assert!(m.apply(on_second, eta(300.0)));
        assert_eq!(display.text().as_deref(), Some("5 mins"));
    }

    #[test]
    fn reply_from_previous_leg_is_dropped() {
        let (m, display) = monitor(1, ScriptedRouteClient::new());
        m.begin_leg(pickup());
        let (old, _) = m.track(&tick(1, 1)).unwrap();
        m.begin_leg(target());
        m.track(&tick(1, 1)).unwrap();

        assert!(!m.apply(old, eta(600.0)));
        assert_eq!(display.writes(), 0);
    }

    #[test]
    fn reply_after_reset_is_dropped() {
        let (m, display) = monitor(1, ScriptedRouteClient::new());
        m.begin_leg(target());
        let (tag, _) = m.track(&tick(1, 1)).unwrap();
        m.reset();

        assert!(!m.apply(tag, eta(600.0)));
        assert!(m.track(&tick(2, 1)).is_none());
        assert_eq!(display.text(), None);
    }

    #[test]
    fn failure_keeps_last_text() {
        let (m, display) = monitor(1, ScriptedRouteClient::new());
        m.begin_leg(target());
        let (first, _) = m.track(&tick(1, 1)).unwrap();
        let (second, _) = m.track(&tick(2, 1)).unwrap();

        assert!(m.apply(first, eta(120.0)));
        assert!(!m.apply(second, Err(RouteError::Unavailable("timeout".into()))));
        assert_eq!(display.text().as_deref(), Some("2 mins"));
    }

    #[test]
    fn stale_failure_is_still_warned() {
        let (warnings, _guard) = capture::count_warnings(ETA);
        let (m, display) = monitor(1, ScriptedRouteClient::new());
        m.begin_leg(target());
        let (on_first, _) = m.track(&tick(1, 1)).unwrap();
        let (on_second, _) = m.track(&tick(2, 2)).unwrap();
        assert!(m.apply(on_second, eta(300.0)));

        assert!(!m.apply(on_first, Err(RouteError::Unavailable("timeout".into()))));
        assert_eq!(warnings.get(), 1);

        let (old_leg, _) = m.track(&tick(3, 2)).unwrap();
        m.begin_leg(pickup());
        assert!(!m.apply(old_leg, Err(RouteError::Unavailable("timeout".into()))));
        assert_eq!(warnings.get(), 2);
        assert_eq!(display.text().as_deref(), Some("5 mins"));
        assert_eq!(display.writes(), 1);
    }

    #[test]
    fn queries_follow_cadence() {
        let (m, _) = monitor(3, ScriptedRouteClient::new());
        m.begin_leg(target());
        let issued: Vec<u64> = (1..=7)
            .filter_map(|n| m.track(&tick(n, 1)).map(|(tag, _)| (n, tag)))
            .map(|(n, tag)| {
                assert_eq!(tag.seq, n / 3 + 1);
                n
            })
            .collect();
        assert_eq!(issued, vec![1, 4, 7]);
    }

    #[test]
    fn arriving_threshold_is_inclusive() {
        let (m, _) = monitor(1, ScriptedRouteClient::new());
        assert_eq!(m.render(4.0), ARRIVING_TEXT);
        assert_eq!(m.render(5.0), ARRIVING_TEXT);
        assert_eq!(m.render(5.5), "1 min");
    }

    #[tokio::test(start_paused = true)]
    async fn observe_queries_from_tick_position() {
        let router = Arc::new(ScriptedRouteClient::with_fallback(eta(300.0)));
        let display = TextDisplay::new();
        let m = TimeToArrivalMonitor::new(Arc::clone(&router), display.clone(), &config());
        m.begin_leg(target());

        assert!(m.observe(&tick(1, 1)).is_some());
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert_eq!(router.requests(), vec![(START, target())]);
        assert_eq!(display.text().as_deref(), Some("5 mins"));
    }
}

// ── TripCoordinator ───────────────────────────────────────────────────────────

#[cfg(test)]
mod coordinator {
    use tokio::sync::broadcast;
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio::time::{sleep, timeout};

    use super::*;

    const COORDINATOR: &str = "cab_trip::coordinator";

    async fn next_signal(rx: &mut broadcast::Receiver<TripSignal>) -> TripSignal {
        timeout(Duration::from_secs(120), rx.recv())
            .await
            .expect("no signal in time")
            .expect("signal channel closed")
    }

    #[tokio::test(start_paused = true)]
    async fn two_leg_trip_signals_in_order() {
        let display = TextDisplay::new();
        let (handle, _task) = TripCoordinator::spawn(config(), StraightLineClient::default(), display.clone()).unwrap();
        let mut signals = handle.subscribe();

        handle.place(pickup()).unwrap();
        handle.place(target()).unwrap();
        let trip = handle.trip_id();

        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(next_signal(&mut signals).await);
        }
        assert_eq!(seen, vec![
            TripSignal::RouteReady(trip),
            TripSignal::LegArrived(trip),
            TripSignal::RouteReady(trip),
            TripSignal::LegArrived(trip),
            TripSignal::TripComplete(trip),
        ]);

        assert_eq!(handle.phase(), TripPhase::Arrived);
        assert_eq!(handle.vehicle().position(), target());
        assert_eq!(display.anchored_at(), Some(target()));
        assert_eq!(display.text().as_deref(), Some(ARRIVING_TEXT));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_sees_only_the_current_phase() {
        let (handle, _task) =
            TripCoordinator::spawn(config(), StraightLineClient::default(), TextDisplay::new()).unwrap();
        handle.place(pickup()).unwrap();
        handle.place(target()).unwrap();
        timeout(Duration::from_secs(120), handle.wait_for(TripPhase::Arrived))
            .await
            .expect("trip did not finish")
            .unwrap();

        let status = timeout(Duration::from_millis(1), handle.wait_for(TripPhase::Arrived)).await;
        assert_eq!(status.expect("current phase resolves at once").unwrap().phase, TripPhase::Arrived);
        // AwaitingRoute was passed on the way; it is never seen again.
        assert!(timeout(Duration::from_secs(1), handle.wait_for(TripPhase::AwaitingRoute)).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn no_route_keeps_trip_waiting() {
        let (warnings, _guard) = capture::count_warnings(COORDINATOR);
        let router = Arc::new(ScriptedRouteClient::new());
        router.push(Err(RouteError::NoRouteFound("ZERO_RESULTS".into())));
        let display = TextDisplay::new();
        let (handle, _task) = TripCoordinator::spawn(config(), Arc::clone(&router), display.clone()).unwrap();
        let mut signals = handle.subscribe();

        handle.place(pickup()).unwrap();
        handle.place(target()).unwrap();
        sleep(Duration::from_secs(10)).await;

        assert_eq!(handle.phase(), TripPhase::AwaitingRoute);
        assert_eq!(router.requests(), vec![(START, pickup())]);
        assert_eq!(warnings.get(), 1);
        assert_eq!(handle.vehicle().position(), START);
        assert_eq!(display.writes(), 0);
        assert!(matches!(signals.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_drop_off_route_waits_at_pickup() {
        let (warnings, _guard) = capture::count_warnings(COORDINATOR);
        let straight = StraightLineClient::default();
        let drop_off = target();
        let router = FnRouteClient(move |origin: Point, dest: Point| {
            if dest == drop_off {
                Err(RouteError::NoRouteFound("ZERO_RESULTS".into()))
            } else {
                straight.plan(origin, dest)
            }
        });
        let (handle, _task) = TripCoordinator::spawn(config(), router, TextDisplay::new()).unwrap();
        let mut signals = handle.subscribe();

        handle.place(pickup()).unwrap();
        handle.place(target()).unwrap();
        let trip = handle.trip_id();
        assert_eq!(next_signal(&mut signals).await, TripSignal::RouteReady(trip));
        assert_eq!(next_signal(&mut signals).await, TripSignal::LegArrived(trip));
        sleep(Duration::from_secs(10)).await;

        assert_eq!(handle.phase(), TripPhase::AwaitingSecondRoute);
        assert_eq!(handle.vehicle().position(), pickup());
        assert_eq!(warnings.get(), 1);
        assert!(matches!(signals.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn third_placement_is_ignored() {
        let extra = target().offset(0.001, 0.001);
        let router = Arc::new(ScriptedRouteClient::with_fallback(eta(60.0)));
        router.push(Ok(Route::new(vec![START, pickup()], 10.0)));
        let display = TextDisplay::new();
        let (handle, _task) = TripCoordinator::spawn(config(), Arc::clone(&router), display.clone()).unwrap();

        handle.place(pickup()).unwrap();
        handle.place(target()).unwrap();
        handle.place(extra).unwrap();
        timeout(Duration::from_secs(120), handle.wait_for(TripPhase::Arrived))
            .await
            .expect("trip did not finish")
            .unwrap();

        let requests = router.requests();
        assert_eq!(requests[0], (START, pickup()));
        assert!(requests.contains(&(pickup(), target())));
        assert!(requests.iter().all(|&(_, dest)| dest != extra));
        // The drop-off reply had no path, so the vehicle stays at the pickup.
        assert_eq!(handle.vehicle().position(), pickup());
        assert_eq!(display.text().as_deref(), Some("1 min"));
    }

    #[tokio::test(start_paused = true)]
    async fn route_without_waypoints_settles_in_place() {
        let router = Arc::new(ScriptedRouteClient::with_fallback(eta(60.0)));
        let (handle, _task) = TripCoordinator::spawn(config(), Arc::clone(&router), TextDisplay::new()).unwrap();
        let mut signals = handle.subscribe();

        handle.place(pickup()).unwrap();
        handle.place(target()).unwrap();
        let trip = handle.trip_id();
        assert_eq!(next_signal(&mut signals).await, TripSignal::RouteReady(trip));
        let started = tokio::time::Instant::now();
        assert_eq!(next_signal(&mut signals).await, TripSignal::LegArrived(trip));

        assert!(started.elapsed() >= SETTLE_DELAY);
        assert_eq!(handle.vehicle().position(), START);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_mid_leg_stops_vehicle_and_starts_new_trip() {
        let far = START.offset(0.005, 0.0);
        let (handle, _task) =
            TripCoordinator::spawn(config(), StraightLineClient::default(), TextDisplay::new()).unwrap();
        let mut signals = handle.subscribe();

        handle.place(far).unwrap();
        handle.place(far.offset(0.0, 0.001)).unwrap();
        let first = handle.trip_id();
        assert_eq!(next_signal(&mut signals).await, TripSignal::RouteReady(first));

        sleep(Duration::from_secs(2)).await;
        handle.reset().unwrap();
        let status = timeout(Duration::from_secs(1), handle.wait_for(TripPhase::AwaitingPlacement))
            .await
            .expect("reset not applied")
            .unwrap();
        assert_eq!(status.trip, first.next());

        let stopped = handle.vehicle().position();
        assert_ne!(stopped, START);
        assert_ne!(stopped, far);
        sleep(Duration::from_secs(30)).await;
        assert_eq!(handle.vehicle().position(), stopped);
        assert!(matches!(signals.try_recv(), Err(TryRecvError::Empty)));

        handle.place(stopped.offset(0.0001, 0.0)).unwrap();
        handle.place(stopped.offset(0.0002, 0.0)).unwrap();
        assert_eq!(next_signal(&mut signals).await, TripSignal::RouteReady(first.next()));
    }

    #[tokio::test]
    async fn stops_when_every_handle_is_dropped() {
        let (handle, task) =
            TripCoordinator::spawn(config(), StraightLineClient::default(), TextDisplay::new()).unwrap();
        let other = handle.clone();
        drop(handle);
        drop(other);
        timeout(Duration::from_secs(5), task).await.expect("actor kept running").unwrap();
    }

    #[test]
    fn closed_coordinator_rejects_commands() {
        let (coordinator, handle) =
            TripCoordinator::new(config(), StraightLineClient::default(), TextDisplay::new()).unwrap();
        drop(coordinator);
        assert!(matches!(handle.place(pickup()), Err(TripError::Closed)));
        assert!(matches!(handle.reset(), Err(TripError::Closed)));
    }

    #[test]
    fn invalid_point_is_rejected() {
        let (_coordinator, handle) =
            TripCoordinator::new(config(), StraightLineClient::default(), TextDisplay::new()).unwrap();
        let err = handle.place(Point::new(91.0, 0.0)).unwrap_err();
        assert!(matches!(err, TripError::Core(CabError::InvalidCoordinate { .. })));
    }

    #[test]
    fn bad_config_is_rejected() {
        let config = TripConfig { step_m: 0.0, ..config() };
        let err = TripCoordinator::new(config, StraightLineClient::default(), TextDisplay::new()).err().unwrap();
        assert!(matches!(err, TripError::Core(CabError::Config(_))));
    }

    #[test]
    fn spawn_needs_a_runtime() {
        let err = TripCoordinator::spawn(config(), StraightLineClient::default(), TextDisplay::new()).err().unwrap();
        assert!(matches!(err, TripError::Motion(MotionError::NoRuntime)));
    }

    #[test]
    fn new_handle_reports_initial_status() {
        let (_coordinator, handle) =
            TripCoordinator::new(config(), StraightLineClient::default(), TextDisplay::new()).unwrap();
        assert_eq!(handle.phase(), TripPhase::AwaitingPlacement);
        assert_eq!(handle.trip_id(), TripId(0));
        assert_eq!(handle.vehicle().position(), START);
    }
}
