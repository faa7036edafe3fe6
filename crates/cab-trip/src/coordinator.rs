//! The trip coordinator actor.
//!
//! [`TripCoordinator`] owns the [`TripMachine`], the vehicle's
//! [`PathAnimator`] and the [`TimeToArrivalMonitor`].  It runs as a single
//! task that reads two channels:
//!
//! - commands from [`TripHandle`]s (placements and resets), and
//! - internal events produced by its own side work (route replies, leg
//!   arrivals).
//!
//! Every event goes through the machine and the resulting effects are
//! carried out in order.  One task owns all trip state, so transitions take
//! no locks.  Replies from superseded requests are filtered by the machine's
//! `(trip, leg)` check.
//!
//! The actor stops once every handle has been dropped.

use std::sync::Arc;

use cab_core::{CabError, Point, TripConfig, TripId, VehicleId};
use cab_motion::{AnimationParams, AnimationTick, PathAnimator, SharedVehicle};
use cab_route::{Route, RouteClient};
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::eta::{EtaDisplay, TimeToArrivalMonitor};
use crate::machine::{Effect, TripEvent, TripMachine};
use crate::{Leg, TripError, TripPhase, TripResult, TripSignal, TripStatus};

#[derive(Debug)]
enum Command {
    Place(Point),
    Reset,
}

// ── TripHandle ────────────────────────────────────────────────────────────────

/// Cloneable front door to a running [`TripCoordinator`].
#[derive(Clone)]
pub struct TripHandle {
    commands: mpsc::UnboundedSender<Command>,
    signals:  broadcast::Sender<TripSignal>,
    status:   watch::Receiver<TripStatus>,
    vehicle:  SharedVehicle,
}

impl TripHandle {
    /// Place a point on the map.  The first placement of a trip is the
    /// pickup, the second the drop-off; later ones are ignored.
    ///
    /// # Errors
    ///
    /// [`CabError::InvalidCoordinate`] for a point outside the valid
    /// latitude/longitude range, [`TripError::Closed`] if the coordinator has
    /// stopped.
    pub fn place(&self, point: Point) -> TripResult<()> {
        if !point.is_valid() {
            return Err(CabError::InvalidCoordinate { lat: point.lat, lon: point.lon }.into());
        }
        self.send(Command::Place(point))
    }

    /// Abandon the current trip: stop the vehicle where it is, forget pending
    /// route and ETA replies, and wait for two new placements.
    pub fn reset(&self) -> TripResult<()> {
        self.send(Command::Reset)
    }

    /// Receive lifecycle signals from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<TripSignal> {
        self.signals.subscribe()
    }

    pub fn status(&self) -> TripStatus {
        *self.status.borrow()
    }

    pub fn phase(&self) -> TripPhase {
        self.status.borrow().phase
    }

    pub fn trip_id(&self) -> TripId {
        self.status.borrow().trip
    }

    /// Watch channel carrying the current [`TripStatus`].
    pub fn watch(&self) -> watch::Receiver<TripStatus> {
        self.status.clone()
    }

    /// Resolve once the current phase equals `phase`, immediately if it
    /// already does.
    ///
    /// Only the latest status is observed: a phase the trip has already left
    /// never resolves, so wait for a terminal phase or one still ahead.
    pub async fn wait_for(&self, phase: TripPhase) -> TripResult<TripStatus> {
        let mut status = self.status.clone();
        let reached = status
            .wait_for(|s| s.phase == phase)
            .await
            .map_err(|_| TripError::Closed)?;
        Ok(*reached)
    }

    /// The animated vehicle, for rendering.
    pub fn vehicle(&self) -> SharedVehicle {
        self.vehicle.clone()
    }

    fn send(&self, command: Command) -> TripResult<()> {
        self.commands.send(command).map_err(|_| TripError::Closed)
    }
}

// ── TripCoordinator ───────────────────────────────────────────────────────────

/// Actor that sequences one vehicle through pickup and drop-off trips.
pub struct TripCoordinator<R, D> {
    router:    Arc<R>,
    params:    AnimationParams,
    machine:   TripMachine,
    vehicle:   SharedVehicle,
    animator:  PathAnimator,
    monitor:   TimeToArrivalMonitor<R, D>,
    commands:  mpsc::UnboundedReceiver<Command>,
    events_tx: mpsc::UnboundedSender<TripEvent>,
    events_rx: mpsc::UnboundedReceiver<TripEvent>,
    signals:   broadcast::Sender<TripSignal>,
    status:    watch::Sender<TripStatus>,
}

impl<R: RouteClient, D: EtaDisplay> TripCoordinator<R, D> {
    /// Build a coordinator and its first handle.  Nothing runs until
    /// [`run`](Self::run) is awaited.
    ///
    /// The vehicle is parked at `config.vehicle_start`.
    pub fn new(config: TripConfig, router: R, display: D) -> TripResult<(Self, TripHandle)> {
        config.validate()?;
        let params = AnimationParams::from_config(&config)?;

        let router = Arc::new(router);
        let vehicle = SharedVehicle::new(VehicleId(0), config.vehicle_start);
        let monitor = TimeToArrivalMonitor::new(Arc::clone(&router), display, &config);
        let machine = TripMachine::default();

        let (commands_tx, commands) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (signals, _) = broadcast::channel(config.signal_capacity);
        let (status, status_rx) = watch::channel(machine.status());

        let handle = TripHandle {
            commands: commands_tx,
            signals:  signals.clone(),
            status:   status_rx,
            vehicle:  vehicle.clone(),
        };
        let coordinator = Self {
            router,
            params,
            machine,
            vehicle,
            animator: PathAnimator::new(),
            monitor,
            commands,
            events_tx,
            events_rx,
            signals,
            status,
        };
        Ok((coordinator, handle))
    }

    /// [`new`](Self::new) and spawn [`run`](Self::run) on the current
    /// runtime.
    pub fn spawn(config: TripConfig, router: R, display: D) -> TripResult<(TripHandle, JoinHandle<()>)> {
        let runtime = Handle::try_current().map_err(|_| cab_motion::MotionError::NoRuntime)?;
        let (coordinator, handle) = Self::new(config, router, display)?;
        Ok((handle, runtime.spawn(coordinator.run())))
    }

    /// Process commands and internal events until every [`TripHandle`] is
    /// dropped.
    pub async fn run(mut self) {
        debug!(vehicle = %self.vehicle.id(), "trip coordinator started");
        loop {
            let event = tokio::select! {
                biased;
                Some(event) = self.events_rx.recv() => event,
                command = self.commands.recv() => match command {
                    Some(Command::Place(point)) => TripEvent::Placed(point),
                    Some(Command::Reset)        => TripEvent::Reset,
                    None                        => break,
                },
            };
            self.dispatch(event);
        }

        self.animator.cancel(self.vehicle.id());
        self.monitor.reset();
        debug!(vehicle = %self.vehicle.id(), "trip coordinator stopped");
    }

    fn dispatch(&mut self, event: TripEvent) {
        let effects = match self.machine.handle(event) {
            Ok(effects) => effects,
            Err(TripError::Route { leg, source }) => {
                warn!(trip = %self.machine.trip().id, %leg, error = %source, "route request failed");
                return;
            }
            Err(e) => {
                debug!(error = %e, "event ignored");
                return;
            }
        };

        // Publish before side effects so signal subscribers see the new phase.
        self.status.send_replace(self.machine.status());

        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::RequestRoute { trip, leg, destination } => self.request_route(trip, leg, destination),
            Effect::StartLeg { trip, leg, route, destination } => self.start_leg(trip, leg, route, destination),
            Effect::Emit(signal) => {
                info!(?signal, "trip signal");
                // No subscribers is fine.
                let _ = self.signals.send(signal);
            }
            Effect::StopMotion => {
                self.animator.cancel(self.vehicle.id());
                self.monitor.reset();
                info!(trip = %self.machine.trip().id, position = %self.vehicle.position(), "trip reset");
            }
        }
    }

    fn request_route(&self, trip: TripId, leg: Leg, destination: Point) {
        let origin = self.vehicle.position();
        debug!(%trip, %leg, %origin, %destination, "requesting route");

        let router = Arc::clone(&self.router);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = router.route(origin, destination).await;
            // The coordinator may have stopped; the reply is then moot.
            let _ = events.send(TripEvent::RouteResolved { trip, leg, result });
        });
    }

    fn start_leg(&mut self, trip: TripId, leg: Leg, route: Route, destination: Point) {
        self.monitor.begin_leg(destination);

        let monitor = self.monitor.clone();
        let on_tick = move |tick: AnimationTick| {
            monitor.observe(&tick);
        };
        let events = self.events_tx.clone();
        let on_arrive = move || {
            let _ = events.send(TripEvent::LegArrived { trip, leg });
        };

        if route.is_trivial() {
            debug!(%trip, %leg, "route has no waypoints; vehicle settles in place");
        }
        let length_m = route.length_m();
        let waypoints = route.path.len();
        match self.animator.animate(&self.vehicle, route.path, self.params, on_tick, on_arrive) {
            Ok(run) => info!(%trip, %leg, %run, waypoints, length_m, eta_secs = route.duration_secs, "leg started"),
            Err(e) => error!(%trip, %leg, error = %e, "could not start leg"),
        }
    }
}
