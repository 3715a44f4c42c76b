//! The `Simulator` struct and its event loop.

use std::sync::Arc;

use atis_actor::{Actor, ActorFactory, CreateContext, TripState};
use atis_core::{ActorId, EdgeId, SimConfig, SimRng, SimTime};
use atis_network::RoadNetwork;
use atis_predict::{PredictContext, RoutePredictor};

use crate::event::{Event, EventKind};
use crate::scheduler::EventScheduler;
use crate::{SimError, SimResult, StatsSink};

/// Counters describing a finished run.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    /// Events handled by the loop.
    pub processed: u64,
    /// Handler-produced events refused by the horizon.
    pub dropped:   u64,
    pub created:   usize,
    pub arrived:   usize,
    pub truncated: usize,
    /// Timestamp of the last handled event.
    pub last_event: SimTime,
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// One simulation run.
///
/// `Simulator<A>` owns the network, the event queue, and every actor it
/// creates.  [`run`](Self::run) pops events in time order until the queue
/// is empty:
///
/// | Event         | Effect                                                  | Schedules                       |
/// |---------------|---------------------------------------------------------|---------------------------------|
/// | `CreateActor` | build via `A`, start trip, choose first edge            | `EdgeStart` at the same time    |
/// | `EdgeStart`   | quote real travel time, occupy edge                     | `EdgeEnd` at `now + tt`         |
/// | `EdgeEnd`     | move actor, free edge                                   | next `EdgeStart` or nothing     |
/// | `Accident`    | scale edge capacity                                     | nothing                         |
///
/// Anything a handler schedules at or after the horizon is dropped; seeded
/// creations and accidents always fire.  When the queue drains, actors that
/// have not arrived are truncated and any edge they still occupy is freed,
/// so every volume ends at zero.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulator<A: ActorFactory> {
    config:    SimConfig,
    network:   RoadNetwork,
    scheduler: EventScheduler,
    factory:   A,
    predictor: Arc<dyn RoutePredictor>,
    rng:       SimRng,
    actors:    Vec<Actor>,
    report:    RunReport,
    finished:  bool,
}

impl<A: ActorFactory> Simulator<A> {
    pub(crate) fn new(
        config:    SimConfig,
        network:   RoadNetwork,
        scheduler: EventScheduler,
        factory:   A,
        predictor: Arc<dyn RoutePredictor>,
        rng:       SimRng,
    ) -> Self {
        Self {
            config,
            network,
            scheduler,
            factory,
            predictor,
            rng,
            actors: Vec::new(),
            report: RunReport::default(),
            finished: false,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Process every queued event, then truncate unfinished actors.
    ///
    /// A simulator runs once; a second call returns
    /// [`SimError::AlreadyRun`].
    ///
    /// # Errors
    /// Any handler error aborts the run: unknown edges, discontinuous
    /// moves, negative volumes, and predictors finding no path.
    pub fn run<S: StatsSink>(&mut self, sink: &mut S) -> SimResult<RunReport> {
        if self.finished {
            return Err(SimError::AlreadyRun);
        }
        self.finished = true;

        log::info!(
            "run start: {} actors, horizon {}, adoption {:.2}, predictor {}, seed {}",
            self.config.actor_count,
            self.scheduler.horizon(),
            self.config.adoption,
            self.predictor.name(),
            self.config.seed
        );

        while let Some(event) = self.scheduler.pop() {
            log::trace!("{}: {:?}", event.at, event.kind);
            self.report.processed += 1;
            self.report.last_event = event.at;

            let at = event.at;
            match event.kind {
                EventKind::CreateActor                   => self.on_create_actor(at, sink)?,
                EventKind::EdgeStart { actor, edge }     => self.on_edge_start(at, actor, edge, sink)?,
                EventKind::EdgeEnd { actor, edge, .. }   => self.on_edge_end(at, actor, edge, sink)?,
                EventKind::Accident { edge, factor }     => self.on_accident(at, edge, factor, sink)?,
            }
        }

        self.truncate_unfinished(sink)?;
        debug_assert!(self.network.is_idle());

        self.report.dropped = self.scheduler.dropped();
        log::info!(
            "run end: {} events, {} arrived, {} truncated, {} dropped",
            self.report.processed,
            self.report.arrived,
            self.report.truncated,
            self.report.dropped
        );
        Ok(self.report)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn scheduler(&self) -> &EventScheduler {
        &self.scheduler
    }

    pub fn predictor(&self) -> &Arc<dyn RoutePredictor> {
        &self.predictor
    }

    /// Actors created so far, indexed by `ActorId`.
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn into_actors(self) -> Vec<Actor> {
        self.actors
    }

    // ── Handlers ──────────────────────────────────────────────────────────

    fn on_create_actor<S: StatsSink>(&mut self, at: SimTime, sink: &mut S) -> SimResult<()> {
        let id = ActorId::try_from(self.actors.len())
            .map_err(|_| SimError::Config("actor id space exhausted".into()))?;

        let ctx = CreateContext { network: &self.network, predictor: Some(&self.predictor) };
        let mut actor = self.factory.create(id, &ctx, &mut self.rng)?;
        let guided = actor.is_guided();

        sink.on_actor_entered(at, id, guided);
        actor.start_trip(at)?;

        let ctx = PredictContext::new(&self.network, &self.scheduler);
        let edge = actor.next_edge(at, &ctx)?;

        self.actors.push(actor);
        self.report.created += 1;
        self.scheduler.schedule(Event::edge_start(at, id, edge));
        Ok(())
    }

    fn on_edge_start<S: StatsSink>(
        &mut self,
        at:    SimTime,
        id:    ActorId,
        edge:  EdgeId,
        sink:  &mut S,
    ) -> SimResult<()> {
        let actor = self.actors.get_mut(id.index()).ok_or(SimError::UnknownActor(id))?;
        let guided = actor.is_guided();
        sink.on_edge_entered(at, edge, id, guided);

        // Quoted before this actor is counted.
        let tt = self.network.real_travel_time(edge)?;
        self.network.increment_volume(edge)?;
        actor.begin_edge(edge, tt)?;

        self.scheduler.schedule(Event::edge_end(at + tt, id, edge, guided));
        Ok(())
    }

    fn on_edge_end<S: StatsSink>(
        &mut self,
        at:    SimTime,
        id:    ActorId,
        edge:  EdgeId,
        sink:  &mut S,
    ) -> SimResult<()> {
        let actor = self.actors.get_mut(id.index()).ok_or(SimError::UnknownActor(id))?;
        let guided = actor.is_guided();
        sink.on_edge_left(at, edge, id, guided);

        actor.traverse(at, edge, &self.network)?;
        self.network.decrement_volume(edge)?;

        if actor.has_arrived() {
            let total = actor.finalize_travel_time()?;
            log::debug!("{at}: {id} arrived after {total:.4}h (guided: {guided})");
            self.report.arrived += 1;
            sink.on_actor_left(at, id, guided);
            return Ok(());
        }

        let ctx = PredictContext::new(&self.network, &self.scheduler);
        let next = actor.next_edge(at, &ctx)?;
        self.scheduler.schedule(Event::edge_start(at, id, next));
        Ok(())
    }

    fn on_accident<S: StatsSink>(
        &mut self,
        at:     SimTime,
        edge:   EdgeId,
        factor: f64,
        sink:   &mut S,
    ) -> SimResult<()> {
        self.network.scale_capacity(edge, factor)?;
        log::debug!("{at}: accident on {edge}, capacity x{factor}");
        sink.on_accident(at, edge, factor);
        Ok(())
    }

    /// Close every trip that did not arrive and free the edges those actors
    /// were on.
    fn truncate_unfinished<S: StatsSink>(&mut self, sink: &mut S) -> SimResult<()> {
        let horizon = self.scheduler.horizon();
        for actor in &mut self.actors {
            if actor.state() == TripState::Arrived {
                continue;
            }
            if let Some(edge) = actor.truncate(horizon) {
                self.network.decrement_volume(edge)?;
            }
            log::debug!("{} truncated at horizon {horizon}", actor.id());
            self.report.truncated += 1;
            sink.on_actor_truncated(horizon, actor.id(), actor.is_guided());
        }
        Ok(())
    }
}
