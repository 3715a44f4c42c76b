//! Fluent builder for constructing a [`Simulator`].

use atis_actor::ActorFactory;
use atis_core::{EdgeId, MultimodalDistribution, SimConfig, SimRng, SimTime};
use atis_network::RoadNetwork;
use atis_predict::{PredictorFactory, PredictorSetup};

use crate::event::Event;
use crate::scheduler::EventScheduler;
use crate::{SimError, SimResult, Simulator};

/// A capacity drop scheduled ahead of the run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Accident {
    pub at:     SimTime,
    pub edge:   EdgeId,
    pub factor: f64,
}

/// Fluent builder for [`Simulator<A>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: actor count, horizon, adoption fraction, seed
/// - [`RoadNetwork`]: consumed; the run mutates its volumes and capacities
/// - `A: ActorFactory`: builds each actor when its creation event fires
/// - `P: PredictorFactory`: builds the run's shared predictor
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                   |
/// |------------------------|-------------------------------------------|
/// | `.demand(d)`           | `MultimodalDistribution::commuter()`      |
/// | `.departure_times(v)`  | One draw from the demand per actor        |
/// | `.accident(t, e, f)`   | No accidents                              |
///
/// # Example
///
/// ```rust,ignore
/// let preset = NetworkPreset::Commuter.build()?;
/// let actors = SoftmaxRouteFactory::new(&preset.network, preset.origin, preset.destination, 0.3)?;
/// let mut sim = SimBuilder::new(config, preset.network, actors, PredictorKind::Current)
///     .accident(SimTime::hours(10.0), edge, 0.2)
///     .build()?;
/// sim.run(&mut RunStats::new())?;
/// ```
pub struct SimBuilder<A: ActorFactory, P: PredictorFactory> {
    config:     SimConfig,
    network:    RoadNetwork,
    actors:     A,
    predictors: P,
    demand:     MultimodalDistribution,
    departures: Option<Vec<SimTime>>,
    accidents:  Vec<Accident>,
}

impl<A: ActorFactory, P: PredictorFactory> SimBuilder<A, P> {
    pub fn new(config: SimConfig, network: RoadNetwork, actors: A, predictors: P) -> Self {
        Self {
            config,
            network,
            actors,
            predictors,
            demand:     MultimodalDistribution::default(),
            departures: None,
            accidents:  Vec::new(),
        }
    }

    /// Departure-time distribution.  Also handed to the predictor factory.
    pub fn demand(mut self, demand: MultimodalDistribution) -> Self {
        self.demand = demand;
        self
    }

    /// Fix every actor's departure time instead of sampling the demand.
    ///
    /// Must be length `actor_count`.
    pub fn departure_times(mut self, times: Vec<SimTime>) -> Self {
        self.departures = Some(times);
        self
    }

    /// Multiply the capacity of `edge` by `factor` at time `at`.
    pub fn accident(mut self, at: SimTime, edge: EdgeId, factor: f64) -> Self {
        self.accidents.push(Accident { at, edge, factor });
        self
    }

    /// Validate inputs, build the predictor, seed the event queue, and
    /// return a ready-to-run [`Simulator`].
    ///
    /// Creation events are seeded first (in departure order as drawn), then
    /// accidents.  Seeded events ignore the horizon: every actor is created,
    /// and one departing at or after the horizon ends up truncated.
    pub fn build(self) -> SimResult<Simulator<A>> {
        let config = self.config;
        config.validate()?;

        let mut rng = SimRng::new(config.seed);

        // ── Departure times ───────────────────────────────────────────────
        let departures = match self.departures {
            Some(times) => {
                if times.len() != config.actor_count {
                    return Err(SimError::ActorCountMismatch {
                        expected: config.actor_count,
                        got:      times.len(),
                        what:     "departure times",
                    });
                }
                times
            }
            None => (0..config.actor_count)
                .map(|_| self.demand.sample_departure(&mut rng).map(SimTime::hours))
                .collect::<Result<Vec<_>, _>>()?,
        };

        // ── Accidents ─────────────────────────────────────────────────────
        for acc in &self.accidents {
            self.network.edge_data(acc.edge)?;
            if !acc.factor.is_finite() || acc.factor <= 0.0 {
                return Err(SimError::Config(format!(
                    "accident on {} has scale factor {}, expected a positive number",
                    acc.edge, acc.factor
                )));
            }
        }

        // ── Predictor ─────────────────────────────────────────────────────
        let predictor = self.predictors.create(&PredictorSetup {
            distribution: self.demand.clone(),
            population:   config.actor_count,
            adoption:     config.adoption,
        })?;

        // ── Event queue ───────────────────────────────────────────────────
        let mut scheduler = EventScheduler::new(config.horizon());
        for &t in &departures {
            scheduler.seed(Event::create_actor(t));
        }
        for acc in &self.accidents {
            scheduler.seed(Event::accident(acc.at, acc.edge, acc.factor));
        }

        let horizon = scheduler.horizon();
        let late = departures.iter().filter(|&&t| t >= horizon).count();
        log::debug!(
            "seeded {} events ({late} departures at or after horizon {horizon})",
            scheduler.len()
        );

        Ok(Simulator::new(config, self.network, scheduler, self.actors, predictor, rng))
    }
}
