//! Building actors when a creation event fires.

use std::sync::Arc;

use rand::distributions::WeightedIndex;

use atis_core::{ActorId, NodeId, SimRng};
use atis_network::{RoadNetwork, Route};
use atis_predict::RoutePredictor;

use crate::{Actor, ActorError, ActorResult};

/// What a factory may read when building an actor.
#[derive(Copy, Clone)]
pub struct CreateContext<'a> {
    pub network:   &'a RoadNetwork,
    /// The run's shared predictor, if the run has one.
    pub predictor: Option<&'a Arc<dyn RoutePredictor>>,
}

/// Produces a new actor for each creation event.
///
/// `id` is assigned by the simulator.  All randomness must come from `rng`
/// so runs stay reproducible.
pub trait ActorFactory: Send + Sync {
    fn create(&self, id: ActorId, ctx: &CreateContext<'_>, rng: &mut SimRng) -> ActorResult<Actor>;
}

// ── Softmax route choice ──────────────────────────────────────────────────────

/// Route choice probabilities favouring fast routes.
///
/// Each time is scored by how much faster it is than the slowest one and the
/// scores are passed through a softmax:
///
/// ```text
/// s_i = max(t) - t_i
/// p_i = exp(s_i - max(s)) / Σ_j exp(s_j - max(s))
/// ```
///
/// An empty input gives an empty output.
pub fn softmax_travel_times(times: &[f64]) -> Vec<f64> {
    let slowest = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let scores: Vec<f64> = times.iter().map(|t| slowest - t).collect();
    let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - best).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Assigns each actor a base route drawn by [`softmax_travel_times`] over
/// the free-flow times of every simple path, and makes it guided with
/// probability `adoption`.
#[derive(Clone, Debug)]
pub struct SoftmaxRouteFactory {
    routes:        Vec<Route>,
    probabilities: Vec<f64>,
    index:         WeightedIndex<f64>,
    adoption:      f64,
}

impl SoftmaxRouteFactory {
    /// Enumerate the routes from `origin` to `destination` once, up front.
    ///
    /// # Errors
    /// [`ActorError::NoRoutes`] if the destination is unreachable and
    /// [`ActorError::Config`] if `adoption` is outside `[0, 1]`.
    pub fn new(network: &RoadNetwork, origin: NodeId, destination: NodeId, adoption: f64) -> ActorResult<Self> {
        if !(0.0..=1.0).contains(&adoption) {
            return Err(ActorError::Config(format!("adoption fraction must be in [0, 1], got {adoption}")));
        }
        let routes = network.all_simple_paths(origin, destination)?;
        if routes.is_empty() {
            return Err(ActorError::NoRoutes { from: origin, to: destination });
        }

        let times = routes
            .iter()
            .map(|r| network.free_flow_time(r))
            .collect::<Result<Vec<_>, _>>()?;
        let probabilities = softmax_travel_times(&times);
        let index = WeightedIndex::new(&probabilities).map_err(|e| ActorError::Config(e.to_string()))?;

        log::debug!("softmax route choice over {} routes {origin} -> {destination}", routes.len());
        Ok(Self { routes, probabilities, index, adoption })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Probability of each route in [`routes`](Self::routes) order.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn adoption(&self) -> f64 {
        self.adoption
    }
}

impl ActorFactory for SoftmaxRouteFactory {
    fn create(&self, id: ActorId, ctx: &CreateContext<'_>, rng: &mut SimRng) -> ActorResult<Actor> {
        let pick: usize = rng.draw(&self.index);
        let route = self.routes[pick].clone();
        // Always drawn: the random stream is identical with or without a predictor.
        let guided = rng.gen_bool(self.adoption);
        let predictor = if guided { ctx.predictor.cloned() } else { None };
        Ok(Actor::new(id, route, predictor))
    }
}

// ── Fixed route ───────────────────────────────────────────────────────────────

/// Gives every actor the same base route and guidance.  Uses no randomness.
#[derive(Clone, Debug)]
pub struct FixedRouteFactory {
    route:  Route,
    guided: bool,
}

impl FixedRouteFactory {
    pub fn new(route: Route, guided: bool) -> Self {
        Self { route, guided }
    }

    /// Unguided actors on `route`.
    pub fn unguided(route: Route) -> Self {
        Self::new(route, false)
    }

    /// Guided actors with `route` giving only the endpoints.
    pub fn guided(route: Route) -> Self {
        Self::new(route, true)
    }
}

impl ActorFactory for FixedRouteFactory {
    fn create(&self, id: ActorId, ctx: &CreateContext<'_>, _rng: &mut SimRng) -> ActorResult<Actor> {
        let predictor = if self.guided { ctx.predictor.cloned() } else { None };
        Ok(Actor::new(id, self.route.clone(), predictor))
    }
}
