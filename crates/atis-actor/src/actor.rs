//! One commuter.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use atis_core::{ActorId, EdgeId, NodeId, SimTime};
use atis_network::{RoadNetwork, Route};
use atis_predict::{PredictContext, RoutePredictor};

use crate::{ActorError, ActorResult, TripState};

/// A commuter travelling from its base route's origin to its destination.
///
/// Unguided actors follow the base route edge by edge.  Guided actors only
/// keep its endpoints and ask the predictor for every hop.
pub struct Actor {
    id:         ActorId,
    base_route: Route,
    predictor:  Option<Arc<dyn RoutePredictor>>,

    /// `(time, node)` for the origin and every node reached since.
    traveled:   Vec<(SimTime, NodeId)>,
    /// Travel time quoted on entry, per edge.  A revisited edge overwrites
    /// its earlier entry.
    edge_times: BTreeMap<EdgeId, f64>,
    /// Edge entered but not yet left.
    in_flight:  Option<EdgeId>,

    total_travel_time: Option<f64>,
    state:             TripState,
}

impl Actor {
    pub fn new(id: ActorId, base_route: Route, predictor: Option<Arc<dyn RoutePredictor>>) -> Self {
        Self {
            id,
            base_route,
            predictor,
            traveled: Vec::new(),
            edge_times: BTreeMap::new(),
            in_flight: None,
            total_travel_time: None,
            state: TripState::NotStarted,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn base_route(&self) -> &Route {
        &self.base_route
    }

    pub fn predictor(&self) -> Option<&Arc<dyn RoutePredictor>> {
        self.predictor.as_ref()
    }

    /// `true` if the actor follows a predictor instead of its base route.
    #[inline]
    pub fn is_guided(&self) -> bool {
        self.predictor.is_some()
    }

    pub fn state(&self) -> TripState {
        self.state
    }

    pub fn traveled_nodes(&self) -> &[(SimTime, NodeId)] {
        &self.traveled
    }

    pub fn edge_travel_times(&self) -> &BTreeMap<EdgeId, f64> {
        &self.edge_times
    }

    pub fn in_flight_edge(&self) -> Option<EdgeId> {
        self.in_flight
    }

    /// Set once the trip is finalized or truncated.
    pub fn total_travel_time(&self) -> Option<f64> {
        self.total_travel_time
    }

    /// Time the trip started, if it has.
    pub fn departure(&self) -> Option<SimTime> {
        self.traveled.first().map(|&(t, _)| t)
    }

    pub fn destination(&self) -> NodeId {
        self.base_route.destination()
    }

    /// Last node reached; `None` before the trip starts.
    pub fn current_node(&self) -> Option<NodeId> {
        self.traveled.last().map(|&(_, n)| n)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Place the actor at its origin at `at`.
    pub fn start_trip(&mut self, at: SimTime) -> ActorResult<()> {
        self.require(TripState::NotStarted, "start a trip")?;
        self.traveled.push((at, self.base_route.origin()));
        self.state = TripState::InTransit;
        Ok(())
    }

    /// The edge to enter next from the current node.
    ///
    /// # Errors
    /// Guided actors propagate predictor failures (e.g. `NoPathFound`).
    /// Unguided actors fail with [`ActorError::RouteExhausted`] if the
    /// current node has no successor on the base route.
    pub fn next_edge(&self, at: SimTime, ctx: &PredictContext<'_>) -> ActorResult<EdgeId> {
        self.require(TripState::InTransit, "choose an edge")?;
        let current = self.position()?;

        if let Some(predictor) = &self.predictor {
            return Ok(predictor.predict_next_edge(ctx, current, self.destination(), at)?);
        }

        // edges[i] leaves nodes[i]; the destination has no outgoing entry
        self.base_route
            .nodes()
            .iter()
            .position(|&n| n == current)
            .and_then(|i| self.base_route.edges().get(i).copied())
            .ok_or(ActorError::RouteExhausted { actor: self.id, node: current })
    }

    /// Record entry onto `edge` with the quoted `travel_time`.
    pub fn begin_edge(&mut self, edge: EdgeId, travel_time: f64) -> ActorResult<()> {
        self.require(TripState::InTransit, "enter an edge")?;
        self.edge_times.insert(edge, travel_time);
        self.in_flight = Some(edge);
        Ok(())
    }

    /// Move to the far end of `edge` at `at`.
    ///
    /// # Errors
    /// [`ActorError::DiscontinuousRoute`] if `edge` does not start at the
    /// current node.
    pub fn traverse(&mut self, at: SimTime, edge: EdgeId, network: &RoadNetwork) -> ActorResult<()> {
        self.require(TripState::InTransit, "traverse an edge")?;
        let current = self.position()?;
        let (from, to) = network.endpoints(edge)?;
        if from != current {
            return Err(ActorError::DiscontinuousRoute { actor: self.id, edge, at: current });
        }
        self.traveled.push((at, to));
        self.in_flight = None;
        Ok(())
    }

    /// `true` once the last node reached is the destination.
    pub fn has_arrived(&self) -> bool {
        self.current_node() == Some(self.destination())
    }

    /// Close an arrived trip: the total is the sum of recorded edge times.
    pub fn finalize_travel_time(&mut self) -> ActorResult<f64> {
        self.require(TripState::InTransit, "finalize")?;
        if !self.has_arrived() {
            return Err(ActorError::InvalidState { actor: self.id, state: self.state, op: "finalize before arriving" });
        }
        let total: f64 = self.edge_times.values().sum();
        self.total_travel_time = Some(total);
        self.state = TripState::Arrived;
        Ok(total)
    }

    /// Close an unfinished trip at the horizon.  The total is set to the
    /// horizon itself.
    ///
    /// Returns the edge the actor was on, if any, so its occupancy can be
    /// released.  Arrived actors are left untouched.
    pub fn truncate(&mut self, horizon: SimTime) -> Option<EdgeId> {
        if self.state == TripState::Arrived {
            return None;
        }
        self.total_travel_time = Some(horizon.as_hours());
        self.state = TripState::Truncated;
        self.in_flight.take()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn require(&self, expected: TripState, op: &'static str) -> ActorResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ActorError::InvalidState { actor: self.id, state: self.state, op })
        }
    }

    fn position(&self) -> ActorResult<NodeId> {
        self.current_node()
            .ok_or(ActorError::InvalidState { actor: self.id, state: self.state, op: "locate" })
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id)
            .field("base_route", &self.base_route)
            .field("predictor", &self.predictor.as_ref().map(|p| p.name()))
            .field("state", &self.state)
            .field("traveled", &self.traveled)
            .field("total_travel_time", &self.total_travel_time)
            .finish()
    }
}
