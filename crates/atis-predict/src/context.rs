//! `PredictContext`: read-only view of the run handed to predictors.

use atis_core::EdgeId;
use atis_network::RoadNetwork;

/// Read-only access to the events still waiting in the scheduler.
///
/// Implemented by the event scheduler.  Predictors never see the queue
/// itself, only this count.
pub trait PendingEdgeQuery {
    /// Number of queued edge-exit events on `edge` whose actor is guided.
    fn count_pending_users_on_edge(&self, edge: EdgeId) -> usize;
}

/// A queue with nothing in it.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoPending;

impl PendingEdgeQuery for NoPending {
    fn count_pending_users_on_edge(&self, _edge: EdgeId) -> usize {
        0
    }
}

static NO_PENDING: NoPending = NoPending;

/// Everything a predictor may read while choosing a next edge.
///
/// Built fresh by the simulator for each decision; borrowing both the
/// network and the scheduler immutably for that one call.
#[derive(Copy, Clone)]
pub struct PredictContext<'a> {
    pub network: &'a RoadNetwork,
    pub pending: &'a dyn PendingEdgeQuery,
}

impl<'a> PredictContext<'a> {
    pub fn new(network: &'a RoadNetwork, pending: &'a dyn PendingEdgeQuery) -> Self {
        Self { network, pending }
    }

    /// A context with an empty pending-event view.
    pub fn network_only(network: &'a RoadNetwork) -> Self {
        Self { network, pending: &NO_PENDING }
    }
}
