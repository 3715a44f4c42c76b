//! The `RoutePredictor` trait.

use atis_core::{EdgeId, NodeId, SimTime};
use atis_network::Route;

use crate::{PredictContext, PredictError, PredictResult};

/// Next-hop advice for guided actors.
///
/// Implementors supply [`edge_time`](Self::edge_time); the provided methods
/// turn it into a path estimate and a next-edge decision.  Strategies whose
/// path estimate is not a plain sum of edge estimates override
/// [`route_time`](Self::route_time).
///
/// # Thread safety
///
/// One predictor is shared by all guided actors of a run, and replicates
/// may run on separate threads, so implementations must be `Send + Sync`.
pub trait RoutePredictor: Send + Sync {
    /// Short label used in logs and reports.
    fn name(&self) -> &'static str;

    /// Predicted traversal time of `edge` for an actor entering it at `at`.
    fn edge_time(&self, ctx: &PredictContext<'_>, edge: EdgeId, at: SimTime) -> PredictResult<f64>;

    /// Predicted duration of `route` for an actor starting it at `at`.
    fn route_time(&self, ctx: &PredictContext<'_>, route: &Route, at: SimTime) -> PredictResult<f64> {
        let mut total = 0.0;
        for &edge in route.edges() {
            total += self.edge_time(ctx, edge, at)?;
        }
        Ok(total)
    }

    /// First edge of the route from `current` to `dest` with the lowest
    /// predicted duration.
    ///
    /// Every simple path is scored; the first path in enumeration order wins
    /// ties.
    ///
    /// # Errors
    /// [`PredictError::NoPathFound`] when there is no path, which includes
    /// `current == dest`.
    fn predict_next_edge(
        &self,
        ctx:     &PredictContext<'_>,
        current: NodeId,
        dest:    NodeId,
        at:      SimTime,
    ) -> PredictResult<EdgeId> {
        let routes = ctx.network.all_simple_paths(current, dest)?;

        let mut best: Option<(f64, &Route)> = None;
        for route in &routes {
            let t = self.route_time(ctx, route, at)?;
            if best.is_none_or(|(best_t, _)| t < best_t) {
                best = Some((t, route));
            }
        }

        let (t, route) = best.ok_or(PredictError::NoPathFound { from: current, to: dest })?;
        log::trace!("{} at {at}: {current} -> {dest} via {route} ({t:.4}h)", self.name());
        Ok(route.first_edge())
    }
}
