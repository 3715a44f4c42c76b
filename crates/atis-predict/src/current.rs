use atis_core::{EdgeId, SimTime};

use crate::{PredictContext, PredictResult, RoutePredictor};

/// Instantaneous ATIS: every edge is assumed to keep its present travel time.
#[derive(Copy, Clone, Debug, Default)]
pub struct CurrentAtis;

impl RoutePredictor for CurrentAtis {
    fn name(&self) -> &'static str {
        "current"
    }

    fn edge_time(&self, ctx: &PredictContext<'_>, edge: EdgeId, _at: SimTime) -> PredictResult<f64> {
        Ok(ctx.network.real_travel_time(edge)?)
    }
}
