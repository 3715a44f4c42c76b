use atis_core::{EdgeId, SimTime};

use crate::{PredictContext, PredictResult, RoutePredictor};

/// Population-sampled ATIS.
///
/// Only sees guided actors: the number of guided actors currently on an
/// edge (their edge exits are still queued) is scaled up by the adoption
/// fraction to estimate the edge's full volume.
#[derive(Copy, Clone, Debug)]
pub struct AdherenceAtis {
    adoption: f64,
}

impl AdherenceAtis {
    /// `adoption` is the fraction of actors that are guided.  Zero means no
    /// guided actor will ever ask, so volumes are estimated as zero.
    pub fn new(adoption: f64) -> Self {
        Self { adoption }
    }

    pub fn adoption(&self) -> f64 {
        self.adoption
    }

    /// Extrapolated volume of `edge`.
    pub fn estimated_volume(&self, ctx: &PredictContext<'_>, edge: EdgeId) -> f64 {
        if self.adoption <= 0.0 {
            return 0.0;
        }
        ctx.pending.count_pending_users_on_edge(edge) as f64 / self.adoption
    }
}

impl RoutePredictor for AdherenceAtis {
    fn name(&self) -> &'static str {
        "adherence"
    }

    fn edge_time(&self, ctx: &PredictContext<'_>, edge: EdgeId, _at: SimTime) -> PredictResult<f64> {
        Ok(ctx.network.travel_time(edge, self.estimated_volume(ctx, edge))?)
    }
}
