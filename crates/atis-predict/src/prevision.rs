//! Distribution-extrapolated ATIS.
//!
//! The expected volume of an edge at time `t` is taken to be
//! `pdf(t) * population`.  The ratio between an edge's real travel time now
//! and its expected travel time now is assumed to hold later too, so the
//! estimate for reaching edge `e` at a future time `t` is
//!
//! ```text
//! naive(e, t)     = travel_time(e, pdf(t) * population)
//! corrected(e, t) = naive(e, t) * real_travel_time(e) / naive(e, t0)
//! ```
//!
//! and the walk along a path advances `t` by each corrected estimate.

use atis_core::{EdgeId, MultimodalDistribution, SimTime};
use atis_network::Route;

use crate::{PredictContext, PredictResult, RoutePredictor};

#[derive(Clone, Debug)]
pub struct PrevisionAtis {
    distribution: MultimodalDistribution,
    population:   usize,
}

impl PrevisionAtis {
    pub fn new(distribution: MultimodalDistribution, population: usize) -> Self {
        Self { distribution, population }
    }

    pub fn distribution(&self) -> &MultimodalDistribution {
        &self.distribution
    }

    pub fn population(&self) -> usize {
        self.population
    }

    fn naive(&self, ctx: &PredictContext<'_>, edge: EdgeId, at: SimTime) -> PredictResult<f64> {
        let expected = self.distribution.pdf(at.as_hours()) * self.population as f64;
        Ok(ctx.network.travel_time(edge, expected)?)
    }
}

impl RoutePredictor for PrevisionAtis {
    fn name(&self) -> &'static str {
        "prevision"
    }

    /// Uncorrected estimate from the demand distribution alone.
    fn edge_time(&self, ctx: &PredictContext<'_>, edge: EdgeId, at: SimTime) -> PredictResult<f64> {
        self.naive(ctx, edge, at)
    }

    fn route_time(&self, ctx: &PredictContext<'_>, route: &Route, at: SimTime) -> PredictResult<f64> {
        let mut t = at;
        let mut total = 0.0;
        for &edge in route.edges() {
            // naive(e, at) >= free-flow time > 0
            let ratio = ctx.network.real_travel_time(edge)? / self.naive(ctx, edge, at)?;
            let corrected = self.naive(ctx, edge, t)? * ratio;
            total += corrected;
            t += corrected;
        }
        Ok(total)
    }
}
