//! Independent replicates of one scenario.
//!
//! Each replicate owns its simulator (network, queue, actors, RNG), so
//! replicates share nothing and can run on separate threads.  With the
//! `parallel` feature they run on Rayon's thread pool; outputs are always
//! returned in seed order.

use atis_actor::{Actor, ActorFactory};

use crate::{ActorSummary, RunReport, RunStats, SimResult, Simulator};

/// Everything one replicate produced.
#[derive(Debug)]
pub struct ReplicateOutput {
    pub seed:   u64,
    pub report: RunReport,
    pub stats:  RunStats,
    pub actors: Vec<Actor>,
}

/// Build a simulator per seed with `make`, run each with a fresh
/// [`RunStats`], and collect the outputs in seed order.
///
/// Stops at the first failing replicate.
pub fn run_replicates<A, F>(seeds: &[u64], make: F) -> SimResult<Vec<ReplicateOutput>>
where
    A: ActorFactory,
    F: Fn(u64) -> SimResult<Simulator<A>> + Sync,
{
    log::info!("running {} replicates", seeds.len());

    #[cfg(not(feature = "parallel"))]
    {
        seeds.iter().map(|&seed| run_one(seed, &make)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        seeds.par_iter().map(|&seed| run_one(seed, &make)).collect()
    }
}

fn run_one<A, F>(seed: u64, make: &F) -> SimResult<ReplicateOutput>
where
    A: ActorFactory,
    F: Fn(u64) -> SimResult<Simulator<A>>,
{
    let mut sim = make(seed)?;
    let mut stats = RunStats::new();
    let report = sim.run(&mut stats)?;
    Ok(ReplicateOutput { seed, report, stats, actors: sim.into_actors() })
}

/// Travel-time summary pooled over every replicate's actors.
pub fn pooled_summary(outputs: &[ReplicateOutput]) -> ActorSummary {
    ActorSummary::from_actors(outputs.iter().flat_map(|o| o.actors.iter()))
}

/// Mean number of truncated actors per replicate.  Zero for no replicates.
pub fn mean_truncated(outputs: &[ReplicateOutput]) -> f64 {
    if outputs.is_empty() {
        return 0.0;
    }
    outputs.iter().map(|o| o.report.truncated as f64).sum::<f64>() / outputs.len() as f64
}
