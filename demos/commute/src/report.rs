//! Replicate aggregation, console output, and the JSON summary.

use std::collections::BTreeMap;

use serde::Serialize;

use atis_core::{EdgeId, SimConfig};
use atis_network::RoadNetwork;
use atis_predict::PredictorKind;
use atis_sim::{ActorSummary, ReplicateOutput, TravelTimeStats};

/// Mean and standard deviation across replicates.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Spread {
    pub mean: f64,
    pub std:  f64,
}

impl Spread {
    pub fn of(values: &[f64]) -> Self {
        TravelTimeStats::from_times(values.iter().copied())
            .map_or(Spread { mean: 0.0, std: 0.0 }, |s| Spread { mean: s.mean, std: s.std })
    }
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub config:   SimConfig,
    pub variant:  PredictorKind,
    pub network:  String,
    pub runs:     usize,
    /// Travel times pooled over every replicate's actors; a truncated trip
    /// counts at the horizon.
    pub actors:   ActorSummary,
    pub avg_actors_not_finishing: f64,
    /// Time-averaged number of actors on the network.
    pub avg_network_occupancy: Spread,
    /// Time-averaged occupancy per used edge, keyed `from->to`, over the
    /// replicates that used it.
    pub avg_edge_occupancy: BTreeMap<String, Spread>,
    pub accidents: usize,
}

impl RunSummary {
    pub fn new(
        config:     SimConfig,
        variant:    PredictorKind,
        network:    String,
        graph:      &RoadNetwork,
        actors:     ActorSummary,
        truncated:  f64,
        outputs:    &[ReplicateOutput],
    ) -> Self {
        let network_avgs: Vec<f64> =
            outputs.iter().map(|o| o.stats.average_network_occupancy()).collect();

        let per_run: Vec<BTreeMap<EdgeId, f64>> =
            outputs.iter().map(|o| o.stats.average_edge_occupancy()).collect();

        Self {
            config,
            variant,
            network,
            runs: outputs.len(),
            actors,
            avg_actors_not_finishing: truncated,
            avg_network_occupancy: Spread::of(&network_avgs),
            avg_edge_occupancy: edge_spreads(&per_run)
                .into_iter()
                .map(|(edge, spread)| (edge_key(graph, edge), spread))
                .collect(),
            accidents: outputs.first().map_or(0, |o| o.stats.accidents().len()),
        }
    }
}

/// Per-edge spread across runs.  A run that never used an edge does not
/// contribute to that edge's spread.
pub fn edge_spreads(per_run: &[BTreeMap<EdgeId, f64>]) -> BTreeMap<EdgeId, Spread> {
    let mut seen: BTreeMap<EdgeId, Vec<f64>> = BTreeMap::new();
    for run in per_run {
        for (&edge, &avg) in run {
            seen.entry(edge).or_default().push(avg);
        }
    }
    seen.into_iter().map(|(edge, values)| (edge, Spread::of(&values))).collect()
}

fn edge_key(network: &RoadNetwork, edge: EdgeId) -> String {
    match network.endpoints(edge) {
        Ok((from, to)) => format!("{}->{}", from.0, to.0),
        Err(_)         => edge.to_string(),
    }
}

fn print_group(label: &str, stats: Option<TravelTimeStats>) {
    match stats {
        Some(s) => println!("{label}: {:.4} || {:.4}  ({} trips)", s.mean, s.std, s.count),
        None    => println!("{label}: no finished trips"),
    }
}

pub fn print_summary(summary: &RunSummary) {
    println!(
        "{} actors x {} runs on {}, adoption {:.2}, predictor {}",
        summary.config.actor_count,
        summary.runs,
        summary.network,
        summary.config.adoption,
        summary.variant.as_str()
    );
    print_group("ATIS YES", summary.actors.guided);
    print_group("ATIS NO", summary.actors.unguided);
    println!("avg actors not finishing: {:.2}", summary.avg_actors_not_finishing);
    println!(
        "avg actors on network: {:.2} || {:.2}",
        summary.avg_network_occupancy.mean, summary.avg_network_occupancy.std
    );
}
