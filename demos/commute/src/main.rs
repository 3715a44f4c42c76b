//! ATIS commuter demo: guided vs. unguided travel times over several
//! replicates of one scenario.
//!
//! Each replicate creates `--actors` commuters whose departures follow the
//! commuter demand (or the `--peak` flags), assigns base routes by softmax
//! over free-flow times, and guides an `--atis` fraction of them with the
//! chosen predictor.  Replicates run in parallel.
//!
//! Run with: cargo run -p commute --release -- --atis 0.3 --variant adherence -r 10

mod report;
#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};

use atis_actor::SoftmaxRouteFactory;
use atis_core::{DemandPeak, MultimodalDistribution, NodeId, SimConfig, SimTime};
use atis_network::{NetworkPreset, PresetNetwork, load_network_csv};
use atis_predict::PredictorKind;
use atis_sim::{SimBuilder, mean_truncated, pooled_summary, run_replicates};

use report::{RunSummary, print_summary};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "commute", about = "Commuter route choice under partial ATIS adoption")]
struct Args {
    /// Actors per replicate.
    #[arg(short = 'n', long = "actors", default_value_t = 500)]
    actors: usize,

    /// Number of replicates.
    #[arg(short = 'r', long = "runs", default_value_t = 1)]
    runs: usize,

    /// Horizon in hours.
    #[arg(long = "tmax", default_value_t = 48.0)]
    tmax: f64,

    /// Fraction of actors receiving guidance, in [0, 1].
    #[arg(long = "atis", default_value_t = 0.0)]
    atis: f64,

    /// Demand peak (repeatable).  Defaults to the 8h and 18h commuter peaks.
    #[arg(short = 'p', long = "peak", num_args = 2, value_names = ["MEAN", "STD"], action = ArgAction::Append)]
    peaks: Vec<f64>,

    /// Predictor variant: current (alias: real), prevision, adherence.
    #[arg(long, default_value = "current")]
    variant: PredictorKind,

    /// Seed of the first replicate; replicate i uses seed + i.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Built-in network: two_node, diamond, deliverable, commuter.
    #[arg(long, conflicts_with = "edges")]
    preset: Option<NetworkPreset>,

    /// Edge-list CSV (`from,to,free_flow_time,capacity`).
    #[arg(long)]
    edges: Option<PathBuf>,

    /// Origin node for `--edges` (default 0).
    #[arg(long, requires = "edges")]
    origin: Option<u32>,

    /// Destination node for `--edges` (default: the last node).
    #[arg(long, requires = "edges")]
    dest: Option<u32>,

    /// JSON `SimConfig`; replaces --actors, --tmax, --atis, and --seed.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Capacity drop `HOURS:FROM:TO:FACTOR` (repeatable).
    #[arg(long = "accident", value_parser = parse_accident)]
    accidents: Vec<AccidentArg>,

    /// Write a JSON summary here.
    #[arg(short = 'o', long)]
    out: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug)]
struct AccidentArg {
    at:     f64,
    from:   u32,
    to:     u32,
    factor: f64,
}

fn parse_accident(s: &str) -> Result<AccidentArg, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [at, from, to, factor] = parts.as_slice() else {
        return Err(format!("expected HOURS:FROM:TO:FACTOR, got {s:?}"));
    };
    Ok(AccidentArg {
        at:     at.parse().map_err(|e| format!("hours {at:?}: {e}"))?,
        from:   from.parse().map_err(|e| format!("node {from:?}: {e}"))?,
        to:     to.parse().map_err(|e| format!("node {to:?}: {e}"))?,
        factor: factor.parse().map_err(|e| format!("factor {factor:?}: {e}"))?,
    })
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<SimConfig> {
    let config = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig {
            actor_count:   args.actors,
            horizon_hours: args.tmax,
            adoption:      args.atis,
            seed:          args.seed,
        },
    };
    config.validate()?;
    Ok(config)
}

fn load_network(args: &Args) -> Result<(PresetNetwork, String)> {
    let Some(path) = &args.edges else {
        let preset = args.preset.unwrap_or(NetworkPreset::Commuter);
        return Ok((preset.build()?, preset.to_string()));
    };

    let network = load_network_csv(path)?;
    let Some(last) = network.node_count().checked_sub(1) else {
        bail!("{} has no nodes", path.display());
    };
    let origin = NodeId(args.origin.unwrap_or(0));
    let destination = NodeId(args.dest.unwrap_or(u32::try_from(last)?));
    Ok((PresetNetwork { network, origin, destination }, path.display().to_string()))
}

fn demand_from(peaks: &[f64]) -> Result<MultimodalDistribution> {
    if peaks.is_empty() {
        return Ok(MultimodalDistribution::commuter());
    }
    let peaks = peaks.chunks_exact(2).map(|p| DemandPeak::new(p[0], p[1])).collect();
    Ok(MultimodalDistribution::new(peaks)?)
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.runs == 0 {
        bail!("--runs must be at least 1");
    }

    let config = load_config(&args)?;
    let demand = demand_from(&args.peaks)?;
    let (preset, network_name) = load_network(&args)?;

    let accidents = args
        .accidents
        .iter()
        .map(|a| {
            let edge = preset.network.edge_between(NodeId(a.from), NodeId(a.to))?;
            Ok((SimTime::hours(a.at), edge, a.factor))
        })
        .collect::<Result<Vec<_>>>()?;

    let actors = SoftmaxRouteFactory::new(&preset.network, preset.origin, preset.destination, config.adoption)?;
    log::info!(
        "{network_name}: {} nodes, {} edges, {} candidate routes {} -> {}",
        preset.network.node_count(),
        preset.network.edge_count(),
        actors.routes().len(),
        preset.origin,
        preset.destination
    );

    let seeds: Vec<u64> = (0..args.runs as u64).map(|i| config.seed.wrapping_add(i)).collect();
    let outputs = run_replicates(&seeds, |seed| {
        let mut builder = SimBuilder::new(
            SimConfig { seed, ..config.clone() },
            preset.network.clone(),
            actors.clone(),
            args.variant,
        )
        .demand(demand.clone());
        for &(at, edge, factor) in &accidents {
            builder = builder.accident(at, edge, factor);
        }
        builder.build()
    })?;

    let summary = RunSummary::new(
        config,
        args.variant,
        network_name,
        &preset.network,
        pooled_summary(&outputs),
        mean_truncated(&outputs),
        &outputs,
    );
    print_summary(&summary);

    if let Some(path) = &args.out {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &summary)?;
        writer.flush()?;
        log::info!("summary written to {}", path.display());
    }

    Ok(())
}
