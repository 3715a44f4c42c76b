//! Statistics sink trait and the default flow recorder.

use std::collections::BTreeMap;

use atis_core::{ActorId, EdgeId, SimTime};

/// Callbacks invoked by [`Simulator::run`][crate::Simulator::run] as actors
/// enter and leave the network and its edges.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait StatsSink {
    /// An actor was created and started its trip.
    fn on_actor_entered(&mut self, _at: SimTime, _actor: ActorId, _guided: bool) {}

    /// An actor reached its destination.
    fn on_actor_left(&mut self, _at: SimTime, _actor: ActorId, _guided: bool) {}

    fn on_edge_entered(&mut self, _at: SimTime, _edge: EdgeId, _actor: ActorId, _guided: bool) {}

    fn on_edge_left(&mut self, _at: SimTime, _edge: EdgeId, _actor: ActorId, _guided: bool) {}

    fn on_accident(&mut self, _at: SimTime, _edge: EdgeId, _factor: f64) {}

    /// An actor was still travelling when the horizon closed the run.
    fn on_actor_truncated(&mut self, _horizon: SimTime, _actor: ActorId, _guided: bool) {}
}

/// A [`StatsSink`] that records nothing.
pub struct NoopStats;

impl StatsSink for NoopStats {}

// ── Flow samples ──────────────────────────────────────────────────────────────

/// One change in occupancy: `delta` is `+1` on entry, `-1` on exit.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowSample {
    pub at:     SimTime,
    pub delta:  i32,
    pub guided: bool,
}

/// A cumulative occupancy point `(time, total, guided, unguided)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupancy {
    pub at:       SimTime,
    pub total:    i64,
    pub guided:   i64,
    pub unguided: i64,
}

/// Running sums of `samples`, preceded by an all-zero point at time zero.
///
/// Samples must be in time order, which they are when recorded by a run.
pub fn occupancy(samples: &[FlowSample]) -> Vec<Occupancy> {
    let mut out = Vec::with_capacity(samples.len() + 1);
    let mut cur = Occupancy { at: SimTime::ZERO, total: 0, guided: 0, unguided: 0 };
    out.push(cur);
    for s in samples {
        let d = i64::from(s.delta);
        cur.at = s.at;
        cur.total += d;
        if s.guided {
            cur.guided += d;
        } else {
            cur.unguided += d;
        }
        out.push(cur);
    }
    out
}

/// Time-averaged occupancy: trapezoidal area under the `total` series
/// divided by its last timestamp.  Zero for a series that never leaves
/// time zero.
pub fn time_average(series: &[Occupancy]) -> f64 {
    let Some(last) = series.last() else { return 0.0 };
    let span = last.at.as_hours();
    if span <= 0.0 {
        return 0.0;
    }
    let area: f64 = series
        .windows(2)
        .map(|w| (w[1].at - w[0].at) * (w[0].total + w[1].total) as f64 / 2.0)
        .sum();
    area / span
}

// ── RunStats ──────────────────────────────────────────────────────────────────

/// Records network-level and per-edge flow samples for one run.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    network:   Vec<FlowSample>,
    edges:     BTreeMap<EdgeId, Vec<FlowSample>>,
    accidents: Vec<(SimTime, EdgeId, f64)>,
    truncated: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actors entering (`+1`) and leaving (`-1`) the network.
    pub fn network_flow(&self) -> &[FlowSample] {
        &self.network
    }

    /// Entries and exits on `edge`; empty if nobody used it.
    pub fn edge_flow(&self, edge: EdgeId) -> &[FlowSample] {
        self.edges.get(&edge).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edges that saw at least one entry, in id order.
    pub fn used_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys().copied()
    }

    pub fn accidents(&self) -> &[(SimTime, EdgeId, f64)] {
        &self.accidents
    }

    /// Actors cut off by the horizon.
    pub fn truncated(&self) -> usize {
        self.truncated
    }

    /// Cumulative number of actors in the network.
    pub fn network_occupancy(&self) -> Vec<Occupancy> {
        occupancy(&self.network)
    }

    /// Cumulative number of actors on `edge`.
    pub fn edge_occupancy(&self, edge: EdgeId) -> Vec<Occupancy> {
        occupancy(self.edge_flow(edge))
    }

    /// Time-averaged number of actors in the network.
    pub fn average_network_occupancy(&self) -> f64 {
        time_average(&self.network_occupancy())
    }

    /// Time-averaged occupancy of every used edge.
    pub fn average_edge_occupancy(&self) -> BTreeMap<EdgeId, f64> {
        self.edges
            .iter()
            .map(|(&e, samples)| (e, time_average(&occupancy(samples))))
            .collect()
    }
}

impl StatsSink for RunStats {
    fn on_actor_entered(&mut self, at: SimTime, _actor: ActorId, guided: bool) {
        self.network.push(FlowSample { at, delta: 1, guided });
    }

    fn on_actor_left(&mut self, at: SimTime, _actor: ActorId, guided: bool) {
        self.network.push(FlowSample { at, delta: -1, guided });
    }

    fn on_edge_entered(&mut self, at: SimTime, edge: EdgeId, _actor: ActorId, guided: bool) {
        self.edges.entry(edge).or_default().push(FlowSample { at, delta: 1, guided });
    }

    fn on_edge_left(&mut self, at: SimTime, edge: EdgeId, _actor: ActorId, guided: bool) {
        self.edges.entry(edge).or_default().push(FlowSample { at, delta: -1, guided });
    }

    fn on_accident(&mut self, at: SimTime, edge: EdgeId, factor: f64) {
        self.accidents.push((at, edge, factor));
    }

    fn on_actor_truncated(&mut self, _horizon: SimTime, _actor: ActorId, _guided: bool) {
        self.truncated += 1;
    }
}
