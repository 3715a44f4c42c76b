//! The road graph and its builder.
//!
//! # Layout
//!
//! Edges are stored sorted by source node, so the edges leaving node `n` are
//! the contiguous id range
//!
//! ```text
//! EdgeId(first_out[n]) .. EdgeId(first_out[n + 1])
//! ```
//!
//! and every per-edge column (`heads`, `tails`, free-flow time, capacity,
//! volume) is indexed by `EdgeId`.  The sort is stable: a node's outgoing
//! edges keep the order they were added in, which fixes the order of path
//! enumeration for a given build sequence.
//!
//! # Live state
//!
//! Volume changes only through [`RoadNetwork::increment_volume`] /
//! [`RoadNetwork::decrement_volume`]; capacity only through
//! [`RoadNetwork::scale_capacity`].

use rustc_hash::FxHashMap;

use atis_core::{EdgeId, NodeId};

use crate::congestion::bpr_travel_time;
use crate::{NetworkError, NetworkResult};

// ── EdgeData ──────────────────────────────────────────────────────────────────

/// Snapshot of one edge's static parameters and current occupancy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeData {
    pub from:           NodeId,
    pub to:             NodeId,
    pub free_flow_time: f64,
    pub capacity:       f64,
    pub volume:         u32,
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format with per-edge congestion state.
///
/// Do not construct directly; use [`RoadNetworkBuilder`] or a preset.
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    /// `node_count + 1` offsets into the edge columns.
    first_out: Vec<u32>,
    tails:     Vec<NodeId>,
    heads:     Vec<NodeId>,
    /// Hours.
    free_flow: Vec<f64>,
    capacity:  Vec<f64>,
    volume:    Vec<u32>,

    /// `(from, to) → EdgeId` lookup.
    edge_index: FxHashMap<(NodeId, NodeId), EdgeId>,
}

impl RoadNetwork {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.first_out.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.heads.len()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// Iterator over every `EdgeId` in the network.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edge_count()).map(|i| EdgeId(i as u32))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Edges leaving `node`, in insertion order.  Empty for a node outside
    /// the graph.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let (lo, hi) = self.out_range(node);
        (lo..hi).map(EdgeId)
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let (lo, hi) = self.out_range(node);
        (hi - lo) as usize
    }

    /// Head node of `edge`, for callers that already hold a valid id.
    #[inline]
    pub(crate) fn head(&self, edge: EdgeId) -> NodeId {
        self.heads[edge.index()]
    }

    /// Resolve the directed edge `from → to`.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> NetworkResult<EdgeId> {
        self.edge_index
            .get(&(from, to))
            .copied()
            .ok_or(NetworkError::NoEdgeBetween { from, to })
    }

    /// `(from, to)` endpoints of `edge`.
    pub fn endpoints(&self, edge: EdgeId) -> NetworkResult<(NodeId, NodeId)> {
        self.check(edge)?;
        Ok((self.tails[edge.index()], self.heads[edge.index()]))
    }

    // ── Edge state ────────────────────────────────────────────────────────

    /// Static parameters and current volume of `edge`.
    pub fn edge_data(&self, edge: EdgeId) -> NetworkResult<EdgeData> {
        self.check(edge)?;
        let i = edge.index();
        Ok(EdgeData {
            from:           self.tails[i],
            to:             self.heads[i],
            free_flow_time: self.free_flow[i],
            capacity:       self.capacity[i],
            volume:         self.volume[i],
        })
    }

    /// Number of actors currently on `edge`.
    pub fn volume(&self, edge: EdgeId) -> NetworkResult<u32> {
        self.check(edge)?;
        Ok(self.volume[edge.index()])
    }

    /// An actor entered `edge`.
    pub fn increment_volume(&mut self, edge: EdgeId) -> NetworkResult<()> {
        self.check(edge)?;
        self.volume[edge.index()] += 1;
        Ok(())
    }

    /// An actor left `edge`.
    ///
    /// # Errors
    /// [`NetworkError::NegativeVolume`] if the edge is already empty, which
    /// means an exit was recorded without a matching entry.
    pub fn decrement_volume(&mut self, edge: EdgeId) -> NetworkResult<()> {
        self.check(edge)?;
        let v = &mut self.volume[edge.index()];
        *v = v.checked_sub(1).ok_or(NetworkError::NegativeVolume(edge))?;
        Ok(())
    }

    /// `true` when no actor occupies any edge.
    pub fn is_idle(&self) -> bool {
        self.volume.iter().all(|&v| v == 0)
    }

    /// Multiply the capacity of `edge` by `factor` (e.g. `0.2` for an
    /// accident closing most lanes).  Irreversible within a run.
    pub fn scale_capacity(&mut self, edge: EdgeId, factor: f64) -> NetworkResult<()> {
        self.check(edge)?;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(NetworkError::InvalidScale { edge, factor });
        }
        self.capacity[edge.index()] *= factor;
        Ok(())
    }

    // ── Travel times ──────────────────────────────────────────────────────

    /// Congested traversal time of `edge` assuming `assumed_volume` actors
    /// share it.
    pub fn travel_time(&self, edge: EdgeId, assumed_volume: f64) -> NetworkResult<f64> {
        self.check(edge)?;
        let i = edge.index();
        Ok(bpr_travel_time(self.free_flow[i], self.capacity[i], assumed_volume))
    }

    /// Traversal time of `edge` under its current volume.
    pub fn real_travel_time(&self, edge: EdgeId) -> NetworkResult<f64> {
        self.check(edge)?;
        self.travel_time(edge, f64::from(self.volume[edge.index()]))
    }

    fn out_range(&self, node: NodeId) -> (u32, u32) {
        match (self.first_out.get(node.index()), self.first_out.get(node.index() + 1)) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (0, 0),
        }
    }

    #[inline]
    fn check(&self, edge: EdgeId) -> NetworkResult<()> {
        if edge.index() < self.edge_count() {
            Ok(())
        } else {
            Err(NetworkError::UnknownEdge(edge))
        }
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Collects nodes and edges, then validates them into a [`RoadNetwork`].
///
/// Nodes are dense indices; adding an edge that mentions a node beyond the
/// current count grows the node set to include it.
///
/// # Example
///
/// ```
/// use atis_core::{EdgeId, NodeId};
/// use atis_network::RoadNetworkBuilder;
///
/// let mut builder = RoadNetworkBuilder::with_nodes(2);
/// builder.add_edge(NodeId(0), NodeId(1), 1.0, 20.0);
/// let net = builder.build().unwrap();
/// assert_eq!(net.travel_time(EdgeId(0), 0.0).unwrap(), 1.0);
/// ```
pub struct RoadNetworkBuilder {
    node_count: usize,
    pending:    Vec<PendingEdge>,
}

struct PendingEdge {
    from:      NodeId,
    to:        NodeId,
    free_flow: f64,
    capacity:  f64,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { node_count: 0, pending: Vec::new() }
    }

    /// Start with `n` nodes (`NodeId(0) .. NodeId(n-1)`).
    pub fn with_nodes(n: usize) -> Self {
        Self { node_count: n, pending: Vec::new() }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.node_count as u32);
        self.node_count += 1;
        id
    }

    /// Add a **directed** edge.  `free_flow` is in hours, `capacity` in
    /// vehicles.  Parameters are validated in [`build`](Self::build).
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, free_flow: f64, capacity: f64) {
        self.node_count = self.node_count.max(from.index() + 1).max(to.index() + 1);
        self.pending.push(PendingEdge { from, to, free_flow, capacity });
    }

    pub fn node_count(&self) -> usize { self.node_count }
    pub fn edge_count(&self) -> usize { self.pending.len() }

    /// Validate edges and produce a [`RoadNetwork`] with all volumes at zero.
    ///
    /// # Errors
    /// [`NetworkError::InvalidEdge`] for self-loops, duplicate `(from, to)`
    /// pairs, or non-positive / non-finite free-flow time or capacity.
    pub fn build(self) -> NetworkResult<RoadNetwork> {
        let node_count = self.node_count;
        let mut edges = self.pending;

        if let Some(e) = edges.iter().find(|e| e.from == e.to) {
            return Err(invalid(e, "self-loops are not allowed"));
        }
        if let Some(e) = edges.iter().find(|e| !(e.free_flow.is_finite() && e.free_flow > 0.0)) {
            return Err(invalid(e, "free-flow time must be positive"));
        }
        if let Some(e) = edges.iter().find(|e| !(e.capacity.is_finite() && e.capacity > 0.0)) {
            return Err(invalid(e, "capacity must be positive"));
        }

        // Stable: ties keep insertion order.
        edges.sort_by_key(|e| e.from);

        let mut edge_index = FxHashMap::default();
        for (i, e) in edges.iter().enumerate() {
            let id = EdgeId::try_from(i).map_err(|_| invalid(e, "too many edges"))?;
            if edge_index.insert((e.from, e.to), id).is_some() {
                return Err(invalid(e, "duplicate edge"));
            }
        }

        // Out-degree per node, then prefix sums.
        let mut first_out = vec![0u32; node_count + 1];
        for e in &edges {
            first_out[e.from.index() + 1] += 1;
        }
        for n in 0..node_count {
            first_out[n + 1] += first_out[n];
        }

        log::debug!("built road network: {node_count} nodes, {} edges", edges.len());

        Ok(RoadNetwork {
            first_out,
            tails:     edges.iter().map(|e| e.from).collect(),
            heads:     edges.iter().map(|e| e.to).collect(),
            free_flow: edges.iter().map(|e| e.free_flow).collect(),
            capacity:  edges.iter().map(|e| e.capacity).collect(),
            volume:    vec![0; edges.len()],
            edge_index,
        })
    }
}

fn invalid(e: &PendingEdge, reason: &str) -> NetworkError {
    NetworkError::InvalidEdge { from: e.from, to: e.to, reason: reason.into() }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
