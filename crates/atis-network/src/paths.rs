//! Routes and simple-path enumeration.
//!
//! # Cost
//!
//! [`RoadNetwork::all_simple_paths`] is exponential in the worst case.  It is
//! recomputed on every replanning decision of a guided actor, which is only
//! affordable because target networks are small (a few dozen edges).  Larger
//! graphs would need a k-shortest-paths search instead.

use atis_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{NetworkError, NetworkResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// A simple path: nodes from origin to destination with no repeats, plus the
/// `EdgeId` joining each consecutive pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
}

impl Route {
    /// Resolve a node sequence against `network`.
    ///
    /// # Errors
    /// [`NetworkError::InvalidRoute`] for fewer than two nodes or a repeated
    /// node; [`NetworkError::NoEdgeBetween`] if two consecutive nodes are not
    /// joined by an edge.
    pub fn from_nodes(network: &RoadNetwork, nodes: Vec<NodeId>) -> NetworkResult<Route> {
        if nodes.len() < 2 {
            return Err(NetworkError::InvalidRoute(format!(
                "a route needs at least two nodes, got {}",
                nodes.len()
            )));
        }
        for (i, n) in nodes.iter().enumerate() {
            if nodes[..i].contains(n) {
                return Err(NetworkError::InvalidRoute(format!("node {n} is visited twice")));
            }
        }
        let edges = nodes
            .windows(2)
            .map(|w| network.edge_between(w[0], w[1]))
            .collect::<NetworkResult<Vec<_>>>()?;
        Ok(Route { nodes, edges })
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn origin(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn destination(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// The edge leaving the origin.
    pub fn first_edge(&self) -> EdgeId {
        self.edges[0]
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<String> = self.nodes.iter().map(|n| n.0.to_string()).collect();
        write!(f, "[{}]", ids.join(" -> "))
    }
}

// ── Enumeration ───────────────────────────────────────────────────────────────

impl RoadNetwork {
    /// Every simple path from `src` to `dst`.
    ///
    /// Depth-first, following each node's outgoing edges in insertion order,
    /// so the result order is fixed for a given network.  `src == dst`
    /// yields no paths.
    ///
    /// # Errors
    /// [`NetworkError::NodeNotFound`] if either endpoint is out of range.
    pub fn all_simple_paths(&self, src: NodeId, dst: NodeId) -> NetworkResult<Vec<Route>> {
        for n in [src, dst] {
            if !self.contains_node(n) {
                return Err(NetworkError::NodeNotFound(n));
            }
        }
        let mut out = Vec::new();
        if src == dst {
            return Ok(out);
        }

        let mut on_path = vec![false; self.node_count()];
        on_path[src.index()] = true;
        let mut nodes = vec![src];
        let mut edges = Vec::new();
        self.extend_paths(src, dst, &mut on_path, &mut nodes, &mut edges, &mut out);
        Ok(out)
    }

    fn extend_paths(
        &self,
        node:    NodeId,
        dst:     NodeId,
        on_path: &mut [bool],
        nodes:   &mut Vec<NodeId>,
        edges:   &mut Vec<EdgeId>,
        out:     &mut Vec<Route>,
    ) {
        for edge in self.out_edges(node) {
            let next = self.head(edge);
            if on_path[next.index()] {
                continue;
            }
            nodes.push(next);
            edges.push(edge);
            if next == dst {
                out.push(Route { nodes: nodes.clone(), edges: edges.clone() });
            } else {
                on_path[next.index()] = true;
                self.extend_paths(next, dst, on_path, nodes, edges, out);
                on_path[next.index()] = false;
            }
            nodes.pop();
            edges.pop();
        }
    }

    /// Sum of free-flow times along `route` (its uncongested duration).
    pub fn free_flow_time(&self, route: &Route) -> NetworkResult<f64> {
        route
            .edges()
            .iter()
            .map(|&e| self.edge_data(e).map(|d| d.free_flow_time))
            .sum()
    }
}
