//! Small hand-built networks.
//!
//! Each preset comes with the origin and destination that commuters travel
//! between.  All times are in hours.

use std::str::FromStr;

use atis_core::NodeId;

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::{NetworkError, NetworkResult};

/// A network plus the commute it is meant for.
#[derive(Clone, Debug)]
pub struct PresetNetwork {
    pub network:     RoadNetwork,
    pub origin:      NodeId,
    pub destination: NodeId,
}

/// Named presets selectable from configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NetworkPreset {
    /// `0 → 1`, one edge.
    TwoNode,
    /// `0 → {1, 2} → 3`.
    Diamond,
    /// Four nodes, five edges, uniform parameters.
    Deliverable,
    /// Nine nodes with a fastest, a shortest, and an alternate corridor.
    Commuter,
}

impl NetworkPreset {
    pub fn build(self) -> NetworkResult<PresetNetwork> {
        match self {
            NetworkPreset::TwoNode     => two_node(1.0, 20.0),
            NetworkPreset::Diamond     => diamond([1.0, 2.0, 1.0, 1.0], 20.0),
            NetworkPreset::Deliverable => deliverable(),
            NetworkPreset::Commuter    => commuter(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NetworkPreset::TwoNode     => "two_node",
            NetworkPreset::Diamond     => "diamond",
            NetworkPreset::Deliverable => "deliverable",
            NetworkPreset::Commuter    => "commuter",
        }
    }
}

impl FromStr for NetworkPreset {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "two_node"    => Ok(NetworkPreset::TwoNode),
            "diamond"     => Ok(NetworkPreset::Diamond),
            "deliverable" => Ok(NetworkPreset::Deliverable),
            "commuter"    => Ok(NetworkPreset::Commuter),
            other => Err(NetworkError::Parse(format!(
                "unknown network preset {other:?}: expected two_node, diamond, deliverable, or commuter"
            ))),
        }
    }
}

impl std::fmt::Display for NetworkPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single edge `0 → 1`.
pub fn two_node(free_flow: f64, capacity: f64) -> NetworkResult<PresetNetwork> {
    let mut b = RoadNetworkBuilder::new();
    let a = b.add_node();
    let z = b.add_node();
    b.add_edge(a, z, free_flow, capacity);
    Ok(PresetNetwork { network: b.build()?, origin: a, destination: z })
}

/// `A(0) → B(1)`, `A → C(2)`, `B → D(3)`, `C → D` with free-flow times
/// `[ab, ac, bd, cd]` and a shared capacity.
pub fn diamond(times: [f64; 4], capacity: f64) -> NetworkResult<PresetNetwork> {
    let [ab, ac, bd, cd] = times;
    let mut b = RoadNetworkBuilder::with_nodes(4);
    b.add_edge(NodeId(0), NodeId(1), ab, capacity);
    b.add_edge(NodeId(0), NodeId(2), ac, capacity);
    b.add_edge(NodeId(1), NodeId(3), bd, capacity);
    b.add_edge(NodeId(2), NodeId(3), cd, capacity);
    Ok(PresetNetwork { network: b.build()?, origin: NodeId(0), destination: NodeId(3) })
}

/// Routes 0→3: `[0,1,3]`, `[0,2,1,3]`, `[0,2,3]`.
pub fn deliverable() -> NetworkResult<PresetNetwork> {
    let mut b = RoadNetworkBuilder::with_nodes(4);
    for (from, to) in [(0, 1), (0, 2), (2, 1), (1, 3), (2, 3)] {
        b.add_edge(NodeId(from), NodeId(to), 1.0, 20.0);
    }
    Ok(PresetNetwork { network: b.build()?, origin: NodeId(0), destination: NodeId(3) })
}

/// Nine-node commute 0→8 with three corridors that cross at node 4.
pub fn commuter() -> NetworkResult<PresetNetwork> {
    const CAPACITY: f64 = 50.0;
    let mut b = RoadNetworkBuilder::with_nodes(9);

    // fastest corridor
    for (from, to) in [(0, 1), (1, 3), (3, 6), (6, 8)] {
        b.add_edge(NodeId(from), NodeId(to), 0.85, CAPACITY);
    }
    // shortest corridor
    for (from, to) in [(0, 2), (2, 5), (5, 7), (7, 8)] {
        b.add_edge(NodeId(from), NodeId(to), 1.17, CAPACITY);
    }
    // alternate links through node 4
    for (from, to) in [(1, 4), (2, 4), (4, 6), (4, 7)] {
        b.add_edge(NodeId(from), NodeId(to), 0.92, CAPACITY);
    }

    Ok(PresetNetwork { network: b.build()?, origin: NodeId(0), destination: NodeId(8) })
}
