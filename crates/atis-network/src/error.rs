//! Network-subsystem error type.

use thiserror::Error;

use atis_core::{EdgeId, NodeId};

/// Errors produced by `atis-network`.
///
/// `UnknownEdge`, `NoEdgeBetween` and `NegativeVolume` are invariant
/// violations during a run: the simulator treats them as fatal.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("edge {0} not found in network")]
    UnknownEdge(EdgeId),

    #[error("no edge from {from} to {to}")]
    NoEdgeBetween { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("volume of edge {0} would drop below zero")]
    NegativeVolume(EdgeId),

    #[error("invalid edge {from} -> {to}: {reason}")]
    InvalidEdge { from: NodeId, to: NodeId, reason: String },

    #[error("capacity scale factor {factor} for edge {edge} must be finite and positive")]
    InvalidScale { edge: EdgeId, factor: f64 },

    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("network parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
