use thiserror::Error;

use atis_core::NodeId;
use atis_network::NetworkError;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("no path from {from} to {to}")]
    NoPathFound { from: NodeId, to: NodeId },

    #[error("unknown predictor kind {0:?}: expected current, prevision, or adherence")]
    UnknownKind(String),

    #[error("predictor configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type PredictResult<T> = Result<T, PredictError>;
