use thiserror::Error;

use atis_core::{ActorId, EdgeId, NodeId};
use atis_network::NetworkError;
use atis_predict::PredictError;

use crate::TripState;

#[derive(Debug, Error)]
pub enum ActorError {
    #[error("actor {actor} is at {at} but was moved along edge {edge} which starts elsewhere")]
    DiscontinuousRoute { actor: ActorId, edge: EdgeId, at: NodeId },

    #[error("actor {actor} cannot {op} while {state:?}")]
    InvalidState { actor: ActorId, state: TripState, op: &'static str },

    #[error("actor {actor} has no base-route edge after {node}")]
    RouteExhausted { actor: ActorId, node: NodeId },

    #[error("no route from {from} to {to}")]
    NoRoutes { from: NodeId, to: NodeId },

    #[error("actor factory configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Predict(#[from] PredictError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type ActorResult<T> = Result<T, ActorError>;
