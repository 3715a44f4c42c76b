use thiserror::Error;

use atis_actor::ActorError;
use atis_core::{ActorId, CoreError};
use atis_network::NetworkError;
use atis_predict::PredictError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match actor count {expected}")]
    ActorCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("event refers to unknown actor {0}")]
    UnknownActor(ActorId),

    #[error("simulation has already run; build a new one")]
    AlreadyRun,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Predict(#[from] PredictError),

    #[error(transparent)]
    Actor(#[from] ActorError),
}

pub type SimResult<T> = Result<T, SimError>;
