//! `atis-predict` — route predictors (ATIS variants) for guided actors.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`context`]     | `PredictContext<'a>`, `PendingEdgeQuery`, `NoPending`      |
//! | [`predictor`]   | `RoutePredictor` trait (next-hop selection)                |
//! | [`current`]     | `CurrentAtis`: live edge times                             |
//! | [`prevision`]   | `PrevisionAtis`: demand-distribution extrapolation         |
//! | [`adherence`]   | `AdherenceAtis`: extrapolation from guided actors only     |
//! | [`factory`]     | `PredictorKind`, `PredictorSetup`, `PredictorFactory`      |
//! | [`error`]       | `PredictError`, `PredictResult<T>`                         |
//!
//! # Design notes
//!
//! A run has at most one predictor, built once by a [`PredictorFactory`] and
//! shared by every guided actor as `Arc<dyn RoutePredictor>`.  Predictors
//! hold no per-actor state; everything that changes during a run (edge
//! volumes, capacities, queued edge exits) is read through the
//! [`PredictContext`] passed to each call.

pub mod adherence;
pub mod context;
pub mod current;
pub mod error;
pub mod factory;
pub mod predictor;
pub mod prevision;


pub use adherence::AdherenceAtis;
pub use context::{NoPending, PendingEdgeQuery, PredictContext};
pub use current::CurrentAtis;
pub use error::{PredictError, PredictResult};
pub use factory::{PredictorFactory, PredictorKind, PredictorSetup};
pub use predictor::RoutePredictor;
pub use prevision::PrevisionAtis;
