//! `atis-actor` — commuter trip state and actor construction.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`actor`]   | `Actor`: one commuter's route, history, and travel time       |
//! | [`state`]   | `TripState` lifecycle enum                                    |
//! | [`factory`] | `ActorFactory`, `SoftmaxRouteFactory`, `FixedRouteFactory`    |
//! | [`error`]   | `ActorError`, `ActorResult<T>`                                |
//!
//! # Trip model
//!
//! An actor is created with a base route and, if guided, a handle to the
//! run's predictor.  The simulator drives it edge by edge:
//!
//! 1. `start_trip` places it at the route origin.
//! 2. `next_edge` picks the edge to enter: the next base-route edge for
//!    unguided actors, the predictor's choice for guided ones.
//! 3. `begin_edge` records the travel time the network quoted for it.
//! 4. `traverse` moves it to the edge's far end.
//! 5. On reaching the destination `finalize_travel_time` sums the recorded
//!    edge times; at the horizon `truncate` closes any unfinished trip.

pub mod actor;
pub mod error;
pub mod factory;
pub mod state;

#[cfg(test)]
mod tests;

pub use actor::Actor;
pub use error::{ActorError, ActorResult};
pub use factory::{softmax_travel_times, ActorFactory, CreateContext, FixedRouteFactory, SoftmaxRouteFactory};
pub use state::TripState;
