//! `atis-core` — foundational types for the ATIS commuter simulator.
//!
//! This crate is a dependency of every other `atis-*` crate.  It has no
//! `atis-*` dependencies and few external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ActorId`, `NodeId`, `EdgeId`                         |
//! | [`time`]        | `SimTime` (simulated hours)                           |
//! | [`demand`]      | `MultimodalDistribution`, `DemandPeak`                |
//! | [`config`]      | `SimConfig`                                           |
//! | [`rng`]         | `SimRng` (per-run, seeded)                            |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod demand;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use demand::{DemandPeak, MultimodalDistribution};
pub use error::{CoreError, CoreResult};
pub use ids::{ActorId, EdgeId, NodeId};
pub use rng::SimRng;
pub use time::SimTime;
