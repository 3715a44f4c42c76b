//! `atis-sim` — discrete-event loop for the ATIS commuter simulator.
//!
//! # Event loop
//!
//! ```text
//! seed: one CreateActor per actor at its departure time, then accidents
//! while queue not empty:
//!   pop earliest (ties: scheduling order)
//!   CreateActor → factory builds actor; start trip; choose first edge
//!                 → EdgeStart(now)
//!   EdgeStart   → tt = real travel time; volume += 1 → EdgeEnd(now + tt)
//!   EdgeEnd     → traverse; volume -= 1
//!                 → EdgeStart(now) for the next edge, or finalize on arrival
//!   Accident    → capacity *= factor
//!   (follow-ups at or after the horizon are dropped; seeds always fire)
//! truncate unfinished actors at the horizon and free their edges
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`event`]     | `Event`, `EventKind`                                     |
//! | [`scheduler`] | `EventScheduler` (ordered queue, horizon, pending query) |
//! | [`stats`]     | `StatsSink`, `RunStats`, occupancy series                |
//! | [`summary`]   | `ActorSummary`, `TravelTimeStats`                        |
//! | [`builder`]   | `SimBuilder`                                             |
//! | [`sim`]       | `Simulator`, `RunReport`                                 |
//! | [`replicate`] | `run_replicates`                                         |
//! | [`error`]     | `SimError`, `SimResult<T>`                               |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs replicates on Rayon's thread pool.                |
//! | `serde`    | Serializable stats, summaries, and reports.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use atis_actor::SoftmaxRouteFactory;
//! use atis_core::SimConfig;
//! use atis_network::NetworkPreset;
//! use atis_predict::PredictorKind;
//! use atis_sim::{RunStats, SimBuilder};
//!
//! let preset = NetworkPreset::Commuter.build()?;
//! let config = SimConfig { adoption: 0.3, ..SimConfig::default() };
//! let actors = SoftmaxRouteFactory::new(&preset.network, preset.origin, preset.destination, config.adoption)?;
//! let mut sim = SimBuilder::new(config, preset.network, actors, PredictorKind::Adherence).build()?;
//! let report = sim.run(&mut RunStats::new())?;
//! ```

pub mod builder;
pub mod error;
pub mod event;
pub mod replicate;
pub mod scheduler;
pub mod sim;
pub mod stats;
pub mod summary;


pub use builder::{Accident, SimBuilder};
pub use error::{SimError, SimResult};
pub use event::{Event, EventKind};
pub use replicate::{mean_truncated, pooled_summary, run_replicates, ReplicateOutput};
pub use scheduler::EventScheduler;
pub use sim::{RunReport, Simulator};
pub use stats::{occupancy, time_average, FlowSample, NoopStats, Occupancy, RunStats, StatsSink};
pub use summary::{ActorSummary, TravelTimeStats};
