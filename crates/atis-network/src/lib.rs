//! `atis-network` — road network, congestion model, and route enumeration.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`network`]    | `RoadNetwork` (CSR + live occupancy), `RoadNetworkBuilder`|
//! | [`congestion`] | BPR travel-time function                                  |
//! | [`paths`]      | `Route`, `all_simple_paths`                               |
//! | [`loader`]     | `load_network_csv`, `load_network_reader`                 |
//! | [`presets`]    | Small hand-built networks with origin/destination         |
//! | [`error`]      | `NetworkError`, `NetworkResult<T>`                        |
//!
//! # Mutable state
//!
//! Topology and free-flow times are fixed once built.  Two things change
//! during a run: per-edge `volume` (paired increment/decrement around every
//! traversal) and `capacity` (scaled in place by accident events).

pub mod congestion;
pub mod error;
pub mod loader;
pub mod network;
pub mod paths;
pub mod presets;

#[cfg(test)]
mod tests;

pub use congestion::bpr_travel_time;
pub use error::{NetworkError, NetworkResult};
pub use loader::{load_network_csv, load_network_reader};
pub use network::{EdgeData, RoadNetwork, RoadNetworkBuilder};
pub use paths::Route;
pub use presets::{NetworkPreset, PresetNetwork};
