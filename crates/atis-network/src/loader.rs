//! CSV edge-list loader.
//!
//! # CSV format
//!
//! One row per directed edge.  Node ids are dense `u32` indices; the node
//! count is one past the largest id mentioned.
//!
//! ```csv
//! from,to,free_flow_time,capacity
//! 0,1,0.85,50
//! 0,2,1.17,50
//! 1,3,0.85,50
//! ```
//!
//! `free_flow_time` is in hours, `capacity` in vehicles.  Edges keep the row
//! order among edges sharing a source node, which fixes the order in which
//! simple paths are enumerated.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use atis_core::NodeId;

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::NetworkError;

#[derive(Deserialize)]
struct EdgeRecord {
    from:           u32,
    to:             u32,
    free_flow_time: f64,
    capacity:       f64,
}

/// Load a [`RoadNetwork`] from a CSV file.
pub fn load_network_csv(path: &Path) -> Result<RoadNetwork, NetworkError> {
    let file = std::fs::File::open(path).map_err(NetworkError::Io)?;
    load_network_reader(file)
}

/// Like [`load_network_csv`] but accepts any `Read` source.
pub fn load_network_reader<R: Read>(reader: R) -> Result<RoadNetwork, NetworkError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = RoadNetworkBuilder::new();

    for result in csv_reader.deserialize::<EdgeRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        builder.add_edge(NodeId(row.from), NodeId(row.to), row.free_flow_time, row.capacity);
    }

    if builder.edge_count() == 0 {
        return Err(NetworkError::Parse("edge list is empty".into()));
    }
    builder.build()
}
